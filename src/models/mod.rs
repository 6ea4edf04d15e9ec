//! Data models for the Devine Senior Living content API.
//!
//! Every entity serializes in camelCase and writes absent optional fields as
//! explicit `null` so clients never have to tell "missing" from "empty".

mod defaults;
mod event;
mod inquiry;
mod service;
mod testimonial;
mod user;

pub use defaults::*;
pub use event::*;
pub use inquiry::*;
pub use service::*;
pub use testimonial::*;
pub use user::*;

/// Synthetic identity assigned by the store, unique per entity kind.
pub type EntityId = i32;
