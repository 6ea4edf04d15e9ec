//! Cross-cutting request middleware.

mod rate_limit;

pub use rate_limit::*;
