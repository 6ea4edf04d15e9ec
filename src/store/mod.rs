//! Content storage layer.
//!
//! `ContentStore` is the single source of truth for users, testimonials,
//! services, events and inquiries. Handlers depend on the trait; the only
//! implementation is the in-memory [`MemStore`], which lives for the lifetime
//! of the process and is rebuilt from fixtures on restart.

mod memory;
mod seed;

pub use memory::*;
pub use seed::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    EntityId, Event, Inquiry, NewEvent, NewInquiry, NewService, NewTestimonial, NewUser, Service,
    Testimonial, User,
};

/// Errors raised by a content store. "Not found" is not an error; lookups
/// return `None` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key (username, slug) is already taken.
    #[error("{0}")]
    Conflict(String),
    /// The store could not complete the operation.
    #[error("{0}")]
    Internal(String),
}

/// Create/read/list operations over every entity kind.
///
/// Each call is atomic with respect to the kind it touches. Listings are
/// materialized fresh on every call.
#[async_trait]
pub trait ContentStore: Send + Sync {
    // ==================== USERS ====================

    async fn get_user(&self, id: EntityId) -> Result<Option<User>, StoreError>;
    /// Exact, case-sensitive match.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    /// Fails with [`StoreError::Conflict`] if the username is taken.
    async fn create_user(&self, input: NewUser) -> Result<User, StoreError>;

    // ==================== TESTIMONIALS ====================

    /// Active testimonials, ascending by id.
    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, StoreError>;
    /// Direct lookup; inactive records are returned too.
    async fn get_testimonial(&self, id: EntityId) -> Result<Option<Testimonial>, StoreError>;
    async fn create_testimonial(&self, input: NewTestimonial) -> Result<Testimonial, StoreError>;

    // ==================== SERVICES ====================

    /// Active services, ascending by id.
    async fn list_services(&self) -> Result<Vec<Service>, StoreError>;
    /// Direct lookup; inactive records are returned too.
    async fn get_service(&self, id: EntityId) -> Result<Option<Service>, StoreError>;
    /// Public lookup: an inactive service is reported as absent.
    async fn get_service_by_slug(&self, slug: &str) -> Result<Option<Service>, StoreError>;
    /// Fails with [`StoreError::Conflict`] if the slug is taken, active or not.
    async fn create_service(&self, input: NewService) -> Result<Service, StoreError>;

    // ==================== EVENTS ====================

    /// Active events, ascending by date.
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;
    async fn get_event(&self, id: EntityId) -> Result<Option<Event>, StoreError>;
    async fn create_event(&self, input: NewEvent) -> Result<Event, StoreError>;

    // ==================== INQUIRIES ====================

    /// All inquiries, newest `created_at` first, ties broken by descending id.
    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, StoreError>;
    async fn get_inquiry(&self, id: EntityId) -> Result<Option<Inquiry>, StoreError>;
    /// Stamps `created_at` from the store's clock.
    async fn create_inquiry(&self, input: NewInquiry) -> Result<Inquiry, StoreError>;
}
