//! Default values applied when an optional input field is absent.

/// Role given to a user created without one.
pub const DEFAULT_USER_ROLE: &str = "user";

/// Star rating given to a testimonial created without one.
pub const DEFAULT_TESTIMONIAL_STARS: i32 = 5;

/// Visibility of testimonials, services and events created without an explicit flag.
pub const DEFAULT_IS_ACTIVE: bool = true;
