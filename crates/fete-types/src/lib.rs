//! Fete shared types.
//!
//! Wire and domain models used by the REST service, the relational store and
//! the client-side adapter. Field names on the wire are camelCase.

pub mod api;
pub mod models;
pub mod validation;

pub use api::{ErrorBody, HealthResponse, NewCelebration, NewWish};
pub use models::{Celebration, CelebrationInput, EventType, Flavor, Wish, WishInput};
pub use validation::{MAX_IMAGES, ValidationError};

/// Fresh opaque identifier for a celebration or wish.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
