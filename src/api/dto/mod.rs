//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod health;
pub mod ingredient;
pub mod recipe;
pub mod shopping_cart;
pub mod short_link;
pub mod subscription;
pub mod tag;
