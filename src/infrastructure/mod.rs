//! Infrastructure layer for external integrations.
//!
//! Implements the repository traits defined by the domain layer and the
//! redirect cache.
//!
//! # Modules
//!
//! - [`cache`] - Token to recipe cache (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL and in-memory repositories

pub mod cache;
pub mod persistence;
