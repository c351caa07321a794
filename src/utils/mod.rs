//! Utility functions shared across layers.
//!
//! - [`token_generator`] - Short link token generation and its configuration
//! - [`csv_export`] - Shopping list CSV rendering
//! - [`extract_user`] - Current user extraction from HTTP headers
//! - [`extract_host`] - Request host extraction for absolute short links
//! - [`db_error`] - Database error inspection

pub mod csv_export;
pub mod db_error;
pub mod extract_host;
pub mod extract_user;
pub mod token_generator;
