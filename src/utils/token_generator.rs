//! Short link token generation.
//!
//! Tokens are fixed-length strings drawn uniformly from a configured alphabet.
//! The alphabet travels inside [`ShortLinkConfig`]; there is no shared global.

use rand::Rng;
use thiserror::Error;

/// Upper and lower case ASCII letters followed by digits.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 62^6 ≈ 5.7e10 possible tokens.
pub const DEFAULT_TOKEN_LENGTH: usize = 6;

/// Number of tokens drawn before generation gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Width of the `short_links.token` column.
pub const MAX_TOKEN_LENGTH: usize = 50;

/// Reasons a short link configuration is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("alphabet must contain at least 2 characters, got {0}")]
    AlphabetTooSmall(usize),

    #[error("alphabet may only contain ASCII letters and digits, found {0:?}")]
    InvalidCharacter(char),

    #[error("alphabet contains {0:?} more than once")]
    RepeatedCharacter(char),

    #[error("token length must be between 1 and 50, got {0}")]
    InvalidLength(usize),

    #[error("max attempts must be at least 1")]
    NoAttempts,
}

/// Token shape and retry budget for short link generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLinkConfig {
    alphabet: Vec<u8>,
    length: usize,
    max_attempts: usize,
}

impl ShortLinkConfig {
    /// Builds a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TokenConfigError`] if the alphabet has fewer than two distinct
    /// ASCII alphanumeric characters, the length is outside
    /// `1..=MAX_TOKEN_LENGTH`, or `max_attempts` is zero.
    pub fn new(alphabet: &str, length: usize, max_attempts: usize) -> Result<Self, TokenConfigError> {
        let mut bytes = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !c.is_ascii_alphanumeric() {
                return Err(TokenConfigError::InvalidCharacter(c));
            }
            if bytes.contains(&(c as u8)) {
                return Err(TokenConfigError::RepeatedCharacter(c));
            }
            bytes.push(c as u8);
        }

        if bytes.len() < 2 {
            return Err(TokenConfigError::AlphabetTooSmall(bytes.len()));
        }
        if length == 0 || length > MAX_TOKEN_LENGTH {
            return Err(TokenConfigError::InvalidLength(length));
        }
        if max_attempts == 0 {
            return Err(TokenConfigError::NoAttempts);
        }

        Ok(Self {
            alphabet: bytes,
            length,
            max_attempts,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn alphabet(&self) -> &str {
        // Only ASCII bytes are ever stored.
        std::str::from_utf8(&self.alphabet).unwrap_or_default()
    }

    /// Returns whether `token` has the configured length and alphabet.
    pub fn is_valid_token(&self, token: &str) -> bool {
        token.len() == self.length && token.bytes().all(|b| self.alphabet.contains(&b))
    }

    /// Draws a random token.
    pub fn generate_token<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        (0..self.length)
            .map(|_| char::from(self.alphabet[rng.random_range(0..self.alphabet.len())]))
            .collect()
    }
}

impl Default for ShortLinkConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.as_bytes().to_vec(),
            length: DEFAULT_TOKEN_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
