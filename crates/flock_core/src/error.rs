//! Error types for the content model and purchase economy.
//!
//! Everything here is a content-integrity or plumbing failure. A player
//! who cannot afford something yet is never an error; those checks
//! return `bool`.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all game model errors.
#[derive(Debug, Error)]
pub enum GameError {
    /// A price or reward names a currency outside the fixed enumeration.
    #[error("Price has a currency that doesn't exist: {0}")]
    InvalidCurrency(String),

    /// A site set names a site type outside the fixed enumeration.
    #[error("Site set has a site type that doesn't exist: {0}")]
    InvalidSiteType(String),

    /// An item lookup matched zero or more than one object.
    #[error("Duplicate item ID or no item with given id: {0}")]
    AmbiguousOrMissingItem(String),

    /// A template or saved state was paired with the wrong object variant.
    #[error("Object '{id}' expected {expected} data, found {found} data")]
    StateMismatch {
        /// Object identifier.
        id: String,
        /// Variant that was expected.
        expected: String,
        /// Variant that was supplied.
        found: String,
    },

    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path to the file that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// Content tables failed validation.
    #[error("Content validation failed: {errors:?}")]
    ContentValidation {
        /// Every problem found, one message each.
        errors: Vec<String>,
    },

    /// Invalid game state.
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}
