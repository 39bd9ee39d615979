//! Error types for the astrocal_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for astrocal_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Energy model invoked before the profile has all required attributes
    #[error("profile is incomplete: sex, age, weight, height and activity are all required")]
    IncompleteProfile,

    /// A profile attribute is outside its plausible range
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// Referenced food is not present (in the catalog or in the day's ledger)
    #[error("not found: {0}")]
    NotFound(String),

    /// Login/registration failure
    #[error("authentication error: {0}")]
    Auth(String),

    /// Persistence error
    #[error("store error: {0}")]
    Store(String),
}
