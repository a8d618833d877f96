//! Simulation errors

use thiserror::Error;

/// Errors raised by the simulation core and its loaders
#[derive(Debug, Error)]
pub enum SimError {
    /// A geometric argument was not a usable vector (NaN or infinite component)
    #[error("expected a finite vector for {what}")]
    TypeKind { what: &'static str },

    /// Settings or level plans could not be decoded
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings or plan file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A level plan has no rows
    #[error("level plan has no rows")]
    EmptyPlan,
}

pub type Result<T> = std::result::Result<T, SimError>;
