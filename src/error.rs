//! Typed failures raised while generating release notes.

use thiserror::Error;

use crate::inputs::OwnerKind;

/// Main error type for release-scribe operations.
#[derive(Error, Debug)]
pub enum ScribeError {
    // Input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Remote lookup errors
    #[error("No project found for {kind} '{owner}' with number {number}")]
    ProjectNotFound {
        kind: OwnerKind,
        owner: String,
        number: u64,
    },

    #[error("HTTP error: {status}, response: {body}")]
    Http { status: u16, body: String },

    #[error("GraphQL errors: {body}")]
    GraphQL { body: String },

    #[error("Response is missing expected data: {0}")]
    MissingData(String),
}

impl ScribeError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a missing data error
    pub fn missing_data(msg: impl Into<String>) -> Self {
        Self::MissingData(msg.into())
    }
}
