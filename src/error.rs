//! Error taxonomy for the analysis pipeline.
//!
//! Validation and input errors are raised locally and never reach the
//! network. [`AnalysisFailed`] covers everything that goes wrong after a
//! request is sent.

use crate::schema::InputType;
use thiserror::Error;

/// Local validation failure. Blocks submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter text to analyze")]
    EmptyInput,

    #[error("Please select a {} file", .0.as_str().to_uppercase())]
    MissingFile(InputType),
}

/// An edit that does not belong to the active input mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Files cannot be attached in {0} mode")]
    FileNotAccepted(InputType),

    #[error("Text cannot be entered in {0} mode")]
    TextNotAccepted(InputType),
}

/// Transport or server-reported failure, carrying a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct AnalysisFailed(pub String);

impl AnalysisFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Anything the analysis screen surfaces inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Analysis(#[from] AnalysisFailed),
}
