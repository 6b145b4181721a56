//! Input mode selection and the content held for the active mode.

use crate::error::{InputError, ValidationError};
use crate::request::validate_and_build;
use crate::schema::{AnalysisRequest, InputType, SelectedFile};
use tracing::debug;

/// Holds exactly one active input mode and its content.
///
/// Content from a mode is dropped as soon as that mode is left, so a stale
/// file or text can never be submitted under a different mode.
#[derive(Debug, Clone, Default)]
pub struct InputSelector {
    mode: InputType,
    text: String,
    file: Option<SelectedFile>,
}

impl InputSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputType {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Switch mode, clearing whatever belonged to the mode being left.
    pub fn set_mode(&mut self, mode: InputType) {
        if mode == self.mode {
            return;
        }
        if self.mode == InputType::Text {
            self.text.clear();
        }
        if self.mode.is_file() {
            self.file = None;
        }
        debug!("InputSelector: {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    pub fn set_text(&mut self, value: impl Into<String>) -> Result<(), InputError> {
        if self.mode != InputType::Text {
            return Err(InputError::TextNotAccepted(self.mode));
        }
        self.text = value.into();
        Ok(())
    }

    /// Replace the selected file. Type mismatches are left to the server.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), InputError> {
        if !self.mode.is_file() {
            return Err(InputError::FileNotAccepted(self.mode));
        }
        debug!(
            "InputSelector: selected {} ({}, {} bytes)",
            file.name,
            file.mime_type,
            file.size()
        );
        self.file = Some(file);
        Ok(())
    }

    /// Drop text and file, keeping the mode.
    pub fn clear(&mut self) {
        self.text.clear();
        self.file = None;
    }

    pub fn has_content(&self) -> bool {
        !self.text.is_empty() || self.file.is_some()
    }

    pub fn build(&self) -> Result<AnalysisRequest, ValidationError> {
        validate_and_build(self.mode, &self.text, self.file.as_ref())
    }
}
