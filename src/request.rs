//! Request validation and assembly.

use crate::error::ValidationError;
use crate::schema::{AnalysisRequest, InputType, SelectedFile};

/// Build a submittable request from the current input, or say why not.
///
/// Only the content belonging to `mode` is looked at. Text is sent as typed;
/// trimming is only used to decide whether anything was entered.
pub fn validate_and_build(
    mode: InputType,
    text: &str,
    file: Option<&SelectedFile>,
) -> Result<AnalysisRequest, ValidationError> {
    match mode {
        InputType::Text => {
            if text.trim().is_empty() {
                return Err(ValidationError::EmptyInput);
            }
            Ok(AnalysisRequest::text(text))
        }
        InputType::Pdf | InputType::Image => {
            let file = file.ok_or(ValidationError::MissingFile(mode))?;
            Ok(AnalysisRequest::file(mode, file.clone()))
        }
    }
}
