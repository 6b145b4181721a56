//! Wire types for the document analysis endpoint.
//!
//! These mirror the JSON the analysis backend returns and the multipart
//! fields it accepts.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One of the three mutually exclusive content sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Pdf,
    Image,
}

impl InputType {
    pub const ALL: [InputType; 3] = [InputType::Text, InputType::Pdf, InputType::Image];

    /// Value sent in the `inputType` multipart field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Pdf => "pdf",
            Self::Image => "image",
        }
    }

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Pdf => "PDF",
            Self::Image => "Image",
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::Pdf | Self::Image)
    }

    /// File picker filter hint. Not enforced client-side.
    pub fn accept_hint(&self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Pdf => Some(".pdf"),
            Self::Image => Some("image/*"),
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "pdf" => Ok(Self::Pdf),
            "image" => Ok(Self::Image),
            other => Err(format!("Unknown input type: {}. Expected text, pdf or image", other)),
        }
    }
}

/// A picked file plus the metadata the picker reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Read a file from disk, guessing the mime type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let mime_type = guess_mime_type(&name).to_string();
        Ok(Self::new(name, mime_type, data))
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Size as shown under the picker, e.g. `12.50 KB`.
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size() as f64 / 1024.0)
    }
}

/// Map a filename extension to a mime type. Unknown extensions are sent as
/// `application/octet-stream` and left for the server to judge.
pub fn guess_mime_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// One submission's payload. Only the field matching `input_type` is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub input_type: InputType,
    pub text: Option<String>,
    pub file: Option<SelectedFile>,
}

impl AnalysisRequest {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            input_type: InputType::Text,
            text: Some(value.into()),
            file: None,
        }
    }

    pub fn file(input_type: InputType, file: SelectedFile) -> Self {
        Self {
            input_type,
            text: None,
            file: Some(file),
        }
    }

    /// The text to send, if this is a text submission.
    pub fn effective_text(&self) -> Option<&str> {
        match self.input_type {
            InputType::Text => self.text.as_deref(),
            _ => None,
        }
    }

    /// The file to send, if this is a file submission.
    pub fn effective_file(&self) -> Option<&SelectedFile> {
        if self.input_type.is_file() {
            self.file.as_ref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub timing: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    pub address: String,
    pub specialization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

/// Structured analysis result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub medications: Vec<Medication>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hospitals: Vec<Hospital>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_insights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
