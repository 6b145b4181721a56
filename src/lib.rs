//! Marketplace Shell - app shell for a book marketplace with a medical
//! document analysis screen.
//!
//! The analysis pipeline runs input selection ([`input`]), validation
//! ([`request`]), transport ([`transport`]) and section rendering
//! ([`render`]), tied together by the [`screen`] view-model. Presentation
//! targets live in [`adapters`].

pub mod adapters;
pub mod config;
pub mod describe;
pub mod error;
pub mod input;
pub mod navigation;
pub mod render;
pub mod request;
pub mod schema;
pub mod screen;
pub mod submit_book;
pub mod transport;

pub use config::AppConfig;
pub use error::{AnalysisFailed, InputError, ScreenError, ValidationError};
pub use schema::{AnalysisRequest, AnalysisResponse, Hospital, InputType, Medication, SelectedFile};
pub use screen::{AnalysisScreen, ScreenState, ScreenView};
pub use transport::{AnalysisTransport, HttpAnalysisClient};
