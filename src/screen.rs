//! View-model for the medical document analysis screen.
//!
//! Owns the input selector, the submission state machine and the last
//! result. Every transition is a `&mut self` call made from a UI event;
//! the only suspension point is the transport call inside [`AnalysisScreen::submit`].
//!
//! ```text
//! Idle -> Validating -> Submitting -> Success | Failed -> Idle
//! ```

use crate::error::{AnalysisFailed, InputError, ScreenError};
use crate::input::InputSelector;
use crate::render::ResultView;
use crate::schema::{AnalysisRequest, AnalysisResponse, InputType, SelectedFile};
use crate::transport::AnalysisTransport;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// A validated submission that has been handed out for sending.
///
/// The ticket ties the eventual response back to this submission so that
/// late responses can be recognised and dropped.
#[derive(Debug)]
pub struct PendingSubmission {
    pub id: Uuid,
    pub ticket: u64,
    pub request: AnalysisRequest,
}

#[derive(Debug, Default)]
pub struct AnalysisScreen {
    input: InputSelector,
    state: ScreenState,
    result: Option<AnalysisResponse>,
    error: Option<ScreenError>,
    ticket: u64,
    /// Ticket of the submission awaiting a response.
    in_flight: Option<u64>,
    /// Set by `clear` while a submission is outstanding.
    discard_in_flight: bool,
    detached: bool,
}

impl AnalysisScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn input(&self) -> &InputSelector {
        &self.input
    }

    pub fn result(&self) -> Option<&AnalysisResponse> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&ScreenError> {
        self.error.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn set_mode(&mut self, mode: InputType) {
        self.input.set_mode(mode);
        self.error = None;
    }

    pub fn set_text(&mut self, value: impl Into<String>) -> Result<(), InputError> {
        self.input.set_text(value)
    }

    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), InputError> {
        self.input.select_file(file)?;
        self.error = None;
        Ok(())
    }

    /// Validate the current input and, if it passes, move to `Submitting`.
    ///
    /// Returns `None` when a submission is already in flight, when the screen
    /// has been torn down, or when validation fails (the error is kept for
    /// display and nothing is sent).
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if self.detached {
            debug!("AnalysisScreen: submit after teardown ignored");
            return None;
        }
        if self.is_analyzing() {
            debug!("AnalysisScreen: submission already in flight, ignoring");
            return None;
        }

        self.error = None;
        self.result = None;
        self.state = ScreenState::Validating;

        match self.input.build() {
            Ok(request) => {
                self.ticket += 1;
                self.in_flight = Some(self.ticket);
                self.discard_in_flight = false;
                self.state = ScreenState::Submitting;
                let pending = PendingSubmission {
                    id: Uuid::new_v4(),
                    ticket: self.ticket,
                    request,
                };
                info!(
                    "AnalysisScreen: submission {} started ({})",
                    pending.id, pending.request.input_type
                );
                Some(pending)
            }
            Err(e) => {
                debug!("AnalysisScreen: validation failed: {}", e);
                self.error = Some(e.into());
                self.state = ScreenState::Failed;
                None
            }
        }
    }

    /// Apply the outcome of a submission. Returns whether it was applied.
    ///
    /// Outcomes for a torn-down screen, for a ticket that is not in flight,
    /// or for a submission cleared while it was outstanding are dropped.
    /// Dropping the in-flight outcome still releases the submit gate.
    pub fn complete(
        &mut self,
        ticket: u64,
        outcome: Result<AnalysisResponse, AnalysisFailed>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            warn!("AnalysisScreen: discarding stale response for ticket {}", ticket);
            return false;
        }
        self.in_flight = None;

        if self.detached {
            debug!("AnalysisScreen: response after teardown dropped");
            return false;
        }
        if std::mem::take(&mut self.discard_in_flight) {
            debug!("AnalysisScreen: response for cleared submission dropped");
            self.state = ScreenState::Idle;
            return false;
        }

        match outcome {
            Ok(response) => {
                self.result = Some(response);
                self.state = ScreenState::Success;
            }
            Err(e) => {
                self.error = Some(e.into());
                self.state = ScreenState::Failed;
            }
        }
        true
    }

    /// Validate, send and apply in one go.
    pub async fn submit(&mut self, transport: &dyn AnalysisTransport) -> ScreenState {
        if let Some(PendingSubmission { id, ticket, request }) = self.begin_submit() {
            let outcome = transport.submit(request).await;
            if let Err(e) = &outcome {
                info!("AnalysisScreen: submission {} failed: {}", id, e);
            }
            self.complete(ticket, outcome);
        }
        self.state
    }

    /// Reset text, file, result and error.
    ///
    /// An outstanding submission stays in flight, so resubmission remains
    /// blocked until its response arrives and is dropped.
    pub fn clear(&mut self) {
        self.input.clear();
        self.result = None;
        self.error = None;
        if self.is_analyzing() {
            self.discard_in_flight = true;
        } else {
            self.state = ScreenState::Idle;
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
        if self.state == ScreenState::Failed {
            self.state = ScreenState::Idle;
        }
    }

    /// Mark the screen as no longer displayed.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    pub fn view(&self) -> ScreenView {
        let file = self.input.file();
        ScreenView {
            state: self.state,
            mode: self.input.mode(),
            text: self.input.text().to_string(),
            file_name: file.map(|f| f.name.clone()),
            file_size: file.map(SelectedFile::size_label),
            file_accept: self.input.mode().accept_hint(),
            is_analyzing: self.is_analyzing(),
            submit_label: if self.is_analyzing() {
                "Analyzing..."
            } else {
                "Analyze Document"
            },
            show_clear: self.input.has_content() || self.result.is_some(),
            error: self.error.as_ref().map(ToString::to_string),
            result: self.result.as_ref().map(ResultView::from_response),
        }
    }
}

/// Everything a presentation adapter needs to draw the screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenView {
    pub state: ScreenState,
    pub mode: InputType,
    pub text: String,
    pub file_name: Option<String>,
    pub file_size: Option<String>,
    pub file_accept: Option<&'static str>,
    pub is_analyzing: bool,
    pub submit_label: &'static str,
    pub show_clear: bool,
    pub error: Option<String>,
    pub result: Option<ResultView>,
}
