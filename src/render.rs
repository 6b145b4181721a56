//! Result section eligibility.
//!
//! Decides which blocks of an [`AnalysisResponse`] are shown. Drawing them is
//! up to the presentation adapters.

use crate::schema::{AnalysisResponse, Hospital, Medication};
use serde::Serialize;

/// Independently shown/hidden block of a rendered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Medications,
    Facilities,
    Insights,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Medications => "Medications",
            Self::Facilities => "Recommended Medical Facilities",
            Self::Insights => "Key Insights",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySection {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_percent: Option<u8>,
}

impl SummarySection {
    pub fn confidence_label(&self) -> Option<String> {
        self.confidence_percent.map(|p| format!("Confidence: {}%", p))
    }
}

/// Display-ready view of a response. `None` means the section is hidden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub summary: Option<SummarySection>,
    pub medications: Option<Vec<Medication>>,
    pub facilities: Option<Vec<Hospital>>,
    pub insights: Option<Vec<String>>,
}

impl ResultView {
    pub fn from_response(response: &AnalysisResponse) -> Self {
        let summary = (!response.summary.trim().is_empty()).then(|| SummarySection {
            text: response.summary.clone(),
            confidence_percent: response.confidence.map(confidence_percent),
        });

        let medications = non_empty(&response.medications).map(|meds| {
            meds.iter()
                .map(|m| Medication {
                    frequency: blank_to_none(m.frequency.as_deref()),
                    ..m.clone()
                })
                .collect()
        });

        let facilities = non_empty(&response.hospitals).map(|hospitals| {
            hospitals
                .iter()
                .map(|h| Hospital {
                    distance: blank_to_none(h.distance.as_deref()),
                    ..h.clone()
                })
                .collect()
        });

        let insights = non_empty(&response.key_insights).map(<[String]>::to_vec);

        Self {
            summary,
            medications,
            facilities,
            insights,
        }
    }

    pub fn shows(&self, section: Section) -> bool {
        match section {
            Section::Summary => self.summary.is_some(),
            Section::Medications => self.medications.is_some(),
            Section::Facilities => self.facilities.is_some(),
            Section::Insights => self.insights.is_some(),
        }
    }

    /// Visible sections in display order.
    pub fn sections(&self) -> Vec<Section> {
        [
            Section::Summary,
            Section::Medications,
            Section::Facilities,
            Section::Insights,
        ]
        .into_iter()
        .filter(|s| self.shows(*s))
        .collect()
    }
}

/// Confidence as a whole percentage. Out-of-range values are clamped to [0, 1].
pub fn confidence_percent(confidence: f64) -> u8 {
    if confidence.is_nan() {
        return 0;
    }
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn non_empty<T>(items: &[T]) -> Option<&[T]> {
    (!items.is_empty()).then_some(items)
}

fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
