//! Plain-text rendering of the analysis screen.

use crate::render::Section;
use crate::schema::InputType;
use crate::screen::ScreenView;
use std::fmt::Write;

/// Mode selector line, active mode bracketed: `[Text]  PDF  Image`.
pub fn mode_tabs(active: InputType) -> String {
    InputType::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                format!("[{}]", mode.label())
            } else {
                mode.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render(view: &ScreenView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", mode_tabs(view.mode));

    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {}", error);
    }

    if view.is_analyzing {
        let _ = writeln!(out, "Processing medical document...");
    }

    let Some(result) = &view.result else {
        return out;
    };

    let _ = writeln!(out, "Analysis Complete");

    for section in result.sections() {
        let _ = writeln!(out, "\n== {} ==", section.title());
        match section {
            Section::Summary => {
                if let Some(summary) = &result.summary {
                    let _ = writeln!(out, "{}", summary.text);
                    if let Some(label) = summary.confidence_label() {
                        let _ = writeln!(out, "{}", label);
                    }
                }
            }
            Section::Medications => {
                for med in result.medications.iter().flatten() {
                    let _ = write!(out, "- {} | {} | {}", med.name, med.dosage, med.timing);
                    if let Some(frequency) = &med.frequency {
                        let _ = write!(out, " ({})", frequency);
                    }
                    out.push('\n');
                }
            }
            Section::Facilities => {
                for hospital in result.facilities.iter().flatten() {
                    let _ = write!(out, "- {}", hospital.name);
                    if let Some(distance) = &hospital.distance {
                        let _ = write!(out, " [{}]", distance);
                    }
                    let _ = writeln!(out, "\n  {}\n  {}", hospital.address, hospital.specialization);
                }
            }
            Section::Insights => {
                for insight in result.insights.iter().flatten() {
                    let _ = writeln!(out, "> {}", insight);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisFailed;
    use crate::schema::AnalysisResponse;
    use crate::screen::AnalysisScreen;

    #[test]
    fn test_render_result() {
        let mut screen = AnalysisScreen::new();
        screen.set_text("rx").unwrap();
        let pending = screen.begin_submit().unwrap();
        let response: AnalysisResponse = serde_json::from_str(
            r#"{"summary":"Two prescriptions","confidence":0.9,
                "medications":[{"name":"Amoxicillin","dosage":"500mg","timing":"After meals","frequency":"3x daily"}],
                "hospitals":[],
                "keyInsights":["Finish the course"]}"#,
        )
        .unwrap();
        screen.complete(pending.ticket, Ok(response));

        let text = render(&screen.view());
        assert!(text.contains("== Summary ==\nTwo prescriptions\nConfidence: 90%"));
        assert!(text.contains("- Amoxicillin | 500mg | After meals (3x daily)"));
        assert!(text.contains("> Finish the course"));
        assert!(!text.contains("Recommended Medical Facilities"));
    }

    #[test]
    fn test_render_error() {
        let mut screen = AnalysisScreen::new();
        screen.set_text("rx").unwrap();
        let pending = screen.begin_submit().unwrap();
        screen.complete(pending.ticket, Err(AnalysisFailed::new("server exploded")));

        assert_eq!(render(&screen.view()), "[Text]  PDF  Image\nError: server exploded\n");
    }

    #[test]
    fn test_mode_tabs_mark_active_mode() {
        assert_eq!(mode_tabs(InputType::Text), "[Text]  PDF  Image");
        assert_eq!(mode_tabs(InputType::Pdf), "Text  [PDF]  Image");
        assert_eq!(mode_tabs(InputType::Image), "Text  PDF  [Image]");
    }
}
