//! View-model for the submit-book form.

use crate::describe::DescriptionGenerator;
use crate::navigation::{Navigator, ScreenName};
use tracing::info;

pub const TOTAL_STEPS: u8 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitBookForm {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub price: String,
    pub format: String,
    pub genre: String,
    pub synopsis: String,
    step: u8,
    is_generating: bool,
}

impl Default for SubmitBookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            author: String::new(),
            price: String::new(),
            format: "Ebook".to_string(),
            genre: String::new(),
            synopsis: String::new(),
            step: 1,
            is_generating: false,
        }
    }
}

impl SubmitBookForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn step_label(&self) -> String {
        format!("Step {} of {}", self.step, TOTAL_STEPS)
    }

    pub fn progress_percent(&self) -> u8 {
        (u16::from(self.step) * 100 / u16::from(TOTAL_STEPS)) as u8
    }

    pub fn next(&mut self) {
        self.step = (self.step + 1).min(TOTAL_STEPS);
    }

    pub fn previous(&mut self) {
        self.step = self.step.saturating_sub(1).max(1);
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Keyword hint for the generator: genre and subtitle, whichever are set.
    pub fn keyword_hint(&self) -> String {
        [self.genre.trim(), self.subtitle.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Fill the synopsis from the generator. Always leaves the form usable.
    pub async fn generate_synopsis(&mut self, generator: &dyn DescriptionGenerator) {
        if self.is_generating {
            return;
        }
        self.is_generating = true;
        let hint = self.keyword_hint();
        info!(
            "SubmitBookForm: generating synopsis for '{}' via {}",
            self.title,
            generator.name()
        );
        self.synopsis = generator.describe(&self.title, &self.author, &hint).await;
        self.is_generating = false;
    }

    pub fn back(&self, navigator: &mut dyn Navigator) {
        navigator.navigate(ScreenName::Dashboard);
    }
}
