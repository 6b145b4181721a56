//! Screen routing.
//!
//! Views receive a [`Navigator`] instead of a raw "current screen" setter.
//! [`Router`] is the stack-backed implementation the app runs with.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreenName {
    Splash,
    Landing,
    Auth,
    Marketplace,
    BookDetails,
    Dashboard,
    SubmitBook,
    Library,
    Profile,
    Notifications,
    MedicalAnalysis,
}

impl ScreenName {
    /// Whether the bottom navigation bar is drawn on this screen.
    pub fn shows_bottom_nav(&self) -> bool {
        BOTTOM_NAV.iter().any(|item| item.screen == *self)
    }
}

/// Entry in the bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub screen: ScreenName,
}

pub static BOTTOM_NAV: [NavItem; 5] = [
    NavItem { label: "Home", icon: "home", screen: ScreenName::Marketplace },
    NavItem { label: "Library", icon: "collections-bookmark", screen: ScreenName::Library },
    NavItem { label: "Submit", icon: "add-circle", screen: ScreenName::SubmitBook },
    NavItem { label: "Dashboard", icon: "dashboard", screen: ScreenName::Dashboard },
    NavItem { label: "Profile", icon: "person", screen: ScreenName::Profile },
];

/// Navigation capability handed to views.
pub trait Navigator {
    fn navigate(&mut self, screen: ScreenName);

    /// Go back one screen. Returns false at the root.
    fn back(&mut self) -> bool;

    fn current(&self) -> ScreenName;
}

/// Stack of screens. Tabs reset the stack; everything else is pushed.
#[derive(Debug, Clone)]
pub struct Router {
    stack: Vec<ScreenName>,
}

impl Router {
    pub fn new(initial: ScreenName) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The highlighted bottom-nav tab, if the current screen is one.
    pub fn active_tab(&self) -> Option<&'static NavItem> {
        let current = self.current();
        BOTTOM_NAV.iter().find(|item| item.screen == current)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(ScreenName::MedicalAnalysis)
    }
}

impl Navigator for Router {
    fn navigate(&mut self, screen: ScreenName) {
        if screen == self.current() {
            return;
        }
        if screen.shows_bottom_nav() {
            self.stack.clear();
        }
        debug!("Router: -> {:?}", screen);
        self.stack.push(screen);
    }

    fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    fn current(&self) -> ScreenName {
        self.stack.last().copied().unwrap_or(ScreenName::MedicalAnalysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back() {
        let mut router = Router::new(ScreenName::Splash);
        router.navigate(ScreenName::Landing);
        router.navigate(ScreenName::Auth);
        assert_eq!(router.current(), ScreenName::Auth);
        assert!(router.back());
        assert_eq!(router.current(), ScreenName::Landing);
        assert!(router.back());
        assert!(!router.back());
        assert_eq!(router.current(), ScreenName::Splash);
    }

    #[test]
    fn test_tab_resets_stack() {
        let mut router = Router::new(ScreenName::Auth);
        router.navigate(ScreenName::BookDetails);
        router.navigate(ScreenName::Library);
        assert_eq!(router.depth(), 1);
        assert!(!router.can_go_back());
        assert_eq!(router.active_tab().map(|t| t.label), Some("Library"));
    }

    #[test]
    fn test_same_screen_is_noop() {
        let mut router = Router::new(ScreenName::Marketplace);
        router.navigate(ScreenName::BookDetails);
        router.navigate(ScreenName::BookDetails);
        assert_eq!(router.depth(), 2);
        assert!(router.active_tab().is_none());
    }

    #[test]
    fn test_bottom_nav_visibility() {
        assert!(ScreenName::Dashboard.shows_bottom_nav());
        assert!(ScreenName::SubmitBook.shows_bottom_nav());
        assert!(!ScreenName::MedicalAnalysis.shows_bottom_nav());
        assert!(!ScreenName::Notifications.shows_bottom_nav());
        assert_eq!(Router::default().current(), ScreenName::MedicalAnalysis);
    }
}
