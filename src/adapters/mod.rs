//! Presentation adapters over the screen view-models.
//!
//! Each adapter only draws a [`crate::screen::ScreenView`]; none of them
//! derive state of their own.

pub mod terminal;
pub mod web;
