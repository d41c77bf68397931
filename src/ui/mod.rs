//! User interface module.
//!
//! This module handles all terminal rendering using the `ratatui` library.
//! It consumes the plain row/counter description produced by the view model;
//! no presentation rules live here beyond layout and styling.

type Frame<'a> = ratatui::Frame<'a>;

mod render;

pub use render::render;
