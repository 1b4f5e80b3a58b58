//! State and geometry of the presentational components.

pub mod floating_search;
pub mod loader;
pub mod modal;
pub mod multi_select;

/// A position in CSS pixels relative to the top left corner of the viewport.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
