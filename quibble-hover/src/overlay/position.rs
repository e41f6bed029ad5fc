//! Placement math for the hover overlay.
//!
//! The overlay is centered on the hovered token and sits just above it, with
//! both axes clamped so the overlay's box stays inside the viewport. Sizes
//! must be measured after the overlay's content is attached and laid out;
//! callers recompute placement whenever the content (and therefore the
//! measured size) changes.

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A measured size in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// An axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Horizontal midpoint of the box.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

fn clamp(min: f64, value: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Compute the overlay's top-left corner.
///
/// Horizontally centered on the anchor's midpoint, clamped to
/// `[0, viewport.width - overlay.width]`; bottom edge `gap` above the
/// anchor's top edge, clamped to `[0, viewport.height - overlay.height]`.
#[must_use]
pub fn place(anchor: Rect, overlay: Size, viewport: Size, gap: f64) -> Point {
    let x = clamp(
        0.0,
        anchor.center_x() - overlay.width / 2.0,
        viewport.width - overlay.width,
    );
    let y = clamp(
        0.0,
        anchor.y - overlay.height - gap,
        viewport.height - overlay.height,
    );
    Point { x, y }
}
