//! Measured rectangles and node sizing.

use serde::{Deserialize, Serialize};

/// A measured client rectangle, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// True when either dimension is zero, negative, or not a number.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A canvas offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub x: f32,
    pub y: f32,
}

// ─── Node size ───────────────────────────────────────────────────────────

/// Size of a content node on the canvas, negotiated from the palette.
///
/// Palette and canvas nodes share a height but canvas nodes are wider by a
/// fixed ratio (176/152 in the stock theme).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSize {
    pub width: f32,
    pub height: f32,
    /// Raw palette width the canvas width was derived from. Used for the
    /// ghost node while dragging from the palette.
    pub inserting_width: Option<f32>,
    pub spacing: Spacing,
}

impl NodeSize {
    pub fn new(width: f32, height: f32, spacing: Spacing) -> Self {
        Self {
            width,
            height,
            inserting_width: None,
            spacing,
        }
    }

    /// Derive the canvas node size from a palette node measurement.
    ///
    /// Returns `None` when the report would not change width or height, which
    /// breaks the measure → set → re-render → measure loop. A zero dimension
    /// in the report leaves the stored dimension untouched.
    pub fn negotiate(
        &self,
        palette: Rect,
        canvas_width: f32,
        palette_width: f32,
    ) -> Option<NodeSize> {
        let width = (palette.width > 0.0)
            .then(|| (palette.width * canvas_width / palette_width).ceil());
        let height = (palette.height > 0.0).then_some(palette.height);

        let width_changed = width.is_some_and(|w| w != self.width);
        let height_changed = height.is_some_and(|h| h != self.height);
        if !width_changed && !height_changed {
            return None;
        }

        Some(NodeSize {
            width: width.unwrap_or(self.width),
            height: height.unwrap_or(self.height),
            inserting_width: (palette.width > 0.0)
                .then_some(palette.width)
                .or(self.inserting_width),
            spacing: self.spacing,
        })
    }
}
