//! Editor configuration.
//!
//! Every field has a default matching the stock editor, so hosts only pass
//! the values they want to change: `{"resizeThrottleMs": 100}` is a complete
//! config.

use crate::error::{Error, Result};
use crate::geometry::Spacing;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage key for the "tour seen" flag. The version suffix lets a redesigned
/// tour be shown again to users who dismissed the old one.
pub const TOUR_SEEN_KEY: &str = "h5p-editor-branching-scenario-tour-v1-seen";

// ─── Config ───────────────────────────────────────────────────────────────

/// How often the fullscreen confirmation dialog appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FullscreenConfirm {
    /// Every entry attempt shows the dialog.
    #[default]
    Always,
    /// Only the first entry attempt of a session shows the dialog.
    FirstOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Minimum interval between resize-driven re-center requests. Default: **66 ms**.
    pub resize_throttle_ms: u64,

    /// Upper bound on library loading before the gate opens degraded.
    /// Default: **10 000 ms**.
    pub library_load_timeout_ms: u64,

    /// Canvas node width before the palette reports its own size.
    pub node_width: f32,
    pub node_height: f32,
    pub node_spacing: Spacing,

    /// Palette node width that corresponds to `node_width` on the canvas.
    /// Reported palette widths are scaled by `node_width / palette_node_width`.
    pub palette_node_width: f32,

    /// Pixel insets added to the fullscreen button origin before converting
    /// to percentages.
    pub tour_inset_x: f32,
    pub tour_inset_y: f32,

    /// Pixels removed from the button's width and height for the highlight box.
    pub tour_deflate: f32,

    pub tour_storage_key: String,

    pub fullscreen_confirm: FullscreenConfirm,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            resize_throttle_ms: 66,
            library_load_timeout_ms: 10_000,
            node_width: 176.0,
            node_height: 32.0,
            node_spacing: Spacing { x: 29.0, y: 17.0 },
            palette_node_width: 152.0,
            tour_inset_x: 8.0,
            tour_inset_y: 6.0,
            tour_deflate: 18.0,
            tour_storage_key: TOUR_SEEN_KEY.to_string(),
            fullscreen_confirm: FullscreenConfirm::Always,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    /// Returns [`Error::Json`] for malformed input and [`Error::InvalidConfig`]
    /// for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resize_throttle_ms == 0 {
            return Err(Error::InvalidConfig(
                "resizeThrottleMs must be greater than zero".into(),
            ));
        }
        if self.library_load_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "libraryLoadTimeoutMs must be greater than zero".into(),
            ));
        }
        for (name, value) in [
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
            ("paletteNodeWidth", self.palette_node_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.tour_storage_key.is_empty() {
            return Err(Error::InvalidConfig("tourStorageKey is empty".into()));
        }
        Ok(())
    }

    pub fn resize_throttle(&self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }

    pub fn library_load_timeout(&self) -> Duration {
        Duration::from_millis(self.library_load_timeout_ms)
    }

    /// Canvas-to-palette node width ratio (176/152 by default).
    pub fn node_width_ratio(&self) -> f32 {
        self.node_width / self.palette_node_width
    }
}
