//! Onboarding tour: one-time placement of the fullscreen-button highlight.
//!
//! The tour resolves once both inputs are in, in either order: the persisted
//! "seen" flag and the measured topbar layout. Placement is expressed as
//! percentages of the containing form so it survives later resizes without
//! being recomputed.

use crate::config::EditorConfig;
use crate::error::Error;
use crate::geometry::Rect;
use serde::Serialize;

/// Highlight box over the fullscreen button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourGeometry {
    pub width_px: f32,
    pub height_px: f32,
    /// Offset from the form's left edge, in percent of its width.
    pub left_pct: f32,
    /// Offset from the form's top edge, in percent of its height.
    pub top_pct: f32,
}

impl TourGeometry {
    /// Place the highlight relative to `form`. Returns `None` when the form
    /// has not been laid out yet (zero size), since percentages of it are
    /// meaningless.
    pub fn resolve(form: Rect, button: Rect, config: &EditorConfig) -> Option<Self> {
        if form.is_empty() {
            return None;
        }
        Some(Self {
            width_px: (button.width - config.tour_deflate).max(0.0),
            height_px: (button.height - config.tour_deflate).max(0.0),
            left_pct: (button.left + config.tour_inset_x - form.left) / form.width * 100.0,
            top_pct: (button.top + config.tour_inset_y - form.top) / form.height * 100.0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TourPhase {
    /// Never started (fullscreen unsupported, or not mounted yet).
    Inactive,
    AwaitingFlag,
    /// Flag says unseen; waiting for a usable layout measurement.
    AwaitingLayout,
    Showing(TourGeometry),
    /// Closed this session. Terminal.
    Dismissed,
    /// Already seen in an earlier session. Terminal.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct Onboarding {
    phase: TourPhase,
    layout: Option<(Rect, Rect)>,
}

impl Default for Onboarding {
    fn default() -> Self {
        Self::new()
    }
}

impl Onboarding {
    pub fn new() -> Self {
        Self {
            phase: TourPhase::Inactive,
            layout: None,
        }
    }

    pub fn start(&mut self) {
        if self.phase == TourPhase::Inactive {
            self.phase = TourPhase::AwaitingFlag;
        }
    }

    /// Handle the persisted flag. A failed read counts as "unseen", so a
    /// broken store shows the tour rather than hiding it for good.
    /// Returns `true` if the tour became visible.
    pub fn flag_loaded(&mut self, seen: Result<bool, Error>, config: &EditorConfig) -> bool {
        if self.phase != TourPhase::AwaitingFlag {
            return false;
        }
        let seen = seen.unwrap_or_else(|e| {
            log::warn!("tour: {e}; treating tour as unseen");
            false
        });
        if seen {
            self.phase = TourPhase::Skipped;
            return false;
        }
        self.phase = TourPhase::AwaitingLayout;
        self.try_resolve(config)
    }

    /// Record the form and fullscreen-button rectangles. Ignored once the
    /// tour is placed or finished. Returns `true` if the tour became visible.
    pub fn layout_measured(&mut self, form: Rect, button: Rect, config: &EditorConfig) -> bool {
        if matches!(
            self.phase,
            TourPhase::Showing(_) | TourPhase::Dismissed | TourPhase::Skipped
        ) {
            return false;
        }
        self.layout = Some((form, button));
        self.try_resolve(config)
    }

    /// Dismiss the tour. Returns `true` if it was showing, meaning the
    /// caller must persist the "seen" flag.
    pub fn close(&mut self) -> bool {
        if let TourPhase::Showing(_) = self.phase {
            self.phase = TourPhase::Dismissed;
            return true;
        }
        false
    }

    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    pub fn geometry(&self) -> Option<TourGeometry> {
        match self.phase {
            TourPhase::Showing(geometry) => Some(geometry),
            _ => None,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.geometry().is_some()
    }

    fn try_resolve(&mut self, config: &EditorConfig) -> bool {
        if self.phase != TourPhase::AwaitingLayout {
            return false;
        }
        let Some((form, button)) = self.layout else {
            return false;
        };
        match TourGeometry::resolve(form, button, config) {
            Some(geometry) => {
                log::info!(
                    "tour: showing at {:.1}% / {:.1}%",
                    geometry.left_pct,
                    geometry.top_pct
                );
                self.phase = TourPhase::Showing(geometry);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FORM: Rect = Rect::new(100.0, 50.0, 1000.0, 400.0);
    const BUTTON: Rect = Rect::new(592.0, 94.0, 58.0, 48.0);

    #[test]
    fn geometry_applies_insets_and_deflation() {
        let g = TourGeometry::resolve(FORM, BUTTON, &EditorConfig::default()).unwrap();
        assert_eq!(
            g,
            TourGeometry {
                width_px: 40.0,
                height_px: 30.0,
                // (592 + 8 - 100) / 1000
                left_pct: 50.0,
                // (94 + 6 - 50) / 400
                top_pct: 12.5,
            }
        );
    }

    #[test]
    fn unmeasured_form_yields_no_geometry() {
        assert_eq!(
            TourGeometry::resolve(Rect::default(), BUTTON, &EditorConfig::default()),
            None
        );
    }

    #[test]
    fn resolves_when_layout_arrives_after_flag() {
        let config = EditorConfig::default();
        let mut tour = Onboarding::new();
        tour.start();
        assert!(!tour.flag_loaded(Ok(false), &config));
        assert_eq!(tour.phase(), TourPhase::AwaitingLayout);
        assert!(tour.layout_measured(FORM, BUTTON, &config));
        assert!(tour.is_showing());
    }

    #[test]
    fn resolves_when_flag_arrives_after_layout() {
        let config = EditorConfig::default();
        let mut tour = Onboarding::new();
        tour.start();
        assert!(!tour.layout_measured(FORM, BUTTON, &config));
        assert!(tour.flag_loaded(Ok(false), &config));
    }

    #[test]
    fn seen_flag_skips_tour() {
        let config = EditorConfig::default();
        let mut tour = Onboarding::new();
        tour.start();
        tour.layout_measured(FORM, BUTTON, &config);
        assert!(!tour.flag_loaded(Ok(true), &config));
        assert_eq!(tour.phase(), TourPhase::Skipped);
    }

    #[test]
    fn storage_failure_shows_tour() {
        let config = EditorConfig::default();
        let mut tour = Onboarding::new();
        tour.start();
        tour.layout_measured(FORM, BUTTON, &config);
        assert!(tour.flag_loaded(
            Err(Error::StorageUnavailable("quota".into())),
            &config
        ));
    }

    #[test]
    fn geometry_is_not_recomputed_after_placement_or_dismissal() {
        let config = EditorConfig::default();
        let mut tour = Onboarding::new();
        tour.start();
        tour.flag_loaded(Ok(false), &config);
        tour.layout_measured(FORM, BUTTON, &config);
        let placed = tour.geometry();

        let moved = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!tour.layout_measured(moved, moved, &config));
        assert_eq!(tour.geometry(), placed);

        assert!(tour.close());
        assert!(!tour.layout_measured(FORM, BUTTON, &config));
        assert_eq!(tour.phase(), TourPhase::Dismissed);
        assert!(!tour.close());
    }

    #[test]
    fn not_started_ignores_flag() {
        let config = EditorConfig::default();
        let mut tour = Onboarding::new();
        assert!(!tour.flag_loaded(Ok(false), &config));
        assert_eq!(tour.phase(), TourPhase::Inactive);
    }
}
