//! Rectangles measured by child views and reported through explicit
//! measured callbacks. Nothing is read out of a view as a side effect of
//! rendering it.

use bs_core::Rect;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasuredLayout {
    /// Scrollable canvas wrapper.
    pub tree_wrap: Option<Rect>,
    /// Content tree inside the wrapper.
    pub tree: Option<Rect>,
    /// Form region the tour overlay is positioned against.
    pub form: Option<Rect>,
    pub fullscreen_button: Option<Rect>,
}

impl MeasuredLayout {
    pub fn canvas_measured(&mut self, tree_wrap: Rect, tree: Rect) -> bool {
        let changed = self.tree_wrap != Some(tree_wrap) || self.tree != Some(tree);
        self.tree_wrap = Some(tree_wrap);
        self.tree = Some(tree);
        changed
    }

    pub fn topbar_measured(&mut self, form: Rect, fullscreen_button: Rect) -> bool {
        let changed = self.form != Some(form) || self.fullscreen_button != Some(fullscreen_button);
        self.form = Some(form);
        self.fullscreen_button = Some(fullscreen_button);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_measurement_is_not_a_change() {
        let mut layout = MeasuredLayout::default();
        let wrap = Rect::new(0.0, 0.0, 800.0, 600.0);
        let tree = Rect::new(10.0, 10.0, 400.0, 300.0);
        assert!(layout.canvas_measured(wrap, tree));
        assert!(!layout.canvas_measured(wrap, tree));
        assert!(layout.canvas_measured(wrap, Rect::new(10.0, 10.0, 420.0, 300.0)));
    }
}
