//! Scenario content as seen by the controller.
//!
//! The canvas owns the content tree; the controller only forwards it to the
//! host and derives a few flags from it (zoom availability, highlight).

use crate::id::{ContentId, optional_content_id};
use serde::{Deserialize, Serialize};

/// One node of the branching scenario. Fields the controller does not read
/// are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_content_id: Option<i64>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Scenario-wide scoring mode, read from the settings tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringOption {
    NoScore,
    StaticEndScore,
    DynamicScore,
}

/// Visual flag on default (unconfigured) branch endings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    #[serde(default, deserialize_with = "optional_content_id")]
    pub id: Option<ContentId>,
    /// Restrict the highlight to a single branch ending.
    pub only_branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentState {
    pub zoom_disabled: bool,
    pub default_end_scenarios: u32,
    pub scoring_option: Option<ScoringOption>,
    pub highlight: Highlight,
    /// Draggable node the pointer is over, if any.
    pub draggable_hovered: Option<ContentId>,
}

impl ContentState {
    /// Zoom starts disabled for an empty scenario.
    pub fn new(initial_len: usize) -> Self {
        Self {
            zoom_disabled: initial_len == 0,
            default_end_scenarios: 0,
            scoring_option: None,
            highlight: Highlight::default(),
            draggable_hovered: None,
        }
    }

    /// Record a content change. `content` is `None` when only the default
    /// end count changed; zoom availability is then left alone.
    pub fn content_changed(&mut self, content: Option<&[ContentNode]>, default_end_scenarios: u32) {
        self.default_end_scenarios = default_end_scenarios;
        if let Some(content) = content {
            self.zoom_disabled = content.is_empty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let json = r#"{"nextContentId":2,"type":{"library":"H5P.Text 1.0"},"contentTitle":"Intro"}"#;
        let node: ContentNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.next_content_id, Some(2));
        assert_eq!(node.fields["contentTitle"], "Intro");
        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["type"]["library"], "H5P.Text 1.0");
    }

    #[test]
    fn zoom_follows_content_emptiness() {
        let mut state = ContentState::new(0);
        assert!(state.zoom_disabled);

        let node: ContentNode = serde_json::from_str("{}").unwrap();
        state.content_changed(Some(&[node]), 1);
        assert!(!state.zoom_disabled);
        assert_eq!(state.default_end_scenarios, 1);

        state.content_changed(None, 0);
        assert!(!state.zoom_disabled, "count-only update keeps zoom state");

        state.content_changed(Some(&[]), 0);
        assert!(state.zoom_disabled);
    }

    #[test]
    fn scoring_option_uses_settings_names() {
        let opt: ScoringOption = serde_json::from_str(r#""static-end-score""#).unwrap();
        assert_eq!(opt, ScoringOption::StaticEndScore);
    }
}
