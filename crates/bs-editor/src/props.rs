//! Read-only state slices handed to each child view.
//!
//! Every struct here is an owned snapshot; children cannot reach back into
//! the controller except through messages.

use bs_core::{
    ContentId, Highlight, InsertEvent, InsertId, LoadFailure, NodeSize, Point, Rect,
    RegistryItem, ScoringOption, Tab, TourGeometry,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteProps {
    /// Placeholder state until every library has loaded.
    pub disabled: bool,
    pub libraries: Option<Vec<RegistryItem>>,
    pub inserting: Option<InsertEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasProps {
    pub disabled: bool,
    pub libraries: Option<Vec<RegistryItem>>,
    pub inserting: Option<InsertEvent>,
    pub inserting_id: InsertId,
    pub scale: f32,
    pub center: bool,
    pub center_whole_tree: bool,
    pub translate: Option<Point>,
    pub node_size: NodeSize,
    pub highlight: Highlight,
    pub scoring_option: Option<ScoringOption>,
    pub draggable_hovered: Option<ContentId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarProps {
    /// Zoom controls are disabled while the scenario is empty.
    pub disabled: bool,
    pub scale: f32,
    pub default_end_scenarios: u32,
    pub container_rect: Option<Rect>,
    pub content_rect: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopbarProps {
    pub preview_label: &'static str,
    pub preview_disabled: bool,
    pub show_fullscreen_button: bool,
    pub fullscreen_active: bool,
    pub fullscreen_title: &'static str,
    /// "Proceed to Save" leaves fullscreen.
    pub show_proceed_button: bool,
    /// Everything but the fullscreen button fades while the tour is up.
    pub tour_fade: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsProps {
    pub active_index: usize,
    pub titles: Vec<&'static str>,
    pub hidden: bool,
    pub tour_active: bool,
}

impl TabsProps {
    pub fn titles() -> Vec<&'static str> {
        Tab::ALL.iter().map(|tab| tab.title()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewProps {
    pub target: Option<ContentId>,
    pub libraries_loaded: bool,
    pub info_popup_visible: bool,
    pub tour_active: bool,
}

/// Onboarding overlay placement; present only while the tour is showing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourProps {
    #[serde(flatten)]
    pub geometry: TourGeometry,
}

/// Non-fatal load status for a degraded-mode indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStatus {
    pub loaded: bool,
    pub degraded: bool,
    pub completed: usize,
    pub total: usize,
    pub failures: Vec<LoadFailure>,
}

/// Everything a render pass needs, tagged with the state revision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewProps {
    pub revision: u64,
    pub palette: PaletteProps,
    pub canvas: CanvasProps,
    pub toolbar: ToolbarProps,
    pub topbar: TopbarProps,
    pub tabs: TabsProps,
    /// Present only while previewing.
    pub preview: Option<PreviewProps>,
    pub show_fullscreen_dialog: bool,
    pub tour: Option<TourProps>,
    pub load_status: LoadStatus,
}
