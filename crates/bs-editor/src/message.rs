//! The controller's callback surface.
//!
//! One variant per state-mutating operation. Child views and collaborators
//! never touch state directly; they send one of these to
//! `EditorController::update`.

use bs_core::{
    ContentId, ContentNode, Highlight, InsertEvent, InsertId, RawLibrary, Rect, ScaleOptions,
    ScoringOption, id::optional_content_id,
};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Message {
    // ── Registry ──
    LibrariesFetched(Vec<RawLibrary>),
    LibrariesFetchFailed(String),
    LibraryLoaded(String),
    LibraryFailed {
        library: String,
        reason: String,
    },

    // ── Storage ──
    /// Persisted "tour seen" flag, or the storage error message.
    TourFlagLoaded(Result<bool, String>),

    // ── Window / layout ──
    WindowResized,
    #[serde(rename_all = "camelCase")]
    CanvasMeasured {
        tree_wrap: Rect,
        tree: Rect,
    },
    #[serde(rename_all = "camelCase")]
    TopbarMeasured {
        form: Rect,
        fullscreen_button: Rect,
    },

    // ── Palette ──
    InsertStarted(InsertEvent),
    PaletteNodeMeasured(Rect),

    // ── Canvas ──
    /// Content produced by an insert, tagged with the id it started under.
    ///
    /// Must be sent before `InsertDropped` for the same drag: the drop
    /// advances the id, and a commit arriving after it is discarded as stale.
    #[serde(rename_all = "camelCase")]
    InsertCommitted {
        id: InsertId,
        content: Vec<ContentNode>,
        default_end_scenarios: u32,
    },
    /// The drag ended, whether or not it landed on a drop target. Sent after
    /// the drag's `InsertCommitted`, if any.
    InsertDropped,
    #[serde(rename_all = "camelCase")]
    ContentChanged {
        content: Option<Vec<ContentNode>>,
        default_end_scenarios: u32,
    },
    CanvasCentered,
    CanvasTranslated,
    Highlight(Highlight),
    EditingInline(bool),
    DraggableHovered(#[serde(deserialize_with = "optional_content_id")] Option<ContentId>),
    OpenTutorial,
    OpenCanvas,

    // ── Toolbar ──
    ScaleChanged {
        scale: f32,
        #[serde(default)]
        options: ScaleOptions,
    },

    // ── Tabs ──
    TabSelected(usize),
    ScoringOptionChanged(ScoringOption),

    // ── Topbar / dialogs ──
    /// Node the preview starts from; negative ids mean none.
    PreviewToggled(#[serde(deserialize_with = "optional_content_id")] Option<ContentId>),
    FullscreenRequested,
    FullscreenDialog(bool),
    FullscreenExited,
    PreviewInfoPopupHidden,
    TourClosed,
}

impl Message {
    /// Short name for trace logging.
    pub fn name(&self) -> &'static str {
        match self {
            Message::LibrariesFetched(_) => "librariesFetched",
            Message::LibrariesFetchFailed(_) => "librariesFetchFailed",
            Message::LibraryLoaded(_) => "libraryLoaded",
            Message::LibraryFailed { .. } => "libraryFailed",
            Message::TourFlagLoaded(_) => "tourFlagLoaded",
            Message::WindowResized => "windowResized",
            Message::CanvasMeasured { .. } => "canvasMeasured",
            Message::TopbarMeasured { .. } => "topbarMeasured",
            Message::InsertStarted(_) => "insertStarted",
            Message::PaletteNodeMeasured(_) => "paletteNodeMeasured",
            Message::InsertCommitted { .. } => "insertCommitted",
            Message::InsertDropped => "insertDropped",
            Message::ContentChanged { .. } => "contentChanged",
            Message::CanvasCentered => "canvasCentered",
            Message::CanvasTranslated => "canvasTranslated",
            Message::Highlight(_) => "highlight",
            Message::EditingInline(_) => "editingInline",
            Message::DraggableHovered(_) => "draggableHovered",
            Message::OpenTutorial => "openTutorial",
            Message::OpenCanvas => "openCanvas",
            Message::ScaleChanged { .. } => "scaleChanged",
            Message::TabSelected(_) => "tabSelected",
            Message::ScoringOptionChanged(_) => "scoringOptionChanged",
            Message::PreviewToggled(_) => "previewToggled",
            Message::FullscreenRequested => "fullscreenRequested",
            Message::FullscreenDialog(_) => "fullscreenDialog",
            Message::FullscreenExited => "fullscreenExited",
            Message::PreviewInfoPopupHidden => "previewInfoPopupHidden",
            Message::TourClosed => "tourClosed",
        }
    }
}
