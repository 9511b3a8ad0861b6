//! View mode: tabs, preview, fullscreen, and the fullscreen confirmation.
//!
//! Preview and the tabbed editor are mutually exclusive. Fullscreen is an
//! orthogonal dimension composed with either. Entering fullscreen goes
//! through a confirmation dialog; while the dialog is up it blocks every
//! other view transition.
//!
//! Refused transitions return [`Error::InvalidTransition`] and leave the
//! state untouched; the matching control is rendered disabled, so these
//! only surface when a caller ignores the disabled state.

use crate::config::FullscreenConfirm;
use crate::error::{Error, Result};
use crate::id::ContentId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    #[default]
    CreateContent,
    Settings,
    Translations,
    Tutorial,
    Metadata,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::CreateContent,
        Tab::Settings,
        Tab::Translations,
        Tab::Tutorial,
        Tab::Metadata,
    ];

    pub fn from_index(index: usize) -> Option<Tab> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::CreateContent => "Create content",
            Tab::Settings => "Settings",
            Tab::Translations => "Translations",
            Tab::Tutorial => "Get help",
            Tab::Metadata => "Metadata",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Fullscreen {
    #[default]
    Off,
    /// Confirmation dialog visible.
    Pending,
    On,
}

/// Combined view classification, fullscreen taking precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Editing(Tab),
    Previewing(Option<ContentId>),
    FullscreenPending,
    Fullscreen,
}

#[derive(Debug, Clone)]
pub struct ViewMode {
    active_tab: Tab,
    /// `Some` while previewing; the inner value is the node to start from.
    preview: Option<Option<ContentId>>,
    fullscreen: Fullscreen,
    fullscreen_supported: bool,
    confirm_policy: FullscreenConfirm,
    confirmed_once: bool,
    editing_inline: bool,
    preview_info_popup: bool,
}

impl ViewMode {
    pub fn new(fullscreen_supported: bool, confirm_policy: FullscreenConfirm) -> Self {
        Self {
            active_tab: Tab::CreateContent,
            preview: None,
            fullscreen: Fullscreen::Off,
            fullscreen_supported,
            confirm_policy,
            confirmed_once: false,
            editing_inline: false,
            preview_info_popup: true,
        }
    }

    // ─── Tabs ────────────────────────────────────────────────────────────

    pub fn select_tab(&mut self, index: usize) -> Result<Tab> {
        self.ensure_no_dialog()?;
        if self.is_previewing() {
            return Err(Error::InvalidTransition("tabs are hidden during preview"));
        }
        let tab = Tab::from_index(index).ok_or(Error::InvalidTransition("no such tab"))?;
        self.active_tab = tab;
        Ok(tab)
    }

    // ─── Preview ─────────────────────────────────────────────────────────

    /// Whether the preview / back-to-edit control is enabled.
    pub fn can_toggle_preview(&self) -> bool {
        !self.editing_inline && self.fullscreen != Fullscreen::Pending
    }

    /// Flip between editing and previewing. `target` is the node the
    /// preview starts from; it is ignored when leaving preview.
    pub fn toggle_preview(&mut self, target: Option<ContentId>) -> Result<bool> {
        if self.editing_inline {
            return Err(Error::InvalidTransition(
                "finish the inline edit before toggling preview",
            ));
        }
        self.ensure_no_dialog()?;
        self.preview = match self.preview {
            Some(_) => None,
            None => Some(target),
        };
        Ok(self.is_previewing())
    }

    pub fn set_editing_inline(&mut self, editing: bool) {
        self.editing_inline = editing;
    }

    pub fn hide_preview_info_popup(&mut self) {
        self.preview_info_popup = false;
    }

    // ─── Fullscreen ──────────────────────────────────────────────────────

    /// Ask to enter fullscreen. Returns `true` if fullscreen was entered
    /// without a dialog (only possible with [`FullscreenConfirm::FirstOnly`]
    /// after a confirmed entry).
    pub fn request_fullscreen(&mut self) -> Result<bool> {
        if !self.fullscreen_supported {
            return Err(Error::InvalidTransition("fullscreen is not supported"));
        }
        match self.fullscreen {
            Fullscreen::On => Err(Error::InvalidTransition("already fullscreen")),
            Fullscreen::Pending => Ok(false),
            Fullscreen::Off => {
                if self.confirm_policy == FullscreenConfirm::FirstOnly && self.confirmed_once {
                    self.fullscreen = Fullscreen::On;
                    return Ok(true);
                }
                self.fullscreen = Fullscreen::Pending;
                Ok(false)
            }
        }
    }

    /// Resolve the dialog. Returns `true` if fullscreen was entered.
    pub fn confirm_dialog(&mut self, accepted: bool) -> Result<bool> {
        if self.fullscreen != Fullscreen::Pending {
            return Err(Error::InvalidTransition("no fullscreen dialog is open"));
        }
        if accepted {
            self.fullscreen = Fullscreen::On;
            self.confirmed_once = true;
        } else {
            self.fullscreen = Fullscreen::Off;
        }
        Ok(accepted)
    }

    pub fn exit_fullscreen(&mut self) -> Result<()> {
        if self.fullscreen != Fullscreen::On {
            return Err(Error::InvalidTransition("not in fullscreen"));
        }
        self.fullscreen = Fullscreen::Off;
        Ok(())
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn state(&self) -> ViewState {
        match (self.fullscreen, self.preview) {
            (Fullscreen::Pending, _) => ViewState::FullscreenPending,
            (Fullscreen::On, _) => ViewState::Fullscreen,
            (Fullscreen::Off, Some(target)) => ViewState::Previewing(target),
            (Fullscreen::Off, None) => ViewState::Editing(self.active_tab),
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn is_previewing(&self) -> bool {
        self.preview.is_some()
    }

    pub fn preview_target(&self) -> Option<ContentId> {
        self.preview.flatten()
    }

    pub fn fullscreen(&self) -> Fullscreen {
        self.fullscreen
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen == Fullscreen::On
    }

    pub fn fullscreen_supported(&self) -> bool {
        self.fullscreen_supported
    }

    pub fn show_fullscreen_dialog(&self) -> bool {
        self.fullscreen == Fullscreen::Pending
    }

    pub fn is_editing_inline(&self) -> bool {
        self.editing_inline
    }

    pub fn preview_info_popup(&self) -> bool {
        self.preview_info_popup
    }

    fn ensure_no_dialog(&self) -> Result<()> {
        if self.fullscreen == Fullscreen::Pending {
            return Err(Error::InvalidTransition(
                "the fullscreen dialog blocks interaction",
            ));
        }
        Ok(())
    }
}
