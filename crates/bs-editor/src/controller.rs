//! Root controller: the single owner of editor UI state.
//!
//! All mutation flows through [`EditorController::update`] (child callbacks,
//! collaborator answers) and [`EditorController::tick`] (timers). Every
//! accepted change bumps the revision; the host re-renders whenever the
//! revision moves, reading fresh props for every child.
//!
//! The controller owns no clock. The host passes `now` (time since session
//! start) into `mount`, `update`, and `tick`.

use crate::collaborators::Collaborators;
use crate::layout::MeasuredLayout;
use crate::message::Message;
use crate::props::*;
use bs_core::{
    ContentId, ContentNode, ContentState, EditorConfig, EffectKind, Error, Freshness, InsertEvent,
    InsertId, Insertion, NodeSize, Onboarding, Rect, RegistryGate, ScaleOptions, Tab, Throttle,
    TransformState, ViewMode,
};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

pub struct EditorController {
    config: EditorConfig,
    requested_libraries: Vec<String>,
    registry: RegistryGate,
    transform: TransformState,
    node_size: NodeSize,
    insertion: Insertion,
    view: ViewMode,
    tour: Onboarding,
    content: ContentState,
    layout: MeasuredLayout,
    resize: Throttle,
    lifecycle: Lifecycle,
    revision: u64,
    collaborators: Collaborators,
}

impl EditorController {
    /// Create a controller for one editing session.
    ///
    /// `initial_content_len` is the size of the scenario being opened; an
    /// empty scenario starts with zoom disabled.
    pub fn new(
        config: EditorConfig,
        requested_libraries: Vec<String>,
        initial_content_len: usize,
        collaborators: Collaborators,
    ) -> Self {
        let fullscreen_supported = collaborators.host.fullscreen_supported();
        Self {
            node_size: NodeSize::new(config.node_width, config.node_height, config.node_spacing),
            resize: Throttle::new(config.resize_throttle()),
            view: ViewMode::new(fullscreen_supported, config.fullscreen_confirm),
            config,
            requested_libraries,
            registry: RegistryGate::new(),
            transform: TransformState::new(),
            insertion: Insertion::new(),
            tour: Onboarding::new(),
            content: ContentState::new(initial_content_len),
            layout: MeasuredLayout::default(),
            lifecycle: Lifecycle::Created,
            revision: 0,
            collaborators,
        }
    }

    /// Start the registry gate and, in fullscreen-capable hosts, the tour
    /// flag lookup. Only the first call has any effect.
    pub fn mount(&mut self, now: Duration) {
        if self.lifecycle != Lifecycle::Created {
            log::debug!("controller: mount ignored in {:?}", self.lifecycle);
            return;
        }
        self.lifecycle = Lifecycle::Mounted;

        self.registry.start(now, self.config.library_load_timeout());
        self.collaborators
            .registry
            .fetch_metadata(&self.requested_libraries);

        if self.view.fullscreen_supported() {
            self.tour.start();
            self.collaborators.store.get(&self.config.tour_storage_key);
        }
        self.revision += 1;
    }

    /// Tear down. Pending timers are dropped and every later message is
    /// ignored, so late collaborator answers cannot touch released state.
    pub fn unmount(&mut self) {
        self.resize.cancel();
        self.lifecycle = Lifecycle::Unmounted;
    }

    /// Fire due timers. Returns `true` if state changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.lifecycle != Lifecycle::Mounted {
            return false;
        }
        let mut changed = false;
        if self.resize.poll(now) {
            log::trace!("controller: resize settled, re-centering");
            self.transform.request_recenter();
            changed = true;
        }
        if self.registry.tick(now) {
            changed = true;
        }
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Apply one message. Returns `true` if state changed (and the revision
    /// moved).
    pub fn update(&mut self, message: Message, now: Duration) -> bool {
        if self.lifecycle != Lifecycle::Mounted {
            log::debug!(
                "controller: {} ignored while {:?}",
                message.name(),
                self.lifecycle
            );
            return false;
        }
        log::trace!("controller: {}", message.name());

        let changed = self.dispatch(message, now);
        if changed {
            self.revision += 1;
        }
        changed
    }

    fn dispatch(&mut self, message: Message, now: Duration) -> bool {
        match message {
            // ── Registry ──
            Message::LibrariesFetched(raw) => {
                for name in self.registry.metadata_fetched(&raw) {
                    self.collaborators.registry.load_assets(&name);
                }
                true
            }
            Message::LibrariesFetchFailed(reason) => {
                self.registry.metadata_failed(&reason);
                true
            }
            Message::LibraryLoaded(name) => {
                self.registry.asset_loaded(&name);
                true
            }
            Message::LibraryFailed { library, reason } => {
                self.registry.asset_failed(&library, &reason);
                true
            }

            // ── Storage ──
            Message::TourFlagLoaded(seen) => {
                let seen = seen.map_err(Error::StorageUnavailable);
                self.tour.flag_loaded(seen, &self.config)
            }

            // ── Window / layout ──
            Message::WindowResized => {
                self.resize.schedule(now);
                false
            }
            Message::CanvasMeasured { tree_wrap, tree } => {
                self.layout.canvas_measured(tree_wrap, tree)
            }
            Message::TopbarMeasured {
                form,
                fullscreen_button,
            } => {
                let changed = self.layout.topbar_measured(form, fullscreen_button);
                self.tour
                    .layout_measured(form, fullscreen_button, &self.config)
                    || changed
            }

            // ── Palette ──
            Message::InsertStarted(event) => {
                self.insertion.begin(event);
                self.content.highlight = Default::default();
                true
            }
            Message::PaletteNodeMeasured(rect) => {
                match self.node_size.negotiate(
                    rect,
                    self.config.node_width,
                    self.config.palette_node_width,
                ) {
                    Some(size) => {
                        self.node_size = size;
                        true
                    }
                    None => false,
                }
            }

            // ── Canvas ──
            Message::InsertCommitted {
                id,
                content,
                default_end_scenarios,
            } => match self.insertion.guard(id) {
                Freshness::Current => self.content_changed(Some(content), default_end_scenarios),
                Freshness::Stale { captured, current } => {
                    log::debug!("controller: dropping stale insert {captured} (now {current})");
                    false
                }
            },
            Message::InsertDropped => {
                self.insertion.complete();
                true
            }
            Message::ContentChanged {
                content,
                default_end_scenarios,
            } => self.content_changed(content, default_end_scenarios),
            Message::CanvasCentered => self
                .transform
                .effects
                .acknowledge(EffectKind::Center)
                .is_some(),
            Message::CanvasTranslated => self
                .transform
                .effects
                .acknowledge(EffectKind::Translate)
                .is_some(),
            Message::Highlight(highlight) => {
                self.content.highlight = highlight;
                true
            }
            Message::EditingInline(editing) => {
                self.view.set_editing_inline(editing);
                true
            }
            Message::DraggableHovered(id) => {
                self.content.draggable_hovered = id;
                true
            }
            Message::OpenTutorial => self.select_tab(Tab::Tutorial.index()),
            Message::OpenCanvas => self.select_tab(Tab::CreateContent.index()),

            // ── Toolbar ──
            Message::ScaleChanged { scale, options } => {
                self.transform.set_scale(scale, options);
                true
            }

            // ── Tabs ──
            Message::TabSelected(index) => self.select_tab(index),
            Message::ScoringOptionChanged(option) => {
                self.content.scoring_option = Some(option);
                true
            }

            // ── Topbar / dialogs ──
            Message::PreviewToggled(target) => match self.view.toggle_preview(target) {
                Ok(previewing) => {
                    log::debug!("controller: preview {}", if previewing { "on" } else { "off" });
                    self.content.draggable_hovered = None;
                    true
                }
                Err(e) => refused(e),
            },
            Message::FullscreenRequested => match self.view.request_fullscreen() {
                Ok(entered) => {
                    if entered {
                        self.fullscreen_toggled(true);
                    }
                    true
                }
                Err(e) => refused(e),
            },
            Message::FullscreenDialog(accepted) => match self.view.confirm_dialog(accepted) {
                Ok(entered) => {
                    if entered {
                        self.fullscreen_toggled(true);
                    }
                    true
                }
                Err(e) => refused(e),
            },
            Message::FullscreenExited => match self.view.exit_fullscreen() {
                Ok(()) => {
                    self.fullscreen_toggled(false);
                    true
                }
                Err(e) => refused(e),
            },
            Message::PreviewInfoPopupHidden => {
                self.view.hide_preview_info_popup();
                true
            }
            Message::TourClosed => {
                if !self.tour.close() {
                    return false;
                }
                if let Err(e) = self
                    .collaborators
                    .store
                    .set(&self.config.tour_storage_key, true)
                {
                    log::warn!("tour: could not persist dismissal: {e}");
                }
                true
            }
        }
    }

    fn select_tab(&mut self, index: usize) -> bool {
        match self.view.select_tab(index) {
            Ok(_) => true,
            Err(e) => refused(e),
        }
    }

    fn content_changed(&mut self, content: Option<Vec<ContentNode>>, default_ends: u32) -> bool {
        if let Some(content) = &content {
            self.collaborators.host.content_changed(content);
        }
        self.content.content_changed(content.as_deref(), default_ends);
        true
    }

    fn fullscreen_toggled(&mut self, enabled: bool) {
        log::info!("controller: fullscreen {}", if enabled { "on" } else { "off" });
        self.collaborators.host.fullscreen_toggled(enabled);
    }

    // ─── Typed shortcuts ─────────────────────────────────────────────────

    /// Start a palette insert and return the id it runs under.
    pub fn begin_insert(&mut self, event: InsertEvent, now: Duration) -> InsertId {
        self.update(Message::InsertStarted(event), now);
        self.insertion.id()
    }

    pub fn complete_insert(&mut self, now: Duration) -> InsertId {
        self.update(Message::InsertDropped, now);
        self.insertion.id()
    }

    pub fn set_scale(&mut self, scale: f32, options: ScaleOptions, now: Duration) -> bool {
        self.update(Message::ScaleChanged { scale, options }, now)
    }

    pub fn consume_center(&mut self, now: Duration) -> bool {
        self.update(Message::CanvasCentered, now)
    }

    pub fn consume_translate(&mut self, now: Duration) -> bool {
        self.update(Message::CanvasTranslated, now)
    }

    pub fn report_node_size(&mut self, rect: Rect, now: Duration) -> bool {
        self.update(Message::PaletteNodeMeasured(rect), now)
    }

    pub fn toggle_preview(&mut self, target: Option<ContentId>, now: Duration) -> bool {
        self.update(Message::PreviewToggled(target), now)
    }

    pub fn request_fullscreen(&mut self, now: Duration) -> bool {
        self.update(Message::FullscreenRequested, now)
    }

    pub fn close_tour(&mut self, now: Duration) -> bool {
        self.update(Message::TourClosed, now)
    }

    // ─── Read access ─────────────────────────────────────────────────────

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &RegistryGate {
        &self.registry
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn node_size(&self) -> NodeSize {
        self.node_size
    }

    pub fn insertion(&self) -> &Insertion {
        &self.insertion
    }

    pub fn view(&self) -> &ViewMode {
        &self.view
    }

    pub fn tour(&self) -> &Onboarding {
        &self.tour
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn layout(&self) -> &MeasuredLayout {
        &self.layout
    }

    /// Whether a resize-driven re-center is waiting on the throttle.
    pub fn recenter_pending(&self) -> bool {
        self.resize.is_pending()
    }

    // ─── Props ───────────────────────────────────────────────────────────

    pub fn palette_props(&self) -> PaletteProps {
        PaletteProps {
            disabled: !self.registry.is_loaded(),
            libraries: self.registry.items().map(<[_]>::to_vec),
            inserting: self.insertion.inserting().cloned(),
        }
    }

    pub fn canvas_props(&self) -> CanvasProps {
        let effects = &self.transform.effects;
        CanvasProps {
            disabled: !self.registry.is_loaded(),
            libraries: self.registry.items().map(<[_]>::to_vec),
            inserting: self.insertion.inserting().cloned(),
            inserting_id: self.insertion.id(),
            scale: self.transform.scale(),
            center: effects.center(),
            center_whole_tree: effects.center_whole_tree(),
            translate: effects.translate(),
            node_size: self.node_size,
            highlight: self.content.highlight.clone(),
            scoring_option: self.content.scoring_option,
            draggable_hovered: self.content.draggable_hovered,
        }
    }

    pub fn toolbar_props(&self) -> ToolbarProps {
        ToolbarProps {
            disabled: self.content.zoom_disabled,
            scale: self.transform.scale(),
            default_end_scenarios: self.content.default_end_scenarios,
            container_rect: self.layout.tree_wrap,
            content_rect: self.layout.tree,
        }
    }

    pub fn topbar_props(&self) -> TopbarProps {
        let fullscreen = self.view.is_fullscreen();
        TopbarProps {
            preview_label: if self.view.is_previewing() {
                "Back to edit"
            } else {
                "Preview"
            },
            preview_disabled: !self.view.can_toggle_preview(),
            show_fullscreen_button: self.view.fullscreen_supported(),
            fullscreen_active: fullscreen,
            fullscreen_title: if fullscreen {
                "Exit full-screen mode"
            } else {
                "Enter full-screen mode"
            },
            show_proceed_button: fullscreen,
            tour_fade: self.tour.is_showing(),
        }
    }

    pub fn tabs_props(&self) -> TabsProps {
        TabsProps {
            active_index: self.view.active_tab().index(),
            titles: TabsProps::titles(),
            hidden: self.view.is_previewing(),
            tour_active: self.tour.is_showing(),
        }
    }

    pub fn preview_props(&self) -> Option<PreviewProps> {
        self.view.is_previewing().then(|| PreviewProps {
            target: self.view.preview_target(),
            libraries_loaded: self.registry.is_loaded(),
            info_popup_visible: self.view.preview_info_popup(),
            tour_active: self.tour.is_showing(),
        })
    }

    pub fn tour_props(&self) -> Option<TourProps> {
        self.tour.geometry().map(|geometry| TourProps { geometry })
    }

    pub fn load_status(&self) -> LoadStatus {
        let (completed, total) = self.registry.progress();
        LoadStatus {
            loaded: self.registry.is_loaded(),
            degraded: self.registry.is_degraded(),
            completed,
            total,
            failures: self.registry.failures().to_vec(),
        }
    }

    pub fn props(&self) -> ViewProps {
        ViewProps {
            revision: self.revision,
            palette: self.palette_props(),
            canvas: self.canvas_props(),
            toolbar: self.toolbar_props(),
            topbar: self.topbar_props(),
            tabs: self.tabs_props(),
            preview: self.preview_props(),
            show_fullscreen_dialog: self.view.show_fullscreen_dialog(),
            tour: self.tour_props(),
            load_status: self.load_status(),
        }
    }
}

/// Log a refused transition. The control that sends it should already be
/// disabled, so this is not an error for the user.
fn refused(err: Error) -> bool {
    log::debug!("controller: refused: {err}");
    false
}
