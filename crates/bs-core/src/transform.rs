//! Canvas transform: scale plus one-shot effects.
//!
//! Centering and translating are requests the canvas applies once and then
//! acknowledges. They live in a small `PendingEffects` queue instead of
//! boolean props, so "apply once" is an object with an explicit drain call.
//! The producer never clears an effect; only `acknowledge` does.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A pending one-shot canvas effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Effect {
    /// Center the canvas. `whole_tree` centers on the full tree rather than
    /// the top node.
    Center { whole_tree: bool },
    Translate { x: f32, y: f32 },
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Center { .. } => EffectKind::Center,
            Effect::Translate { .. } => EffectKind::Translate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Center,
    Translate,
}

/// At most one effect per kind. Requests of a kind already pending coalesce
/// into it rather than queueing behind it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingEffects {
    effects: SmallVec<[Effect; 2]>,
}

impl PendingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect, merging with a pending one of the same kind.
    ///
    /// Two center requests merge with `whole_tree` OR'ed; a newer translate
    /// replaces the pending offset.
    pub fn request(&mut self, effect: Effect) {
        if let Some(pending) = self.effects.iter_mut().find(|e| e.kind() == effect.kind()) {
            match (pending, effect) {
                (
                    Effect::Center { whole_tree },
                    Effect::Center {
                        whole_tree: requested,
                    },
                ) => *whole_tree |= requested,
                (pending, _) => *pending = effect,
            }
            return;
        }
        self.effects.push(effect);
    }

    /// Drain the effect of `kind`. Returns the effect that was pending.
    pub fn acknowledge(&mut self, kind: EffectKind) -> Option<Effect> {
        let pos = self.effects.iter().position(|e| e.kind() == kind)?;
        Some(self.effects.remove(pos))
    }

    pub fn get(&self, kind: EffectKind) -> Option<Effect> {
        self.effects.iter().copied().find(|e| e.kind() == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn center(&self) -> bool {
        self.get(EffectKind::Center).is_some()
    }

    pub fn center_whole_tree(&self) -> bool {
        matches!(
            self.get(EffectKind::Center),
            Some(Effect::Center { whole_tree: true })
        )
    }

    pub fn translate(&self) -> Option<Point> {
        match self.get(EffectKind::Translate) {
            Some(Effect::Translate { x, y }) => Some(Point { x, y }),
            _ => None,
        }
    }
}

// ─── Transform ───────────────────────────────────────────────────────────

/// Options passed by the toolbar alongside a new scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleOptions {
    #[serde(default)]
    pub center: bool,
    #[serde(default)]
    pub translate: Option<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    scale: f32,
    pub effects: PendingEffects,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformState {
    /// Scale 1 with an initial centering of the top node pending.
    pub fn new() -> Self {
        let mut effects = PendingEffects::new();
        effects.request(Effect::Center { whole_tree: false });
        Self {
            scale: 1.0,
            effects,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Apply a toolbar scale change. A non-positive or non-finite scale keeps
    /// the current one; effects are added on top of whatever is pending.
    pub fn set_scale(&mut self, scale: f32, options: ScaleOptions) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        } else {
            log::debug!("transform: ignoring scale {scale}");
        }
        if options.center {
            self.effects.request(Effect::Center { whole_tree: true });
        }
        if let Some(Point { x, y }) = options.translate {
            self.effects.request(Effect::Translate { x, y });
        }
    }

    /// Resize-driven re-center: the top node, not the whole tree.
    pub fn request_recenter(&mut self) {
        self.effects.request(Effect::Center { whole_tree: false });
    }
}
