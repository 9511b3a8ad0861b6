//! Library registry gate.
//!
//! Two phases: metadata fetch, then per-library asset loading. The gate is
//! `loaded` once every fetched library has reported back, or once the load
//! deadline passes, whichever comes first. A gate opened with outstanding
//! failures is `degraded`; the canvas and palette still become usable.
//!
//! ```text
//! Idle ──start──▶ Fetching ──metadata──▶ Loading ──all reported──▶ Ready
//!                    │                      │
//!                    └──────deadline────────┴──────────────────────▶ Ready (degraded)
//! ```

use crate::error::Error;
use crate::library::{RawLibrary, RegistryItem, normalize_libraries};
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

/// Reason recorded for libraries still pending when the deadline passes.
const TIMED_OUT: &str = "timed out";

/// Failure key for the metadata request itself.
const METADATA: &str = "<metadata>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GatePhase {
    Idle,
    Fetching,
    Loading,
    Ready,
}

/// A library that failed or never reported back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub library: String,
    pub reason: String,
}

impl From<LoadFailure> for Error {
    fn from(failure: LoadFailure) -> Self {
        Error::LoadFailure {
            library: failure.library,
            reason: failure.reason,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistryGate {
    phase: GatePhase,
    items: Option<Vec<RegistryItem>>,
    /// Qualified names still awaiting an asset callback.
    pending: BTreeSet<String>,
    total: usize,
    completed: usize,
    failures: Vec<LoadFailure>,
    deadline: Option<Duration>,
}

impl Default for RegistryGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryGate {
    pub fn new() -> Self {
        Self {
            phase: GatePhase::Idle,
            items: None,
            pending: BTreeSet::new(),
            total: 0,
            completed: 0,
            failures: Vec::new(),
            deadline: None,
        }
    }

    /// Begin fetching. The deadline bounds both phases together.
    pub fn start(&mut self, now: Duration, timeout: Duration) {
        if self.phase != GatePhase::Idle {
            return;
        }
        self.phase = GatePhase::Fetching;
        self.deadline = Some(now + timeout);
    }

    /// Record fetched metadata and return the qualified names whose assets
    /// must now be loaded (restricted entries included).
    ///
    /// Metadata arriving after the deadline still populates the palette and
    /// is still loaded; each late success clears its timeout failure. Any
    /// other repeat answer is ignored.
    pub fn metadata_fetched(&mut self, raw: &[RawLibrary]) -> Vec<String> {
        let awaiting_metadata = match self.phase {
            GatePhase::Idle | GatePhase::Fetching => true,
            GatePhase::Loading => false,
            // Only a gate opened without metadata takes a late answer.
            GatePhase::Ready => self.failures.iter().any(|f| f.library == METADATA),
        };
        if !awaiting_metadata {
            log::debug!("registry: duplicate metadata ignored");
            return Vec::new();
        }

        self.items = Some(normalize_libraries(raw));

        let mut seen = BTreeSet::new();
        let to_load: Vec<String> = raw
            .iter()
            .filter(|lib| seen.insert(lib.uber_name.as_str()))
            .map(|lib| lib.uber_name.clone())
            .collect();

        if self.phase == GatePhase::Ready {
            self.failures.retain(|f| f.library != METADATA);
            for name in &to_load {
                if !self.failures.iter().any(|f| &f.library == name) {
                    self.failures.push(LoadFailure {
                        library: name.clone(),
                        reason: TIMED_OUT.into(),
                    });
                }
            }
            return to_load;
        }

        self.total = to_load.len();
        self.pending = to_load.iter().cloned().collect();
        self.phase = GatePhase::Loading;
        if self.pending.is_empty() {
            self.open();
        }
        to_load
    }

    /// The metadata request itself failed: open degraded with no items.
    pub fn metadata_failed(&mut self, reason: &str) {
        if self.phase == GatePhase::Ready {
            return;
        }
        self.record_failure(METADATA, reason);
        if self.items.is_none() {
            self.items = Some(Vec::new());
        }
        self.open();
    }

    /// An asset load succeeded. Returns `true` if this opened the gate.
    pub fn asset_loaded(&mut self, name: &str) -> bool {
        if self.pending.remove(name) {
            self.completed += 1;
            return self.open_if_complete();
        }
        if let Some(pos) = self.failures.iter().position(|f| f.library == name) {
            log::info!("registry: late load of `{name}` recovered");
            self.failures.remove(pos);
        } else {
            log::debug!("registry: unexpected load callback for `{name}`");
        }
        false
    }

    /// An asset load failed. The failure still counts toward completion so
    /// one broken library cannot hold the gate shut.
    pub fn asset_failed(&mut self, name: &str, reason: &str) -> bool {
        if !self.pending.remove(name) {
            log::debug!("registry: unexpected failure callback for `{name}`");
            return false;
        }
        self.completed += 1;
        self.record_failure(name, reason);
        self.open_if_complete()
    }

    /// Enforce the deadline. Returns `true` if this opened the gate.
    pub fn tick(&mut self, now: Duration) -> bool {
        let expired = self.deadline.is_some_and(|deadline| now >= deadline);
        if !expired || matches!(self.phase, GatePhase::Idle | GatePhase::Ready) {
            return false;
        }

        for name in std::mem::take(&mut self.pending) {
            self.record_failure(&name, TIMED_OUT);
        }
        if self.items.is_none() {
            self.record_failure(METADATA, TIMED_OUT);
            self.items = Some(Vec::new());
        }
        self.open();
        true
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn items(&self) -> Option<&[RegistryItem]> {
        self.items.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == GatePhase::Ready
    }

    pub fn is_degraded(&self) -> bool {
        self.is_loaded() && !self.failures.is_empty()
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// `(completed, total)` for progress display.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed, self.total)
    }

    fn open_if_complete(&mut self) -> bool {
        if self.phase == GatePhase::Loading && self.completed >= self.total {
            self.open();
            return true;
        }
        false
    }

    fn open(&mut self) {
        self.phase = GatePhase::Ready;
        self.deadline = None;
        if self.failures.is_empty() {
            log::info!("registry: {} libraries loaded", self.completed);
        } else {
            log::warn!(
                "registry: opened degraded, {} of {} libraries unavailable",
                self.failures.len(),
                self.total
            );
        }
    }

    fn record_failure(&mut self, library: &str, reason: &str) {
        let failure = LoadFailure {
            library: library.to_string(),
            reason: reason.to_string(),
        };
        log::warn!("{}", Error::from(failure.clone()));
        self.failures.push(failure);
    }
}
