//! Drag-to-insert lifecycle.
//!
//! Every insert start and every insert completion advances a monotonic
//! [`InsertId`]. Work started during an insert captures the id it saw; when
//! that work lands, [`Insertion::guard`] tells it whether it is still current.
//! Two quick drags therefore never share an id, and a late callback from the
//! first one cannot touch the second.

use crate::id::InsertId;
use serde::{Deserialize, Serialize};

/// The palette press that started an insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertEvent {
    /// Qualified name of the library being dragged.
    pub library: String,
    /// Pointer position in page coordinates at press time.
    pub x: f32,
    pub y: f32,
}

/// Outcome of checking a captured id against the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Current,
    /// The id moved on since the work started; drop the result.
    Stale { captured: InsertId, current: InsertId },
}

#[derive(Debug, Clone, Default)]
pub struct Insertion {
    id: InsertId,
    inserting: Option<InsertEvent>,
}

impl Insertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an insert. Returns the id the insert runs under.
    pub fn begin(&mut self, event: InsertEvent) -> InsertId {
        self.id = self.id.next();
        log::debug!("insert {} begin: {}", self.id, event.library);
        self.inserting = Some(event);
        self.id
    }

    /// Finish the current insert, whether or not the drop landed anywhere.
    /// Always advances the id, so completion is itself a new epoch.
    pub fn complete(&mut self) -> InsertId {
        if self.inserting.is_none() {
            log::debug!("insert {} complete without an active insert", self.id);
        }
        self.id = self.id.next();
        self.inserting = None;
        self.id
    }

    pub fn guard(&self, captured: InsertId) -> Freshness {
        if captured == self.id {
            Freshness::Current
        } else {
            Freshness::Stale {
                captured,
                current: self.id,
            }
        }
    }

    pub fn id(&self) -> InsertId {
        self.id
    }

    pub fn inserting(&self) -> Option<&InsertEvent> {
        self.inserting.as_ref()
    }

    pub fn is_inserting(&self) -> bool {
        self.inserting.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn press(library: &str) -> InsertEvent {
        InsertEvent {
            library: library.into(),
            x: 10.0,
            y: 20.0,
        }
    }

    #[test]
    fn id_strictly_increases_over_mixed_sequences() {
        let mut ins = Insertion::new();
        let mut last = ins.id();
        // begin/complete pairs, doubled begins, and stray completes
        let script = [true, false, true, true, false, false, true, false];
        for begin in script {
            let id = if begin {
                ins.begin(press("H5P.Text 1.0"))
            } else {
                ins.complete()
            };
            assert!(id > last, "{id} should follow {last}");
            last = id;
        }
    }

    #[test]
    fn begin_then_complete_returns_to_idle() {
        let mut ins = Insertion::new();
        ins.begin(press("H5P.Image 1.1"));
        assert_eq!(ins.inserting().map(|e| e.library.as_str()), Some("H5P.Image 1.1"));
        ins.complete();
        assert!(!ins.is_inserting());
    }

    #[test]
    fn work_from_superseded_insert_is_stale() {
        let mut ins = Insertion::new();
        let first = ins.begin(press("H5P.A 1.0"));
        let second = ins.begin(press("H5P.B 1.0"));
        assert_eq!(
            ins.guard(first),
            Freshness::Stale {
                captured: first,
                current: second,
            }
        );
        assert_eq!(ins.guard(second), Freshness::Current);
    }

    #[test]
    fn completion_invalidates_captured_id() {
        let mut ins = Insertion::new();
        let id = ins.begin(press("H5P.A 1.0"));
        ins.complete();
        assert!(matches!(ins.guard(id), Freshness::Stale { .. }));
    }
}
