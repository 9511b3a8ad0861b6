//! Integration tests: raw registry JSON → normalized palette → gate.
//!
//! Exercises the `bs-core` pieces the controller chains together when the
//! registry answers.

use bs_core::{GatePhase, RawLibrary, RegistryGate};
use pretty_assertions::assert_eq;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(10);

fn fetched() -> Vec<RawLibrary> {
    serde_json::from_str(
        r#"[
            {"title":"Course Presentation","uberName":"H5P.CoursePresentation 1.25"},
            {"title":"Text","uberName":"H5P.AdvancedText 1.1","name":"H5P.AdvancedText"},
            {"title":"Video","uberName":"H5P.Video 1.6","restricted":true},
            {"title":"Image","uberName":"H5P.Image 1.1"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn palette_hides_restricted_but_gate_waits_for_them() {
    let mut gate = RegistryGate::new();
    gate.start(Duration::ZERO, TIMEOUT);
    let to_load = gate.metadata_fetched(&fetched());

    let classes: Vec<&str> = gate
        .items()
        .unwrap()
        .iter()
        .map(|item| item.display_class.as_str())
        .collect();
    assert_eq!(classes, vec!["coursepresentation", "advancedtext", "image"]);
    assert_eq!(to_load.len(), 4);
    assert!(to_load.iter().any(|name| name == "H5P.Video 1.6"));

    for name in &to_load[..3] {
        gate.asset_loaded(name);
    }
    assert_eq!(gate.phase(), GatePhase::Loading);
    assert!(gate.asset_loaded(&to_load[3]));
    assert!(gate.is_loaded());
    assert!(!gate.is_degraded());
}

#[test]
fn deadline_bounds_both_phases() {
    let mut gate = RegistryGate::new();
    gate.start(Duration::from_millis(500), TIMEOUT);

    assert!(!gate.tick(Duration::from_millis(10_499)));
    assert!(gate.tick(Duration::from_millis(10_500)));
    assert!(gate.is_degraded());
    assert_eq!(gate.items(), Some(&[][..]));

    // Metadata arriving late still fills the palette and heals on load.
    let to_load = gate.metadata_fetched(&fetched());
    assert_eq!(gate.items().map(<[_]>::len), Some(3));
    for name in &to_load {
        gate.asset_loaded(name);
    }
    assert!(gate.failures().is_empty());
    assert!(!gate.is_degraded());
}

#[test]
fn duplicate_callbacks_count_once() {
    let mut gate = RegistryGate::new();
    gate.start(Duration::ZERO, TIMEOUT);
    let to_load = gate.metadata_fetched(&fetched());

    gate.asset_loaded(&to_load[0]);
    gate.asset_loaded(&to_load[0]);
    gate.asset_failed(&to_load[0], "again");
    assert_eq!(gate.progress(), (1, 4));
    assert!(!gate.is_loaded());
}
