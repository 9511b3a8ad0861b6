//! WASM bridge for the Branching Scenario editor.
//!
//! Compiled via `wasm-pack build --target web`. The JS views own the DOM;
//! they forward every callback here as a JSON message and re-render from
//! `props_json()` whenever the reported revision moves.

mod host;
mod logger;
mod title;

use bs_core::EditorConfig;
use bs_editor::{Collaborators, EditorController, Message};
use host::{JsHost, JsRegistry, LocalStore, Outbox};
use std::fmt::Display;
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// The main WASM-facing editor controller.
///
/// Owns the controller and the outbox of synchronously answered
/// collaborator requests.
#[wasm_bindgen]
pub struct BsEditor {
    controller: EditorController,
    outbox: Outbox,
}

#[wasm_bindgen]
impl BsEditor {
    /// Build an editor session.
    ///
    /// - `config_json`: partial `EditorConfig` JSON, or empty for defaults.
    /// - `requested_json`: JSON array of requested library names.
    /// - `content_len`: number of nodes in the scenario being opened.
    /// - `hooks`: `{ fullscreenSupported, fetchMetadata, loadAssets,
    ///   contentChanged, fullscreenToggled }`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: &str,
        requested_json: &str,
        content_len: usize,
        hooks: JsValue,
    ) -> Result<BsEditor, JsValue> {
        console_error_panic_hook_setup();

        let config = parse_config(config_json).map_err(|e| JsValue::from_str(&e))?;
        let requested = parse_requested(requested_json).map_err(|e| JsValue::from_str(&e))?;

        let outbox = Outbox::default();
        let collaborators = Collaborators {
            registry: Box::new(JsRegistry::from_hooks(&hooks)),
            store: Box::new(LocalStore::new(outbox.clone())),
            host: Box::new(JsHost::from_hooks(&hooks)),
        };
        Ok(Self {
            controller: EditorController::new(config, requested, content_len, collaborators),
            outbox,
        })
    }

    /// Start loading. Returns `{"ok":true,"changed":bool,"revision":n}`.
    pub fn mount(&mut self, now_ms: f64) -> String {
        let now = to_duration(now_ms);
        let before = self.controller.revision();
        self.controller.mount(now);
        self.drain(now);
        let revision = self.controller.revision();
        changed_envelope(revision != before, revision)
    }

    pub fn unmount(&mut self) {
        self.controller.unmount();
        self.outbox.borrow_mut().clear();
    }

    /// Apply one JSON-encoded message (`{"type":"...","data":...}`).
    /// Returns `{"ok":true,"changed":bool,"revision":n}` or
    /// `{"ok":false,"error":"..."}`.
    pub fn dispatch(&mut self, message_json: &str, now_ms: f64) -> String {
        let message: Message = match serde_json::from_str(message_json) {
            Ok(message) => message,
            Err(e) => return error_envelope(format!("bad message: {e}")),
        };
        let now = to_duration(now_ms);
        let changed = self.controller.update(message, now);
        let drained = self.drain(now);
        changed_envelope(changed || drained, self.controller.revision())
    }

    /// Fire due timers. Returns `true` if a re-render is needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.controller.tick(to_duration(now_ms))
    }

    /// Whether a resize re-center is waiting; the host keeps ticking while it is.
    pub fn recenter_pending(&self) -> bool {
        self.controller.recenter_pending()
    }

    pub fn revision(&self) -> f64 {
        self.controller.revision() as f64
    }

    /// Current props for every child view.
    /// Returns `{"ok":true,"props":{...}}` or `{"ok":false,"error":"..."}`.
    pub fn props_json(&self) -> String {
        match serde_json::to_value(self.controller.props()) {
            Ok(props) => serde_json::json!({ "ok": true, "props": props }).to_string(),
            Err(e) => error_envelope(format!("Serialization error: {e}")),
        }
    }

    /// Move the host's title field into the topbar.
    pub fn relocate_title(&self, field: &web_sys::Element, topbar: &web_sys::Element) -> bool {
        match title::relocate(field, topbar) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("title: relocation failed: {e:?}");
                false
            }
        }
    }
}

impl BsEditor {
    /// Feed queued collaborator answers back into the controller.
    fn drain(&mut self, now: Duration) -> bool {
        let mut changed = false;
        loop {
            let pending: Vec<Message> = self.outbox.borrow_mut().drain(..).collect();
            if pending.is_empty() {
                return changed;
            }
            for message in pending {
                changed |= self.controller.update(message, now);
            }
        }
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("BS WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone functions (no editor needed) ─────────────────────────────

/// Install the console logger at `level` (`error` … `trace`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::init(logger::parse_level(level));
}

/// Validate an editor config. Returns `{"ok":true,"config":{...}}` with
/// defaults filled in, or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    match parse_config(json) {
        Ok(config) => serde_json::json!({ "ok": true, "config": config }).to_string(),
        Err(e) => error_envelope(e),
    }
}

fn parse_config(json: &str) -> Result<EditorConfig, String> {
    if json.trim().is_empty() {
        return Ok(EditorConfig::default());
    }
    EditorConfig::from_json(json).map_err(|e| e.to_string())
}

fn parse_requested(json: &str) -> Result<Vec<String>, String> {
    serde_json::from_str(json).map_err(|e| format!("bad library list: {e}"))
}

/// Host timestamps are `performance.now()` milliseconds. Garbage reads as 0.
fn to_duration(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::ZERO)
}

fn changed_envelope(changed: bool, revision: u64) -> String {
    serde_json::json!({ "ok": true, "changed": changed, "revision": revision }).to_string()
}

fn error_envelope(error: impl Display) -> String {
    serde_json::json!({ "ok": false, "error": error.to_string() }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_means_defaults() {
        assert_eq!(parse_config("  ").unwrap(), EditorConfig::default());
        let config = parse_config(r#"{"resizeThrottleMs":100}"#).unwrap();
        assert_eq!(config.resize_throttle_ms, 100);
    }

    #[test]
    fn invalid_config_reports_error_envelope() {
        let out: serde_json::Value =
            serde_json::from_str(&validate_config(r#"{"paletteNodeWidth":0}"#)).unwrap();
        assert_eq!(out["ok"], false);
        assert!(out["error"].as_str().unwrap().contains("palette"));
    }

    #[test]
    fn requested_libraries_parse_from_json_array() {
        assert_eq!(
            parse_requested(r#"["H5P.Text 1.0","H5P.Image 1.1"]"#).unwrap(),
            vec!["H5P.Text 1.0".to_string(), "H5P.Image 1.1".to_string()]
        );
        assert!(parse_requested("{}").is_err());
    }

    #[test]
    fn host_time_converts_to_duration() {
        assert_eq!(to_duration(1500.0), Duration::from_millis(1500));
        assert_eq!(to_duration(-3.0), Duration::ZERO);
        assert_eq!(to_duration(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn error_envelope_escapes_quotes() {
        let out: serde_json::Value =
            serde_json::from_str(&error_envelope(r#"bad "type""#)).unwrap();
        assert_eq!(out, serde_json::json!({ "ok": false, "error": "bad \"type\"" }));
    }
}
