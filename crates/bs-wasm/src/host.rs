//! JavaScript-backed collaborators.
//!
//! The registry and host shell are plain JS callbacks taken from a hooks
//! object at construction. The tour flag lives in `localStorage`; since that
//! read is synchronous, its answer is queued in the outbox and fed back to
//! the controller right after the call that asked for it.

use bs_core::{ContentNode, Error};
use bs_editor::{HostShell, KeyValueStore, LibraryRegistry, Message};
use js_sys::{Function, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};

/// Messages produced synchronously by collaborators, drained by the bridge.
pub type Outbox = Rc<RefCell<Vec<Message>>>;

/// Look up an optional function property on the hooks object.
fn hook(hooks: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(hooks, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

fn call(func: &Option<Function>, name: &str, arg: &JsValue) {
    let Some(func) = func else {
        log::debug!("host: no `{name}` hook installed");
        return;
    };
    if let Err(e) = func.call1(&JsValue::NULL, arg) {
        log::error!("host: `{name}` threw: {e:?}");
    }
}

// ─── Registry ────────────────────────────────────────────────────────────

pub struct JsRegistry {
    fetch_metadata: Option<Function>,
    load_assets: Option<Function>,
}

impl JsRegistry {
    pub fn from_hooks(hooks: &JsValue) -> Self {
        Self {
            fetch_metadata: hook(hooks, "fetchMetadata"),
            load_assets: hook(hooks, "loadAssets"),
        }
    }
}

impl LibraryRegistry for JsRegistry {
    fn fetch_metadata(&mut self, requested: &[String]) {
        let list: js_sys::Array = requested.iter().map(|s| JsValue::from_str(s)).collect();
        call(&self.fetch_metadata, "fetchMetadata", &list.into());
    }

    fn load_assets(&mut self, qualified_name: &str) {
        call(
            &self.load_assets,
            "loadAssets",
            &JsValue::from_str(qualified_name),
        );
    }
}

// ─── Storage ─────────────────────────────────────────────────────────────

pub struct LocalStore {
    outbox: Outbox,
}

impl LocalStore {
    pub fn new(outbox: Outbox) -> Self {
        Self { outbox }
    }

    fn storage() -> Result<web_sys::Storage, Error> {
        let window =
            web_sys::window().ok_or_else(|| Error::StorageUnavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| Error::StorageUnavailable(format!("{e:?}")))?
            .ok_or_else(|| Error::StorageUnavailable("localStorage disabled".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&mut self, key: &str) {
        let seen = Self::storage().and_then(|storage| {
            storage
                .get_item(key)
                .map_err(|e| Error::StorageUnavailable(format!("{e:?}")))
        });
        let answer = match seen {
            Ok(value) => Ok(value.as_deref() == Some("true")),
            Err(e) => Err(e.to_string()),
        };
        self.outbox
            .borrow_mut()
            .push(Message::TourFlagLoaded(answer));
    }

    fn set(&mut self, key: &str, value: bool) -> Result<(), Error> {
        Self::storage()?
            .set_item(key, if value { "true" } else { "false" })
            .map_err(|e| Error::StorageUnavailable(format!("{e:?}")))
    }
}

// ─── Host shell ──────────────────────────────────────────────────────────

pub struct JsHost {
    fullscreen_supported: bool,
    content_changed: Option<Function>,
    fullscreen_toggled: Option<Function>,
}

impl JsHost {
    pub fn from_hooks(hooks: &JsValue) -> Self {
        let fullscreen_supported = Reflect::get(hooks, &JsValue::from_str("fullscreenSupported"))
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        Self {
            fullscreen_supported,
            content_changed: hook(hooks, "contentChanged"),
            fullscreen_toggled: hook(hooks, "fullscreenToggled"),
        }
    }
}

impl HostShell for JsHost {
    fn fullscreen_supported(&self) -> bool {
        self.fullscreen_supported
    }

    fn content_changed(&mut self, content: &[ContentNode]) {
        match serde_json::to_string(content) {
            Ok(json) => call(
                &self.content_changed,
                "contentChanged",
                &JsValue::from_str(&json),
            ),
            Err(e) => log::error!("host: could not serialize content: {e}"),
        }
    }

    fn fullscreen_toggled(&mut self, enabled: bool) {
        call(
            &self.fullscreen_toggled,
            "fullscreenToggled",
            &JsValue::from_bool(enabled),
        );
    }
}
