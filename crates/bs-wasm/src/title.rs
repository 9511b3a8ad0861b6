//! Title field relocation into the editor topbar.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlInputElement};

pub const TITLE_PLACEHOLDER: &str = "Enter title here";

/// Move the host's title field to the front of `topbar` and give its input
/// a placeholder. A field without an input is still moved.
pub fn relocate(field: &Element, topbar: &Element) -> Result<(), JsValue> {
    match field.query_selector("input")? {
        Some(input) => match input.dyn_into::<HtmlInputElement>() {
            Ok(input) => input.set_placeholder(TITLE_PLACEHOLDER),
            Err(_) => log::debug!("title: first input is not an <input> element"),
        },
        None => log::debug!("title: field has no input"),
    }
    topbar.prepend_with_node_1(field)
}
