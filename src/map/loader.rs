use leptos::{document, request_animation_frame};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlLinkElement, HtmlScriptElement};

use super::leaflet::{
    is_available, SCRIPT_INTEGRITY, SCRIPT_URL, STYLESHEET_INTEGRITY, STYLESHEET_URL,
};
use crate::error::MapError;

const STYLESHEET_ID: &str = "leaflet-stylesheet";
const SCRIPT_ID: &str = "leaflet-script";

/// Calls `on_ready` once Leaflet is usable. If the script fails to load the
/// callback never runs.
pub fn load_leaflet(on_ready: impl FnOnce() + 'static) -> Result<(), MapError> {
    if is_available() {
        request_animation_frame(on_ready);
        return Ok(());
    }

    let document = document();
    let head = document
        .head()
        .ok_or_else(|| MapError::Dom("document has no head".to_string()))?;

    if document.get_element_by_id(STYLESHEET_ID).is_none() {
        let link = document
            .create_element("link")
            .map_err(MapError::dom)?
            .unchecked_into::<HtmlLinkElement>();
        link.set_id(STYLESHEET_ID);
        link.set_rel("stylesheet");
        link.set_href(STYLESHEET_URL);
        link.set_integrity(STYLESHEET_INTEGRITY);
        link.set_cross_origin(Some(""));
        head.append_child(&link).map_err(MapError::dom)?;
    }

    let script = match document.get_element_by_id(SCRIPT_ID) {
        Some(existing) => existing.unchecked_into::<HtmlScriptElement>(),
        None => {
            let script = document
                .create_element("script")
                .map_err(MapError::dom)?
                .unchecked_into::<HtmlScriptElement>();
            script.set_id(SCRIPT_ID);
            script.set_src(SCRIPT_URL);
            script.set_integrity(SCRIPT_INTEGRITY);
            script.set_cross_origin(Some(""));
            head.append_child(&script).map_err(MapError::dom)?;
            debug!("Injected Leaflet from {SCRIPT_URL}");
            script
        }
    };

    let on_load = Closure::once_into_js(on_ready);
    script
        .add_event_listener_with_callback("load", on_load.unchecked_ref())
        .map_err(MapError::dom)?;

    let on_error = Closure::once_into_js(|| warn!("Leaflet failed to load from {SCRIPT_URL}"));
    script
        .add_event_listener_with_callback("error", on_error.unchecked_ref())
        .map_err(MapError::dom)?;
    Ok(())
}
