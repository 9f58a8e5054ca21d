use api::LatLng;
use js_sys::Reflect;
use leptos::{html::Div, view, HtmlElement};
use log::warn;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{MapBackend, PopupContent, Transition, Viewport};
use crate::error::MapError;

pub const STYLESHEET_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const STYLESHEET_INTEGRITY: &str = "sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY=";
pub const SCRIPT_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
pub const SCRIPT_INTEGRITY: &str = "sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo=";

const ICON_RETINA_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon-2x.png";
const ICON_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon.png";
const SHADOW_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-shadow.png";

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;

mod ffi {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        pub type Map;

        #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
        pub fn create_map(container: &web_sys::HtmlElement) -> Result<Map, JsValue>;

        #[wasm_bindgen(method, js_name = setView)]
        pub fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

        #[wasm_bindgen(method, js_name = flyTo)]
        pub fn fly_to(this: &Map, center: &JsValue, zoom: f64, options: &JsValue) -> Map;

        #[wasm_bindgen(method)]
        pub fn remove(this: &Map) -> Map;

        pub type TileLayer;

        #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
        pub fn tile_layer(url_template: &str, options: &JsValue) -> Result<TileLayer, JsValue>;

        #[wasm_bindgen(method, js_name = addTo)]
        pub fn add_to(this: &TileLayer, map: &Map) -> TileLayer;

        pub type Marker;

        #[wasm_bindgen(js_namespace = L, js_name = marker)]
        pub fn create_marker(lat_lng: &JsValue) -> Marker;

        #[wasm_bindgen(method, js_name = addTo)]
        pub fn add_to(this: &Marker, map: &Map) -> Marker;

        #[wasm_bindgen(method, js_name = bindPopup)]
        pub fn bind_popup(this: &Marker, content: &web_sys::HtmlElement) -> Marker;

        #[wasm_bindgen(method, js_name = openPopup)]
        pub fn open_popup(this: &Marker) -> Marker;

        #[wasm_bindgen(method)]
        pub fn on(this: &Marker, event: &str, handler: &js_sys::Function) -> Marker;

        #[wasm_bindgen(method)]
        pub fn remove(this: &Marker) -> Marker;

        #[wasm_bindgen(catch, js_namespace = ["L", "Icon", "Default"], js_name = mergeOptions)]
        pub fn merge_default_icon_options(options: &JsValue) -> Result<(), JsValue>;
    }
}

#[derive(Serialize)]
struct TileLayerOptions {
    attribution: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IconOptions {
    icon_retina_url: &'static str,
    icon_url: &'static str,
    shadow_url: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlyOptions {
    animate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ease_linearity: Option<f64>,
}

impl From<Transition> for FlyOptions {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Instant => FlyOptions {
                animate: false,
                duration: None,
                ease_linearity: None,
            },
            Transition::Fly {
                duration_secs,
                ease_linearity,
            } => FlyOptions {
                animate: true,
                duration: Some(duration_secs),
                ease_linearity: Some(ease_linearity),
            },
        }
    }
}

/// Whether the Leaflet script has already defined `window.L`.
pub fn is_available() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("L")).unwrap_or(false)
}

fn lat_lng(at: LatLng) -> JsValue {
    js_sys::Array::of2(&at.lat.into(), &at.lng.into()).into()
}

fn options<T: Serialize>(value: &T) -> Result<JsValue, MapError> {
    to_value(value).map_err(|err| MapError::Library(err.to_string()))
}

fn lookup(path: &[&str]) -> Result<JsValue, MapError> {
    path.iter().try_fold(JsValue::from(js_sys::global()), |target, key| {
        Reflect::get(&target, &JsValue::from_str(key)).map_err(MapError::library)
    })
}

/// Leaflet guesses its marker image location from the stylesheet path, which
/// fails when the library is injected at runtime.
fn use_cdn_marker_icons() -> Result<(), MapError> {
    let prototype = lookup(&["L", "Icon", "Default", "prototype"])?;
    if let Some(prototype) = prototype.dyn_ref::<js_sys::Object>() {
        Reflect::delete_property(prototype, &JsValue::from_str("_getIconUrl"))
            .map_err(MapError::library)?;
    }
    ffi::merge_default_icon_options(&options(&IconOptions {
        icon_retina_url: ICON_RETINA_URL,
        icon_url: ICON_URL,
        shadow_url: SHADOW_URL,
    })?)
    .map_err(MapError::library)
}

fn popup_element(popup: PopupContent) -> HtmlElement<Div> {
    view! {
        <div style="padding: 8px;">
            <h3 style="font-weight: bold; font-size: 16px; margin-bottom: 8px;">{popup.title}</h3>
            <p style="font-size: 13px; color: #374151; margin-bottom: 8px;">{popup.text}</p>
            <p style="font-size: 11px; color: #6b7280;">{popup.posted}</p>
        </div>
    }
}

pub struct LeafletMap {
    map: ffi::Map,
}

pub struct LeafletMarker {
    marker: ffi::Marker,
    _on_click: Closure<dyn Fn()>,
}

impl MapBackend for LeafletMap {
    type Container = web_sys::HtmlElement;
    type Marker = LeafletMarker;

    fn construct_map(container: &web_sys::HtmlElement, view: Viewport) -> Result<Self, MapError> {
        if let Err(err) = use_cdn_marker_icons() {
            warn!("Cant override marker icons {err}");
        }
        let map = ffi::create_map(container).map_err(MapError::library)?;
        map.set_view(&lat_lng(view.center), view.zoom);
        ffi::tile_layer(
            TILE_URL,
            &options(&TileLayerOptions {
                attribution: TILE_ATTRIBUTION,
            })?,
        )
        .map_err(MapError::library)?
        .add_to(&map);
        Ok(Self { map })
    }

    fn add_marker(
        &mut self,
        at: LatLng,
        popup: PopupContent,
        on_click: Box<dyn Fn()>,
    ) -> LeafletMarker {
        let marker = ffi::create_marker(&lat_lng(at));
        marker.add_to(&self.map);
        marker.bind_popup(&popup_element(popup));
        let on_click = Closure::wrap(on_click);
        marker.on("click", on_click.as_ref().unchecked_ref());
        LeafletMarker {
            marker,
            _on_click: on_click,
        }
    }

    fn remove_marker(&mut self, marker: LeafletMarker) {
        marker.marker.remove();
    }

    fn fly_to(&mut self, at: LatLng, zoom: f64, transition: Transition) {
        match options(&FlyOptions::from(transition)) {
            Ok(options) => {
                self.map.fly_to(&lat_lng(at), zoom, &options);
            }
            Err(err) => warn!("Cant move map camera {err}"),
        }
    }

    fn open_popup(&mut self, marker: &LeafletMarker) {
        marker.marker.open_popup();
    }
}

impl Drop for LeafletMap {
    fn drop(&mut self) {
        self.map.remove();
    }
}
