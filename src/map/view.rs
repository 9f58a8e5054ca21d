use api::{Notification, NotificationId};
use leptos::*;
use log::{debug, warn};

use super::leaflet::LeafletMap;
use super::loader::load_leaflet;
use super::{MapBackend, MapRenderer, OpenPopup, DEFAULT_VIEW};
use crate::config::Config;
use crate::feed::CenterRequest;

/// Whether the owning component is still alive. Leaflet may finish loading
/// after the view was disposed.
fn is_mounted<T>(value: StoredValue<T>) -> bool {
    value.try_with_value(|_| ()).is_some()
}

#[component]
pub fn MapPlaceholder() -> impl IntoView {
    view! {
        <div class="absolute inset-0 flex items-center justify-center bg-gray-900">
            <p class="text-gray-400">"Loading map..."</p>
        </div>
    }
}

#[component]
pub fn MapView(
    #[prop(into)] notifications: Signal<Vec<Notification>>,
    #[prop(into)] center: Signal<Option<CenterRequest>>,
    on_marker_click: Callback<NotificationId>,
) -> impl IntoView {
    let config = expect_context::<Config>();
    let container = create_node_ref::<html::Div>();
    let renderer = store_value(MapRenderer::<LeafletMap>::new());
    let (map_ready, set_map_ready) = create_signal(false);

    let attach = move || {
        if !is_mounted(renderer) {
            debug!("Map view disposed before Leaflet loaded");
            return;
        }
        let Some(element) = container.get_untracked() else {
            debug!("Map container gone before Leaflet loaded");
            return;
        };
        match LeafletMap::construct_map(&element, DEFAULT_VIEW) {
            Ok(backend) => {
                if renderer.try_update_value(|r| r.attach(backend)).is_some() {
                    set_map_ready.set(true);
                }
            }
            Err(err) => warn!("Cant construct map {err}"),
        }
    };
    if let Err(err) = load_leaflet(attach) {
        warn!("Cant load Leaflet {err}");
    }

    on_cleanup(move || {
        renderer.try_update_value(|r| r.teardown());
    });

    create_effect(move |_| {
        let notifications = notifications.get();
        if map_ready.get() {
            renderer.update_value(|r| {
                r.sync_markers(&notifications, move |id| on_marker_click.call(id));
            });
        }
    });

    let popup_open_delay = config.popup_open_delay;
    create_effect(move |_| {
        let Some(request) = center.get() else {
            return;
        };
        if !map_ready.get_untracked() {
            return;
        }
        let popup = renderer
            .try_update_value(|r| r.center_on(&request, popup_open_delay))
            .flatten();
        if let Some(OpenPopup { id, after }) = popup {
            set_timeout(
                move || {
                    renderer.try_update_value(|r| r.open_popup(id));
                },
                after,
            );
        }
    });

    view! {
        <div class="w-full h-full relative">
            <div node_ref=container class="w-full h-full" style="min-height: 100%;"></div>
            <Show when=move || !map_ready.get()>
                <MapPlaceholder/>
            </Show>
        </div>
    }
}
