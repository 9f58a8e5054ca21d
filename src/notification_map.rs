use api::{Notification, NotificationId};
use enclose::enclose;
use leptos::*;
use log::{debug, warn};
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::components::status::{ErrorScreen, LoadingScreen};
use crate::config::{is_narrow_viewport, Config};
use crate::feed::{ClearCenter, FeedPhase, FeedState};
use crate::fetch::fetch_notifications;
use crate::map::view::MapView;
use crate::notification_list::NotificationList;

fn scroll_to_top_on_narrow_viewport() {
    let window = window();
    let width = window.inner_width().ok().and_then(|width| width.as_f64());
    if width.is_some_and(is_narrow_viewport) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

#[component]
pub fn NotificationMap() -> impl IntoView {
    let config = expect_context::<Config>();
    let feed = create_rw_signal(FeedState::new());

    let refresh = enclose!((config) move || {
        let url = config.notifications_url.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_notifications(&url).await;
            match &result {
                Ok(notifications) => debug!("Fetched {} notifications", notifications.len()),
                Err(err) => warn!("Couldnt refresh notifications {err}"),
            }
            if feed.try_update(|feed| feed.apply_fetch(result)).is_none() {
                debug!("Notification feed dropped before fetch resolved");
            }
        });
    });

    refresh();
    match set_interval_with_handle(refresh, config.poll_interval) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(err) => warn!("Cant schedule notification polling {err:?}"),
    }

    let phase = create_memo(move |_| feed.with(FeedState::phase));
    let notifications = create_memo(move |_| feed.with(FeedState::mappable));
    let selected = create_memo(move |_| feed.with(FeedState::selected));
    let center = create_memo(move |_| feed.with(FeedState::center_request));

    let on_marker_click = Callback::new(move |id: NotificationId| {
        feed.update(|feed| feed.select_marker(id));
    });

    let center_clear_delay = config.center_clear_delay;
    let on_select = Callback::new(move |notification: Notification| {
        let clear = feed
            .try_update(|feed| feed.select_notification(&notification, center_clear_delay))
            .flatten();
        if let Some(ClearCenter { after }) = clear {
            set_timeout(
                move || {
                    feed.try_update(FeedState::clear_center);
                },
                after,
            );
        }
        scroll_to_top_on_narrow_viewport();
    });

    move || match phase.get() {
        FeedPhase::Loading => view! { <LoadingScreen/> }.into_view(),
        FeedPhase::Failed(message) => view! { <ErrorScreen message=message/> }.into_view(),
        FeedPhase::Ready => {
            view! {
                <div class="flex flex-col md:flex-row h-screen bg-gray-900">
                    <div class="w-full md:w-2/3 h-64 md:h-full order-1">
                        <MapView
                            notifications=notifications
                            center=center
                            on_marker_click=on_marker_click
                        />
                    </div>
                    <div class="w-full md:w-1/3 h-auto md:h-full bg-gray-800 overflow-y-auto order-2">
                        <NotificationList
                            notifications=notifications
                            selected=selected
                            on_select=on_select
                        />
                    </div>
                </div>
            }
                .into_view()
        }
    }
}
