use api::{Notification as NotificationData, NotificationId};
use leptos::{component, view, Callback, For, IntoView, Show, Signal, SignalGet};

use crate::components::status::EmptyFeed;
use crate::feed::location_count_label;
use crate::notification::Notification;

#[component]
pub fn NotificationList(
    #[prop(into)] notifications: Signal<Vec<NotificationData>>,
    #[prop(into)] selected: Signal<Option<NotificationId>>,
    on_select: Callback<NotificationData>,
) -> impl IntoView {
    view! {
        <div class="p-4 border-b border-gray-700 sticky top-0 bg-gray-800 z-10">
            <h2 class="text-2xl font-bold text-white flex items-center gap-2">
                <span>"📍"</span>
                " Notifications"
            </h2>
            <p class="text-sm text-gray-400 mt-1">
                {move || location_count_label(notifications.get().len())}
            </p>
        </div>

        <Show when=move || !notifications.get().is_empty() fallback=EmptyFeed>
            <div class="divide-y divide-gray-700">
                <For
                    each=move || notifications.get()
                    key=NotificationData::row_key
                    children=move |notification| {
                        let id = notification.id;
                        view! {
                            <Notification
                                notification=notification
                                selected=Signal::derive(move || selected.get() == Some(id))
                                on_select=on_select
                            />
                        }
                    }
                />

            </div>
        </Show>
    }
}
