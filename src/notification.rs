use api::{format_post_time_long, Notification as NotificationData};
use leptos::{component, view, Callable, Callback, IntoView, Signal, SignalGet};

const ROW_CLASS: &str = "p-4 cursor-pointer transition-colors hover:bg-gray-700";
const SELECTED_ROW_CLASS: &str = "bg-gray-700 border-l-4 border-blue-500";

#[component]
pub fn Notification(
    notification: NotificationData,
    #[prop(into)] selected: Signal<bool>,
    on_select: Callback<NotificationData>,
) -> impl IntoView {
    let icon = notification.icon();
    let title = notification.title_label().to_string();
    let amount = notification.amount_label();
    let posted = format_post_time_long(notification.post_time, &chrono::Local);

    view! {
        <div
            on:click=move |_| on_select.call(notification.clone())
            class=move || {
                if selected.get() {
                    format!("{ROW_CLASS} {SELECTED_ROW_CLASS}")
                } else {
                    ROW_CLASS.to_string()
                }
            }
        >

            <div class="flex items-start gap-3">
                <div class="text-2xl mt-1">{icon}</div>
                <div class="flex-1 min-w-0">
                    <h3 class="font-semibold text-white text-sm md:text-base mb-1 truncate">
                        {title}
                    </h3>
                    <p class="text-gray-300 text-xs md:text-sm mb-2 line-clamp-2">{amount}</p>
                    <div class="flex items-center gap-2 text-xs text-gray-500">
                        <span>"📅"</span>
                        <span>{posted}</span>
                    </div>
                </div>
            </div>
        </div>
    }
}
