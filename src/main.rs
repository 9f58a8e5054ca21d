mod app;
mod components;
mod config;
mod error;
mod feed;
mod fetch;
mod map;
mod notification;
mod notification_list;
mod notification_map;

use app::*;
use config::Config;
use leptos::*;

fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = Config::from_env();
    log::set_max_level(config.log_level.to_level_filter());
    log::info!("Polling {} every {:?}", config.notifications_url, config.poll_interval);

    mount_to_body(move || {
        view! { <App config=config/> }
    })
}
