use leptos::*;
use leptos_router::{Route, Router, Routes};

use crate::config::Config;
use crate::notification_map::NotificationMap;

#[component]
pub fn App(config: Config) -> impl IntoView {
    provide_context(config);

    view! {
        <main class="bg-gray-900 min-h-screen text-slate-200 antialiased">
            <Router>
                <Routes>
                    <Route
                        path="/"
                        view=move || {
                            view! { <NotificationMap/> }
                        }
                    />

                </Routes>
            </Router>
        </main>
    }
}
