use leptos::{component, view, IntoView};

#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="w-full h-screen flex items-center justify-center bg-gray-900">
            <div class="text-center">
                <div class="animate-spin rounded-full h-12 w-12 border-b-2 border-blue-500 mx-auto mb-4"></div>
                <p class="text-xl text-gray-300">"Loading notifications..."</p>
            </div>
        </div>
    }
}

#[component]
pub fn ErrorScreen(message: String) -> impl IntoView {
    view! {
        <div class="w-full h-screen flex items-center justify-center bg-gray-900">
            <div class="text-center">
                <div class="text-red-500 text-6xl mb-4">"⚠️"</div>
                <p class="text-xl text-red-400">"Error: " {message}</p>
            </div>
        </div>
    }
}

#[component]
pub fn EmptyFeed() -> impl IntoView {
    view! {
        <div class="p-8 text-center">
            <div class="text-6xl mb-4">"📭"</div>
            <p class="text-gray-400">"No notifications with location yet"</p>
        </div>
    }
}
