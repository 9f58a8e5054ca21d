use std::collections::HashMap;
use std::time::Duration;

use api::{format_post_time_short, LatLng, Notification, NotificationId};
use log::{debug, info};

use crate::error::MapError;
use crate::feed::CenterRequest;

pub mod leaflet;
pub mod loader;
pub mod view;

pub const DEFAULT_VIEW: Viewport = Viewport {
    center: LatLng {
        lat: 41.3851,
        lng: 2.1734,
    },
    zoom: 13.0,
};
pub const INITIAL_PLACEMENT_ZOOM: f64 = 13.0;
pub const FOCUS_ZOOM: f64 = 16.0;
pub const FOCUS_TRANSITION: Transition = Transition::Fly {
    duration_secs: 1.0,
    ease_linearity: 0.5,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Instant,
    Fly { duration_secs: f64, ease_linearity: f64 },
}

/// Popup to open once the camera has landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenPopup {
    pub id: NotificationId,
    pub after: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub text: String,
    pub posted: String,
}

impl PopupContent {
    pub fn for_notification(notification: &Notification) -> Self {
        Self {
            title: notification.title_label().to_string(),
            text: notification.text_label().to_string(),
            posted: format_post_time_short(notification.post_time, &chrono::Local),
        }
    }
}

/// The slice of a map widget the renderer relies on. Dropping the backend
/// disposes the widget.
pub trait MapBackend: Sized {
    type Container;
    type Marker;

    fn construct_map(container: &Self::Container, view: Viewport) -> Result<Self, MapError>;

    fn add_marker(
        &mut self,
        at: LatLng,
        popup: PopupContent,
        on_click: Box<dyn Fn()>,
    ) -> Self::Marker;

    fn remove_marker(&mut self, marker: Self::Marker);

    fn fly_to(&mut self, at: LatLng, zoom: f64, transition: Transition);

    fn open_popup(&mut self, marker: &Self::Marker);
}

enum MapState<B: MapBackend> {
    Uninitialized,
    Ready {
        backend: B,
        markers: HashMap<NotificationId, B::Marker>,
    },
}

pub struct MapRenderer<B: MapBackend> {
    state: MapState<B>,
    camera_placed: bool,
}

impl<B: MapBackend> Default for MapRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: MapBackend> MapRenderer<B> {
    pub fn new() -> Self {
        Self {
            state: MapState::Uninitialized,
            camera_placed: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, MapState::Ready { .. })
    }

    pub fn attach(&mut self, backend: B) {
        if self.is_ready() {
            debug!("Map already attached, dropping new widget");
            return;
        }
        info!("Map ready");
        self.state = MapState::Ready {
            backend,
            markers: HashMap::new(),
        };
    }

    pub fn teardown(&mut self) {
        if let MapState::Ready {
            mut backend,
            mut markers,
        } = std::mem::replace(&mut self.state, MapState::Uninitialized)
        {
            for (_, marker) in markers.drain() {
                backend.remove_marker(marker);
            }
            info!("Map disposed");
        }
    }

    /// Replaces every marker with a fresh one per mappable notification and
    /// returns the new marker count.
    pub fn sync_markers<F>(&mut self, notifications: &[Notification], on_click: F) -> usize
    where
        F: Fn(NotificationId) + Clone + 'static,
    {
        let MapState::Ready { backend, markers } = &mut self.state else {
            return 0;
        };

        for (_, marker) in markers.drain() {
            backend.remove_marker(marker);
        }

        for notification in notifications {
            let Some(at) = notification.coordinates() else {
                continue;
            };
            let id = notification.id;
            let on_click = on_click.clone();
            let marker = backend.add_marker(
                at,
                PopupContent::for_notification(notification),
                Box::new(move || on_click(id)),
            );
            if let Some(stale) = markers.insert(id, marker) {
                backend.remove_marker(stale);
            }
        }

        if !self.camera_placed {
            if let Some(first) = notifications.iter().find_map(Notification::coordinates) {
                backend.fly_to(first, INITIAL_PLACEMENT_ZOOM, Transition::Instant);
                self.camera_placed = true;
            }
        }

        debug!("Synced {} markers", markers.len());
        markers.len()
    }

    /// Flies to the request. When the requested marker exists its popup is
    /// due `popup_after` later.
    pub fn center_on(
        &mut self,
        request: &CenterRequest,
        popup_after: Duration,
    ) -> Option<OpenPopup> {
        let MapState::Ready { backend, markers } = &mut self.state else {
            return None;
        };
        backend.fly_to(request.at, FOCUS_ZOOM, FOCUS_TRANSITION);
        markers.contains_key(&request.id).then_some(OpenPopup {
            id: request.id,
            after: popup_after,
        })
    }

    pub fn open_popup(&mut self, id: NotificationId) -> bool {
        let MapState::Ready { backend, markers } = &mut self.state else {
            return false;
        };
        match markers.get(&id) {
            Some(marker) => {
                backend.open_popup(marker);
                true
            }
            None => false,
        }
    }
}
