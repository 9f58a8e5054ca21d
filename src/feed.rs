use std::time::Duration;

use api::{LatLng, Notification, NotificationId};

use crate::error::FetchError;

/// One-shot request to move the camera to a notification. `seq` is unique
/// per click so repeated clicks on the same row are distinct requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterRequest {
    pub seq: u64,
    pub id: NotificationId,
    pub at: LatLng,
}

/// Follow-up a list click needs: drop the center request after `after`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearCenter {
    pub after: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedPhase {
    Loading,
    Failed(String),
    Ready,
}

/// Polled notifications plus the selection and camera requests derived from
/// user clicks.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    notifications: Vec<Notification>,
    loading: bool,
    error: Option<String>,
    selected: Option<NotificationId>,
    center: Option<CenterRequest>,
    next_seq: u64,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            notifications: vec![],
            loading: true,
            error: None,
            selected: None,
            center: None,
            next_seq: 0,
        }
    }

    /// Last completed fetch wins. The previous list is kept on failure but
    /// stays hidden behind the error until a later poll succeeds.
    pub fn apply_fetch(&mut self, result: Result<Vec<Notification>, FetchError>) {
        match result {
            Ok(notifications) => {
                self.notifications = notifications;
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    pub fn phase(&self) -> FeedPhase {
        if self.loading {
            FeedPhase::Loading
        } else if let Some(error) = &self.error {
            FeedPhase::Failed(error.clone())
        } else {
            FeedPhase::Ready
        }
    }

    pub fn mappable(&self) -> Vec<Notification> {
        self.notifications
            .iter()
            .filter(|n| n.is_mappable())
            .cloned()
            .collect()
    }

    pub fn selected(&self) -> Option<NotificationId> {
        self.selected
    }

    pub fn center_request(&self) -> Option<CenterRequest> {
        self.center
    }

    pub fn select_marker(&mut self, id: NotificationId) {
        self.selected = Some(id);
    }

    /// Selects the row and, when it can be mapped, issues a fresh center
    /// request that must be cleared after `clear_after`.
    pub fn select_notification(
        &mut self,
        notification: &Notification,
        clear_after: Duration,
    ) -> Option<ClearCenter> {
        self.selected = Some(notification.id);
        let at = notification.coordinates()?;
        self.next_seq += 1;
        self.center = Some(CenterRequest {
            seq: self.next_seq,
            id: notification.id,
            at,
        });
        Some(ClearCenter { after: clear_after })
    }

    pub fn clear_center(&mut self) {
        self.center = None;
    }
}

pub fn location_count_label(count: usize) -> String {
    if count == 1 {
        "1 location".to_string()
    } else {
        format!("{count} locations")
    }
}
