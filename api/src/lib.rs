use chrono::{DateTime, Locale, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type NotificationId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Spending category attached to a notification by the backend classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Restaurant,
    Grocery,
    Fuel,
    Transport,
    Shopping,
    Entertainment,
    Health,
    Accommodation,
    Travel,
    Services,
    Utilities,
    Subscription,
    #[serde(other)]
    Other,
}

pub const FALLBACK_EXPENSE_ICON: &str = "💳";

impl ExpenseType {
    pub fn icon(&self) -> &'static str {
        match self {
            ExpenseType::Restaurant => "🍽️",
            ExpenseType::Transport => "⛽",
            ExpenseType::Grocery => "🛒",
            ExpenseType::Entertainment => "🎬",
            ExpenseType::Health => "💊",
            ExpenseType::Shopping => "🛍️",
            ExpenseType::Travel => "✈️",
            ExpenseType::Utilities => "💡",
            _ => FALLBACK_EXPENSE_ICON,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(default)]
    pub notification_id: Option<i64>,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_clearable: Option<bool>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub expense_type: Option<ExpenseType>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub post_time: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Notification {
    /// Both coordinates, or `None` when the notification cannot be placed on a map.
    pub fn coordinates(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(LatLng { lat, lng }),
            _ => None,
        }
    }

    pub fn is_mappable(&self) -> bool {
        self.coordinates().is_some()
    }

    pub fn title_label(&self) -> &str {
        non_empty(&self.title).unwrap_or("No title")
    }

    pub fn text_label(&self) -> &str {
        non_empty(&self.text).unwrap_or("No text")
    }

    pub fn amount_label(&self) -> String {
        match (self.amount, non_empty(&self.currency)) {
            (Some(amount), Some(currency)) => format!("{currency}{amount:.2}"),
            _ => "No amount".to_string(),
        }
    }

    pub fn icon(&self) -> &'static str {
        self.expense_type
            .as_ref()
            .map(ExpenseType::icon)
            .unwrap_or(FALLBACK_EXPENSE_ICON)
    }

    pub fn row_key(&self) -> RowKey {
        RowKey {
            id: self.id,
            post_time: self.post_time,
            icon: self.icon(),
            title: self.title_label().to_string(),
            amount: self.amount_label(),
            position: self
                .coordinates()
                .map(|at| (at.lat.to_bits(), at.lng.to_bits())),
        }
    }
}

/// Identity of a rendered list row. Differs whenever anything the row shows
/// or hands to its click handler differs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    id: NotificationId,
    post_time: i64,
    icon: &'static str,
    title: String,
    amount: String,
    position: Option<(u64, u64)>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Decodes the body of `GET /notifications`.
///
/// Only `data` is read from the envelope. When it is missing or not an
/// array the feed is simply empty.
pub fn parse_notifications(body: &str) -> serde_json::Result<Vec<Notification>> {
    let mut envelope: Value = serde_json::from_str(body)?;
    match envelope.get_mut("data").map(Value::take) {
        Some(data @ Value::Array(_)) => serde_json::from_value(data),
        other => {
            if other.is_some_and(|data| !data.is_null()) {
                log::debug!("Ignoring non-array notification data");
            }
            Ok(vec![])
        }
    }
}

fn post_time_in<Tz: TimeZone>(post_time: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.timestamp_millis_opt(post_time).single()
}

/// `martes, 14 de noviembre de 2023, 22:13`
pub fn format_post_time_long<Tz>(post_time: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    post_time_in(post_time, tz)
        .map(|time| {
            time.format_localized("%A, %-d de %B de %Y, %H:%M", Locale::es_ES)
                .to_string()
        })
        .unwrap_or_else(|| "Invalid date".to_string())
}

pub fn format_post_time_short<Tz>(post_time: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    post_time_in(post_time, tz)
        .map(|time| time.format("%d/%m/%Y, %H:%M:%S").to_string())
        .unwrap_or_else(|| "Invalid date".to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn coffee() -> Notification {
        serde_json::from_str(
            r#"{
                "id": 1,
                "notificationId": 77,
                "packageName": "com.bank.app",
                "title": "Coffee",
                "text": "Paid $4.50 at Cafe",
                "amount": 4.5,
                "currency": "$",
                "latitude": 41.39,
                "longitude": 2.16,
                "postTime": 1700000000000,
                "createdAt": "2023-11-14T22:13:20",
                "expenseType": "restaurant",
                "messages": null
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn decodes_camel_case_record() {
        let notification = coffee();
        assert_eq!(notification.id, 1);
        assert_eq!(notification.notification_id, Some(77));
        assert_eq!(notification.package_name.as_deref(), Some("com.bank.app"));
        assert_eq!(notification.expense_type, Some(ExpenseType::Restaurant));
        assert_eq!(notification.coordinates(), Some(LatLng::new(41.39, 2.16)));
    }

    #[test]
    fn coordinates_need_both_values() {
        let mut notification = coffee();
        notification.latitude = None;
        assert!(!notification.is_mappable());

        let mut notification = coffee();
        notification.longitude = None;
        assert_eq!(notification.coordinates(), None);
    }

    #[test]
    fn row_key_tracks_displayed_fields() {
        let plain = coffee();
        assert_eq!(plain.row_key(), coffee().row_key());

        let mut retitled = coffee();
        retitled.title = Some("Lunch".to_string());
        assert_ne!(retitled.row_key(), plain.row_key());

        let mut repriced = coffee();
        repriced.amount = Some(5.0);
        assert_ne!(repriced.row_key(), plain.row_key());

        let mut moved = coffee();
        moved.latitude = Some(40.0);
        assert_ne!(moved.row_key(), plain.row_key());

        let mut annotated = coffee();
        annotated.text = Some("Paid $4.50 at Cafe Nou".to_string());
        assert_eq!(annotated.row_key(), plain.row_key());
    }

    #[test]
    fn amount_label_formats_two_decimals() {
        assert_eq!(coffee().amount_label(), "$4.50");

        let mut notification = coffee();
        notification.amount = Some(12.0);
        notification.currency = Some("€".to_string());
        assert_eq!(notification.amount_label(), "€12.00");
    }

    #[test]
    fn amount_label_needs_currency() {
        let mut notification = coffee();
        notification.currency = Some(String::new());
        assert_eq!(notification.amount_label(), "No amount");

        notification.currency = None;
        assert_eq!(notification.amount_label(), "No amount");

        let mut notification = coffee();
        notification.amount = None;
        assert_eq!(notification.amount_label(), "No amount");
    }

    #[test]
    fn missing_text_fields_fall_back_to_placeholders() {
        let notification: Notification =
            serde_json::from_str(r#"{"id": 3, "postTime": 0}"#).unwrap();
        assert_eq!(notification.title_label(), "No title");
        assert_eq!(notification.text_label(), "No text");
        assert_eq!(notification.icon(), FALLBACK_EXPENSE_ICON);
    }

    #[test]
    fn unknown_expense_type_uses_generic_icon() {
        let notification: Notification =
            serde_json::from_str(r#"{"id": 3, "postTime": 0, "expenseType": "crypto"}"#)
                .unwrap();
        assert_eq!(notification.expense_type, Some(ExpenseType::Other));
        assert_eq!(notification.icon(), "💳");
    }

    #[test]
    fn icon_lookup() {
        assert_eq!(ExpenseType::Restaurant.icon(), "🍽️");
        assert_eq!(ExpenseType::Transport.icon(), "⛽");
        assert_eq!(ExpenseType::Grocery.icon(), "🛒");
        assert_eq!(ExpenseType::Utilities.icon(), "💡");
        assert_eq!(ExpenseType::Fuel.icon(), "💳");
        assert_eq!(ExpenseType::Accommodation.icon(), "💳");
    }

    #[test]
    fn parses_envelope_in_source_order() {
        let body = r#"{
            "status": "success",
            "count": 2,
            "data": [
                {"id": 9, "postTime": 2, "latitude": 1.0, "longitude": 2.0},
                {"id": 4, "postTime": 1}
            ]
        }"#;
        let notifications = parse_notifications(body).unwrap();
        let ids = notifications.iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![9, 4]);
    }

    #[test]
    fn other_shapes_are_an_empty_feed() {
        for body in [
            r#"{}"#,
            r#"{"data": null}"#,
            r#"{"data": []}"#,
            r#"{"data": "nope"}"#,
            r#"{"status": "success"}"#,
            r#"[]"#,
        ] {
            assert_eq!(parse_notifications(body).unwrap(), vec![], "{body}");
        }
    }

    #[test]
    fn invalid_bodies_are_errors() {
        assert!(parse_notifications("<html>").is_err());
        assert!(parse_notifications(r#"{"data": [{"title": "no id"}]}"#).is_err());
    }

    #[test]
    fn long_post_time_is_spanish() {
        let formatted = format_post_time_long(1_700_000_000_000, &Utc);
        assert!(formatted.contains("14 de noviembre de 2023"), "{formatted}");
        assert!(formatted.ends_with("22:13"), "{formatted}");
    }

    #[test]
    fn short_post_time() {
        assert_eq!(
            format_post_time_short(1_700_000_000_000, &Utc),
            "14/11/2023, 22:13:20"
        );
    }
}
