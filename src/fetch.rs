use api::{parse_notifications, Notification};
use gloo_net::http::Request;

use crate::error::FetchError;

pub async fn fetch_notifications(url: &str) -> Result<Vec<Notification>, FetchError> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    let body = response.text().await?;
    Ok(parse_notifications(&body)?)
}
