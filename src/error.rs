use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{0}")]
    Network(#[from] gloo_net::Error),

    #[error("Failed to fetch notifications (HTTP {0})")]
    Status(u16),

    #[error("Malformed notifications response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Map library call failed: {0}")]
    Library(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl MapError {
    pub fn library(err: JsValue) -> Self {
        MapError::Library(describe(&err))
    }

    pub fn dom(err: JsValue) -> Self {
        MapError::Dom(describe(&err))
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
