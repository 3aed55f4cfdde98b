use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid dashboard config: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("server responded with status {status} {text}")]
    Status { status: u16, text: String },

    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("invalid `{name}` event: {reason}")]
    PushEvent { name: String, reason: String },

    #[error("no browser window or document available")]
    NoDocument,
}

impl From<DashboardError> for JsValue {
    fn from(err: DashboardError) -> Self {
        JsValue::from(js_sys::Error::new(&err.to_string()))
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
