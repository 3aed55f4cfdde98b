//! Optional native WebSocket feed carrying `{"event": ..., "data": ...}` envelopes.

use super::{decode_named, LiveDispatcher};
use crate::error::{DashboardError, DashboardResult};
use contracts::live::PushEvent;
use futures::StreamExt;
use gloo_net::websocket::{futures::WebSocket, Message};
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

/// Absolute `ws://`/`wss://` URL for `url`, which may be relative to the page.
pub fn resolve_ws_url(url: &str, page_protocol: &str, host: &str) -> String {
    if url.starts_with("ws://") || url.starts_with("wss://") {
        return url.to_string();
    }
    if let Some(rest) = url.strip_prefix("https://") {
        return format!("wss://{}", rest);
    }
    if let Some(rest) = url.strip_prefix("http://") {
        return format!("ws://{}", rest);
    }
    let scheme = if page_protocol == "https:" { "wss" } else { "ws" };
    let path = if url.starts_with('/') {
        url.to_string()
    } else {
        format!("/{}", url)
    };
    format!("{}://{}{}", scheme, host, path)
}

/// Decode one envelope. Errors name the event when the envelope carries one.
pub fn decode_message(text: &str) -> DashboardResult<PushEvent> {
    let envelope: Value = serde_json::from_str(text).map_err(|e| DashboardError::PushEvent {
        name: "envelope".to_string(),
        reason: e.to_string(),
    })?;
    let name = envelope
        .get("event")
        .and_then(Value::as_str)
        .unwrap_or("envelope");
    let payload = envelope.get("data").cloned().unwrap_or(Value::Null);
    decode_named(name, payload)
}

/// Resolve `url` against the current page location.
pub fn page_ws_url(url: &str) -> String {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location
        .as_ref()
        .and_then(|l| l.protocol().ok())
        .unwrap_or_else(|| "http:".to_string());
    let host = location
        .as_ref()
        .and_then(|l| l.host().ok())
        .unwrap_or_else(|| "127.0.0.1".to_string());
    resolve_ws_url(url, &protocol, &host)
}

/// Read events until the page goes away, reopening the socket after it closes.
pub fn connect(url: String, reconnect_delay_ms: u32, dispatcher: LiveDispatcher) {
    spawn_local(async move {
        loop {
            match WebSocket::open(&url) {
                Ok(mut ws) => {
                    log::info!("live feed connected: {}", url);
                    while let Some(msg) = ws.next().await {
                        match msg {
                            Ok(Message::Text(text)) => match decode_message(&text) {
                                Ok(event) => dispatcher.dispatch(event),
                                Err(e) => dispatcher.reject(&e),
                            },
                            Ok(Message::Bytes(_)) => log::warn!("dropping binary message"),
                            Err(e) => {
                                log::warn!("live feed error: {}", e);
                                break;
                            }
                        }
                    }
                    log::info!("live feed closed, reconnecting in {} ms", reconnect_delay_ms);
                }
                Err(e) => log::error!("failed to open live feed {}: {}", url, e),
            }
            TimeoutFuture::new(reconnect_delay_ms).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ws_url() {
        assert_eq!(resolve_ws_url("/ws", "https:", "trade.example"), "wss://trade.example/ws");
        assert_eq!(resolve_ws_url("ws", "http:", "127.0.0.1:5000"), "ws://127.0.0.1:5000/ws");
        assert_eq!(resolve_ws_url("wss://feed.example/live", "http:", "x"), "wss://feed.example/live");
        assert_eq!(resolve_ws_url("http://feed.example/live", "https:", "x"), "ws://feed.example/live");
    }

    #[test]
    fn test_decode_message() {
        let ev = decode_message(r#"{"event": "webhook_received", "data": {"webhook_id": 9}}"#).unwrap();
        assert_eq!(ev.name(), "webhook_received");
        assert!(matches!(
            decode_message("not json"),
            Err(DashboardError::PushEvent { .. })
        ));
    }

    #[test]
    fn test_decode_error_names_the_event() {
        match decode_message(r#"{"event": "update", "data": {"status": "Failed"}}"#) {
            Err(DashboardError::PushEvent { name, .. }) => assert_eq!(name, "update"),
            other => panic!("expected push event error, got {:?}", other),
        }
    }
}
