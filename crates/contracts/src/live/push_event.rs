//! Push events emitted by the server over the realtime channel.
//!
//! On the native WebSocket feed every message is an envelope
//! `{"event": "<name>", "data": {...}}`. Socket.io style clients deliver the
//! name and the payload separately; [`PushEvent::from_parts`] joins them.

use super::price_tick::PriceUpdate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum PushEvent {
    /// Webhook processing finished with a new status
    Update(StatusUpdate),
    /// A new webhook was accepted by the server
    WebhookReceived(WebhookReceived),
    /// Fresh bid/ask quotes for open positions
    PriceUpdate(PriceUpdate),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(deserialize_with = "id_as_text")]
    pub id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookReceived {
    #[serde(deserialize_with = "id_as_text")]
    pub webhook_id: String,
}

impl PushEvent {
    pub const UPDATE: &'static str = "update";
    pub const WEBHOOK_RECEIVED: &'static str = "webhook_received";
    pub const PRICE_UPDATE: &'static str = "price_update";
    pub const NAMES: [&'static str; 3] = [Self::UPDATE, Self::WEBHOOK_RECEIVED, Self::PRICE_UPDATE];

    pub fn is_known(name: &str) -> bool {
        Self::NAMES.contains(&name)
    }

    /// Decode an event delivered as a name plus a separate payload.
    pub fn from_parts(name: &str, payload: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::json!({ "event": name, "data": payload }))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PushEvent::Update(_) => Self::UPDATE,
            PushEvent::WebhookReceived(_) => Self::WEBHOOK_RECEIVED,
            PushEvent::PriceUpdate(_) => Self::PRICE_UPDATE,
        }
    }
}

/// Ids are database integers on the server but some emitters send strings.
fn id_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Int(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}
