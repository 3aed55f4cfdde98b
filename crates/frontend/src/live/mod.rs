//! Push events from the server: what each one does to the page.
//!
//! `update` and `webhook_received` resynchronize by reloading the whole
//! page; client-side page and filter state is rebuilt from the server render.
//! `price_update` patches position rows in place.

pub mod socket;

use crate::error::{DashboardError, DashboardResult};
use crate::positions::apply_price_update;
use crate::shared::toast::{ToastKind, Toasts};
use contracts::live::{PriceUpdate, PushEvent};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

#[derive(Debug, Clone, PartialEq)]
pub enum LiveAction {
    Toast(String),
    Reload { delay_ms: u32 },
    ApplyPrices(PriceUpdate),
}

/// Actions for one event, in execution order.
pub fn plan(event: PushEvent, reload_delay_ms: u32) -> Vec<LiveAction> {
    match event {
        PushEvent::Update(update) => vec![
            LiveAction::Toast(format!("Webhook {} status: {}", update.id, update.status)),
            LiveAction::Reload { delay_ms: 0 },
        ],
        PushEvent::WebhookReceived(received) => vec![
            LiveAction::Toast(format!("New webhook received: {}", received.webhook_id)),
            LiveAction::Reload {
                delay_ms: reload_delay_ms,
            },
        ],
        PushEvent::PriceUpdate(prices) => vec![LiveAction::ApplyPrices(prices)],
    }
}

/// Decode an event delivered as a name plus a separate payload.
pub fn decode_named(name: &str, payload: serde_json::Value) -> DashboardResult<PushEvent> {
    PushEvent::from_parts(name, payload).map_err(|e| DashboardError::PushEvent {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Text of the error toast for an event that could not be read, if any.
///
/// Only events that would have refreshed the page are worth telling the user
/// about; a bad price tick is superseded by the next one.
pub fn drop_notice(err: &DashboardError) -> Option<String> {
    match err {
        DashboardError::PushEvent { name, .. }
            if name == PushEvent::UPDATE || name == PushEvent::WEBHOOK_RECEIVED =>
        {
            Some(format!(
                "Could not read `{}` event, reload the page for the latest data",
                name
            ))
        }
        _ => None,
    }
}

fn reload_page() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().reload() {
        log::error!("page reload failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct LiveDispatcher {
    document: Document,
    toasts: Toasts,
    reload_delay_ms: u32,
}

impl LiveDispatcher {
    pub fn new(document: Document, toasts: Toasts, reload_delay_ms: u32) -> Self {
        Self {
            document,
            toasts,
            reload_delay_ms,
        }
    }

    pub fn dispatch(&self, event: PushEvent) {
        log::debug!("push event `{}`", event.name());
        for action in plan(event, self.reload_delay_ms) {
            self.run(action);
        }
    }

    /// Entry point for socket.io style delivery: event name plus payload.
    /// Events that cannot be decoded are dropped.
    pub fn dispatch_named(&self, name: &str, payload: serde_json::Value) {
        match decode_named(name, payload) {
            Ok(event) => self.dispatch(event),
            Err(e) => self.reject(&e),
        }
    }

    /// Drop an undecodable event: log it, and toast when the user missed a refresh.
    pub fn reject(&self, err: &DashboardError) {
        match err {
            DashboardError::PushEvent { name, .. } if !PushEvent::is_known(name) => {
                log::warn!("ignoring unknown push event `{}`", name);
            }
            _ => log::warn!("dropping push event: {}", err),
        }
        if let Some(notice) = drop_notice(err) {
            self.toasts.push(ToastKind::Error, notice);
        }
    }

    fn run(&self, action: LiveAction) {
        match action {
            LiveAction::Toast(text) => self.toasts.push(ToastKind::Success, text),
            LiveAction::Reload { delay_ms: 0 } => reload_page(),
            LiveAction::Reload { delay_ms } => spawn_local(async move {
                TimeoutFuture::new(delay_ms).await;
                reload_page();
            }),
            LiveAction::ApplyPrices(prices) => {
                apply_price_update(&self.document, &prices);
            }
        }
    }
}
