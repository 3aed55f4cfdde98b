//! Detail modal for webhooks and positions.

pub mod api;
pub mod state;
pub mod view;

pub use api::DetailKind;
pub use state::DetailState;
pub use view::DetailModal;

use crate::shared::dom_utils::listen;
use crate::shared::toast::{ToastKind, Toasts};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event};

const WEBHOOK_ATTR: &str = "data-webhook-detail";
const POSITION_ATTR: &str = "data-position-detail";

#[derive(Clone)]
pub struct DetailService {
    base: String,
    state: RwSignal<DetailState>,
    toasts: Toasts,
}

impl DetailService {
    pub fn new(base: String, state: RwSignal<DetailState>, toasts: Toasts) -> Self {
        Self { base, state, toasts }
    }

    /// Open the modal and load the record. A response arriving after the
    /// user closed the modal or opened another record is dropped.
    pub fn open(&self, kind: DetailKind, id: u32) {
        self.state.set(DetailState::Loading { kind, id });

        let base = self.base.clone();
        let state = self.state;
        let toasts = self.toasts;
        spawn_local(async move {
            let result = api::fetch_detail(&base, kind, id).await;
            if !state.with_untracked(|s| s.awaits(kind, id)) {
                return;
            }
            match result {
                Ok(record) => state.set(DetailState::loaded(kind, id, &record)),
                Err(e) => {
                    log::error!("failed to load {}: {}", kind.title(id), e);
                    toasts.push(ToastKind::Error, failure_notice(kind, id));
                    state.set(DetailState::Failed {
                        kind,
                        id,
                        message: e.to_string(),
                    });
                }
            }
        });
    }
}

fn failure_notice(kind: DetailKind, id: u32) -> String {
    format!("Could not load {}", kind.title(id))
}

/// Open details for clicks on elements carrying `data-webhook-detail="<id>"`
/// or `data-position-detail="<id>"`.
pub fn bind_detail_links(document: &Document, service: DetailService) {
    let selector = format!("[{}], [{}]", WEBHOOK_ATTR, POSITION_ATTR);
    listen(document, "document", "click", move |ev: Event| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Some(link) = target.closest(&selector).ok().flatten() else {
            return;
        };

        let (kind, raw) = match link.get_attribute(WEBHOOK_ATTR) {
            Some(raw) => (DetailKind::Webhook, raw),
            None => (
                DetailKind::Position,
                link.get_attribute(POSITION_ATTR).unwrap_or_default(),
            ),
        };
        match raw.trim().parse::<u32>() {
            Ok(id) => {
                ev.prevent_default();
                service.open(kind, id);
            }
            Err(_) => log::warn!("detail link with invalid id {:?}", raw),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_notice_names_the_record() {
        assert_eq!(failure_notice(DetailKind::Webhook, 12), "Could not load Webhook #12");
        assert_eq!(failure_notice(DetailKind::Position, 3), "Could not load Position #3");
    }
}
