pub mod app;
pub mod config;
pub mod details;
pub mod error;
pub mod live;
pub mod positions;
pub mod shared;
pub mod tables;

use crate::app::{App, AppContext};
use crate::config::DashboardConfig;
use crate::details::{bind_detail_links, DetailKind, DetailService};
use crate::error::DashboardError;
use crate::live::{socket, LiveDispatcher};
use crate::shared::api_utils::api_base;
use crate::tables::TableManager;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}

/// Handle kept by the page script after [`init_dashboard`].
#[wasm_bindgen]
pub struct DashboardHandle {
    tables: Vec<TableManager>,
    live: LiveDispatcher,
    details: DetailService,
    _owner: Owner,
}

/// Attach table controllers, mount the overlay and start the live feed.
///
/// Call once per page view, after the tables are in the DOM. `config` may be
/// `undefined`; see [`DashboardConfig`] for the lookup order.
#[wasm_bindgen]
pub fn init_dashboard(config: JsValue) -> Result<DashboardHandle, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DashboardError::NoDocument)?;
    let config = DashboardConfig::load(config, &document)?;

    let owner = Owner::new();
    let ctx = owner.with(|| AppContext::new(config.toast_duration_ms));

    let tables: Vec<TableManager> = config
        .tables
        .iter()
        .filter_map(|table| TableManager::attach(&document, &table.id, config.table_options(table)))
        .collect();

    let details = DetailService::new(api_base(config.api_base.as_deref()), ctx.details, ctx.toasts);
    bind_detail_links(&document, details.clone());

    leptos::mount::mount_to_body(move || view! { <App ctx=ctx /> });

    let live = LiveDispatcher::new(document.clone(), ctx.toasts, config.live.reload_delay_ms);
    if let Some(url) = &config.live.url {
        socket::connect(socket::page_ws_url(url), config.live.reconnect_delay_ms, live.clone());
    }

    log::info!("dashboard ready, {} tables attached", tables.len());
    Ok(DashboardHandle {
        tables,
        live,
        details,
        _owner: owner,
    })
}

#[wasm_bindgen]
impl DashboardHandle {
    /// Deliver a push event received by the page's own realtime client.
    /// Unknown or malformed events are logged and dropped, never thrown.
    pub fn dispatch(&self, name: &str, payload: JsValue) {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(payload) {
            Ok(payload) => self.live.dispatch_named(name, payload),
            Err(e) => self.live.reject(&DashboardError::PushEvent {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn view_webhook_details(&self, id: u32) {
        self.details.open(DetailKind::Webhook, id);
    }

    pub fn view_position_details(&self, id: u32) {
        self.details.open(DetailKind::Position, id);
    }

    /// Returns `false` when no table with that id is attached.
    pub fn go_to_page(&self, table_id: &str, page: usize) -> bool {
        match self.table(table_id) {
            Some(table) => {
                table.go_to_page(page);
                true
            }
            None => false,
        }
    }

    /// Recompute one table, or all of them when `table_id` is omitted.
    pub fn refresh(&self, table_id: Option<String>) {
        match table_id {
            Some(id) => {
                if let Some(table) = self.table(&id) {
                    table.recompute();
                }
            }
            None => self.tables.iter().for_each(TableManager::recompute),
        }
    }

    pub fn table_ids(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.table_id().to_string()).collect()
    }
}

impl DashboardHandle {
    fn table(&self, table_id: &str) -> Option<&TableManager> {
        self.tables.iter().find(|t| t.table_id() == table_id)
    }
}
