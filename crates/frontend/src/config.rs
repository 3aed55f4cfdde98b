//! Dashboard configuration.
//!
//! Sources, first match wins:
//! 1. the object passed to `init_dashboard` from JavaScript
//! 2. `<script id="dashboard-config" type="application/json">` in the page
//! 3. built-in defaults matching the server templates

use crate::error::{DashboardError, DashboardResult};
use crate::tables::{FilterControls, TableOptions, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::Document;

pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub id: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl TableConfig {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The log table and the ids of its filter inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFilterConfig {
    pub table_id: String,
    pub type_filter_id: String,
    pub date_filter_id: String,
}

impl Default for LogFilterConfig {
    fn default() -> Self {
        Self {
            table_id: "logTable".to_string(),
            type_filter_id: "logTypeFilter".to_string(),
            date_filter_id: "logDateFilter".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    /// WebSocket feed; `None` when events arrive through `DashboardHandle::dispatch`.
    pub url: Option<String>,
    /// Delay before reloading after `webhook_received`, so the toast is seen.
    pub reload_delay_ms: u32,
    pub reconnect_delay_ms: u32,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            url: None,
            reload_delay_ms: 1000,
            reconnect_delay_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub tables: Vec<TableConfig>,
    pub log_filter: LogFilterConfig,
    pub live: LiveConfig,
    /// Base URL of the detail API; the page origin when unset.
    pub api_base: Option<String>,
    pub toast_duration_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tables: ["webhookTable", "positionTable", "closedPositionTable", "logTable"]
                .into_iter()
                .map(TableConfig::new)
                .collect(),
            log_filter: LogFilterConfig::default(),
            live: LiveConfig::default(),
            api_base: None,
            toast_duration_ms: 4000,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(raw: &str) -> DashboardResult<Self> {
        serde_json::from_str(raw).map_err(|e| DashboardError::Config(e.to_string()))
    }

    /// `undefined` and `null` mean "not given".
    pub fn from_js(value: JsValue) -> DashboardResult<Option<Self>> {
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(value)
            .map(Some)
            .map_err(|e| DashboardError::Config(e.to_string()))
    }

    pub fn from_document(document: &Document) -> Option<Self> {
        let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
        let raw = element.text_content().unwrap_or_default();
        match Self::from_json(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("{}, using defaults", e);
                None
            }
        }
    }

    pub fn load(explicit: JsValue, document: &Document) -> DashboardResult<Self> {
        if let Some(config) = Self::from_js(explicit)? {
            return Ok(config);
        }
        Ok(Self::from_document(document).unwrap_or_default())
    }

    /// Options for one table; the log table also gets its filter inputs.
    pub fn table_options(&self, table: &TableConfig) -> TableOptions {
        let filter = (table.id == self.log_filter.table_id).then(|| FilterControls {
            type_filter_id: self.log_filter.type_filter_id.clone(),
            date_filter_id: self.log_filter.date_filter_id.clone(),
        });
        TableOptions {
            page_size: table.page_size,
            filter,
        }
    }
}
