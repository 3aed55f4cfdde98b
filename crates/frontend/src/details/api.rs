use crate::error::{DashboardError, DashboardResult};
use crate::shared::api_utils::api_url;
use contracts::details::DetailRecord;
use gloo_net::http::Request;

/// Which record a detail view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Webhook,
    Position,
}

impl DetailKind {
    pub fn path(&self, id: u32) -> String {
        match self {
            DetailKind::Webhook => format!("/api/webhook/{}", id),
            DetailKind::Position => format!("/api/position/{}", id),
        }
    }

    pub fn title(&self, id: u32) -> String {
        match self {
            DetailKind::Webhook => format!("Webhook #{}", id),
            DetailKind::Position => format!("Position #{}", id),
        }
    }

    /// One-line outcome under the JSON body.
    pub fn summary(&self, record: &DetailRecord) -> String {
        match self {
            DetailKind::Webhook => record.outcome_summary(),
            DetailKind::Position => record.status().unwrap_or("—").to_string(),
        }
    }
}

/// GET a detail record
pub async fn fetch_detail(base: &str, kind: DetailKind, id: u32) -> DashboardResult<DetailRecord> {
    let response = Request::get(&api_url(base, &kind.path(id)))
        .send()
        .await
        .map_err(|e| DashboardError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(DashboardError::Status {
            status: response.status(),
            text: response.status_text(),
        });
    }

    response
        .json::<DetailRecord>()
        .await
        .map_err(|e| DashboardError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths() {
        assert_eq!(DetailKind::Webhook.path(5), "/api/webhook/5");
        assert_eq!(DetailKind::Position.path(8), "/api/position/8");
    }

    #[test]
    fn test_summary_per_kind() {
        let rec = DetailRecord(json!({"status": "Open", "error_message": "Requote"}));
        assert_eq!(DetailKind::Webhook.summary(&rec), "Requote");
        assert_eq!(DetailKind::Position.summary(&rec), "Open");
        assert_eq!(DetailKind::Position.summary(&DetailRecord(json!({}))), "—");
    }
}
