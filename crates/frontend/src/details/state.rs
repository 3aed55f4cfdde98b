use super::api::DetailKind;
use contracts::details::DetailRecord;

/// What the detail modal currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Closed,
    Loading {
        kind: DetailKind,
        id: u32,
    },
    Loaded {
        kind: DetailKind,
        id: u32,
        body: String,
        summary: String,
        success: bool,
    },
    Failed {
        kind: DetailKind,
        id: u32,
        message: String,
    },
}

impl DetailState {
    pub fn loaded(kind: DetailKind, id: u32, record: &DetailRecord) -> Self {
        let success = match kind {
            DetailKind::Webhook => record.is_success(),
            DetailKind::Position => true,
        };
        DetailState::Loaded {
            kind,
            id,
            body: record.pretty(),
            summary: kind.summary(record),
            success,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DetailState::Closed)
    }

    /// Whether a response for `kind`/`id` is still awaited.
    pub fn awaits(&self, kind: DetailKind, id: u32) -> bool {
        matches!(self, DetailState::Loading { kind: k, id: i } if *k == kind && *i == id)
    }

    pub fn title(&self) -> String {
        match self {
            DetailState::Closed => String::new(),
            DetailState::Loading { kind, id }
            | DetailState::Loaded { kind, id, .. }
            | DetailState::Failed { kind, id, .. } => kind.title(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loaded_webhook_with_error() {
        let rec = DetailRecord(json!({"id": 4, "error_message": "No money"}));
        let st = DetailState::loaded(DetailKind::Webhook, 4, &rec);
        let DetailState::Loaded { summary, success, body, .. } = &st else {
            panic!("expected loaded state");
        };
        assert_eq!(summary, "No money");
        assert!(!success);
        assert!(body.contains("\"error_message\": \"No money\""));
        assert_eq!(st.title(), "Webhook #4");
    }

    #[test]
    fn test_awaits_only_matching_request() {
        let st = DetailState::Loading {
            kind: DetailKind::Webhook,
            id: 1,
        };
        assert!(st.awaits(DetailKind::Webhook, 1));
        assert!(!st.awaits(DetailKind::Webhook, 2));
        assert!(!st.awaits(DetailKind::Position, 1));
        assert!(!DetailState::Closed.awaits(DetailKind::Webhook, 1));
    }

    #[test]
    fn test_closed_is_not_open() {
        assert!(!DetailState::default().is_open());
    }
}
