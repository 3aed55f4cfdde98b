use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record returned by `/api/webhook/{id}` and `/api/position/{id}`.
///
/// Kept as raw JSON: the modal shows the body verbatim and only a couple of
/// fields are ever interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailRecord(pub Value);

impl DetailRecord {
    pub const SUCCESS: &'static str = "Success";

    /// Two-space indented JSON in the order the server sent the keys.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }

    /// `error_message` when it carries anything, otherwise "Success".
    pub fn outcome_summary(&self) -> String {
        match self.0.get("error_message") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Self::SUCCESS.to_string(),
            Some(Value::String(s)) if s.is_empty() => Self::SUCCESS.to_string(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Self::SUCCESS.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome_summary() == Self::SUCCESS
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }
}
