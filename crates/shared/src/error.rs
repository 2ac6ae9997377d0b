use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error body returned by the campaign service on non-success responses.
///
/// `detail` is usually a string but validation failures carry a structured value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.trim().is_empty() => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("service responded with status {status}: {}", detail.as_deref().unwrap_or("no detail"))]
pub struct ServiceRejection {
    pub status: u16,
    pub detail: Option<String>,
}

impl ServiceRejection {
    pub fn new(status: u16, body: Option<ErrorBody>) -> Self {
        Self {
            status,
            detail: body.and_then(|body| body.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":"Unsupported file type. Use CSV or XLSX."}"#)
                .expect("decode");
        assert_eq!(
            body.message().as_deref(),
            Some("Unsupported file type. Use CSV or XLSX.")
        );
    }

    #[test]
    fn missing_or_blank_detail_yields_none() {
        let body: ErrorBody = serde_json::from_str("{}").expect("decode");
        assert_eq!(body.message(), None);
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"  "}"#).expect("decode");
        assert_eq!(body.message(), None);
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["body","name"]}]}"#).expect("decode");
        let message = body.message().expect("message");
        assert!(message.contains("name"));
    }
}
