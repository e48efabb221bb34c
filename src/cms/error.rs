use serde_json::Value;
use thiserror::Error;

/// Failure modes of a CMS request.
///
/// `Upstream` carries the raw error payload so callers can show it to the
/// operator; `Transport` covers everything that never produced a status
/// (connection refused, timeout, undecodable body).
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("CMS request failed with status {status}: {message}")]
    Upstream {
        status: u16,
        message: String,
        payload: Value,
    },

    #[error("CMS request failed: {message}")]
    Transport { message: String },
}

impl CmsError {
    pub fn transport(message: impl Into<String>) -> Self {
        CmsError::Transport {
            message: message.into(),
        }
    }

    /// The text handed back through a tool result, including the raw
    /// upstream payload when one exists.
    pub fn tool_message(&self) -> String {
        match self {
            CmsError::Upstream { payload, .. } if !payload.is_null() => {
                format!("{}\nRaw response: {}", self, payload)
            }
            _ => self.to_string(),
        }
    }
}

/// Assemble a readable message from the `errors` array of a CMS error
/// payload. Each entry may carry `code`, `source.parameter`, `detail` and
/// `title` fields; missing pieces are skipped. Falls back to the raw body
/// when the payload has no usable entries.
pub fn assemble_error_message(payload: &Value, raw_body: &str) -> String {
    let entries = match payload.get("errors").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => return raw_body.trim().to_string(),
    };

    let parts: Vec<String> = entries
        .iter()
        .map(|entry| {
            let mut pieces = Vec::new();
            if let Some(code) = entry.get("code").and_then(Value::as_str) {
                pieces.push(code.to_string());
            }
            if let Some(parameter) = entry
                .get("source")
                .and_then(|s| s.get("parameter"))
                .and_then(Value::as_str)
            {
                pieces.push(format!("parameter '{}'", parameter));
            }
            if let Some(detail) = entry
                .get("detail")
                .or_else(|| entry.get("title"))
                .and_then(Value::as_str)
            {
                pieces.push(detail.to_string());
            }
            if pieces.is_empty() {
                entry.to_string()
            } else {
                pieces.join(": ")
            }
        })
        .collect();

    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assembles_code_parameter_and_detail() {
        let payload = json!({
            "errors": [{
                "code": "not_found",
                "source": { "parameter": "id" },
                "detail": "Episode ep_1 was not found"
            }]
        });
        let message = assemble_error_message(&payload, "");
        assert_eq!(
            message,
            "not_found: parameter 'id': Episode ep_1 was not found"
        );
    }

    #[test]
    fn joins_multiple_entries() {
        let payload = json!({
            "errors": [
                { "code": "blank", "source": { "parameter": "title" } },
                { "detail": "series_id is invalid" }
            ]
        });
        let message = assemble_error_message(&payload, "");
        assert_eq!(message, "blank: parameter 'title'; series_id is invalid");
    }

    #[test]
    fn falls_back_to_title() {
        let payload = json!({ "errors": [{ "title": "Unauthorized" }] });
        assert_eq!(assemble_error_message(&payload, ""), "Unauthorized");
    }

    #[test]
    fn falls_back_to_raw_body_without_errors_array() {
        let payload = json!({ "message": "oops" });
        assert_eq!(
            assemble_error_message(&payload, "Internal Server Error\n"),
            "Internal Server Error"
        );
    }

    #[test]
    fn tool_message_includes_raw_payload() {
        let err = CmsError::Upstream {
            status: 404,
            message: "not_found".to_string(),
            payload: json!({ "errors": [] }),
        };
        let text = err.tool_message();
        assert!(text.contains("status 404"));
        assert!(text.contains("Raw response:"));
    }

    #[test]
    fn transport_message_has_no_status() {
        let err = CmsError::transport("connection refused");
        assert_eq!(err.tool_message(), "CMS request failed: connection refused");
    }
}
