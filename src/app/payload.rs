//! Turning response bodies into banner text

use serde_json::Value;

/// Success payload as display text: JSON strings are unwrapped, anything
/// else is shown verbatim
pub fn payload_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(s)) => s,
        _ => body.trim().to_string(),
    }
}

/// Error banner text: the server's payload when it has one, else `fallback`
pub fn error_text(payload: Option<&str>, fallback: &str) -> String {
    let body = match payload.map(str::trim) {
        Some(body) if !body.is_empty() => body,
        _ => return fallback.to_string(),
    };

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("message") {
            Some(Value::String(message)) if !message.is_empty() => message.clone(),
            _ => body.to_string(),
        },
        Ok(Value::String(s)) if !s.is_empty() => s,
        Ok(Value::String(_)) | Ok(Value::Null) => fallback.to_string(),
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_text_keeps_plain_text() {
        assert_eq!(
            payload_text("Keep this safe. Your ID is: 12"),
            "Keep this safe. Your ID is: 12"
        );
        assert_eq!(payload_text("\"Success\""), "Success");
    }

    #[test]
    fn test_error_text_prefers_server_payload() {
        assert_eq!(error_text(Some("invalid inputs"), "Failed."), "invalid inputs");
        assert_eq!(
            error_text(Some(r#"{"message": "db down"}"#), "Failed."),
            "db down"
        );
        assert_eq!(
            error_text(Some(r#"{"error": "x"}"#), "Failed."),
            r#"{"error": "x"}"#
        );
    }

    #[test]
    fn test_error_text_falls_back_without_payload() {
        assert_eq!(error_text(None, "Failed to add student."), "Failed to add student.");
        assert_eq!(error_text(Some("  "), "Failed."), "Failed.");
        assert_eq!(error_text(Some("null"), "Failed."), "Failed.");
    }
}
