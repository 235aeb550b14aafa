//! JSON response formatter

use serde::Serialize;

/// Renders tool responses as JSON text
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Single-line output, as the serve loop requires
    pub fn compact() -> Self {
        Self::new(false)
    }

    pub fn format<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compact_is_one_line() {
        let value = json!({"dumps": ["a.raw", "b.raw"]});
        let text = JsonFormatter::compact().format(&value);
        assert_eq!(text, r#"{"dumps":["a.raw","b.raw"]}"#);
    }

    #[test]
    fn test_pretty_is_indented() {
        let value = json!({"message": "VM kali has been started successfully."});
        let text = JsonFormatter::new(true).format(&value);
        assert!(text.contains("\n  \"message\""));
    }
}
