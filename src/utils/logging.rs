//! Logging utilities
//!
//! Shared logging helpers for summarizing outbound Gemini requests

use crate::models::gemini::{GenerateContentRequest, Part};

/// Set to true to include full request payloads (prompts, schemas) in debug logs
/// Default is false to reduce log verbosity
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Truncate a string with a note about original length
fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() > max_len {
        format!("{}... ({} chars truncated)", &s[..max_len], s.len() - max_len)
    } else {
        s.to_string()
    }
}

/// Create a filtered version of a content part for logging
///
/// Inline image payloads are elided down to their size so a single bill
/// photo does not flood the log.
fn filter_part(part: &Part) -> serde_json::Value {
    match part {
        Part::Text { text } => {
            serde_json::json!({"text": truncate_content(text, 200)})
        }
        Part::InlineData { inline_data } => {
            serde_json::json!({
                "inlineData": {
                    "mimeType": inline_data.mime_type,
                    "data": format!("[{} base64 chars elided]", inline_data.data.len()),
                }
            })
        }
    }
}

/// Create a filtered summary of a generation request for logging
/// Keeps original structure but truncates verbose content
pub fn create_generate_log_summary(request: &GenerateContentRequest) -> serde_json::Value {
    if VERBOSE_REQUEST_LOGGING {
        serde_json::to_value(request).unwrap_or(serde_json::json!({"error": "serialize failed"}))
    } else {
        let contents: Vec<serde_json::Value> = request
            .contents
            .iter()
            .map(|content| {
                serde_json::json!({
                    "role": content.role,
                    "parts": content.parts.iter().map(filter_part).collect::<Vec<_>>(),
                })
            })
            .collect();

        let config = request.generation_config.as_ref().map(|config| {
            serde_json::json!({
                "responseMimeType": config.response_mime_type,
                "responseSchema": config.response_schema.as_ref().map(|_| "[schema]"),
            })
        });

        serde_json::json!({
            "contents": contents,
            "generationConfig": config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gemini::{Content, GenerationConfig};

    #[test]
    fn test_truncate_content() {
        assert_eq!(truncate_content("short", 10), "short");

        let truncated = truncate_content(&"a".repeat(300), 200);
        assert!(truncated.starts_with(&"a".repeat(200)));
        assert!(truncated.contains("100 chars truncated"));
    }

    #[test]
    fn test_summary_elides_inline_data() {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline_data("image/jpeg", &[0u8; 300]),
                Part::text("Summarize this bill"),
            ])],
            generation_config: Some(GenerationConfig::json_with_schema(
                serde_json::json!({"type": "OBJECT"}),
            )),
        };

        let summary = create_generate_log_summary(&request);
        let parts = summary["contents"][0]["parts"].as_array().unwrap();

        let data = parts[0]["inlineData"]["data"].as_str().unwrap();
        assert!(data.contains("base64 chars elided"));
        assert!(!data.contains("AAAA"));

        assert_eq!(parts[1]["text"], "Summarize this bill");
        assert_eq!(summary["generationConfig"]["responseSchema"], "[schema]");
    }
}
