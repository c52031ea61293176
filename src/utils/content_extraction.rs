use serde_json::Value;

/// Extract text from an OpenAI message content value (string or array of parts).
/// Text parts are joined with `\n`; image and other non-text parts are skipped.
pub fn extract_text_from_content(content: &Value) -> String {
    if let Some(s) = content.as_str() {
        return s.to_string();
    }
    if let Some(parts) = content.as_array() {
        let mut texts: Vec<&str> = Vec::new();
        for part in parts {
            if let Some(obj) = part.as_object() {
                match obj.get("type").and_then(|t| t.as_str()) {
                    Some("text") | Some("input_text") => {
                        if let Some(text) = obj.get("text").and_then(|t| t.as_str()) {
                            texts.push(text);
                        }
                    }
                    Some(other) => {
                        log::debug!("⚠️  Skipping unsupported content part '{}'", other);
                    }
                    None => {}
                }
            } else if let Some(s) = part.as_str() {
                texts.push(s);
            }
        }
        return texts.join("\n");
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_string_passes_through() {
        assert_eq!(extract_text_from_content(&json!("hello")), "hello");
    }

    #[test]
    fn text_parts_are_joined_and_images_skipped() {
        let content = json!([
            { "type": "text", "text": "first" },
            { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA" } },
            { "type": "text", "text": "second" }
        ]);
        assert_eq!(extract_text_from_content(&content), "first\nsecond");
    }

    #[test]
    fn null_and_numbers_yield_empty_text() {
        assert_eq!(extract_text_from_content(&Value::Null), "");
        assert_eq!(extract_text_from_content(&json!(42)), "");
    }
}
