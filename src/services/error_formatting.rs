use crate::services::backend::BackendError;

/// Format a backend failure as human-readable answer text
pub fn format_backend_error(error: &BackendError) -> String {
    let mut formatted = String::from("⚠️ Backend Error\n\n");
    formatted.push_str(&format!("Error: {}\n", error));

    // Add specific suggestions based on error type
    match error {
        BackendError::Status { status: 401 | 403, .. } => {
            formatted.push_str("\n💡 Suggestions:\n");
            formatted.push_str("• Check the backend credentials\n");
        }
        BackendError::Status { status: 429, .. } => {
            formatted.push_str("\n💡 Suggestions:\n");
            formatted.push_str("• Wait a moment before retrying\n");
        }
        BackendError::Transport(e) if e.is_connect() || e.is_timeout() => {
            formatted.push_str("\n💡 Suggestions:\n");
            formatted.push_str("• Verify BACKEND_URL points at a reachable backend\n");
        }
        BackendError::Remote(msg) if msg.contains("rate limit") || msg.contains("throttl") => {
            formatted.push_str("\n💡 Suggestions:\n");
            formatted.push_str("• Wait a moment before retrying\n");
        }
        _ => {}
    }

    formatted
}

/// Merge an error description into the answer produced so far
pub fn merge_error_text(partial: &str, error_text: &str) -> String {
    if partial.is_empty() {
        error_text.to_string()
    } else {
        format!("{}\n\n{}", partial, error_text)
    }
}
