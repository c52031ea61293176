use std::collections::VecDeque;

use crate::constants::CONTEXT_CHAR_LIMIT;
use crate::models::Message;

/// Render one prior turn in the backend's `[role](#message)` markup
fn render_message(message: &Message) -> String {
    format!("[{}](#message)\n{}\n", message.role.as_str(), message.content.trim())
}

/// Turn prior conversation turns into the backend's context blob.
pub fn build_context(history: &[Message]) -> String {
    build_context_with_limit(history, CONTEXT_CHAR_LIMIT)
}

/// Newest turns win: messages are taken from the end until the next one would push
/// the joined context past `limit` characters, then emitted oldest first.
pub fn build_context_with_limit(history: &[Message], limit: usize) -> String {
    let mut blocks = VecDeque::with_capacity(history.len());
    let mut used = 0usize;

    for message in history.iter().rev() {
        let block = render_message(message);
        // One `\n` joins each block to the previous one
        let separator = usize::from(!blocks.is_empty());
        let needed = block.chars().count() + separator;
        if used + needed > limit {
            log::debug!(
                "✂️  Context limit reached: keeping {} of {} prior messages",
                blocks.len(),
                history.len()
            );
            break;
        }
        used += needed;
        blocks.push_front(block);
    }

    Vec::from(blocks).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn empty_history_yields_empty_context() {
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn roles_and_order_are_preserved() {
        let history = vec![
            Message::new(Role::System, "be brief"),
            Message::new(Role::User, "  hi  "),
            Message::new(Role::Assistant, "hello"),
        ];
        assert_eq!(
            build_context(&history),
            "[system](#message)\nbe brief\n\n[user](#message)\nhi\n\n[assistant](#message)\nhello\n"
        );
    }

    #[test]
    fn oldest_turns_are_dropped_first_when_over_limit() {
        let history = vec![
            Message::new(Role::User, "a".repeat(50)),
            Message::new(Role::Assistant, "recent"),
        ];
        let context = build_context_with_limit(&history, 40);
        assert_eq!(context, "[assistant](#message)\nrecent\n");
    }

    #[test]
    fn context_may_fill_the_limit_exactly() {
        let history = vec![
            Message::new(Role::User, "older"),
            Message::new(Role::Assistant, "recent"),
        ];
        let full = build_context(&history);
        let len = full.chars().count();

        assert_eq!(build_context_with_limit(&history, len), full);
        assert_eq!(build_context_with_limit(&history, len - 1), "[assistant](#message)\nrecent\n");
        assert_eq!(build_context_with_limit(&history[1..], 29), "[assistant](#message)\nrecent\n");
        assert_eq!(build_context_with_limit(&history[1..], 28), "");
    }
}
