//! In-memory chat transcript

use agro_advisor_core::{ChatDisplay, ChatMessage};
use parking_lot::RwLock;

/// Keeps every shown message, in order
///
/// Used by the HTTP server to hand the transcript back to clients and by
/// tests to observe what a session rendered.
#[derive(Debug, Default)]
pub struct TranscriptDisplay {
    messages: RwLock<Vec<ChatMessage>>,
}

impl TranscriptDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().clone()
    }

    /// Messages from `offset` onwards
    pub fn since(&self, offset: usize) -> Vec<ChatMessage> {
        self.messages.read().iter().skip(offset).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl ChatDisplay for TranscriptDisplay {
    fn show(&self, message: &ChatMessage) {
        self.messages.write().push(message.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_advisor_core::Sender;

    #[test]
    fn test_keeps_order() {
        let display = TranscriptDisplay::new();
        display.show(&ChatMessage::user("pH 6.5"));
        display.show(&ChatMessage::assistant("near neutral"));

        let senders: Vec<Sender> = display.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Assistant]);
        assert_eq!(display.since(1).len(), 1);
        assert_eq!(display.since(5).len(), 0);
    }
}
