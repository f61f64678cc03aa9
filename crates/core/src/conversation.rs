//! Conversation-related types.

use std::ops::Deref;

use reloop_model::Message;

/// An append-only message log.
///
/// Messages can be appended but never modified, removed or reordered. The
/// conversation also remembers where it started, so that the messages
/// appended afterwards can be told apart from the initial history.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Conversation {
    items: Vec<Message>,
    initial_len: usize,
}

impl Conversation {
    /// Creates a conversation whose initial history is `messages`.
    #[inline]
    pub fn with_history(messages: Vec<Message>) -> Self {
        let initial_len = messages.len();
        Self {
            items: messages,
            initial_len,
        }
    }

    /// Appends a message.
    #[inline]
    pub fn push(&mut self, message: Message) {
        self.items.push(message);
    }

    /// Returns the messages appended after the initial history.
    #[inline]
    pub fn new_messages(&self) -> &[Message] {
        &self.items[self.initial_len..]
    }

    /// Returns the whole log.
    #[inline]
    pub fn as_slice(&self) -> &[Message] {
        &self.items
    }
}

impl Deref for Conversation {
    type Target = [Message];

    #[inline]
    fn deref(&self) -> &[Message] {
        &self.items
    }
}

impl Extend<Message> for Conversation {
    fn extend<I: IntoIterator<Item = Message>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl From<Vec<Message>> for Conversation {
    #[inline]
    fn from(messages: Vec<Message>) -> Self {
        Self::with_history(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_messages() {
        let mut conversation = Conversation::with_history(vec![
            Message::system("Be brief."),
            Message::user("Hi"),
        ]);
        assert!(conversation.new_messages().is_empty());

        conversation.push(Message::assistant("Hello"));
        conversation.extend([Message::user("Bye")]);

        assert_eq!(conversation.len(), 4);
        assert_eq!(conversation.new_messages().len(), 2);
        assert_eq!(conversation.new_messages()[0].content, "Hello");
        assert_eq!(conversation.last().unwrap().content, "Bye");
    }
}
