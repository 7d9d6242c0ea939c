//! Exploration and combat message log

/// Messages kept before the oldest is dropped
pub const MAX_MESSAGES: usize = 100;

/// Categories for message coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Combat,
    Item,
    System,
    Warning,
}

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq)]
pub struct GameMessage {
    pub text: String,
    pub category: MessageCategory,
}

/// Bounded, oldest-first log
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<GameMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(GameMessage {
            text: text.into(),
            category,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message text
    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(|m| m.text.as_str())
    }

    /// The newest `count` messages, oldest first
    pub fn tail(&self, count: usize) -> &[GameMessage] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }
}
