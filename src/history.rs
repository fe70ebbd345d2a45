//! Conversation history store.
//!
//! Ordered, append-only log of turns shared by every call made through one
//! chat service. All mutation goes through [`HistoryStore::append`] and
//! [`HistoryStore::clear`]; readers get copies.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::Message;

/// Thread-safe, append-only message log.
///
/// Cloning the store yields another handle to the same log.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing turns.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: Arc::new(Mutex::new(messages)),
        }
    }

    // Every critical section is a single Vec operation; a poisoned guard
    // still holds a consistent Vec.
    fn lock(&self) -> MutexGuard<'_, Vec<Message>> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a message to the tail.
    pub fn append(&self, message: Message) {
        self.lock().push(message);
    }

    /// Append several messages as one contiguous run.
    pub fn extend(&self, messages: impl IntoIterator<Item = Message>) {
        self.lock().extend(messages);
    }

    /// Append `message` and return the full sequence including it, atomically.
    pub fn append_and_snapshot(&self, message: Message) -> Vec<Message> {
        let mut messages = self.lock();
        messages.push(message);
        messages.clone()
    }

    /// Copy of the full ordered sequence at call time.
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().clone()
    }

    /// Remove every message.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Most recent message, if any.
    pub fn last(&self) -> Option<Message> {
        self.lock().last().cloned()
    }

    /// Every message's content concatenated in order.
    pub fn content(&self) -> String {
        self.lock().iter().map(|m| m.content.as_str()).collect()
    }
}
