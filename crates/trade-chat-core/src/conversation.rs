//! Conversation log for the chat session
//!
//! Messages are kept in display order and only ever appended. The one
//! exception is [`Conversation::clear`], which wipes the whole log on request.

use crate::api::AnalysisReply;
use crate::message::ChatMessage;

/// Shown when the service answers with neither text nor chart
pub const EMPTY_REPLY_TEXT: &str = "(empty response)";

/// Append-only list of chat messages
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Append several messages, keeping their order
    pub fn extend(&mut self, messages: impl IntoIterator<Item = ChatMessage>) {
        self.messages.extend(messages);
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Messages appended after the log had `len` entries.
    ///
    /// Returns an empty slice when `len` is past the end (e.g. after a clear).
    pub fn since(&self, len: usize) -> &[ChatMessage] {
        self.messages.get(len..).unwrap_or_default()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop every message
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

/// Turn a service reply into bot messages: text first, then chart.
pub fn reply_messages(reply: AnalysisReply) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);

    if let Some(text) = reply.text {
        messages.push(ChatMessage::bot_text(text));
    }

    if let Some(points) = reply.chart.filter(|points| !points.is_empty()) {
        messages.push(ChatMessage::bot_chart(points));
    }

    if messages.is_empty() {
        messages.push(ChatMessage::bot_text(EMPTY_REPLY_TEXT));
    }

    messages
}
