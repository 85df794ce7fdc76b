//! Display messages
//!
//! Every entry of the conversation is one of these. A message carries either
//! text or a chart, never both.

use crate::api::ChartPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// What a message shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum MessageBody {
    Text(String),
    Chart(Vec<ChartPoint>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub body: MessageBody,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: Role, body: MessageBody) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            body,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, MessageBody::Text(text.into()))
    }

    pub fn bot_text(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, MessageBody::Text(text.into()))
    }

    pub fn bot_chart(points: Vec<ChartPoint>) -> Self {
        Self::new(Role::Bot, MessageBody::Chart(points))
    }

    /// Bot-side failure notice; rendered like any other bot text
    pub fn error(text: impl Into<String>) -> Self {
        Self::bot_text(text)
    }

    pub fn is_chart(&self) -> bool {
        matches!(self.body, MessageBody::Chart(_))
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Text content, `None` for charts
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text(text) => Some(text),
            MessageBody::Chart(_) => None,
        }
    }

    /// Chart points, `None` for text
    pub fn chart(&self) -> Option<&[ChartPoint]> {
        match &self.body {
            MessageBody::Chart(points) => Some(points),
            MessageBody::Text(_) => None,
        }
    }
}
