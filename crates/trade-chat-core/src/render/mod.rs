//! Terminal rendering of the conversation
//!
//! User messages sit on the right, bot messages on the left. Each message
//! is either wrapped text or a chart.

pub mod chart;
pub mod text;

use crate::config::ChartStyle;
use crate::conversation::Conversation;
use crate::message::{ChatMessage, MessageBody, Role};
use owo_colors::OwoColorize;

/// Shown while the conversation has no messages
pub const EMPTY_HINT: &str = "Start a conversation — send a message";

/// Placeholder drawn while a reply is pending
pub const LOADING_INDICATOR: &str = "...";

const BOT_INDENT: usize = 2;
const DEFAULT_WIDTH: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Terminal width in columns
    pub width: u16,
    pub chart_style: ChartStyle,
    /// Emit ANSI colors
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            chart_style: ChartStyle::Plot,
            color: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_chart_style(&mut self, style: ChartStyle) {
        self.options.chart_style = style;
    }

    /// Text bubbles take at most 70% of the width
    fn bubble_width(&self) -> usize {
        (usize::from(self.options.width) * 7 / 10).max(10)
    }

    /// The whole conversation, top to bottom
    pub fn render_conversation(&self, conversation: &Conversation) -> String {
        if conversation.is_empty() {
            return self.hint(EMPTY_HINT);
        }
        self.render_messages(conversation.messages())
    }

    /// A run of messages separated by blank lines
    pub fn render_messages(&self, messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(|m| self.render_message(m))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn render_message(&self, message: &ChatMessage) -> String {
        let body = match &message.body {
            MessageBody::Text(text) => text::wrap(text, self.bubble_width()),
            MessageBody::Chart(points) => self.chart_lines(points),
        };

        match message.role {
            Role::User => self.user_block(&body),
            Role::Bot => self.bot_block(&body),
        }
    }

    /// Bot-side placeholder while waiting for a reply
    pub fn render_loading(&self) -> String {
        self.bot_block(&[LOADING_INDICATOR.to_string()])
    }

    fn chart_lines(&self, points: &[crate::api::ChartPoint]) -> Vec<String> {
        let max_width = self
            .options
            .width
            .saturating_sub(BOT_INDENT as u16)
            .max(1);

        match self.options.chart_style {
            ChartStyle::Plot => chart::plot_lines(points, max_width),
            ChartStyle::Table => chart::table_lines(points, max_width),
        }
    }

    fn user_block(&self, lines: &[String]) -> String {
        let width = usize::from(self.options.width);
        let label = text::align_right("you", width);
        let mut out = vec![self.paint_label(&label, Role::User)];

        for line in lines {
            let aligned = text::align_right(line, width);
            out.push(if self.options.color {
                aligned.bright_white().to_string()
            } else {
                aligned
            });
        }

        out.join("\n")
    }

    fn bot_block(&self, lines: &[String]) -> String {
        let indent = " ".repeat(BOT_INDENT);
        let mut out = vec![self.paint_label("bot", Role::Bot)];
        out.extend(lines.iter().map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        }));
        out.join("\n")
    }

    fn paint_label(&self, label: &str, role: Role) -> String {
        if !self.options.color {
            return label.to_string();
        }
        match role {
            Role::User => label.blue().bold().to_string(),
            Role::Bot => label.green().bold().to_string(),
        }
    }

    fn hint(&self, hint: &str) -> String {
        let width = usize::from(self.options.width);
        let len = hint.chars().count();
        let padded = format!("{}{hint}", " ".repeat(width.saturating_sub(len) / 2));
        if self.options.color {
            padded.dimmed().to_string()
        } else {
            padded
        }
    }
}
