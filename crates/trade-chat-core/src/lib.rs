//! Terminal chat client for portfolio questions
//!
//! This crate holds everything behind the `trade-chat` binary:
//!
//! - [`api`]: the analysis service contract, its HTTP client and an offline demo service
//! - [`conversation`] and [`message`]: the append-only list of displayed messages
//! - [`session`]: the send loop with its single in-flight query
//! - [`storage`]: persistence of the portfolio identifier
//! - [`render`]: text bubbles and charts for the terminal
//! - [`commands`] and [`input`]: REPL input handling
//!
//! # Example
//!
//! ```rust,ignore
//! use trade_chat_core::{ChatConfig, ChatSession, HttpAnalysisClient, PortfolioStore, Renderer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ChatConfig::from_env()?;
//!     let client = HttpAnalysisClient::new(&config)?;
//!     let mut session = ChatSession::new(client, PortfolioStore::at_path(&config.storage_path));
//!
//!     session.send("How did my portfolio do this year?").await;
//!     println!("{}", Renderer::default().render_conversation(session.conversation()));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod input;
pub mod message;
pub mod render;
pub mod session;
pub mod storage;

pub use api::{
    AnalysisReply, AnalysisRequest, AnalysisService, ChartPoint, DemoAnalysisService,
    HttpAnalysisClient,
};
pub use commands::Command;
pub use config::{ChartStyle, ChatConfig};
pub use conversation::Conversation;
pub use error::{ChatError, Result};
pub use input::InputComposer;
pub use message::{ChatMessage, MessageBody, Role};
pub use render::{RenderOptions, Renderer};
pub use session::ChatSession;
pub use storage::{PortfolioId, PortfolioStore};
