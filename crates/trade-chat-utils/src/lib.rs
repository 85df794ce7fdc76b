//! Shared utilities for trade-chat
//!
//! This crate provides common functionality used across the trade-chat workspace,
//! including logging setup, environment loading, and on-disk locations.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{env_flag, env_parse, env_string, load_dotenv};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
