//! Configuration for the chat client

use crate::error::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use trade_chat_utils::{env_flag, env_parse, env_string, paths};

/// Default analysis service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8011/process_data";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_DEMO_DELAY_MS: u64 = 600;

/// How chart replies are drawn in the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    /// Braille line plot
    #[default]
    Plot,
    /// Two-column x/y table
    Table,
}

impl FromStr for ChartStyle {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plot" | "line" | "chart" => Ok(Self::Plot),
            "table" => Ok(Self::Table),
            other => Err(ChatError::Config(format!(
                "unknown chart style '{other}' (expected 'plot' or 'table')"
            ))),
        }
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartStyle::Plot => write!(f, "plot"),
            ChartStyle::Table => write!(f, "table"),
        }
    }
}

/// Configuration for the chat client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Analysis service URL receiving `POST` requests
    pub endpoint: String,

    /// Request timeout
    pub timeout: Duration,

    /// File holding persisted client values
    pub storage_path: PathBuf,

    /// Answer from the built-in demo service instead of the network
    pub demo: bool,

    /// Artificial latency of the demo service
    pub demo_delay: Duration,

    /// Chart rendering style
    pub chart_style: ChartStyle,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            storage_path: paths::default_storage(),
            demo: false,
            demo_delay: Duration::from_millis(DEFAULT_DEMO_DELAY_MS),
            chart_style: ChartStyle::Plot,
        }
    }
}

impl ChatConfig {
    /// Create a new configuration builder
    pub fn builder() -> ChatConfigBuilder {
        ChatConfigBuilder::default()
    }

    /// Build a configuration from `TRADE_CHAT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| ChatError::Config(format!("invalid endpoint '{}': {e}", self.endpoint)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ChatError::Config(format!(
                "endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(ChatError::Config(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for ChatConfig
#[derive(Debug, Default)]
pub struct ChatConfigBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    storage_path: Option<PathBuf>,
    demo: Option<bool>,
    demo_delay: Option<Duration>,
    chart_style: Option<ChartStyle>,
}

impl ChatConfigBuilder {
    /// Set the service endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the storage file
    pub fn storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Use the demo service
    pub fn demo(mut self, demo: bool) -> Self {
        self.demo = Some(demo);
        self
    }

    /// Set the demo service latency
    pub fn demo_delay(mut self, delay: Duration) -> Self {
        self.demo_delay = Some(delay);
        self
    }

    /// Set chart style
    pub fn chart_style(mut self, style: ChartStyle) -> Self {
        self.chart_style = Some(style);
        self
    }

    /// Fill unset fields from `TRADE_CHAT_*` environment variables.
    ///
    /// Values already set on the builder are kept.
    pub fn with_env(mut self) -> Result<Self> {
        if self.endpoint.is_none() {
            self.endpoint = env_string("TRADE_CHAT_ENDPOINT");
        }

        if self.timeout.is_none() {
            if let Some(secs) = env_parse::<u64>("TRADE_CHAT_TIMEOUT_SECS") {
                let secs = secs.map_err(|e| {
                    ChatError::Config(format!("TRADE_CHAT_TIMEOUT_SECS: {e}"))
                })?;
                self.timeout = Some(Duration::from_secs(secs));
            }
        }

        if self.storage_path.is_none() {
            self.storage_path = env_string("TRADE_CHAT_STORAGE").map(PathBuf::from);
        }

        if self.demo.is_none() {
            self.demo = env_flag("TRADE_CHAT_DEMO");
        }

        if self.chart_style.is_none() {
            if let Some(style) = env_parse::<ChartStyle>("TRADE_CHAT_CHART_STYLE") {
                self.chart_style = Some(style?);
            }
        }

        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<ChatConfig> {
        let defaults = ChatConfig::default();

        let config = ChatConfig {
            endpoint: self.endpoint.unwrap_or(defaults.endpoint),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            storage_path: self.storage_path.unwrap_or(defaults.storage_path),
            demo: self.demo.unwrap_or(defaults.demo),
            demo_delay: self.demo_delay.unwrap_or(defaults.demo_delay),
            chart_style: self.chart_style.unwrap_or(defaults.chart_style),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.demo_delay, Duration::from_millis(600));
        assert!(!config.demo);
        assert_ok!(config.validate());
    }

    #[test]
    fn test_config_builder() {
        let config = ChatConfig::builder()
            .endpoint("https://analysis.example.com/process_data")
            .timeout(Duration::from_secs(5))
            .storage_path("/tmp/trade-chat.json")
            .chart_style(ChartStyle::Table)
            .demo(true)
            .build()
            .unwrap();

        assert_eq!(config.endpoint, "https://analysis.example.com/process_data");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/trade-chat.json"));
        assert_eq!(config.chart_style, ChartStyle::Table);
        assert!(config.demo);
    }

    #[test]
    fn test_validation_rejects_bad_endpoint() {
        let config = ChatConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        assert_err!(config.validate());

        let config = ChatConfig {
            endpoint: "ftp://localhost/process_data".to_string(),
            ..Default::default()
        };
        assert_err!(config.validate());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let result = ChatConfig::builder().timeout(Duration::ZERO).build();
        assert!(matches!(result, Err(ChatError::Config(_))));
    }

    #[test]
    fn test_chart_style_parse() {
        assert_eq!("plot".parse::<ChartStyle>().unwrap(), ChartStyle::Plot);
        assert_eq!(" TABLE ".parse::<ChartStyle>().unwrap(), ChartStyle::Table);
        assert!("pie".parse::<ChartStyle>().is_err());
        assert_eq!(ChartStyle::Table.to_string(), "table");
    }
}
