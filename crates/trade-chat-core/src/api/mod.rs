//! Analysis service client
//!
//! One request shape goes out, one reply shape comes back:
//! `{user_query, account_id} -> {text?, chart?}`.

pub mod demo;
pub mod http;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use demo::DemoAnalysisService;
pub use http::HttpAnalysisClient;

/// Body of a query sent to the analysis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Natural-language question typed by the user
    pub user_query: String,
    /// Portfolio the question is about, `null` when none is stored
    pub account_id: Option<String>,
}

impl AnalysisRequest {
    pub fn new(user_query: impl Into<String>, account_id: Option<String>) -> Self {
        Self {
            user_query: user_query.into(),
            account_id,
        }
    }
}

/// One point of a time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Reply from the analysis service; either part may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReply {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub chart: Option<Vec<ChartPoint>>,
}

impl AnalysisReply {
    /// Text-only reply
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            chart: None,
        }
    }

    /// Attach a chart
    pub fn with_chart(mut self, points: Vec<ChartPoint>) -> Self {
        self.chart = Some(points);
        self
    }

    /// Chart points, if any were sent
    pub fn chart_points(&self) -> Option<&[ChartPoint]> {
        self.chart.as_deref().filter(|points| !points.is_empty())
    }
}

/// Something that can answer portfolio questions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Send one query and wait for the reply
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReply>;

    /// Short label for logs and the banner
    fn describe(&self) -> String;
}
