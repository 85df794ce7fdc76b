//! Offline demo service
//!
//! Answers every query with the same share-price series after a short delay,
//! so the client can be tried without a running backend.

use super::{AnalysisReply, AnalysisRequest, AnalysisService, ChartPoint};
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const DEMO_TEXT: &str = "Share price for 2010 - 2025";

const DEMO_SERIES: [(f64, f64); 16] = [
    (2010.0, 50.12),
    (2011.0, 55.23),
    (2012.0, 53.78),
    (2013.0, 60.45),
    (2014.0, 62.3),
    (2015.0, 65.1),
    (2016.0, 63.5),
    (2017.0, 68.2),
    (2018.0, 70.85),
    (2019.0, 72.4),
    (2020.0, 75.1),
    (2021.0, 78.25),
    (2022.0, 80.9),
    (2023.0, 83.5),
    (2024.0, 85.75),
    (2025.0, 88.2),
];

/// Canned-reply service used by `--demo`
#[derive(Debug, Clone)]
pub struct DemoAnalysisService {
    delay: Duration,
}

impl DemoAnalysisService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The reply every query receives
    pub fn demo_reply() -> AnalysisReply {
        AnalysisReply::text(DEMO_TEXT).with_chart(
            DEMO_SERIES
                .iter()
                .map(|&(x, y)| ChartPoint::new(x, y))
                .collect(),
        )
    }
}

impl Default for DemoAnalysisService {
    fn default() -> Self {
        Self::new(Duration::from_millis(600))
    }
}

#[async_trait]
impl AnalysisService for DemoAnalysisService {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReply> {
        debug!(query = %request.user_query, "Demo service answering");
        tokio::time::sleep(self.delay).await;
        Ok(Self::demo_reply())
    }

    fn describe(&self) -> String {
        "demo service (offline)".to_string()
    }
}
