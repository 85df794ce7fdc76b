//! HTTP implementation of the analysis service

use super::{AnalysisReply, AnalysisRequest, AnalysisService};
use crate::config::ChatConfig;
use crate::error::{ChatError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

/// Talks to the analysis service over plain `POST` + JSON
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    /// Create a client from the chat configuration
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Endpoint receiving the queries
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReply> {
        debug!("Sending query ({} chars)", request.user_query.chars().count());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let reply: AnalysisReply = serde_json::from_slice(&bytes)
            .map_err(|e| ChatError::Decode(format!("Failed to parse reply: {e}")))?;

        debug!(
            has_text = reply.text.is_some(),
            chart_points = reply.chart.as_ref().map_or(0, Vec::len),
            "Received reply"
        );

        Ok(reply)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
