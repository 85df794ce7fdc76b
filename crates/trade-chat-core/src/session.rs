//! Chat session: the send loop
//!
//! A session owns the conversation, the service it talks to and the portfolio
//! store. At most one query is in flight; input arriving meanwhile is ignored.

use crate::api::{AnalysisReply, AnalysisRequest, AnalysisService};
use crate::conversation::{Conversation, reply_messages};
use crate::error::{ChatError, Result};
use crate::message::ChatMessage;
use crate::storage::{PortfolioId, PortfolioStore};
use tracing::{info, warn};

/// Shown when the service could not be reached or refused the query
pub const SERVER_ERROR_TEXT: &str = "Error: failed to get a response from the server";

/// Shown for any other failure
pub const GENERIC_ERROR_TEXT: &str = "Error: failed to get a response";

/// A query accepted by [`ChatSession::begin_send`] and not yet answered
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuery {
    pub request: AnalysisRequest,
}

pub struct ChatSession<S> {
    service: S,
    portfolio: PortfolioStore,
    conversation: Conversation,
    loading: bool,
}

impl<S: AnalysisService> ChatSession<S> {
    pub fn new(service: S, portfolio: PortfolioStore) -> Self {
        Self {
            service,
            portfolio,
            conversation: Conversation::new(),
            loading: false,
        }
    }

    /// Accept user input for sending.
    ///
    /// Returns `None` for blank input or while another query is in flight;
    /// nothing is recorded in that case. Otherwise the user message is
    /// appended and the session is marked busy until [`Self::finish_send`].
    pub fn begin_send(&mut self, input: &str) -> Option<PendingQuery> {
        let text = input.trim();
        if text.is_empty() || self.loading {
            return None;
        }

        let account_id = match self.portfolio.load() {
            Ok(id) => id.map(|id| id.as_str().to_string()),
            Err(e) => {
                warn!("Could not read portfolio ID: {e}");
                None
            }
        };

        self.conversation.push(ChatMessage::user(text));
        self.loading = true;

        Some(PendingQuery {
            request: AnalysisRequest::new(text, account_id),
        })
    }

    /// Record the outcome of the in-flight query.
    ///
    /// Returns how many messages were appended.
    pub fn finish_send(&mut self, result: Result<AnalysisReply>) -> usize {
        self.loading = false;

        let messages = match result {
            Ok(reply) => reply_messages(reply),
            Err(e) => {
                warn!(error = %e, "Query failed");
                vec![ChatMessage::error(error_text(&e))]
            }
        };

        let appended = messages.len();
        self.conversation.extend(messages);
        appended
    }

    /// Send one query and wait for the answer.
    ///
    /// Returns how many messages were appended, user message included.
    pub async fn send(&mut self, input: &str) -> usize {
        let Some(pending) = self.begin_send(input) else {
            return 0;
        };

        info!(service = %self.service.describe(), "Sending query");
        let result = self.service.analyze(pending.request).await;
        1 + self.finish_send(result)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Clear the conversation history
    pub fn clear(&mut self) {
        self.conversation.clear();
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn portfolio_id(&self) -> Result<Option<PortfolioId>> {
        self.portfolio.load()
    }

    /// Validate, persist and return a new portfolio identifier
    pub fn set_portfolio_id(&mut self, raw: &str) -> Result<PortfolioId> {
        let id = PortfolioId::parse(raw)?;
        self.portfolio.save(&id)?;
        info!(portfolio_id = %id, "Portfolio ID updated");
        Ok(id)
    }
}

fn error_text(error: &ChatError) -> &'static str {
    if error.is_transport() {
        SERVER_ERROR_TEXT
    } else {
        GENERIC_ERROR_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChartPoint, DemoAnalysisService, MockAnalysisService};
    use crate::message::Role;
    use mockall::predicate::eq;
    use std::time::Duration;

    fn mock_service() -> MockAnalysisService {
        let mut service = MockAnalysisService::new();
        service.expect_describe().returning(|| "mock service".to_string());
        service
    }

    fn session_with(service: MockAnalysisService) -> ChatSession<MockAnalysisService> {
        ChatSession::new(service, PortfolioStore::ephemeral())
    }

    #[tokio::test]
    async fn test_send_appends_user_text_and_chart() {
        let mut service = mock_service();
        service
            .expect_analyze()
            .with(eq(AnalysisRequest::new("show prices", None)))
            .times(1)
            .returning(|_| {
                Ok(AnalysisReply::text("Prices")
                    .with_chart(vec![ChartPoint::new(2024.0, 1.0), ChartPoint::new(2025.0, 2.0)]))
            });

        let mut session = session_with(service);
        let appended = session.send("  show prices  ").await;

        assert_eq!(appended, 3);
        assert!(!session.is_loading());

        let messages = session.conversation().messages();
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].text(), Some("show prices"));
        assert_eq!(messages[1].text(), Some("Prices"));
        assert_eq!(messages[2].chart().map(<[ChartPoint]>::len), Some(2));
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let mut service = mock_service();
        service.expect_analyze().times(0);

        let mut session = session_with(service);
        assert_eq!(session.send("   \n\t").await, 0);
        assert!(session.conversation().is_empty());
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut session = session_with(mock_service());

        let pending = session.begin_send("first").unwrap();
        assert_eq!(pending.request.user_query, "first");
        assert!(session.is_loading());

        assert!(session.begin_send("second").is_none());
        assert_eq!(session.conversation().len(), 1);

        session.finish_send(Ok(AnalysisReply::text("done")));
        assert!(!session.is_loading());
        assert!(session.begin_send("third").is_some());
    }

    #[test]
    fn test_transport_failure_message() {
        let mut session = session_with(mock_service());
        session.begin_send("q").unwrap();

        let appended = session.finish_send(Err(ChatError::Status {
            status: 503,
            body: "unavailable".to_string(),
        }));

        assert_eq!(appended, 1);
        let last = session.conversation().last().unwrap();
        assert_eq!(last.role, Role::Bot);
        assert_eq!(last.text(), Some(SERVER_ERROR_TEXT));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_other_failure_message() {
        let mut session = session_with(mock_service());
        session.begin_send("q").unwrap();
        session.finish_send(Err(ChatError::Decode("bad body".to_string())));

        assert_eq!(
            session.conversation().last().and_then(ChatMessage::text),
            Some(GENERIC_ERROR_TEXT)
        );
    }

    #[tokio::test]
    async fn test_portfolio_id_is_sent() {
        let mut service = mock_service();
        service
            .expect_analyze()
            .with(eq(AnalysisRequest::new("balance?", Some("ACC-5".to_string()))))
            .times(1)
            .returning(|_| Ok(AnalysisReply::text("42")));

        let mut session = session_with(service);
        let id = session.set_portfolio_id("  ACC-5 ").unwrap();
        assert_eq!(id.as_str(), "ACC-5");
        assert_eq!(session.portfolio_id().unwrap(), Some(id));

        session.send("balance?").await;
        assert_eq!(
            session.conversation().last().and_then(ChatMessage::text),
            Some("42")
        );
    }

    #[test]
    fn test_blank_portfolio_id_rejected() {
        let mut session = session_with(mock_service());
        assert!(matches!(
            session.set_portfolio_id("  "),
            Err(ChatError::InvalidPortfolioId(_))
        ));
        assert_eq!(session.portfolio_id().unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let mut session = session_with(mock_service());
        session.begin_send("q").unwrap();
        session.finish_send(Ok(AnalysisReply::text("a")));
        session.clear();
        assert!(session.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_demo_service_round() {
        let mut session = ChatSession::new(
            DemoAnalysisService::new(Duration::ZERO),
            PortfolioStore::ephemeral(),
        );

        assert_eq!(session.send("how did my shares do?").await, 3);
        assert!(session.conversation().messages()[2].is_chart());
    }
}
