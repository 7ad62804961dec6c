//! Mock ticket service for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::service::{TicketId, TicketResponse, TicketService, TicketServiceError};

/// Mock implementation of the TicketService trait.
///
/// Provides controllable behavior for testing:
/// - Return configured responses per ticket id
/// - Track requested ids for assertions
/// - Simulate transport failures and slow responses
///
/// Unknown ids behave like the real endpoint's HTML 404 page: a parse error.
///
/// # Example
///
/// ```rust,ignore
/// use ticketview_core::testing::{MockTicketService, fixtures};
///
/// let service = MockTicketService::new();
/// service.set_response("42", fixtures::success_response("42")).await;
///
/// let response = service.fetch_ticket(&"42".into()).await?;
/// assert!(response.is_success());
/// assert_eq!(service.request_count().await, 1);
/// ```
#[derive(Debug)]
pub struct MockTicketService {
    /// Responses by ticket id.
    responses: Arc<RwLock<HashMap<String, TicketResponse>>>,
    /// Recorded requests.
    requests: Arc<RwLock<Vec<TicketId>>>,
    /// If set, the next request will fail with this error.
    next_error: Arc<RwLock<Option<TicketServiceError>>>,
    /// Simulated response latency in milliseconds.
    response_delay_ms: Arc<RwLock<u64>>,
}

impl Default for MockTicketService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTicketService {
    /// Create a new mock service with no configured tickets.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            response_delay_ms: Arc::new(RwLock::new(0)),
        }
    }

    /// Configure the response for a ticket id.
    pub async fn set_response(&self, ticket_id: impl Into<TicketId>, response: TicketResponse) {
        let ticket_id = ticket_id.into();
        self.responses
            .write()
            .await
            .insert(ticket_id.as_str().to_string(), response);
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<TicketId> {
        self.requests.read().await.clone()
    }

    /// Get the number of requests received.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Configure the next request to fail with the given error.
    pub async fn set_next_error(&self, error: TicketServiceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated response latency.
    pub async fn set_response_delay(&self, delay: Duration) {
        *self.response_delay_ms.write().await = delay.as_millis() as u64;
    }
}

#[async_trait]
impl TicketService for MockTicketService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_ticket(&self, ticket_id: &TicketId) -> Result<TicketResponse, TicketServiceError> {
        self.requests.write().await.push(ticket_id.clone());

        let delay_ms = *self.response_delay_ms.read().await;
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.responses
            .read()
            .await
            .get(ticket_id.as_str())
            .cloned()
            .ok_or_else(|| {
                TicketServiceError::Parse(format!("HTTP 404 for ticket {}", ticket_id))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_configured_response() {
        let service = MockTicketService::new();
        service
            .set_response("42", fixtures::success_response("42"))
            .await;

        let response = service.fetch_ticket(&TicketId::from("42")).await.unwrap();
        assert!(response.is_success());
        assert_eq!(service.recorded_requests().await, vec![TicketId::from("42")]);
    }

    #[tokio::test]
    async fn test_unknown_ticket_is_parse_error() {
        let service = MockTicketService::new();
        let result = service.fetch_ticket(&TicketId::from("404")).await;
        assert!(matches!(result, Err(TicketServiceError::Parse(_))));
    }

    #[tokio::test]
    async fn test_next_error_is_consumed() {
        let service = MockTicketService::new();
        service
            .set_response("1", fixtures::failure_response("Unauthorized access"))
            .await;
        service
            .set_next_error(TicketServiceError::Parse("connection reset".to_string()))
            .await;

        assert!(service.fetch_ticket(&TicketId::from("1")).await.is_err());
        assert_eq!(
            service.fetch_ticket(&TicketId::from("1")).await.unwrap(),
            TicketResponse::failure("Unauthorized access")
        );
        assert_eq!(service.request_count().await, 2);
    }
}
