//! Trait definitions for the ticket service.

use async_trait::async_trait;

use super::error::TicketServiceError;
use super::types::{TicketId, TicketResponse};

/// A remote service that renders tickets as images.
#[async_trait]
pub trait TicketService: Send + Sync {
    /// Returns the name of this service implementation.
    fn name(&self) -> &str;

    /// Requests the rendered ticket.
    ///
    /// `Ok(TicketResponse::Failure)` means the service answered and declined.
    /// `Err` means no usable answer was obtained.
    async fn fetch_ticket(&self, ticket_id: &TicketId) -> Result<TicketResponse, TicketServiceError>;
}
