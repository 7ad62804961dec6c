//! Error types for the ticket service.

use thiserror::Error;

/// Errors raised while fetching or decoding a ticket.
///
/// Every variant counts as a transport/decode failure. A service that answers
/// with `success: false` is not an error, see [`TicketResponse::Failure`].
///
/// [`TicketResponse::Failure`]: super::TicketResponse::Failure
#[derive(Debug, Error)]
pub enum TicketServiceError {
    /// HTTP request failed (connection refused, reset, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON document.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Ticket image payload is not valid base64.
    #[error("Invalid ticket image: {0}")]
    InvalidImage(String),

    /// Client not configured correctly.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}
