//! HTTP ticket service client.
//!
//! Issues a single `GET` per request. The JSON body is read whatever the
//! status code: the service reports refusals (403, 500) with a regular
//! `{"success": false, "message": ...}` body.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::error::TicketServiceError;
use super::traits::TicketService;
use super::types::{TicketId, TicketResponse, TicketResponseBody};
use crate::config::{TicketServiceConfig, TICKET_ID_PLACEHOLDER};

/// reqwest-backed [`TicketService`].
pub struct HttpTicketService {
    client: Client,
    base_url: String,
    download_path: String,
}

impl HttpTicketService {
    /// Create a new client. No timeout is applied unless configured.
    pub fn new(config: TicketServiceConfig) -> Result<Self, TicketServiceError> {
        if config.base_url.trim().is_empty() {
            return Err(TicketServiceError::NotConfigured(
                "ticket service base_url is required".to_string(),
            ));
        }
        if !config.download_path.contains(TICKET_ID_PLACEHOLDER) {
            return Err(TicketServiceError::NotConfigured(format!(
                "download_path must contain {}",
                TICKET_ID_PLACEHOLDER
            )));
        }

        let mut builder =
            Client::builder().user_agent(concat!("ticketview/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            download_path: config.download_path,
        })
    }

    /// Full URL of the download endpoint for a ticket.
    pub fn ticket_url(&self, ticket_id: &TicketId) -> String {
        let path = self
            .download_path
            .replace(TICKET_ID_PLACEHOLDER, &urlencoding::encode(ticket_id.as_str()));
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl TicketService for HttpTicketService {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_ticket(&self, ticket_id: &TicketId) -> Result<TicketResponse, TicketServiceError> {
        let url = self.ticket_url(ticket_id);

        debug!("Ticket download request: url='{}'", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            "Ticket download response: status={}, {} bytes",
            status.as_u16(),
            body.len()
        );

        let parsed: TicketResponseBody = serde_json::from_str(&body).map_err(|e| {
            TicketServiceError::Parse(format!(
                "HTTP {} with non-JSON ticket body: {}",
                status.as_u16(),
                e
            ))
        })?;

        TicketResponse::try_from(parsed)
    }
}
