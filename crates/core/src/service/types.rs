//! Ticket request and response types.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::TicketServiceError;

/// MIME type of rendered tickets.
pub const TICKET_MIME_TYPE: &str = "image/png";

/// Identifier of the ticket to render. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TicketId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for TicketId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for TicketId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// Result of a ticket request as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketResponse {
    /// The ticket was rendered.
    Success {
        /// PNG image as base64 text.
        ticket_image: String,
        /// Display label, used to name the downloaded file.
        ticket_number: String,
    },
    /// The service declined, with a human readable reason.
    Failure { message: String },
}

impl TicketResponse {
    pub fn success(ticket_image: impl Into<String>, ticket_number: impl Into<String>) -> Self {
        Self::Success {
            ticket_image: ticket_image.into(),
            ticket_number: ticket_number.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// JSON body of the download endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketResponseBody {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
}

impl TryFrom<TicketResponseBody> for TicketResponse {
    type Error = TicketServiceError;

    fn try_from(body: TicketResponseBody) -> Result<Self, Self::Error> {
        if !body.success {
            return Ok(Self::Failure {
                message: body.message.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        let ticket_image = body.ticket_image.ok_or_else(|| {
            TicketServiceError::Parse("success response without ticket_image".to_string())
        })?;
        let ticket_number = body.ticket_number.ok_or_else(|| {
            TicketServiceError::Parse("success response without ticket_number".to_string())
        })?;

        Ok(Self::Success {
            ticket_image,
            ticket_number,
        })
    }
}

impl From<TicketResponse> for TicketResponseBody {
    fn from(response: TicketResponse) -> Self {
        match response {
            TicketResponse::Success {
                ticket_image,
                ticket_number,
            } => Self {
                success: true,
                message: None,
                ticket_image: Some(ticket_image),
                ticket_number: Some(ticket_number),
            },
            TicketResponse::Failure { message } => Self {
                success: false,
                message: Some(message),
                ticket_image: None,
                ticket_number: None,
            },
        }
    }
}

/// A decoded ticket, ready to be displayed and downloaded.
#[derive(Clone, PartialEq, Eq)]
pub struct TicketImage {
    ticket_number: String,
    payload: String,
    bytes: Vec<u8>,
}

impl TicketImage {
    /// Decodes a base64 payload. The payload text is kept verbatim for the data URI.
    ///
    /// Decoding is strict standard base64 with padding: embedded whitespace or
    /// line breaks are rejected as [`TicketServiceError::InvalidImage`].
    pub fn from_payload(
        payload: impl Into<String>,
        ticket_number: impl Into<String>,
    ) -> Result<Self, TicketServiceError> {
        let payload = payload.into();
        let bytes = STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| TicketServiceError::InvalidImage(e.to_string()))?;

        Ok(Self {
            ticket_number: ticket_number.into(),
            payload,
            bytes,
        })
    }

    pub fn ticket_number(&self) -> &str {
        &self.ticket_number
    }

    /// `data:image/png;base64,<payload>`
    pub fn data_uri(&self) -> String {
        png_data_uri(&self.payload)
    }

    /// Suggested download filename, `ticket_<number>.png`.
    pub fn file_name(&self) -> String {
        format!("ticket_{}.png", self.ticket_number)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for TicketImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketImage")
            .field("ticket_number", &self.ticket_number)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// Wraps a base64 payload into a PNG data URI.
pub fn png_data_uri(payload: &str) -> String {
    format!("data:{};base64,{}", TICKET_MIME_TYPE, payload)
}

/// Decodes a PNG data URI produced by [`png_data_uri`].
pub fn decode_png_data_uri(uri: &str) -> Result<Vec<u8>, TicketServiceError> {
    let prefix = format!("data:{};base64,", TICKET_MIME_TYPE);
    let payload = uri.strip_prefix(&prefix).ok_or_else(|| {
        TicketServiceError::InvalidImage(format!("not a {} data URI", TICKET_MIME_TYPE))
    })?;

    STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| TicketServiceError::InvalidImage(e.to_string()))
}
