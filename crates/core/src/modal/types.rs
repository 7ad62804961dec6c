use crate::service::TicketImage;

/// Notification text for a failure the service did not explain.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while generating your ticket.";

/// Prefix for failures reported by the service.
pub const SERVICE_FAILURE_PREFIX: &str = "Error generating ticket: ";

/// State of the ticket modal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Loading,
    Displaying(TicketImage),
}

impl ModalState {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_displaying(&self) -> bool {
        matches!(self, Self::Displaying(_))
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Loading => "loading",
            Self::Displaying(_) => "displaying",
        }
    }
}

/// What a `request_and_show` call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Ticket image rendered into the surface.
    Displayed { ticket_number: String },
    /// Service declined; the user was shown its message.
    ServiceFailure { message: String },
    /// Network, parse or decode failure; the user was shown a generic message.
    TransportFailure,
    /// Another request was still in flight; nothing happened.
    Busy,
}

impl RequestOutcome {
    pub fn is_displayed(&self) -> bool {
        matches!(self, Self::Displayed { .. })
    }
}
