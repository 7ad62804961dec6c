//! Testing utilities and mock implementations.
//!
//! This module provides test doubles for every seam of the ticket modal,
//! allowing the controller to be exercised without a real UI or network.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ticketview_core::testing::{fixtures, MockTicketService, RecordingNotifier, RecordingSurface};
//! use ticketview_core::TicketModalController;
//!
//! let service = Arc::new(MockTicketService::new());
//! let surface = Arc::new(RecordingSurface::new());
//! let notifier = Arc::new(RecordingNotifier::new());
//! service.set_response("42", fixtures::success_response("42")).await;
//!
//! let controller = TicketModalController::new(service, surface.clone(), notifier);
//! controller.request_and_show("42").await;
//! assert_eq!(surface.snapshot().download_file_name.as_deref(), Some("ticket_42.png"));
//! ```

mod mock_surface;
mod mock_ticket_service;

pub use mock_surface::{RecordingNotifier, RecordingSurface, SurfaceCall, SurfaceView};
pub use mock_ticket_service::MockTicketService;

/// Test fixtures and helper functions.
pub mod fixtures {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    use crate::service::TicketResponse;

    /// The 8-byte PNG signature, enough to stand in for a rendered ticket.
    pub const PNG_BYTES: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    /// Base64 of [`PNG_BYTES`].
    pub fn png_payload() -> String {
        STANDARD.encode(PNG_BYTES)
    }

    /// `data:image/png;base64,...` for [`PNG_BYTES`].
    pub fn png_data_uri() -> String {
        crate::service::png_data_uri(&png_payload())
    }

    /// A successful response carrying [`PNG_BYTES`].
    pub fn success_response(ticket_number: &str) -> TicketResponse {
        TicketResponse::success(png_payload(), ticket_number)
    }

    /// A service-reported failure.
    pub fn failure_response(message: &str) -> TicketResponse {
        TicketResponse::failure(message)
    }
}
