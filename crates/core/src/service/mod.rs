//! Ticket service module.
//!
//! The `TicketService` trait abstracts the remote endpoint that renders a
//! ticket as a PNG image. `HttpTicketService` is the reqwest implementation;
//! tests substitute `testing::MockTicketService`.

mod error;
mod http;
mod traits;
mod types;

pub use error::TicketServiceError;
pub use http::HttpTicketService;
pub use traits::TicketService;
pub use types::{
    decode_png_data_uri, png_data_uri, TicketId, TicketImage, TicketResponse,
    TicketResponseBody, TICKET_MIME_TYPE,
};
