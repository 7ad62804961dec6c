//! Ticket modal module.
//!
//! `TicketModalController` owns the request/display flow. It talks to the
//! host UI only through the `PresentationSurface` and `Notifier` traits and
//! to the network only through `TicketService`, so every collaborator can be
//! replaced by a test double.
//!
//! # State machine
//!
//! ```text
//! Closed --request_and_show--> Loading --success--> Displaying --close--> Closed
//!                              Loading --failure--> Closed
//! ```

mod controller;
mod traits;
mod types;

pub use controller::TicketModalController;
pub use traits::{Notifier, PresentationSurface};
pub use types::{ModalState, RequestOutcome, GENERIC_FAILURE_MESSAGE, SERVICE_FAILURE_PREFIX};
