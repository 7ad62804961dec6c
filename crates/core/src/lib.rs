//! Ticket modal flow: fetch a server-rendered ticket image and present it.

pub mod config;
pub mod modal;
pub mod service;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_config_with_defaults, validate_config, Config,
    ConfigError, OutputConfig, TicketServiceConfig,
};
pub use modal::{ModalState, Notifier, PresentationSurface, RequestOutcome, TicketModalController};
pub use service::{
    decode_png_data_uri, HttpTicketService, TicketId, TicketImage, TicketResponse, TicketService,
    TicketServiceError,
};
