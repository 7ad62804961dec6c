use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder substituted with the (percent-encoded) ticket identifier.
pub const TICKET_ID_PLACEHOLDER: &str = "{ticket_id}";

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub service: TicketServiceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Minimal configuration pointing at a ticket service, everything else defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            service: TicketServiceConfig::new(base_url),
            output: OutputConfig::default(),
        }
    }
}

/// Ticket service endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketServiceConfig {
    /// Service root, e.g. "http://localhost:8000"
    pub base_url: String,
    /// Path template for the download endpoint, must contain `{ticket_id}`
    #[serde(default = "default_download_path")]
    pub download_path: String,
    /// Request timeout in seconds. Unset means wait for as long as the service takes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl TicketServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            download_path: default_download_path(),
            timeout_secs: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Sets the download path template.
    pub fn with_download_path(mut self, path: impl Into<String>) -> Self {
        self.download_path = path.into();
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_download_path() -> String {
    "/api/ticket/download/{ticket_id}/".to_string()
}

/// Where saved tickets land
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
