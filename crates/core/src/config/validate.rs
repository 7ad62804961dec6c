use super::{
    types::{Config, TICKET_ID_PLACEHOLDER},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - service.base_url is an http(s) URL
/// - service.download_path contains the ticket id placeholder
/// - service.timeout_secs is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.service.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "service.base_url must start with http:// or https://, got '{}'",
            config.service.base_url
        )));
    }

    if !config.service.download_path.contains(TICKET_ID_PLACEHOLDER) {
        return Err(ConfigError::ValidationError(format!(
            "service.download_path must contain {}",
            TICKET_ID_PLACEHOLDER
        )));
    }

    if config.service.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "service.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
