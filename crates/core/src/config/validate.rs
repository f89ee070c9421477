use super::{types::Config, ConfigError, UpstreamBackend};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - The http backend has a non-empty url and a non-zero timeout
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Upstream validation
    if config.upstream.backend == UpstreamBackend::Http {
        match &config.upstream.http {
            None => {
                return Err(ConfigError::ValidationError(
                    "upstream.backend = \"http\" requires an [upstream.http] section".to_string(),
                ))
            }
            Some(http) if http.url.trim().is_empty() => {
                return Err(ConfigError::ValidationError(
                    "upstream.http.url cannot be empty".to_string(),
                ))
            }
            Some(http) if http.timeout_secs == 0 => {
                return Err(ConfigError::ValidationError(
                    "upstream.http.timeout_secs cannot be 0".to_string(),
                ))
            }
            Some(_) => {}
        }
    }

    Ok(())
}
