use crate::config::types::{Config, OutputConfig, RendererConfig, ScanConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scan_config(&config.scan)?;
    validate_renderer_config(&config.renderer)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the search-term source
fn validate_scan_config(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.terms_file.trim().is_empty() {
        return Err(ConfigError::Validation(
            "terms-file cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates renderer configuration
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs ({}) cannot exceed timeout-secs ({})",
            config.connect_timeout_secs, config.timeout_secs
        )));
    }

    if config.scroll_step_px < 1 {
        return Err(ConfigError::Validation("scroll-step-px must be >= 1".to_string()));
    }

    if config.network_idle_ms > config.timeout_secs.saturating_mul(1000) {
        return Err(ConfigError::Validation(format!(
            "network-idle-ms ({}) cannot exceed timeout-secs ({})",
            config.network_idle_ms, config.timeout_secs
        )));
    }

    if let Some(path) = &config.chrome_executable {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "chrome-executable cannot be empty when set".to_string(),
            ));
        }
    }

    if config.max_redirects > 50 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= 50, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if !config.json && !config.html {
        return Err(ConfigError::Validation(
            "at least one of output json or html must be enabled".to_string(),
        ));
    }

    Ok(())
}
