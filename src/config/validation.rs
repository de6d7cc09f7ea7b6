use crate::config::types::{Config, OutputConfig, SampleConfig, UserAgentConfig, WalkerConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_walker_config(&config.walker)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_sample_config(&config.sample)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates walker configuration
fn validate_walker_config(config: &WalkerConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "https" && base.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if config.target_title.trim().is_empty() {
        return Err(ConfigError::Validation(
            "target-title cannot be empty".to_string(),
        ));
    }

    if config.max_steps < 1 || config.max_steps > 1000 {
        return Err(ConfigError::Validation(format!(
            "max-steps must be between 1 and 1000, got {}",
            config.max_steps
        )));
    }

    if config.max_concurrent_walks < 1 || config.max_concurrent_walks > 32 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-walks must be between 1 and 32, got {}",
            config.max_concurrent_walks
        )));
    }

    if config.max_backoff_ms < config.request_delay_ms {
        return Err(ConfigError::Validation(format!(
            "max-backoff-ms ({}) must not be smaller than request-delay-ms ({})",
            config.max_backoff_ms, config.request_delay_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates sampling configuration
fn validate_sample_config(config: &SampleConfig) -> Result<(), ConfigError> {
    let uses_ranking = config.top_count > 0 || config.per_category_count > 0;

    if uses_ranking && config.ranking_page.trim().is_empty() {
        return Err(ConfigError::Validation(
            "ranking-page cannot be empty when top or category samples are enabled".to_string(),
        ));
    }

    if config.ranking_page.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "ranking-page must be an article identifier without a leading slash, got '{}'",
            config.ranking_page
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.export_dir.is_empty() {
        return Err(ConfigError::Validation(
            "export-dir cannot be empty".to_string(),
        ));
    }

    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary-path cannot be empty".to_string(),
        ));
    }

    if matches!(config.database_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "database-path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
