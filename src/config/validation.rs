use crate::config::types::{CheckerConfig, Config, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_checker_config(&config.checker)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates checker configuration
fn validate_checker_config(config: &CheckerConfig) -> Result<(), ConfigError> {
    if config.max_workers < 1 || config.max_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be between 1 and 100, got {}",
            config.max_workers
        )));
    }

    for (name, value) in [
        ("request_timeout", config.request_timeout),
        ("sitemap_timeout", config.sitemap_timeout),
    ] {
        if !(1..=120).contains(&value) {
            return Err(ConfigError::Validation(format!(
                "{} must be between 1 and 120 seconds, got {}",
                name, value
            )));
        }
    }

    if let Some(sitemap_url) = &config.sitemap_url {
        if sitemap_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sitemap_url cannot be empty when set".to_string(),
            ));
        }
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

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}
