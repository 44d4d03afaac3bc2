use crate::config::types::{
    Config, CrawlerConfig, IndexConfig, LlmConfig, ServerConfig, UserAgentConfig,
};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_index_config(&config.index)?;
    validate_llm_config(&config.llm)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;
    let origin = validate_http_url("site-origin", &config.site_origin)?;

    // Course links are concatenated onto the origin verbatim, so it must be a bare origin
    if config.site_origin.ends_with('/') || origin.path() != "/" {
        return Err(ConfigError::Validation(format!(
            "site-origin must be scheme and host only without a trailing '/', got '{}'",
            config.site_origin
        )));
    }

    if config.page_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "page-delay-ms must be <= 60000ms, got {}ms",
            config.page_delay_ms
        )));
    }

    if config.detail_concurrency < 1 || config.detail_concurrency > 16 {
        return Err(ConfigError::Validation(format!(
            "detail-concurrency must be between 1 and 16, got {}",
            config.detail_concurrency
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

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates index configuration
fn validate_index_config(config: &IndexConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    if config.top_k < 1 || config.top_k > 50 {
        return Err(ConfigError::Validation(format!(
            "top-k must be between 1 and 50, got {}",
            config.top_k
        )));
    }

    // batchEmbedContents accepts at most 100 requests per call
    if config.embed_batch_size < 1 || config.embed_batch_size > 100 {
        return Err(ConfigError::Validation(format!(
            "embed-batch-size must be between 1 and 100, got {}",
            config.embed_batch_size
        )));
    }

    Ok(())
}

/// Validates language model configuration
fn validate_llm_config(config: &LlmConfig) -> Result<(), ConfigError> {
    validate_http_url("llm base-url", &config.base_url)?;

    if config.api_key_env.is_empty() {
        return Err(ConfigError::Validation(
            "api-key-env cannot be empty".to_string(),
        ));
    }

    if config.embedding_model.is_empty() || config.generation_model.is_empty() {
        return Err(ConfigError::Validation(
            "embedding-model and generation-model cannot be empty".to_string(),
        ));
    }

    if let Some(temperature) = config.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Validation(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                temperature
            )));
        }
    }

    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("Invalid bind address '{}': {}", config.bind, e))
    })?;
    Ok(())
}

/// Parses a URL and checks it uses HTTP or HTTPS
fn validate_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS scheme",
            field, value
        )));
    }

    Ok(url)
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
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::DetailFailurePolicy;

    fn crawler_config() -> CrawlerConfig {
        CrawlerConfig {
            base_url: "https://site.test/collections/courses".to_string(),
            site_origin: "https://site.test".to_string(),
            page_delay_ms: 2000,
            detail_concurrency: 1,
            on_detail_error: DetailFailurePolicy::Abort,
        }
    }

    #[test]
    fn test_valid_crawler_config() {
        assert!(validate_crawler_config(&crawler_config()).is_ok());
    }

    #[test]
    fn test_site_origin_with_trailing_slash() {
        let mut config = crawler_config();
        config.site_origin = "https://site.test/".to_string();
        assert!(matches!(
            validate_crawler_config(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_site_origin_with_path() {
        let mut config = crawler_config();
        config.site_origin = "https://site.test/courses".to_string();
        assert!(validate_crawler_config(&config).is_err());
    }

    #[test]
    fn test_base_url_must_be_http() {
        let mut config = crawler_config();
        config.base_url = "ftp://site.test/courses".to_string();
        assert!(matches!(
            validate_crawler_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_detail_concurrency_bounds() {
        let mut config = crawler_config();
        config.detail_concurrency = 0;
        assert!(validate_crawler_config(&config).is_err());

        config.detail_concurrency = 17;
        assert!(validate_crawler_config(&config).is_err());

        config.detail_concurrency = 4;
        assert!(validate_crawler_config(&config).is_ok());
    }

    #[test]
    fn test_index_config_bounds() {
        let mut config = IndexConfig::default();
        assert!(validate_index_config(&config).is_ok());

        config.top_k = 0;
        assert!(validate_index_config(&config).is_err());

        config.top_k = 5;
        config.embed_batch_size = 101;
        assert!(validate_index_config(&config).is_err());
    }

    #[test]
    fn test_llm_temperature_range() {
        let mut config = LlmConfig::default();
        config.temperature = Some(0.3);
        assert!(validate_llm_config(&config).is_ok());

        config.temperature = Some(3.0);
        assert!(validate_llm_config(&config).is_err());
    }

    #[test]
    fn test_server_bind_address() {
        assert!(validate_server_config(&ServerConfig::default()).is_ok());
        assert!(validate_server_config(&ServerConfig {
            bind: "not-an-address".to_string()
        })
        .is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
    }
}
