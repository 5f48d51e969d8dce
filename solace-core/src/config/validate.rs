//! Configuration validation rules.

use super::schema::Config;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".to_string());
    }
    if config.server.port == 0 {
        errors.push("server.port must be > 0".to_string());
    }

    if config.storage.workspace.trim().is_empty() {
        errors.push("storage.workspace must not be empty".to_string());
    }

    if config.responder.model.trim().is_empty() {
        errors.push("responder.model must not be empty".to_string());
    }
    if config.responder.max_tokens == 0 {
        errors.push("responder.max_tokens must be > 0".to_string());
    }
    if !(0.0..=2.0).contains(&config.responder.temperature) {
        errors.push("responder.temperature must be in [0.0, 2.0]".to_string());
    }
    if config.responder.timeout_secs == 0 {
        errors.push("responder.timeout_secs must be > 0".to_string());
    }
    if config.responder.context_turns == 0 {
        errors.push("responder.context_turns must be > 0".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_defaults() {
        let config = Config::default();
        validate_config(&config).unwrap();
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.responder.timeout_secs = 0;

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("responder.timeout_secs"));
    }

    #[test]
    fn test_validate_aggregates_errors() {
        let mut config = Config::default();
        config.server.port = 0;
        config.responder.max_tokens = 0;

        let err = validate_config(&config).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("server.port"));
        assert!(text.contains("responder.max_tokens"));
    }
}
