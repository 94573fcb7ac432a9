//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_storage(config, &mut result);
        Self::validate_summarizer(config, &mut result);
        Self::validate_timeouts(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_storage(config: &Config, result: &mut ValidationResult) {
        let valid_backends = ["file", "memory"];
        if !valid_backends.contains(&config.storage.backend.as_str()) {
            result.add_error(ValidationError::new(
                "storage.backend",
                format!(
                    "Unknown storage backend '{}', valid values: {:?}",
                    config.storage.backend, valid_backends
                ),
            ));
        }

        if config.storage.backend == "memory" {
            result.add_warning(ValidationWarning::new(
                "storage.backend",
                "Memory backend does not persist highlights across restarts",
            ));
        }
    }

    fn validate_summarizer(config: &Config, result: &mut ValidationResult) {
        let summarizer = &config.summarizer;

        if !summarizer.api_url.starts_with("http://") && !summarizer.api_url.starts_with("https://")
        {
            result.add_error(ValidationError::new(
                "summarizer.api_url",
                "api_url must start with http:// or https://",
            ));
        }

        if summarizer.model.trim().is_empty() {
            result.add_error(ValidationError::new(
                "summarizer.model",
                "Model cannot be empty",
            ));
        }

        if summarizer.resolved_api_key().is_none() {
            result.add_warning(ValidationWarning::new(
                "summarizer.api_key",
                "API key is not set; summarization will be unavailable",
            ));
        }

        if !(0.0..=2.0).contains(&summarizer.temperature) {
            result.add_error(ValidationError::new(
                "summarizer.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if summarizer.max_tokens == 0 {
            result.add_error(ValidationError::new(
                "summarizer.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }

        if summarizer.max_input_chars == 0 {
            result.add_error(ValidationError::new(
                "summarizer.max_input_chars",
                "max_input_chars must be greater than 0",
            ));
        }
    }

    fn validate_timeouts(config: &Config, result: &mut ValidationResult) {
        if config.summarizer.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "summarizer.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        if config.capture.save_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "capture.save_timeout_ms",
                "save_timeout_ms must be greater than 0",
            ));
        }

        if config.review.summarize_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "review.summarize_timeout_seconds",
                "summarize_timeout_seconds must be greater than 0",
            ));
        }

        // The panel gives up first otherwise, hiding the service's own timeout message.
        if config.review.summarize_timeout_seconds < config.summarizer.timeout_seconds {
            result.add_warning(ValidationWarning::new(
                "review.summarize_timeout_seconds",
                "review timeout is shorter than the summarizer timeout",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
