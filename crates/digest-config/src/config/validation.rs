use digest_utils::error::ConfigError;

use super::Config;

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

impl Config {
    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.model().trim().is_empty() {
            return Err(invalid("model", "must not be empty"));
        }

        if self.max_tokens() == 0 {
            return Err(invalid("max_tokens", "must be greater than 0"));
        }

        if self.page_content_chars() == 0 {
            return Err(invalid("page_content_chars", "must be greater than 0"));
        }

        if self.ollama_binary().trim().is_empty() {
            return Err(invalid("ollama_binary", "must not be empty"));
        }

        let timeouts = [
            ("run_timeout_secs", self.ollama.run_timeout_secs),
            ("list_timeout_secs", self.ollama.list_timeout_secs),
            ("check_timeout_secs", self.ollama.check_timeout_secs),
            ("pull_timeout_secs", self.ollama.pull_timeout_secs),
        ];
        for (key, secs) in timeouts {
            if secs == Some(0) {
                return Err(invalid(key, "must be at least 1 second"));
            }
        }

        Ok(())
    }
}
