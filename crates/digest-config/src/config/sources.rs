use std::collections::BTreeMap;

use super::Config;
use super::model::CONFIG_KEYS;

impl Config {
    /// Effective configuration as `key -> (value, source label)`.
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, String)> {
        CONFIG_KEYS
            .iter()
            .map(|key| {
                let value = self.value_of(key);
                let source = self.source_of(key).label().to_string();
                ((*key).to_string(), (value, source))
            })
            .collect()
    }

    /// Log every effective value with its source at debug level.
    pub fn log_effective_config(&self) {
        for (key, (value, source)) in self.effective_config() {
            tracing::debug!(key = %key, value = %value, source = %source, "config");
        }
    }

    fn value_of(&self, key: &str) -> String {
        match key {
            "model" => self.model().to_string(),
            "max_tokens" => self.max_tokens().to_string(),
            "page_content_chars" => self.page_content_chars().to_string(),
            "verbose" => self.verbose().to_string(),
            "ollama_binary" => self.ollama_binary().to_string(),
            "run_timeout_secs" => self.run_timeout().as_secs().to_string(),
            "list_timeout_secs" => self.list_timeout().as_secs().to_string(),
            "check_timeout_secs" => self.check_timeout().as_secs().to_string(),
            "pull_timeout_secs" => self.pull_timeout().as_secs().to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_config_covers_every_key() {
        let config = Config::builder().model("mistral").build().unwrap();
        let effective = config.effective_config();

        assert_eq!(effective.len(), CONFIG_KEYS.len());
        assert_eq!(
            effective["model"],
            ("mistral".to_string(), "programmatic".to_string())
        );
        assert_eq!(
            effective["run_timeout_secs"],
            ("120".to_string(), "default".to_string())
        );
        assert!(effective.values().all(|(value, _)| !value.is_empty()));
    }
}
