use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, expansion fails, the
    /// TOML is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded = crate::env::expand_env(&raw)?;

        let config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from an optional path, falling back to built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error only when a path is given and loading it fails
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error when a deadline or retry delay is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, scope) in [("text", &self.text), ("image", &self.image)] {
            if scope.timeout_ms == 0 {
                anyhow::bail!("{name}.timeout_ms must be greater than 0");
            }
            if scope.timeout_ms > 600_000 {
                anyhow::bail!("{name}.timeout_ms exceeds the maximum of 600000 (10 minutes)");
            }
            if scope.max_retries_per_provider > 10 {
                anyhow::bail!("{name}.max_retries_per_provider exceeds the maximum of 10");
            }
            if scope.retry_delay_ms > scope.timeout_ms {
                anyhow::bail!("{name}.retry_delay_ms must not exceed {name}.timeout_ms");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use easel_core::{Preference, Scope};

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_differ_per_scope() {
        let config = Config::default();
        assert_eq!(config.text.timeout_ms, 25_000);
        assert_eq!(config.image.timeout_ms, 30_000);
        assert_eq!(config.text.retry_delay_ms, 500);
        assert_eq!(config.image.retry_delay_ms, 750);
        assert_eq!(config.text.preference, Preference::Auto);
    }

    #[test]
    fn loads_scope_tuning_and_overrides() {
        let file = write_config(
            r#"
            [text]
            preference = "groq"
            timeout_ms = 10000
            max_retries_per_provider = 2
            retry_delay_ms = 100
            retry_delay_step_ms = 100

            [providers.groq]
            base_url = "http://localhost:9999/v1"
            "#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.text.preference, Preference::Provider("groq".to_owned()));
        assert_eq!(config.scope(Scope::Text).timeout_ms, 10_000);
        assert_eq!(
            config.base_url_override("groq").unwrap().as_str(),
            "http://localhost:9999/v1"
        );
        assert!(config.base_url_override("openai").is_none());

        // Untouched image scope keeps its own defaults
        assert_eq!(config.image.timeout_ms, 30_000);
    }

    #[test]
    fn rejects_unknown_fields() {
        let file = write_config("[text]\nretry_count = 3\n");
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let file = write_config("[image]\ntimeout_ms = 0\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("image.timeout_ms"));
    }

    #[test]
    fn rejects_retry_delay_longer_than_timeout() {
        let file = write_config("[text]\ntimeout_ms = 1000\nretry_delay_ms = 5000\n");
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn load_or_default_without_path() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.text.timeout_ms, 25_000);
    }
}
