use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents fail
    /// expansion, parsing or validation
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml(&raw)?;
        tracing::debug!(path = %path.display(), "configuration loaded");

        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// Expands `{{ env.VAR }}` placeholders, deserializes and validates.
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;
        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a status entry is out of range or targets a
    /// connection-level kind, or if the instance override is blank
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_errors_config()?;
        self.validate_health_config()?;
        Ok(())
    }

    fn validate_errors_config(&self) -> anyhow::Result<()> {
        if self.errors.instance.as_deref().is_some_and(|id| id.trim().is_empty()) {
            anyhow::bail!("errors.instance must not be blank");
        }

        for (kind, status) in self.errors.status_entries() {
            if !(100..=599).contains(&status) {
                anyhow::bail!("errors.statuses.{kind}: status {status} is outside 100..=599");
            }

            // These never reach the status lookup
            if kind.is_connection_level() {
                anyhow::bail!("errors.statuses.{kind}: connection-level failures never produce a response");
            }
        }

        Ok(())
    }

    fn validate_health_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }
        Ok(())
    }
}
