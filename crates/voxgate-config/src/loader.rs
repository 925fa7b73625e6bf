use std::path::Path;

use crate::{Config, engine::OUTPUT_PLACEHOLDER};

/// Paths owned by the speech and catalog endpoints
const ENDPOINT_PATHS: [&str; 3] = ["/v1/audio/speech", "/v1/audio/voices", "/v1/models"];

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be invoked as configured
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_engine_config()?;
        self.validate_health_config()?;
        Ok(())
    }

    fn validate_engine_config(&self) -> anyhow::Result<()> {
        let engine = &self.engine;

        if engine.program.trim().is_empty() {
            anyhow::bail!("engine.program must not be empty");
        }

        if !engine.args.iter().any(|arg| arg.contains(OUTPUT_PLACEHOLDER)) {
            anyhow::bail!("engine.args must contain the {OUTPUT_PLACEHOLDER} placeholder");
        }

        if let Some(ref speakers) = engine.speakers
            && speakers.is_empty()
        {
            anyhow::bail!("engine.speakers must list at least one voice when present");
        }

        Ok(())
    }

    fn validate_health_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        if health.enabled && ENDPOINT_PATHS.contains(&health.path.as_str()) {
            anyhow::bail!("server.health.path {} is already used by an endpoint", health.path);
        }

        Ok(())
    }
}
