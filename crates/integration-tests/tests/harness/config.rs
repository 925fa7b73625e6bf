//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use indexmap::IndexMap;
use voxgate_config::{Config, EngineConfig, HealthConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                engine: EngineConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Run `program` with `args` as the engine
    pub fn with_engine_command(mut self, program: &str, args: &[&str]) -> Self {
        self.config.engine.program = program.to_owned();
        self.config.engine.args = args.iter().map(|arg| (*arg).to_owned()).collect();
        self
    }

    /// Use an explicit speaker table
    pub fn with_speakers(mut self, speakers: &[(&str, u32)]) -> Self {
        self.config.engine.speakers = Some(
            speakers
                .iter()
                .map(|(name, id)| ((*name).to_owned(), *id))
                .collect::<IndexMap<_, _>>(),
        );
        self
    }

    /// Write temporary audio files into `dir`
    pub fn with_temp_dir(mut self, dir: &Path) -> Self {
        self.config.engine.temp_dir = Some(dir.to_path_buf());
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
