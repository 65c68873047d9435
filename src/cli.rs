//! Command-line interface.

use clap::Parser;
use std::path::PathBuf;

use crate::config::loader::{load_config, ConfigError};
use crate::config::validation::validate_config;
use crate::config::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "godirectd", version)]
#[command(about = "Answers go-get queries with go-import meta tags resolved from a rule set", long_about = None)]
pub struct Cli {
    /// TOML configuration file; flags override its values.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// TCP address to listen for HTTP requests at [default: localhost:0].
    #[arg(long, value_name = "ADDR")]
    pub listen_addr: Option<String>,

    /// File containing module path patterns and string templates.
    /// Empty selects the built-in GitHub-style rule.
    #[arg(long, value_name = "FILE")]
    pub rule_file: Option<PathBuf>,

    /// The header to read the request hostname from [default: host].
    #[arg(long, value_name = "NAME")]
    pub host_header: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Build the effective configuration: file (if any), then flags, then validation.
    pub fn load(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };

        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(addr) = &self.listen_addr {
            config.listener.bind_address = addr.clone();
        }
        if let Some(path) = &self.rule_file {
            config.resolver.rule_file = Some(path.clone());
        }
        if let Some(name) = &self.host_header {
            config.resolver.host_header = name.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}
