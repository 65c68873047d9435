//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (cli.rs)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!
//! rule file (optional)
//!     → rules.rs (line format, pattern compilation)
//!     → Vec<Rule> handed to the Resolver
//! ```
//!
//! # Design Decisions
//! - Everything is read once at startup; there is no reload
//! - All fields have defaults to allow an empty config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod rules;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use rules::{default_rules, load_rule_set, LoadError};
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::ResolverConfig;
pub use schema::ServerConfig;
pub use schema::TimeoutConfig;
