//! go-import resolution server.
//!
//! Answers `?go-get=1` requests with an HTML page carrying a
//! `<meta name="go-import">` tag. The repository is found by matching
//! `host + path` against an ordered rule list and expanding the first
//! matching rule's templates with the pattern's capture groups.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod resolve;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resolve::{Record, ResolveError, Resolver, Rule, Vcs};
