//! Module path resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Request subject ("host" + "/path")
//!     → resolver.rs (walk rules in order)
//!     → rule.rs (regex match, capture groups)
//!     → template.rs (expand $N / $$ against captures)
//!     → Return: Record or NotFound
//!
//! Rule compilation (at startup):
//!     rule file or built-in default
//!     → config::rules (parse, compile patterns)
//!     → Freeze as immutable Resolver
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - First match wins, in file order; no "best match" search
//! - Resolution is pure: no I/O, no caching
//! - Exactly two outcomes per request: Record or NotFound

pub mod record;
pub mod resolver;
pub mod rule;
pub mod template;

pub use record::{Record, Vcs};
pub use resolver::{ResolveError, Resolver};
pub use rule::Rule;
