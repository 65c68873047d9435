//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, effective host, subject)
//!     → [resolver picks first matching rule]
//!     → response.rs (HTML document or plain-text error)
//!     → middleware/access_log.rs (one line per request)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{HostSource, X_REQUEST_ID};
pub use response::RenderError;
pub use server::HttpServer;
