//! Request inspection.
//!
//! # Responsibilities
//! - Pick the effective request host (standard host or a configured header)
//! - Build the resolution subject `host + path`
//! - Mint request IDs for correlation
//!
//! # Design Decisions
//! - Host source is chosen once at startup, never per request
//! - A missing configured header yields an empty host, which simply fails
//!   to match the usual rules
//! - Query strings never reach the resolver
//! - The path is percent-decoded first; a path that does not decode to
//!   UTF-8 has no subject at all

use axum::http::header::{InvalidHeaderName, HOST};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Uri};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Where the effective request host is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HostSource {
    /// The request's own host: the URI authority, else the `Host` header.
    #[default]
    Standard,
    /// A named header such as `x-forwarded-host`.
    Header(HeaderName),
}

impl HostSource {
    /// Select a host source from a configured header name.
    ///
    /// `host` (in any case) and the empty string select [`HostSource::Standard`].
    pub fn from_name(name: &str) -> Result<Self, InvalidHeaderName> {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() || name == HOST.as_str() {
            return Ok(Self::Standard);
        }
        HeaderName::from_bytes(name.as_bytes()).map(Self::Header)
    }

    /// The effective host of a request.
    pub fn host<'a>(&self, uri: &'a Uri, headers: &'a HeaderMap) -> &'a str {
        match self {
            HostSource::Standard => uri
                .authority()
                .map(|authority| authority.as_str())
                .or_else(|| header_str(headers, &HOST))
                .unwrap_or_default(),
            HostSource::Header(name) => header_str(headers, name).unwrap_or_default(),
        }
    }

    /// The resolution subject: effective host followed by the decoded
    /// request path. `None` when the path is not UTF-8 once decoded.
    pub fn subject(&self, uri: &Uri, headers: &HeaderMap) -> Option<String> {
        let path = decoded_path(uri)?;
        Some(format!("{}{}", self.host(uri, headers), path))
    }
}

/// The request path with percent-escapes decoded (`/a%2Fb` becomes `/a/b`).
///
/// Malformed escapes such as `%zz` are kept as written.
pub fn decoded_path(uri: &Uri) -> Option<Cow<'_, str>> {
    percent_decode_str(uri.path()).decode_utf8().ok()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Request ID of a request, or `-` when it has none.
pub fn request_id(headers: &HeaderMap) -> &str {
    header_str(headers, &X_REQUEST_ID).unwrap_or("-")
}

/// Mints UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}
