//! Response rendering.
//!
//! # Responsibilities
//! - Render the go-import HTML document for a resolved Record
//! - Build plain-text error responses
//!
//! # Design Decisions
//! - The whole body is rendered before any status is chosen, so a render
//!   failure still becomes a clean 500
//! - Values are HTML-escaped; escaping never introduces spaces, so the
//!   go-import content keeps its three tokens

use std::borrow::Cow;
use std::fmt::Write;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::resolve::Record;

pub const TEXT_HTML: &str = "text/html; charset=utf-8";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Failure to produce the HTML document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Render the go-import document for `record`.
pub fn render_document(record: &Record) -> Result<String, RenderError> {
    let root = escape_html(&record.root);
    let vcs = escape_html(record.vcs.as_str());
    let repo_url = escape_html(&record.repo_url);

    let mut out = String::with_capacity(192 + 2 * (root.len() + repo_url.len()));
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(
        out,
        r#"  <meta name="go-import" content="{root} {vcs} {repo_url}">"#
    )?;
    writeln!(out, "  <title>Go Repository Resolver</title>")?;
    writeln!(out, r#"  See <a href="{repo_url}">{root}</a>."#)?;
    writeln!(out, "</html>")?;
    Ok(out)
}

/// Escape text for use in HTML content and quoted attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// 200 with a rendered HTML document.
pub fn html(body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_HTML)], body).into_response()
}

/// A plain-text error response naming the failure.
pub fn plain_error(status: StatusCode, error: &dyn std::error::Error) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, TEXT_PLAIN)],
        format!("{}\n", error),
    )
        .into_response()
}
