//! Access logging.
//! One line per handled request: status, remote address, method, path.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::request::request_id;
use crate::observability::metrics;

pub async fn access_log_middleware(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request_id(request.headers()).to_string();
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(request).await;
    let status = response.status();

    tracing::info!(
        status = status.as_u16(),
        remote_addr = %remote_addr,
        method = %method,
        path = %path,
        request_id = %request_id,
        "{} [{}] {} {}",
        status.as_u16(),
        remote_addr,
        method,
        path
    );
    metrics::record_request(status.as_u16(), start_time);

    response
}
