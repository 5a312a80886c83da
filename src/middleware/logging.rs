use axum::{
    extract::{ConnectInfo, Request},
    http::header,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;

/// Request/response logging layer.
///
/// Wraps every handler via `axum::middleware::from_fn`: logs method, path,
/// client address and user agent on the way in, status and duration on the
/// way out. Purely observational, no control-flow impact.
pub async fn log_requests(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let client_addr = connect_info
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("N/A")
        .to_string();

    tracing::info!(
        method = %method,
        path = %path,
        client = %client_addr,
        user_agent = %user_agent,
        "request received"
    );

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "request completed"
    );

    response
}
