//! Logging middleware
//!
//! Records HTTP request and response information under a per-request span

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Response header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Requests slower than this are reported
const SLOW_REQUEST: Duration = Duration::from_secs(5);

/// Request logging middleware
///
/// Handlers run inside the request span, so `Span::current()` in a handler
/// is the span every component of that request logs under.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();

    // Create request span
    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    info!(
        parent: &span,
        "Request started: {} {} - User-Agent: {} - Client: {}",
        method,
        uri.path(),
        request
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown"),
        get_client_ip(request.headers()).unwrap_or_else(|| "unknown".to_string())
    );

    // Execute request
    let mut response = next.run(request).instrument(span.clone()).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    // Calculate processing time
    let duration = start_time.elapsed();
    let status = response.status();
    let millis = duration.as_secs_f64() * 1000.0;

    if status.is_client_error() {
        warn!(parent: &span, "Client error: {} - Duration: {:.2}ms", status, millis);
    } else if status.is_server_error() {
        warn!(parent: &span, "Server error: {} - Duration: {:.2}ms", status, millis);
    } else {
        info!(parent: &span, "Request completed: {} - Duration: {:.2}ms", status, millis);
    }

    // Log slow requests
    if duration > SLOW_REQUEST {
        warn!(
            parent: &span,
            "Slow request detected: {} {} - Duration: {:.2}s",
            method,
            uri.path(),
            duration.as_secs_f64()
        );
    }

    response
}

/// Get client IP address
fn get_client_ip(headers: &HeaderMap) -> Option<String> {
    // Check different IP headers by priority
    let ip_headers = ["x-forwarded-for", "x-real-ip", "x-client-ip", "cf-connecting-ip"];

    for header_name in &ip_headers {
        if let Some(ip_str) = headers.get(*header_name).and_then(|v| v.to_str().ok()) {
            // X-Forwarded-For may contain multiple IPs, take the first one
            if let Some(first_ip) = ip_str.split(',').next() {
                let ip = first_ip.trim();
                if !ip.is_empty() && ip != "unknown" {
                    return Some(ip.to_string());
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_client_ip() {
        let mut headers = HeaderMap::new();

        // Test X-Forwarded-For
        headers.insert("x-forwarded-for", "192.168.1.1, 10.0.0.1".parse().unwrap());
        assert_eq!(get_client_ip(&headers), Some("192.168.1.1".to_string()));

        // Test X-Real-IP
        headers.clear();
        headers.insert("x-real-ip", "192.168.1.2".parse().unwrap());
        assert_eq!(get_client_ip(&headers), Some("192.168.1.2".to_string()));

        // Test no IP headers
        headers.clear();
        assert_eq!(get_client_ip(&headers), None);
    }
}
