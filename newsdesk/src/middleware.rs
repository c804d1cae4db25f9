//! Request tracking and response hardening middleware
//!
//! Every request gets an `x-request-id` (kept when the client sends one),
//! the id is echoed on the response, and credential-bearing headers are
//! masked before the trace layer records them. Responses carry the usual
//! browser security headers unless a handler already set them.

use axum::Router;
use http::{header, HeaderName, HeaderValue};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
    set_header::SetResponseHeaderLayer,
};

use crate::config::MiddlewareConfig;

/// Sensitive headers that should be masked in logs
pub const SENSITIVE_HEADERS: [HeaderName; 4] = [
    header::AUTHORIZATION,
    header::COOKIE,
    header::SET_COOKIE,
    HeaderName::from_static("x-api-key"),
];

/// Assign a UUID v4 request id to requests that arrive without one
pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Copy the request id onto the response
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new(SENSITIVE_HEADERS)
}

/// Add X-Content-Type-Options, X-Frame-Options and X-XSS-Protection
///
/// Disabled entirely by `security_headers = false`. An empty or invalid
/// `x_frame_options` skips just that header.
pub fn apply_security_headers(mut app: Router, config: &MiddlewareConfig) -> Router {
    if !config.security_headers {
        return app;
    }

    app = app.layer(SetResponseHeaderLayer::if_not_present(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    ));

    if !config.x_frame_options.is_empty() {
        match HeaderValue::from_str(&config.x_frame_options) {
            Ok(value) => {
                app = app.layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    value,
                ));
            }
            Err(_) => tracing::warn!(
                "Invalid X-Frame-Options value {:?}, header not sent",
                config.x_frame_options
            ),
        }
    }

    app.layer(SetResponseHeaderLayer::if_not_present(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    ))
}
