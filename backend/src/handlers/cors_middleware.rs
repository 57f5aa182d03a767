use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Origins that get their own value reflected back.
pub const ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173", // Development
    "http://localhost:4173", // Vite preview
    "https://apphousedesign.com",
    "https://www.apphousedesign.com",
];

/// Everyone else falls back to the canonical production origin.
pub const CANONICAL_ORIGIN: &str = "https://apphousedesign.com";

pub fn resolve_allow_origin(origin: &str) -> &str {
    if ALLOWED_ORIGINS.contains(&origin) {
        origin
    } else {
        CANONICAL_ORIGIN
    }
}

/// Sets the CORS headers on every response and answers preflight requests
/// with 200 before any body parsing happens.
pub async fn apply_cors(request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let allow_origin = resolve_allow_origin(&origin).to_string();

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&allow_origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Accept"),
    );
    // the allow-origin value depends on the request origin; keep caches honest
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    response
}
