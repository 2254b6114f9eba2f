use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
    middleware::Next,
};

const STATIC_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico", ".css", ".js", ".woff", ".woff2",
];

fn is_static_file(path: &str) -> bool {
    path.starts_with("/static/") || STATIC_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Middleware to set cache control headers
/// - Static files: cached for a day
/// - Pages and form fragments: never cached, they carry per-visitor form state
pub async fn cache_control_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let is_static = is_static_file(req.uri().path());
    let mut response = next.run(req).await;

    let cacheable = is_static && response.status().is_success();
    let headers = response.headers_mut();

    if cacheable {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=86400"),
        );
    } else {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    }

    response
}
