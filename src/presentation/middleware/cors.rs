//! CORS Middleware Configuration
//!
//! Cross-origin policy for the browser clients. The allow-list is fixed per
//! deployment; methods and headers mirror the request because the layer also
//! allows credentials, and the CORS spec forbids wildcards in that case.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

/// Origins allowed to call the API from a browser.
pub const ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://34.56.91.122:3000",
    "https://kairos-wine.vercel.app",
];

/// Create the CORS layer. Must wrap the session layer so that a disallowed
/// origin is answered before any session state is established.
pub fn create_cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "OK" }))
            .layer(create_cors_layer())
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn allowed_origin_is_echoed_with_credentials() {
        let response = app().oneshot(preflight("http://localhost:3000")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn disallowed_origin_gets_no_cors_grant() {
        let response = app().oneshot(preflight("https://evil.example")).await.unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
