use crate::config::Config;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Browser access policy for the two API routes.
///
/// Without `ONEMORE_CORS_ORIGINS` any origin is allowed, which suits local
/// development; set the variable in production.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    async fn preflight_origin(config: &Config, origin: &str) -> Option<HeaderValue> {
        let app = Router::new()
            .route("/api/one-more", get(|| async { "ok" }))
            .layer(cors_layer(config));
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/one-more")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn wildcard_without_configured_origins() {
        let allowed = preflight_origin(&Config::default(), "https://anywhere.example").await;
        assert_eq!(allowed.unwrap(), "*");
    }

    #[tokio::test]
    async fn configured_origins_are_enforced() {
        let config = Config {
            cors_allowed_origins: Some("https://onemore.example, ".to_owned()),
            ..Config::default()
        };
        let allowed = preflight_origin(&config, "https://onemore.example").await;
        assert_eq!(allowed.unwrap(), "https://onemore.example");
        assert!(preflight_origin(&config, "https://evil.example").await.is_none());
    }
}
