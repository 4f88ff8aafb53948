use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Wrap each request in an `http_request` span and log its outcome.
///
/// The trace id comes from the caller's `x-trace-id` header when it holds a
/// UUID, otherwise a fresh one is generated. It is echoed back on the
/// response. Bodies are not logged: submissions are anonymous user text.
pub async fn trace_middleware(
    State(_state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();
        if let Some(value) = &header_value {
            req.headers_mut().insert(X_TRACE_ID, value.clone());
        }

        let mut response = next.run(req).await;

        if let Some(value) = header_value {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        let status = response.status();
        let latency_ms = start_time.elapsed().as_millis();
        if status.is_server_error() {
            warn!(status = status.as_u16(), latency_ms, "← response finished");
        } else {
            info!(status = status.as_u16(), latency_ms, "← response finished");
        }

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::routes;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn caller_trace_id_is_echoed() {
        let state = AppState::for_tests().await;
        let id = Uuid::new_v4().to_string();
        let request = Request::builder()
            .uri("/health")
            .header(X_TRACE_ID, id.as_str())
            .body(Body::empty())
            .unwrap();
        let response = routes::build(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[X_TRACE_ID], id.as_str());
    }

    #[tokio::test]
    async fn invalid_trace_id_is_replaced() {
        let state = AppState::for_tests().await;
        let request = Request::builder()
            .uri("/health")
            .header(X_TRACE_ID, "not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let response = routes::build(state).oneshot(request).await.unwrap();
        let echoed = response.headers()[X_TRACE_ID].to_str().unwrap();
        assert!(Uuid::parse_str(echoed).is_ok());
    }
}
