/// CORS middleware
///
/// Browser clients call the API cross-origin, so every response carries
/// permissive CORS headers and preflight requests never reach the router.
///
/// # Behaviour
///
/// - `OPTIONS` on any path: `204 No Content` with an empty body, answered by
///   the layer itself
/// - every other response: the headers below are inserted, replacing any the
///   handler set
///
/// # Headers Applied
///
/// - `Access-Control-Allow-Origin: *`
/// - `Access-Control-Allow-Headers: Content-Type, Authorization`
/// - `Access-Control-Allow-Methods: GET,POST,PUT,DELETE,OPTIONS`
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use spendtrack_api::middleware::cors::CorsHeadersLayer;
///
/// let app: Router = Router::new().layer(CorsHeadersLayer::new());
/// ```

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::Response,
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";
pub const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

/// Inserts the CORS headers into `headers`
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
}

/// CORS middleware layer
#[derive(Clone, Default)]
pub struct CorsHeadersLayer;

impl CorsHeadersLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for CorsHeadersLayer {
    type Service = CorsHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsHeadersMiddleware { inner }
    }
}

/// CORS middleware service
#[derive(Clone)]
pub struct CorsHeadersMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorsHeadersMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        if request.method() == Method::OPTIONS {
            return Box::pin(async move {
                let mut response = Response::new(Body::empty());
                *response.status_mut() = StatusCode::NO_CONTENT;
                apply_cors_headers(response.headers_mut());
                Ok(response)
            });
        }

        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;
            apply_cors_headers(response.headers_mut());
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{response::IntoResponse, routing::get, Router};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tower::Service as _;

    #[tokio::test]
    async fn test_cors_headers_applied() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::OK, "test")
        }

        let mut app = Router::new()
            .route("/test", get(handler))
            .layer(CorsHeadersLayer::new());

        let response = app
            .call(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
        assert_eq!(
            headers.get("Access-Control-Allow-Headers").unwrap(),
            "Content-Type, Authorization"
        );
        assert_eq!(
            headers.get("Access-Control-Allow-Methods").unwrap(),
            "GET,POST,PUT,DELETE,OPTIONS"
        );
    }

    #[tokio::test]
    async fn test_preflight_skips_router() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut app = Router::new()
            .route(
                "/user",
                get(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { "called" }
                }),
            )
            .layer(CorsHeadersLayer::new());

        let response = app
            .call(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers().get("Access-Control-Allow-Origin").unwrap(), "*");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_headers_on_unrouted_path() {
        let mut app: Router = Router::new().layer(CorsHeadersLayer::new());

        let response = app
            .call(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("Access-Control-Allow-Methods").is_some());
    }
}
