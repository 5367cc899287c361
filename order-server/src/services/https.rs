use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{Router, middleware};
use http::{HeaderValue, Method, header};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::authenticate;
use crate::core::{Config, ServerState};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Grace period for in-flight requests on shutdown
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// HTTP access log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        "{} {} {} {}ms",
        method,
        uri.path(),
        response.status().as_u16(),
        started.elapsed().as_millis()
    );

    response
}

/// Resource routers, without state or global layers
pub fn routes() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::categories::router())
        .merge(crate::api::products::router())
        .merge(crate::api::orders::router())
        .merge(crate::api::print::router())
        .merge(crate::api::reports::router())
        .merge(crate::api::staff::router())
}

/// CORS for the single web client origin, cookies included
fn cors_layer(config: &Config) -> AppResult<CorsLayer> {
    let origin = HeaderValue::from_str(&config.cors_origin).map_err(|_| {
        AppError::with_message(
            ErrorCode::ConfigError,
            format!("Invalid CORS_ORIGIN: {}", config.cors_origin),
        )
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]))
}

/// Full application: routes, session decoding, CORS, compression, access log
pub fn build_app(state: ServerState) -> AppResult<Router> {
    let cors = cors_layer(&state.config)?;

    Ok(routes()
        // Session decoding runs on every route; role checks live on the routers
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request)))
}

/// HTTP listener
#[derive(Clone, Debug)]
pub struct HttpService {
    config: Config,
}

impl HttpService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Serve until `shutdown_signal` resolves, then drain connections
    pub async fn start_server<F>(&self, app: Router, shutdown_signal: F) -> AppResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("HTTP server listening on {}", addr);

        let handle = axum_server::Handle::new();

        let handle_clone = handle.clone();
        tokio::spawn(async move {
            shutdown_signal.await;
            handle_clone.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn app() -> Router {
        let state = ServerState::for_tests(Config::for_tests()).await.unwrap();
        build_app(state).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = app()
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_allows_credentials_for_configured_origin() {
        let config = Config::for_tests();
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/pedidos")
                    .header(header::ORIGIN, &config.cors_origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            config.cors_origin.as_str()
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_invalid_cors_origin_is_rejected() {
        let mut config = Config::for_tests();
        config.cors_origin = "http://bad\norigin".into();
        let state = ServerState::for_tests(config).await.unwrap();
        assert!(build_app(state).is_err());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app()
            .await
            .oneshot(Request::get("/nada").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
