//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy and metadata handlers
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener
//! - Dispatch proxy requests to the handler
//! - Shut down gracefully on signal

use axum::{
    extract::State,
    http::{Method, Uri},
    response::Response,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GenericProxyConfig;
use crate::http::request::{make_span, url_param, UuidRequestId};
use crate::http::response::not_found;
use crate::lifecycle::ShutdownSignal;
use crate::metadata::{get_registration, NAMESPACE_PATH};
use crate::proxy::{GenericProxy, ProxyRequest};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: GenericProxy,
}

/// HTTP host for the generic proxy.
pub struct HttpServer {
    router: Router,
    config: GenericProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GenericProxyConfig) -> Result<Self, reqwest::Error> {
        let state = AppState {
            proxy: GenericProxy::new(&config.fetch)?,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route(NAMESPACE_PATH, get(get_registration))
            .route(&format!("{NAMESPACE_PATH}/"), any(proxy_handler))
            .route(&format!("{NAMESPACE_PATH}/{{*url}}"), any(proxy_handler))
            .fallback(not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(make_span))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Router with all layers applied, for embedding in another host.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            timeout_ms = self.config.fetch.timeout_ms,
            max_response_size = self.config.fetch.max_response_size,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GenericProxyConfig {
        &self.config
    }
}

/// Route adapter: hand the method and raw path parameter to the proxy.
async fn proxy_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let request = ProxyRequest::new(method, url_param(uri.path()));
    state.proxy.respond(&request).await
}
