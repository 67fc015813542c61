//! HTTP listener lifecycle and the request entry point.

use crate::config::RpcConfig;
use crate::error::ServerError;
use crate::handlers::Handlers;
use crate::middleware;
use crate::ports::{Ledger, PeerNet, SyncManager};
use crate::routes::{HandlerKind, RouteTable};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Methods the preflight route advertises.
const ALLOWED_METHODS: &str = "OPTIONS, GET, POST";

/// Headers the preflight route advertises alongside the CORS origin.
const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

/// State shared by every request task.
#[derive(Clone)]
struct GatewayState {
    config: Arc<RpcConfig>,
    routes: Arc<RouteTable>,
    handlers: Arc<Handlers>,
}

/// The daemon RPC server.
///
/// Owns the listener task: [`RpcServer::start`] spawns exactly one,
/// [`RpcServer::stop`] signals it and waits for it to wind down. The
/// collaborators are shared with the rest of the node and only borrowed
/// here.
pub struct RpcServer {
    state: GatewayState,
    local_addr: Option<SocketAddr>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    serve_handle: Option<JoinHandle<()>>,
}

impl RpcServer {
    /// Create a server over the given collaborators.
    ///
    /// # Errors
    /// Fails when the configuration is invalid; a daemon with a bad fee
    /// address or CORS origin must not come up at all.
    pub fn new(
        config: RpcConfig,
        ledger: Arc<dyn Ledger>,
        peer_net: Arc<dyn PeerNet>,
        sync: Arc<dyn SyncManager>,
    ) -> Result<Self, ServerError> {
        config.validate()?;

        let handlers = Arc::new(Handlers::new(&config, ledger, peer_net, sync));

        Ok(Self {
            state: GatewayState {
                config: Arc::new(config),
                routes: Arc::new(RouteTable::standard()),
                handlers,
            },
            local_addr: None,
            shutdown_tx: None,
            serve_handle: None,
        })
    }

    /// Address the listener is bound to while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Bind the listener and serve in a background task.
    ///
    /// # Errors
    /// Fails when the server is already running or the socket cannot be
    /// bound.
    pub async fn start(&mut self) -> Result<(), ServerError> {
        if self.serve_handle.is_some() {
            return Err(ServerError::AlreadyRunning);
        }

        let listener = TcpListener::bind(self.state.config.bind_addr())
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let router = self.router();

        info!(addr = %local_addr, "Starting RPC server");

        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, router).with_graceful_shutdown(async {
                // Resolves on stop() and when the server itself is dropped
                let _ = shutdown_rx.await;
            });

            if let Err(e) = serve.await {
                error!(error = %e, "RPC server error");
            }
        });

        self.local_addr = Some(local_addr);
        self.shutdown_tx = Some(shutdown_tx);
        self.serve_handle = Some(handle);

        Ok(())
    }

    /// Signal the listener task and wait for it to finish.
    ///
    /// A server that was never started stops trivially. The server can be
    /// started again afterwards.
    ///
    /// # Errors
    /// Fails when the listener task cannot be joined.
    pub async fn stop(&mut self) -> Result<(), ServerError> {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }

        if let Some(handle) = self.serve_handle.take() {
            handle
                .await
                .map_err(|e| ServerError::Shutdown(e.to_string()))?;

            info!("RPC server stopped");
        }

        self.local_addr = None;

        Ok(())
    }

    // The whole surface hangs off one catch-all; the route table decides,
    // not axum's router.
    fn router(&self) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(self.state.clone())
    }
}

/// Entry point for every accepted request.
async fn dispatch(State(state): State<GatewayState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();

    let Some(entry) = state.routes.lookup(&parts.method, &path) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if entry.handler == HandlerKind::Preflight {
        return preflight(&state.config, &parts.method, &path, &parts.headers);
    }

    middleware::dispatch(
        &state.config,
        &state.handlers,
        entry,
        &parts.method,
        &path,
        body,
    )
    .await
}

/// Answer an OPTIONS request.
///
/// Bypasses the pipeline: no body, no permission gate, always an empty
/// 200. Browsers doing a CORS preflight send
/// `Access-Control-Request-Method` and get the method list back in
/// `Access-Control-Allow-Methods`; plain OPTIONS callers get `Allow`.
/// With CORS off the advertised list is empty either way.
fn preflight(config: &RpcConfig, method: &Method, path: &str, headers: &HeaderMap) -> Response {
    debug!("Incoming {} request: {}", method, path);

    let supported = if config.cors_header().is_some() {
        ALLOWED_METHODS
    } else {
        ""
    };

    let mut response = StatusCode::OK.into_response();
    let response_headers = response.headers_mut();

    let advertise_in = if headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD) {
        header::ACCESS_CONTROL_ALLOW_METHODS
    } else {
        header::ALLOW
    };
    response_headers.insert(advertise_in, HeaderValue::from_static(supported));

    if let Some(origin) = config.cors_header() {
        response_headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        response_headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }

    response
}
