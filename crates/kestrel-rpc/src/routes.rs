//! Static route table mapping (method, path) to handlers.
//!
//! Dispatch is data, not callbacks: each entry tags one of the known
//! handlers, and the server resolves the tag after lookup. The table is
//! built once at construction and never changes afterwards.

use crate::permissions::RpcMode;
use axum::http::Method;

/// Tags the handler a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Chain state aggregate (`/info`)
    Info,
    /// Node operator fee echo (`/fee`)
    Fee,
    /// Chain and network heights (`/height`)
    Height,
    /// White and gray peer lists (`/peers`)
    Peers,
    /// Raw transaction submission (`/sendrawtransaction`)
    SendTransaction,
    /// Decoy output sampling (`/getrandom_outs`)
    RandomOutputs,
    /// OPTIONS preflight, answered outside the pipeline
    Preflight,
}

/// Path matcher for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches one concrete path.
    Exact(&'static str),
    /// Matches any path. Reserved for the preflight route.
    Any,
}

/// One (method, path) binding.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// HTTP method the entry answers.
    pub method: Method,
    /// Path the entry matches.
    pub path: PathPattern,
    /// Handler the entry dispatches to.
    pub handler: HandlerKind,
    /// Tier the daemon must be running at for the route to be reachable.
    pub permission: RpcMode,
    /// Whether the pipeline must parse the request body as JSON.
    pub body_required: bool,
}

/// The dispatch table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    ///
    /// # Panics
    /// Panics when a concrete (method, path) pair is registered twice, or
    /// when a second wildcard entry is added. Both are construction-time
    /// programmer errors, not runtime conditions.
    pub fn register(
        &mut self,
        method: Method,
        path: PathPattern,
        handler: HandlerKind,
        permission: RpcMode,
        body_required: bool,
    ) -> &mut Self {
        match path {
            PathPattern::Exact(p) => {
                let duplicate = self
                    .entries
                    .iter()
                    .any(|e| e.method == method && e.path == PathPattern::Exact(p));
                assert!(!duplicate, "duplicate route registered: {method} {p}");
            }
            PathPattern::Any => {
                let duplicate = self.entries.iter().any(|e| e.path == PathPattern::Any);
                assert!(!duplicate, "only one wildcard route may be registered");
            }
        }

        self.entries.push(RouteEntry {
            method,
            path,
            handler,
            permission,
            body_required,
        });

        self
    }

    /// The production route set.
    pub fn standard() -> Self {
        let body_required = true;
        let body_not_required = false;

        let mut table = Self::new();

        table
            .register(
                Method::GET,
                PathPattern::Exact("/info"),
                HandlerKind::Info,
                RpcMode::Default,
                body_not_required,
            )
            .register(
                Method::GET,
                PathPattern::Exact("/fee"),
                HandlerKind::Fee,
                RpcMode::Default,
                body_not_required,
            )
            .register(
                Method::GET,
                PathPattern::Exact("/height"),
                HandlerKind::Height,
                RpcMode::Default,
                body_not_required,
            )
            .register(
                Method::GET,
                PathPattern::Exact("/peers"),
                HandlerKind::Peers,
                RpcMode::Default,
                body_not_required,
            )
            .register(
                Method::POST,
                PathPattern::Exact("/sendrawtransaction"),
                HandlerKind::SendTransaction,
                RpcMode::Default,
                body_required,
            )
            .register(
                Method::POST,
                PathPattern::Exact("/getrandom_outs"),
                HandlerKind::RandomOutputs,
                RpcMode::Default,
                body_required,
            )
            // Matches every path, answered outside the pipeline
            .register(
                Method::OPTIONS,
                PathPattern::Any,
                HandlerKind::Preflight,
                RpcMode::Default,
                body_not_required,
            );

        table
    }

    /// Resolve a request. Concrete matches win over the wildcard.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&RouteEntry> {
        self.entries
            .iter()
            .find(|e| e.method == *method && matches!(e.path, PathPattern::Exact(p) if p == path))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.method == *method && e.path == PathPattern::Any)
            })
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
