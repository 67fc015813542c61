//! Route handlers for the daemon HTTP API.

pub mod node;
pub mod transactions;

pub use node::NodeRpc;
pub use transactions::TransactionRpc;

use crate::config::RpcConfig;
use crate::error::{RpcError, RpcResult};
use crate::ports::{Ledger, PeerNet, SyncManager};
use crate::routes::HandlerKind;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// All route handlers
pub struct Handlers {
    pub node: NodeRpc,
    pub transactions: TransactionRpc,
}

impl Handlers {
    /// Create all handlers from config and the shared collaborators
    pub fn new(
        config: &RpcConfig,
        ledger: Arc<dyn Ledger>,
        peers: Arc<dyn PeerNet>,
        sync: Arc<dyn SyncManager>,
    ) -> Self {
        Self {
            node: NodeRpc::new(
                config,
                Arc::clone(&ledger),
                Arc::clone(&peers),
                Arc::clone(&sync),
            ),
            transactions: TransactionRpc::new(ledger, sync),
        }
    }

    /// Run the handler tagged by `kind`.
    ///
    /// Success carries the body together with the status code the handler
    /// proposes for the wire. Errors carry a classified [`RpcError`]; the
    /// caller owns turning those into wire envelopes.
    pub async fn dispatch(
        &self,
        kind: HandlerKind,
        body: &Value,
    ) -> RpcResult<(StatusCode, Value)> {
        match kind {
            HandlerKind::Info => self.node.info().await,
            HandlerKind::Fee => self.node.fee().await,
            HandlerKind::Height => self.node.height().await,
            HandlerKind::Peers => self.node.peers().await,
            HandlerKind::SendTransaction => self.transactions.send_raw(body).await,
            HandlerKind::RandomOutputs => self.transactions.random_outputs(body).await,
            // Preflight is answered by the server before dispatch
            HandlerKind::Preflight => Err(RpcError::internal(
                "preflight requests do not dispatch through the pipeline",
            )),
        }
    }
}

/// Deserialize a parsed request body into the handler's request type.
///
/// A missing or mistyped field is the caller's fault, so the serde error
/// text is surfaced verbatim as a bad-argument failure.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Value) -> RpcResult<T> {
    serde_json::from_value(body.clone()).map_err(|e| RpcError::bad_argument(e.to_string()))
}

/// Serialize a typed response body for the wire.
pub(crate) fn to_value<T: serde::Serialize>(body: T) -> RpcResult<Value> {
    serde_json::to_value(body).map_err(|e| RpcError::internal(e.to_string()))
}
