//! Transaction intake handlers.

use crate::error::{codes, RpcResult};
use crate::handlers::{parse_body, to_value};
use crate::ports::{Ledger, SyncManager};
use crate::response::{coded_failure, failure, STATUS_FAILED, STATUS_OK};
use axum::http::StatusCode;
use kestrel_types::{amounts, fast_hash};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Debug, Deserialize)]
struct SendTransactionRequest {
    tx_as_hex: String,
}

#[derive(Debug, Deserialize)]
struct RandomOutputsRequest {
    amounts: Vec<u64>,
    outs_count: u64,
}

#[derive(Debug, Serialize)]
struct SendTransactionResponse {
    #[serde(rename = "transactionHash")]
    transaction_hash: String,
    status: &'static str,
    error: String,
}

#[derive(Debug, Serialize)]
struct OutputEntry {
    global_amount_index: u32,
    out_key: String,
}

#[derive(Debug, Serialize)]
struct AmountOutputs {
    amount: u64,
    outs: Vec<OutputEntry>,
}

#[derive(Debug, Serialize)]
struct RandomOutputsResponse {
    outs: Vec<AmountOutputs>,
    status: &'static str,
}

/// Transaction submission and decoy sampling handler.
///
/// Both methods answer wallets that treat the HTTP status as a gateway
/// health signal, so domain rejections ride in the body at 200 rather
/// than on the HTTP error channel.
pub struct TransactionRpc {
    ledger: Arc<dyn Ledger>,
    sync: Arc<dyn SyncManager>,
}

impl TransactionRpc {
    pub fn new(ledger: Arc<dyn Ledger>, sync: Arc<dyn SyncManager>) -> Self {
        Self { ledger, sync }
    }

    /// `/sendrawtransaction` - Admit a raw transaction to the pool and relay it
    #[instrument(skip(self, body))]
    pub async fn send_raw(&self, body: &Value) -> RpcResult<(StatusCode, Value)> {
        let request: SendTransactionRequest = parse_body(body)?;

        let Ok(transaction) = hex::decode(&request.tx_as_hex) else {
            return Ok((
                StatusCode::OK,
                failure("Failed to parse transaction from hex buffer"),
            ));
        };

        let hash = hex::encode(fast_hash(&transaction));

        debug!("Attempting to add transaction {hash} from /sendrawtransaction to pool");

        if let Err(reason) = self.ledger.admit_transaction(transaction.clone()).await {
            info!("Failed to add transaction {hash} from /sendrawtransaction to pool: {reason}");

            let response = SendTransactionResponse {
                transaction_hash: hash,
                status: STATUS_FAILED,
                error: reason,
            };

            return Ok((StatusCode::OK, to_value(response)?));
        }

        // Relay strictly after admission; a rejected transaction must
        // never reach peers through this path.
        self.sync.relay_transactions(vec![transaction]).await;

        let response = SendTransactionResponse {
            transaction_hash: hash,
            status: STATUS_OK,
            error: String::new(),
        };

        Ok((StatusCode::OK, to_value(response)?))
    }

    /// `/getrandom_outs` - Sample ring signature decoys for each amount
    #[instrument(skip(self, body))]
    pub async fn random_outputs(&self, body: &Value) -> RpcResult<(StatusCode, Value)> {
        let request: RandomOutputsRequest = parse_body(body)?;

        let mut outs = Vec::with_capacity(request.amounts.len());

        for amount in request.amounts {
            let (indexes, keys) = self.ledger.sample_outputs(amount, request.outs_count).await;

            // Ring signatures need exactly the requested mixin; a short
            // sample for any amount fails the whole batch.
            if indexes.len() as u64 != request.outs_count {
                let message =
                    shortfall_message(amount, request.outs_count, indexes.len() as u64);

                return Ok((
                    StatusCode::OK,
                    coded_failure(codes::CANT_GET_DECOY_OUTPUTS, message),
                ));
            }

            let entries = indexes
                .into_iter()
                .zip(keys)
                .map(|(global_amount_index, key)| OutputEntry {
                    global_amount_index,
                    out_key: hex::encode(key),
                })
                .collect();

            outs.push(AmountOutputs {
                amount,
                outs: entries,
            });
        }

        let response = RandomOutputsResponse {
            outs,
            status: STATUS_OK,
        };

        Ok((StatusCode::OK, to_value(response)?))
    }
}

fn shortfall_message(amount: u64, requested: u64, found: u64) -> String {
    format!(
        "Failed to get enough matching outputs for amount {amount} ({}). \
         Requested outputs: {requested}, found outputs: {found}.\n\
         Note: If you are a public node operator, you can safely ignore this message. \
         It is only relevant to the user sending the transaction.",
        amounts::format_amount(amount),
    )
}
