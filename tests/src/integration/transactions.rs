//! # Transaction Route Tests
//!
//! End-to-end coverage of `/sendrawtransaction` and `/getrandom_outs`,
//! including the in-band failure convention both share: domain rejections
//! ride at HTTP 200 and wallets read the body-level status.

#[cfg(test)]
mod tests {
    use crate::harness::{
        test_config, test_key, MockLedger, MockPeerNet, MockSyncManager, TestGateway,
    };
    use kestrel_types::fast_hash;
    use reqwest::StatusCode;
    use serde_json::{json, Value};

    // =========================================================================
    // /sendrawtransaction
    // =========================================================================

    #[tokio::test]
    async fn test_send_raw_transaction_end_to_end() {
        let gateway = TestGateway::start(test_config()).await;
        let bytes = vec![0xde, 0xad, 0xbe, 0xef];

        let response = gateway
            .post_json("/sendrawtransaction", &json!({ "tx_as_hex": "deadbeef" }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("JSON body");
        assert_eq!(body["status"], "OK");
        assert_eq!(body["error"], "");
        assert_eq!(body["transactionHash"], hex::encode(fast_hash(&bytes)));

        // Admitted exactly once, relayed exactly once, in that order
        assert_eq!(*gateway.ledger.admitted.lock(), vec![bytes.clone()]);
        assert_eq!(*gateway.sync.relayed.lock(), vec![vec![bytes]]);

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_send_raw_transaction_bad_hex_is_http_200() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway
            .post_json("/sendrawtransaction", &json!({ "tx_as_hex": "zz" }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("JSON body");
        assert_eq!(body["status"], "Failed");
        assert_eq!(body["error"], "Failed to parse transaction from hex buffer");
        assert!(body.get("transactionHash").is_none());

        assert!(gateway.ledger.admitted.lock().is_empty());
        assert!(gateway.sync.relayed.lock().is_empty());

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_send_raw_transaction_pool_rejection_never_relays() {
        let gateway = TestGateway::start_with(
            test_config(),
            MockLedger {
                admission_error: Some("Transaction already in pool".to_string()),
                ..MockLedger::default()
            },
            MockPeerNet::default(),
            MockSyncManager::default(),
        )
        .await;

        let response = gateway
            .post_json("/sendrawtransaction", &json!({ "tx_as_hex": "00ff00ff" }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("JSON body");
        assert_eq!(body["status"], "Failed");
        assert_eq!(body["error"], "Transaction already in pool");
        assert_eq!(
            body["transactionHash"],
            hex::encode(fast_hash(&[0x00, 0xff, 0x00, 0xff]))
        );

        assert!(gateway.sync.relayed.lock().is_empty());

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_send_raw_transaction_missing_field_is_400() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway.post_json("/sendrawtransaction", &json!({})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.expect("JSON body");
        assert_eq!(body["status"], "Failed");
        let message = body["error"].as_str().expect("error message");
        assert!(message.contains("tx_as_hex"), "got: {message}");

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_send_raw_transaction_ignores_content_type() {
        let gateway = TestGateway::start(test_config()).await;

        // No Content-Type header at all; only the bytes matter.
        let response = gateway
            .post_raw("/sendrawtransaction", r#"{"tx_as_hex":"00"}"#)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("JSON body");
        assert_eq!(body["status"], "OK");

        gateway.stop().await;
    }

    // =========================================================================
    // /getrandom_outs
    // =========================================================================

    #[tokio::test]
    async fn test_random_outputs_end_to_end() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway
            .post_json(
                "/getrandom_outs",
                &json!({ "amounts": [5000, 10000], "outs_count": 4 }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("JSON body");
        assert_eq!(body["status"], "OK");

        let outs = body["outs"].as_array().expect("outs array");
        assert_eq!(outs.len(), 2);
        assert_eq!(outs[0]["amount"], 5000);
        assert_eq!(outs[1]["amount"], 10000);

        for entry in outs {
            assert_eq!(entry["outs"].as_array().expect("entry outs").len(), 4);
        }

        assert_eq!(outs[1]["outs"][2]["global_amount_index"], 2);
        assert_eq!(outs[1]["outs"][2]["out_key"], hex::encode(test_key(10000, 2)));

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_random_outputs_shortfall_is_http_200_with_coded_failure() {
        let gateway = TestGateway::start_with(
            test_config(),
            MockLedger {
                available_outputs: 3,
                ..MockLedger::default()
            },
            MockPeerNet::default(),
            MockSyncManager::default(),
        )
        .await;

        let response = gateway
            .post_json(
                "/getrandom_outs",
                &json!({ "amounts": [2000000, 100], "outs_count": 7 }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("JSON body");
        assert_eq!(body["status"], "Failed");
        assert_eq!(body["errorCode"], 20);
        // All-or-nothing: the first shortfall drops the whole batch
        assert!(body.get("outs").is_none());

        let message = body["error"].as_str().expect("error message");
        assert!(
            message.contains("amount 2000000 (2.000000 KSL)"),
            "got: {message}"
        );
        assert!(message.contains("Requested outputs: 7"), "got: {message}");
        assert!(message.contains("found outputs: 3"), "got: {message}");

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_random_outputs_missing_field_is_400() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway
            .post_json("/getrandom_outs", &json!({ "amounts": [100] }))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.expect("JSON body");
        let message = body["error"].as_str().expect("error message");
        assert!(message.contains("outs_count"), "got: {message}");

        gateway.stop().await;
    }
}
