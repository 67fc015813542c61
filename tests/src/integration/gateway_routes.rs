//! # Gateway Route Tests
//!
//! Drives the read-only routes, the preflight route, and the pipeline's
//! failure classes through a running server, asserting on wire-visible
//! behavior only: HTTP status, headers, and body JSON.

#[cfg(test)]
mod tests {
    use crate::harness::{test_config, MockLedger, MockPeerNet, MockSyncManager, TestGateway};
    use kestrel_rpc::RpcConfig;
    use reqwest::StatusCode;
    use serde_json::{json, Value};

    // =========================================================================
    // READ ROUTES
    // =========================================================================

    #[tokio::test]
    async fn test_info_reports_aggregated_state() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway.get("/info").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("JSON body");
        assert_eq!(body["status"], "OK");
        assert_eq!(body["height"], 100);
        assert_eq!(body["network_height"], 100);
        assert_eq!(body["synced"], true);
        assert_eq!(body["difficulty"], 3_000);
        // 30 second block target
        assert_eq!(body["hashrate"], 100);
        assert_eq!(body["tx_count"], 400);
        assert_eq!(body["outgoing_connections_count"], 3);
        assert_eq!(body["incoming_connections_count"], 5);
        assert_eq!(body["white_peerlist_size"], 2);
        assert_eq!(body["grey_peerlist_size"], 1);
        assert_eq!(body["version"], kestrel_rpc::VERSION);
        assert!(body["upgrade_heights"].is_array());

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_fee_route_echoes_config() {
        let fee_address = format!("KSL{}", "4".repeat(96));
        let config = RpcConfig {
            fee_address: fee_address.clone(),
            fee_amount: 10_000,
            ..test_config()
        };
        let gateway = TestGateway::start(config).await;

        let body: Value = gateway.get("/fee").await.json().await.expect("JSON body");

        assert_eq!(body["address"], fee_address);
        assert_eq!(body["amount"], 10_000);
        assert_eq!(body["status"], "OK");

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_height_route() {
        let gateway = TestGateway::start_with(
            test_config(),
            MockLedger {
                top_index: 41,
                ..MockLedger::default()
            },
            MockPeerNet::default(),
            MockSyncManager {
                network: 120,
                ..MockSyncManager::default()
            },
        )
        .await;

        let body: Value = gateway.get("/height").await.json().await.expect("JSON body");

        assert_eq!(body["height"], 42);
        assert_eq!(body["network_height"], 120);
        assert_eq!(body["status"], "OK");

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_peers_route_mirrors_peer_lists() {
        let gateway = TestGateway::start(test_config()).await;

        let body: Value = gateway.get("/peers").await.json().await.expect("JSON body");

        assert_eq!(
            body["peers"],
            json!(["198.51.100.1:12898", "198.51.100.2:12898"])
        );
        assert_eq!(body["peers_gray"], json!(["203.0.113.9:12898"]));

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_query_string_does_not_affect_lookup() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway.get("/height?caller=wallet").await;
        assert_eq!(response.status(), StatusCode::OK);

        gateway.stop().await;
    }

    // =========================================================================
    // PIPELINE FAILURES
    // =========================================================================

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway.get("/getblocks").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_wrong_method_is_404() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway.post_json("/info", &json!({})).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_non_json_body_is_400_with_fixed_envelope() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway
            .post_raw("/sendrawtransaction", "tx_as_hex=deadbeef")
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.expect("JSON body");
        assert_eq!(body["status"], "Failed");
        assert_eq!(body["error"], "Failed to parse request body as JSON");

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_empty_required_body_is_400() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway.post_raw("/getrandom_outs", "").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.expect("JSON body");
        assert_eq!(body["error"], "Failed to parse request body as JSON");

        gateway.stop().await;
    }

    // =========================================================================
    // CORS & PREFLIGHT
    // =========================================================================

    #[tokio::test]
    async fn test_cors_origin_present_only_when_configured() {
        let bare = TestGateway::start(test_config()).await;
        let response = bare.get("/info").await;
        assert!(response.headers().get("access-control-allow-origin").is_none());
        bare.stop().await;

        let config = RpcConfig {
            cors_origin: "*".to_string(),
            ..test_config()
        };
        let gateway = TestGateway::start(config).await;
        let response = gateway.get("/info").await;
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_preflight_advertises_methods_and_headers() {
        let config = RpcConfig {
            cors_origin: "https://wallet.example.com".to_string(),
            ..test_config()
        };
        let gateway = TestGateway::start(config).await;

        let response = gateway
            .client
            .request(
                reqwest::Method::OPTIONS,
                gateway.url("/sendrawtransaction"),
            )
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .expect("OPTIONS request");

        assert_eq!(response.status(), StatusCode::OK);

        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        assert_eq!(
            header("access-control-allow-methods").as_deref(),
            Some("OPTIONS, GET, POST")
        );
        assert_eq!(
            header("access-control-allow-origin").as_deref(),
            Some("https://wallet.example.com")
        );
        assert_eq!(
            header("access-control-allow-headers").as_deref(),
            Some("Origin, X-Requested-With, Content-Type, Accept")
        );

        assert_eq!(response.text().await.expect("body"), "");

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_plain_options_uses_allow_header() {
        let config = RpcConfig {
            cors_origin: "*".to_string(),
            ..test_config()
        };
        let gateway = TestGateway::start(config).await;

        let response = gateway
            .client
            .request(reqwest::Method::OPTIONS, gateway.url("/anywhere"))
            .send()
            .await
            .expect("OPTIONS request");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("allow").and_then(|v| v.to_str().ok()),
            Some("OPTIONS, GET, POST")
        );
        assert!(
            response
                .headers()
                .get("access-control-allow-methods")
                .is_none()
        );

        gateway.stop().await;
    }

    #[tokio::test]
    async fn test_preflight_with_cors_disabled_advertises_nothing() {
        let gateway = TestGateway::start(test_config()).await;

        let response = gateway
            .client
            .request(reqwest::Method::OPTIONS, gateway.url("/info"))
            .header("Access-Control-Request-Method", "GET")
            .send()
            .await
            .expect("OPTIONS request");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-methods")
                .and_then(|v| v.to_str().ok()),
            Some("")
        );
        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_none()
        );

        gateway.stop().await;
    }
}
