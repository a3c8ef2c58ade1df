//! Integration tests for the REST API
//!
//! Tests the full HTTP stack including:
//! - Wallet registration and payload validation
//! - CSV exports and their attachment headers
//! - Error bodies for bad queries and unknown wallets

use accountant::{
    Accountant, AccountantConfig, FixedClock,
    application::ports::{FundingPaymentWriter, OrderWriter, WalletReader},
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use trading_core::{Order, PositionFunding, TradeSide, TradeStatus, TradeType, TradingProviderId};

const WALLET: &str = "0x3e1f7c9a5b2d8e4f6a0c1b3d5e7f9a2c4b6d8e0f";

// ============================================================================
// Test Fixtures
// ============================================================================

fn create_test_accountant() -> Accountant<FixedClock> {
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap(),
    ));
    Accountant::with_clock(AccountantConfig::default(), clock)
}

async fn create_populated_accountant() -> Accountant<FixedClock> {
    let accountant = create_test_accountant();
    let wallet = accountant
        .register_wallet(WALLET, TradingProviderId::Hyperliquid)
        .await
        .unwrap()
        .wallet;

    accountant
        .orders
        .insert(
            wallet.id,
            &Order {
                order_id: "7001".to_string(),
                market: "ETH-USD".to_string(),
                trade_type: TradeType::Limit,
                side: TradeSide::Buy,
                status: TradeStatus::Cancelled,
                remaining_size: dec!(1.5),
                original_size: dec!(1.5),
                created_at: Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap(),
            },
        )
        .await;
    accountant
        .funding_payments
        .get_or_create(
            wallet.id,
            &PositionFunding {
                market: "ETH-USD".to_string(),
                payment: dec!(-0.42),
                funding_rate: dec!(0.0000125),
                position_size: dec!(2),
                hash: Some("0xfeed".to_string()),
                created_at: Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap(),
            },
        )
        .await;

    accountant
}

async fn get(router: Router, uri: &str) -> Response {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(router: Router, uri: &str, body: &str) -> Response {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let accountant = create_test_accountant();

    let response = get(accountant.rest_router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["server_time"], 1_710_936_000_000_i64);
}

// ============================================================================
// Wallet registration
// ============================================================================

#[tokio::test]
async fn test_register_wallet_echoes_payload() {
    let accountant = create_test_accountant();
    let payload = json!({"address": WALLET, "provider": "HYPERLIQUID"});

    let response = post_json(
        accountant.rest_router(),
        "/management/wallet-address",
        &payload.to_string(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json, json!({"data": {"attributes": payload}}));
    assert!(
        accountant
            .wallets
            .find(WALLET, TradingProviderId::Hyperliquid)
            .await
            .is_some()
    );
}

#[tokio::test]
async fn test_register_wallet_twice_keeps_one_wallet() {
    let accountant = create_test_accountant();
    let payload = json!({"address": WALLET, "provider": "DYDX"}).to_string();

    for _ in 0..2 {
        let response = post_json(accountant.rest_router(), "/management/wallet-address", &payload).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    assert_eq!(
        accountant
            .wallets
            .list_by_provider(TradingProviderId::Dydx)
            .await
            .len(),
        1
    );
}

#[tokio::test]
async fn test_register_wallet_rejects_invalid_payloads() {
    let accountant = create_test_accountant();

    for body in [
        r#"{"address": "0xabc", "provider": "BINANCE"}"#,
        r#"{"address": "0xabc"}"#,
        r#"{"address": "   ", "provider": "DYDX"}"#,
        r#"{"address": "0xabc", "provider": "#,
    ] {
        let response = post_json(accountant.rest_router(), "/management/wallet-address", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let json = body_json(response).await;
        assert_eq!(json, json!({"error": {"title": "Payload is not valid."}}));
    }
}

// ============================================================================
// Exports
// ============================================================================

#[tokio::test]
async fn test_trades_export_is_csv_attachment() {
    let accountant = create_populated_accountant().await;
    let uri = format!(
        "/accountant/trades/export?wallet_address={}&provider=HYPERLIQUID&from_date=2024-03-01&to_date=2024-03-31",
        WALLET
    );

    let response = get(accountant.rest_router(), &uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!(
            "attachment; filename=order_history_HYPERLIQUID_{}_2024-03-01_2024-03-31.csv",
            WALLET
        )
        .as_str()
    );

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("wallet_address,provider_name,market,order_id"));
    assert!(lines[1].contains(",7001,BUY,LIMIT,CANCELLED,0,1.5,0,0,"));
}

#[tokio::test]
async fn test_fundings_export_is_csv_attachment() {
    let accountant = create_populated_accountant().await;
    let uri = format!(
        "/accountant/fundings/export?wallet_address={}&provider=HYPERLIQUID&from_date=2024-03-01&to_date=2024-03-31",
        WALLET
    );

    let response = get(accountant.rest_router(), &uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!(
            "attachment; filename=position_funding_history_HYPERLIQUID_{}_2024-03-01_2024-03-31.csv",
            WALLET
        )
        .as_str()
    );

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("ETH-USD,-0.42,0.0000125,2,0xfeed"));
}

#[tokio::test]
async fn test_export_for_unknown_wallet_is_not_found() {
    let accountant = create_test_accountant();

    let response = get(
        accountant.rest_router(),
        "/accountant/fundings/export?wallet_address=0xnobody&provider=DYDX&from_date=2024-03-01&to_date=2024-03-31",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(
        json["error"]["title"]
            .as_str()
            .unwrap()
            .contains("is not found")
    );
}

#[tokio::test]
async fn test_export_with_invalid_query_is_bad_request() {
    let accountant = create_populated_accountant().await;

    for uri in [
        "/accountant/trades/export?provider=DYDX&from_date=2024-03-01&to_date=2024-03-31".to_string(),
        format!(
            "/accountant/trades/export?wallet_address={}&provider=DYDX&from_date=03/01/2024&to_date=2024-03-31",
            WALLET
        ),
        format!(
            "/accountant/trades/export?wallet_address={}&provider=HYPERLIQUID&from_date=2024-03-31&to_date=2024-03-01",
            WALLET
        ),
    ] {
        let response = get(accountant.rest_router(), &uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
        let json = body_json(response).await;
        assert!(
            json["error"]["title"]
                .as_str()
                .unwrap()
                .starts_with("Invalid query parameters")
        );
    }
}
