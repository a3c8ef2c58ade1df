//! Raw exchange gateways
//!
//! Gateways only move JSON. They handle signing, pagination and status codes;
//! interpreting the payload is the provider adapter's job.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use trading_core::{TimeWindow, Timestamp};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Bad response (status={status}): {body}")]
    BadResponse { status: u16, body: String },
    #[error("No API credentials configured for wallet {0}")]
    MissingCredentials(String),
    #[error("Decode error: {0}")]
    Decode(String),
}

/// dYdX v3 REST endpoints, authenticated per wallet
#[async_trait]
pub trait DydxGateway: Send + Sync {
    /// `GET /v3/fills`, newest first
    async fn fetch_order_fills(&self, wallet_address: &str) -> Result<Vec<Value>, GatewayError>;

    /// `GET /v3/orders?returnLatestOrders=true`
    async fn fetch_open_orders(&self, wallet_address: &str) -> Result<Vec<Value>, GatewayError>;

    /// `GET /v3/orders/{id}`, unwrapped from the `order` envelope
    async fn fetch_order(&self, wallet_address: &str, order_id: &str) -> Result<Value, GatewayError>;

    /// `GET /v3/positions`
    async fn fetch_positions(&self, wallet_address: &str) -> Result<Vec<Value>, GatewayError>;

    /// `GET /v3/funding`, optionally bounded by `effectiveBeforeOrAt`
    async fn fetch_funding_payments(
        &self,
        wallet_address: &str,
        to: Option<Timestamp>,
    ) -> Result<Vec<Value>, GatewayError>;

    /// `GET /v3/accounts/{account_id}`, unwrapped from the `account` envelope
    async fn fetch_account(&self, wallet_address: &str) -> Result<Value, GatewayError>;

    /// `GET /v3/markets?market=...`, the `markets` map
    async fn fetch_markets(&self, wallet_address: &str, market: &str) -> Result<Value, GatewayError>;
}

/// HyperLiquid `/info` endpoint
#[async_trait]
pub trait HyperliquidGateway: Send + Sync {
    /// `openOrders`
    async fn fetch_open_orders(&self, wallet_address: &str) -> Result<Vec<Value>, GatewayError>;

    /// `userFillsByTime` over the window
    async fn fetch_order_fills(
        &self,
        wallet_address: &str,
        window: TimeWindow,
    ) -> Result<Vec<Value>, GatewayError>;

    /// `orderStatus` for one order id
    async fn fetch_order_status(&self, wallet_address: &str, order_id: u64) -> Result<Value, GatewayError>;

    /// `clearinghouseState`: positions and margin summary
    async fn fetch_clearinghouse_state(&self, wallet_address: &str) -> Result<Value, GatewayError>;

    /// `userFunding` from `from`, following pages until exhausted
    async fn fetch_funding_payments(
        &self,
        wallet_address: &str,
        from: Timestamp,
        to: Option<Timestamp>,
    ) -> Result<Vec<Value>, GatewayError>;
}
