//! dYdX v3 payload shapes; unknown fields are ignored

use rust_decimal::Decimal;
use serde::Deserialize;
use trading_core::Timestamp;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DydxOrder {
    pub id: String,
    pub market: String,
    pub side: String,
    pub size: Decimal,
    pub remaining_size: Decimal,
    #[serde(rename = "type")]
    pub order_type: String,
    pub created_at: Timestamp,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DydxFill {
    pub id: String,
    pub side: String,
    pub market: String,
    pub price: Decimal,
    pub size: Decimal,
    pub fee: Decimal,
    pub created_at: Timestamp,
    pub order_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DydxPosition {
    pub market: String,
    pub status: String,
    pub side: String,
    /// Signed current size
    pub size: Decimal,
    pub max_size: Decimal,
    pub unrealized_pnl: Decimal,
    pub realized_pnl: Decimal,
    pub created_at: Timestamp,
    #[serde(default)]
    pub closed_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DydxFundingPayment {
    pub market: String,
    pub payment: Decimal,
    pub rate: Decimal,
    pub position_size: Decimal,
    pub effective_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DydxAccount {
    pub equity: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DydxMarket {
    pub oracle_price: Decimal,
}
