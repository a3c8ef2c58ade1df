//! HyperLiquid `/info` payload shapes

use chrono::serde::ts_milliseconds;
use rust_decimal::Decimal;
use serde::Deserialize;
use trading_core::Timestamp;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HlFill {
    pub closed_pnl: Decimal,
    pub coin: String,
    pub dir: String,
    pub fee: Decimal,
    pub hash: String,
    pub oid: u64,
    pub px: Decimal,
    pub side: String,
    pub sz: Decimal,
    #[serde(with = "ts_milliseconds")]
    pub time: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HlOpenOrder {
    pub oid: u64,
}

/// `orderStatus` response: `{"status": "order", "order": {"order": {..}, "status": ".."}}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HlOrderStatusResponse {
    pub order: HlOrderEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HlOrderEnvelope {
    pub order: HlOrder,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HlOrder {
    pub coin: String,
    pub oid: u64,
    pub order_type: String,
    pub orig_sz: Decimal,
    pub side: String,
    pub sz: Decimal,
    #[serde(with = "ts_milliseconds")]
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HlClearinghouseState {
    #[serde(default)]
    pub asset_positions: Vec<HlAssetPosition>,
    pub margin_summary: HlMarginSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HlAssetPosition {
    pub position: HlPosition,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HlPosition {
    pub coin: String,
    pub position_value: Decimal,
    pub szi: Decimal,
    pub unrealized_pnl: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HlMarginSummary {
    pub account_value: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HlFundingRecord {
    #[serde(with = "ts_milliseconds")]
    pub time: Timestamp,
    pub hash: String,
    pub delta: HlFundingDelta,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HlFundingDelta {
    pub coin: String,
    pub usdc: Decimal,
    pub szi: Decimal,
    pub funding_rate: Decimal,
}
