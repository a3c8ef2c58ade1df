use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::{PositionSide, Timestamp, TradeDirection, TradeSide, TradeStatus, TradeType};

/// An order as last reported by the exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub market: String,
    pub trade_type: TradeType,
    pub side: TradeSide,
    pub status: TradeStatus,
    /// Size still waiting to be filled
    pub remaining_size: Decimal,
    pub original_size: Decimal,
    pub created_at: Timestamp,
}

/// A single execution against an order
///
/// `direction` and `closed_pnl` are only present when the exchange reports
/// them; otherwise they are inferred while preparing the fill for import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFill {
    pub order_id: String,
    pub market: String,
    pub side: TradeSide,
    pub direction: Option<TradeDirection>,
    pub price: Decimal,
    pub size: Decimal,
    pub fee: Decimal,
    pub closed_pnl: Option<Decimal>,
    pub hash: Option<String>,
    pub created_at: Timestamp,
}

/// A fill resolved against its position, ready to be persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFillImportData {
    pub order_id: String,
    pub market: String,
    pub side: TradeSide,
    pub position_side: Option<PositionSide>,
    pub direction: Option<TradeDirection>,
    pub price: Decimal,
    pub size: Decimal,
    pub fee: Decimal,
    pub closed_pnl: Decimal,
    pub hash: Option<String>,
    pub created_at: Timestamp,
}
