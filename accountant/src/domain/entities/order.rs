use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trading_core::{Order, Timestamp, TradeSide, TradeStatus, TradeType, truncate_to_minute};

use super::WalletId;

pub type OrderRecordId = u64;

/// Persisted order
///
/// Identified by the exchange `order_id`. Only `status` and `remaining_size`
/// change after the first insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderRecordId,
    pub wallet_id: WalletId,
    pub order_id: String,
    pub market: String,
    pub trade_type: TradeType,
    pub side: TradeSide,
    pub status: TradeStatus,
    pub original_size: Decimal,
    pub remaining_size: Decimal,
    /// Creation time exactly as reported by the exchange
    pub order_timestamp: Timestamp,
    /// Creation time truncated to the minute, used for position matching and reports
    pub order_created_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    pub fn new(id: OrderRecordId, wallet_id: WalletId, order: &Order, now: Timestamp) -> Self {
        OrderRecord {
            id,
            wallet_id,
            order_id: order.order_id.clone(),
            market: order.market.clone(),
            trade_type: order.trade_type,
            side: order.side,
            status: order.status,
            original_size: order.original_size,
            remaining_size: order.remaining_size,
            order_timestamp: order.created_at,
            order_created_at: truncate_to_minute(order.created_at),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the mutable fields of a fresh exchange snapshot
    pub fn refresh(&mut self, status: TradeStatus, remaining_size: Decimal, now: Timestamp) {
        self.status = status;
        self.remaining_size = remaining_size;
        self.updated_at = now;
    }
}
