use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trading_core::{
    OrderFillImportData, PositionSide, Timestamp, TradeDirection, TradeSide, truncate_to_minute,
};

use super::{OrderRecordId, WalletId};

pub type OrderFillId = u64;

/// Fields that decide whether two fills are the same execution
///
/// Amounts (`fee`, `closed_pnl`) are deliberately absent: a re-import never
/// overwrites them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderFillKey {
    pub price: Decimal,
    pub size: Decimal,
    pub side: TradeSide,
    pub position_side: Option<PositionSide>,
    pub direction: Option<TradeDirection>,
    pub hash: Option<String>,
    pub fill_timestamp: Timestamp,
    pub order: Option<OrderRecordId>,
}

impl OrderFillKey {
    pub fn of(order: Option<OrderRecordId>, data: &OrderFillImportData) -> Self {
        OrderFillKey {
            price: data.price,
            size: data.size,
            side: data.side,
            position_side: data.position_side,
            direction: data.direction,
            hash: data.hash.clone(),
            fill_timestamp: data.created_at,
            order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFillRecord {
    pub id: OrderFillId,
    pub wallet_id: WalletId,
    /// Owning order; absent only on legacy rows
    pub order: Option<OrderRecordId>,
    pub market: String,
    pub price: Decimal,
    pub size: Decimal,
    pub side: TradeSide,
    pub position_side: Option<PositionSide>,
    pub direction: Option<TradeDirection>,
    pub hash: Option<String>,
    pub fee: Decimal,
    pub closed_pnl: Decimal,
    pub fill_timestamp: Timestamp,
    pub fill_created_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderFillRecord {
    pub fn new(
        id: OrderFillId,
        wallet_id: WalletId,
        order: Option<OrderRecordId>,
        data: &OrderFillImportData,
        now: Timestamp,
    ) -> Self {
        OrderFillRecord {
            id,
            wallet_id,
            order,
            market: data.market.clone(),
            price: data.price,
            size: data.size,
            side: data.side,
            position_side: data.position_side,
            direction: data.direction,
            hash: data.hash.clone(),
            fee: data.fee,
            closed_pnl: data.closed_pnl,
            fill_timestamp: data.created_at,
            fill_created_at: truncate_to_minute(data.created_at),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> OrderFillKey {
        OrderFillKey {
            price: self.price,
            size: self.size,
            side: self.side,
            position_side: self.position_side,
            direction: self.direction,
            hash: self.hash.clone(),
            fill_timestamp: self.fill_timestamp,
            order: self.order,
        }
    }
}
