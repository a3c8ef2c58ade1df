use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trading_core::{Position, PositionSide, PositionStatus, Timestamp, truncate_to_minute};

use super::WalletId;

pub type PositionId = u64;

/// Natural key of a position: `(wallet, market, side, created_at)`
///
/// Two positions opened on the same market and side within the same minute
/// share a key and are merged into one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub wallet_id: WalletId,
    pub market: String,
    pub side: PositionSide,
    pub position_created_at: Timestamp,
}

impl PositionKey {
    pub fn of(wallet_id: WalletId, position: &Position) -> Self {
        PositionKey {
            wallet_id,
            market: position.market.clone(),
            side: position.side,
            position_created_at: truncate_to_minute(position.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub id: PositionId,
    pub wallet_id: WalletId,
    pub market: String,
    pub side: PositionSide,
    pub status: PositionStatus,
    pub size: Decimal,
    pub remaining_size: Decimal,
    pub unrealized_pnl: Decimal,
    pub realized_pnl: Decimal,
    pub value: Decimal,
    pub position_created_at: Timestamp,
    pub position_closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PositionRecord {
    pub fn new(id: PositionId, wallet_id: WalletId, position: &Position, now: Timestamp) -> Self {
        PositionRecord {
            id,
            wallet_id,
            market: position.market.clone(),
            side: position.side,
            status: position.status,
            size: position.size,
            remaining_size: position.remaining_size,
            unrealized_pnl: position.unrealized_pnl,
            realized_pnl: position.realized_pnl,
            value: position.value,
            position_created_at: truncate_to_minute(position.created_at),
            position_closed_at: position.closed_at.map(truncate_to_minute),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field with the exchange snapshot (last write wins)
    pub fn overwrite(&mut self, position: &Position, now: Timestamp) {
        self.status = position.status;
        self.size = position.size;
        self.remaining_size = position.remaining_size;
        self.unrealized_pnl = position.unrealized_pnl;
        self.realized_pnl = position.realized_pnl;
        self.value = position.value;
        self.position_closed_at = position.closed_at.map(truncate_to_minute);
        self.updated_at = now;
    }

    pub fn key(&self) -> PositionKey {
        PositionKey {
            wallet_id: self.wallet_id,
            market: self.market.clone(),
            side: self.side,
            position_created_at: self.position_created_at,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == PositionStatus::Open
    }

    /// Whether the position was alive at `at`: opened at or before it and,
    /// when closed, closed at or after it
    pub fn spans(&self, at: Timestamp) -> bool {
        self.position_created_at <= at && self.position_closed_at.is_some_and(|closed| at <= closed)
    }
}
