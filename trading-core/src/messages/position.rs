use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::{PositionSide, PositionStatus, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub market: String,
    pub status: PositionStatus,
    pub side: PositionSide,
    /// Largest absolute size the position ever reached
    pub size: Decimal,
    /// Absolute size still open
    pub remaining_size: Decimal,
    pub unrealized_pnl: Decimal,
    pub realized_pnl: Decimal,
    pub value: Decimal,
    pub created_at: Timestamp,
    pub closed_at: Option<Timestamp>,
}

/// A funding payment settled against an open position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFunding {
    pub market: String,
    pub payment: Decimal,
    pub funding_rate: Decimal,
    pub position_size: Decimal,
    pub hash: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub equity_value: Decimal,
}
