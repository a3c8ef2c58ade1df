use serde::{Deserialize, Serialize};
use std::fmt;

use super::{PositionSide, TradeSide};

/// Whether a fill opened or closed exposure, and on which side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    OpenLong,
    OpenShort,
    CloseLong,
    CloseShort,
}

impl TradeDirection {
    pub const ALL: [TradeDirection; 4] = [
        TradeDirection::OpenLong,
        TradeDirection::OpenShort,
        TradeDirection::CloseLong,
        TradeDirection::CloseShort,
    ];

    /// Infer the direction from the order side and the side of the position it hit.
    ///
    /// Any pair outside the four long/short combinations (a `Neutral`
    /// position side in particular) has no direction.
    pub fn from_order_side_and_position_side(
        order_side: TradeSide,
        position_side: PositionSide,
    ) -> Option<TradeDirection> {
        match (order_side, position_side) {
            (TradeSide::Sell, PositionSide::Long) => Some(TradeDirection::CloseLong),
            (TradeSide::Sell, PositionSide::Short) => Some(TradeDirection::CloseShort),
            (TradeSide::Buy, PositionSide::Long) => Some(TradeDirection::OpenLong),
            (TradeSide::Buy, PositionSide::Short) => Some(TradeDirection::OpenShort),
            _ => None,
        }
    }

    /// Side of the position this direction acts on
    pub fn position_side(&self) -> PositionSide {
        match self {
            TradeDirection::OpenLong | TradeDirection::CloseLong => PositionSide::Long,
            TradeDirection::OpenShort | TradeDirection::CloseShort => PositionSide::Short,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::OpenLong => "OPEN_LONG",
            TradeDirection::OpenShort => "OPEN_SHORT",
            TradeDirection::CloseLong => "CLOSE_LONG",
            TradeDirection::CloseShort => "CLOSE_SHORT",
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
