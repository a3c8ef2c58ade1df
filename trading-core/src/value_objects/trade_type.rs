use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    Market,
    StopMarket,
    Limit,
    TrailingStop,
    Stop,
    TakeProfit,
}

impl TradeType {
    pub const ALL: [TradeType; 6] = [
        TradeType::Market,
        TradeType::StopMarket,
        TradeType::Limit,
        TradeType::TrailingStop,
        TradeType::Stop,
        TradeType::TakeProfit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Market => "MARKET",
            TradeType::StopMarket => "STOP_MARKET",
            TradeType::Limit => "LIMIT",
            TradeType::TrailingStop => "TRAILING_STOP",
            TradeType::Stop => "STOP",
            TradeType::TakeProfit => "TAKE_PROFIT",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trade_type| trade_type.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("trade type", s))
    }
}
