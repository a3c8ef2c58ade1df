use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseEnumError;

/// Lifecycle status of an order
///
/// Which of these count as "open" is decided per provider, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Pending,
    Open,
    Filled,
    Cancelled,
    Untriggered,
}

impl TradeStatus {
    pub const ALL: [TradeStatus; 5] = [
        TradeStatus::Pending,
        TradeStatus::Open,
        TradeStatus::Filled,
        TradeStatus::Cancelled,
        TradeStatus::Untriggered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Pending => "PENDING",
            TradeStatus::Open => "OPEN",
            TradeStatus::Filled => "FILLED",
            TradeStatus::Cancelled => "CANCELLED",
            TradeStatus::Untriggered => "UNTRIGGERED",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("trade status", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionStatus {
    Open,
    Neutral,
    Closed,
    Liquidated,
}

impl PositionStatus {
    pub const ALL: [PositionStatus; 4] = [
        PositionStatus::Open,
        PositionStatus::Neutral,
        PositionStatus::Closed,
        PositionStatus::Liquidated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PositionStatus::Open => "OPEN",
            PositionStatus::Neutral => "NEUTRAL",
            PositionStatus::Closed => "CLOSED",
            PositionStatus::Liquidated => "LIQUIDATED",
        }
    }
}

impl fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("position status", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names_parse_back() {
        for status in TradeStatus::ALL {
            assert_eq!(status.to_string().parse::<TradeStatus>(), Ok(status));
        }
        for status in PositionStatus::ALL {
            assert_eq!(status.to_string().parse::<PositionStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&TradeStatus::Cancelled).unwrap();
        assert_eq!(json, "\"CANCELLED\"");
    }
}
