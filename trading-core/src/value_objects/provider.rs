use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseEnumError;

/// Exchange integration a wallet is registered against
///
/// Persisted as the upper-case name (`HYPERLIQUID`, `DYDX`), which is also the
/// identifier accepted on the command line and in report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradingProviderId {
    Hyperliquid,
    Dydx,
}

impl TradingProviderId {
    pub const ALL: [TradingProviderId; 2] = [TradingProviderId::Hyperliquid, TradingProviderId::Dydx];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradingProviderId::Hyperliquid => "HYPERLIQUID",
            TradingProviderId::Dydx => "DYDX",
        }
    }
}

impl fmt::Display for TradingProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradingProviderId {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("trading provider", s))
    }
}
