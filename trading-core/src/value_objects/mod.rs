mod direction;
mod provider;
mod side;
mod status;
mod trade_type;
mod window;

pub use direction::TradeDirection;
pub use provider::TradingProviderId;
pub use side::{PositionSide, TradeSide};
pub use status::{PositionStatus, TradeStatus};
pub use trade_type::TradeType;
pub use window::{TimeWindow, truncate_to_minute};

use thiserror::Error;

pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A name that does not belong to a canonical enumeration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        ParseEnumError {
            kind,
            value: value.to_string(),
        }
    }
}
