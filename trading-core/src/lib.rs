pub mod messages;
pub mod value_objects;

pub use value_objects::{
    ParseEnumError, PositionSide, PositionStatus, TimeWindow, Timestamp, TradeDirection,
    TradeSide, TradeStatus, TradeType, TradingProviderId, truncate_to_minute,
};

pub use messages::{
    Order, OrderFill, OrderFillImportData, OrderHistory, Position, PositionFunding,
    PositionFundingHistory, WalletAccount,
};
