pub mod entities;
pub mod services;

pub use entities::{
    AccountingWallet, FundingPaymentId, FundingPaymentKey, FundingPaymentRecord, OrderFillId,
    OrderFillKey, OrderFillRecord, OrderRecord, OrderRecordId, PortfolioId, PositionId,
    PositionKey, PositionRecord, WalletId, WalletPortfolio,
};

pub use services::Clock;

pub use trading_core::Timestamp;
