//! Persisted ledger rows
//!
//! Every row belongs to exactly one [`AccountingWallet`]. Rows carry a
//! surrogate id assigned by the store plus the natural key used for
//! deduplication on import.

mod funding_payment;
mod order;
mod order_fill;
mod portfolio;
mod position;
mod wallet;

pub use funding_payment::{FundingPaymentId, FundingPaymentKey, FundingPaymentRecord};
pub use order::{OrderRecord, OrderRecordId};
pub use order_fill::{OrderFillId, OrderFillKey, OrderFillRecord};
pub use portfolio::{PortfolioId, WalletPortfolio};
pub use position::{PositionId, PositionKey, PositionRecord};
pub use wallet::{AccountingWallet, WalletId};
