use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trading_core::Timestamp;

use super::WalletId;

pub type PortfolioId = u64;

/// Daily snapshot of a wallet's equity and open position value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletPortfolio {
    pub id: PortfolioId,
    pub wallet_id: WalletId,
    pub portfolio_date: NaiveDate,
    pub equity_value: Decimal,
    pub portfolio_value: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
