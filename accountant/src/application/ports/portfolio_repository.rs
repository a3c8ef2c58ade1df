use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{WalletId, WalletPortfolio};

#[async_trait]
pub trait PortfolioReader: Send + Sync {
    async fn find(&self, wallet_id: WalletId, date: NaiveDate) -> Option<WalletPortfolio>;
}

#[async_trait]
pub trait PortfolioWriter: Send + Sync {
    /// Write the snapshot for `date`, replacing the values of an existing one
    async fn upsert(
        &self,
        wallet_id: WalletId,
        date: NaiveDate,
        equity_value: Decimal,
        portfolio_value: Decimal,
    ) -> (WalletPortfolio, bool);
}

pub trait PortfolioRepository: PortfolioReader + PortfolioWriter {}

impl<T: PortfolioReader + PortfolioWriter> PortfolioRepository for T {}
