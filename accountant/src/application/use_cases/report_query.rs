use serde::{Deserialize, Serialize};
use thiserror::Error;
use trading_core::{Timestamp, TradingProviderId};

/// Wallet and inclusive `[from, to]` range a report covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub wallet_address: String,
    pub provider: TradingProviderId,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl ReportQuery {
    pub fn new(
        wallet_address: impl Into<String>,
        provider: TradingProviderId,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Self {
        ReportQuery {
            wallet_address: wallet_address.into(),
            provider,
            from,
            to,
        }
    }

    pub fn contains(&self, at: Timestamp) -> bool {
        self.from.is_none_or(|from| from <= at) && self.to.is_none_or(|to| at <= to)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Accounting wallet (address={address}, provider={provider}) is not found")]
    AccountingWalletNotFound {
        address: String,
        provider: TradingProviderId,
    },
}
