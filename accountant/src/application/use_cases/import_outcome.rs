use thiserror::Error;
use trading_core::TradingProviderId;

use crate::application::ports::WalletReader;
use crate::domain::AccountingWallet;

/// The only failure an import hands back to its caller
///
/// Provider and per-item failures are logged and absorbed inside the import.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Accounting wallet (address={address}, provider={provider}) is not found")]
    AccountingWalletNotFound {
        address: String,
        provider: TradingProviderId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStatus {
    #[default]
    Completed,
    /// Nothing to do: no window could be derived
    NoOp,
    /// The provider call for the whole category failed
    Aborted,
}

/// What an import run did, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub status: ImportStatus,
    pub fetched: usize,
    pub created: usize,
    pub refreshed: usize,
    pub deleted: usize,
    pub skipped: usize,
}

impl ImportSummary {
    pub fn no_op() -> Self {
        ImportSummary {
            status: ImportStatus::NoOp,
            ..Default::default()
        }
    }

    pub fn aborted() -> Self {
        ImportSummary {
            status: ImportStatus::Aborted,
            ..Default::default()
        }
    }

    pub fn fetched(count: usize) -> Self {
        ImportSummary {
            fetched: count,
            ..Default::default()
        }
    }
}

pub(crate) async fn require_wallet<W: WalletReader + ?Sized>(
    wallets: &W,
    wallet_address: &str,
    provider: TradingProviderId,
) -> Result<AccountingWallet, ImportError> {
    wallets
        .find(wallet_address, provider)
        .await
        .ok_or_else(|| ImportError::AccountingWalletNotFound {
            address: wallet_address.to_string(),
            provider,
        })
}
