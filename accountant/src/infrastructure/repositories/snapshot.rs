//! JSON dump of every in-memory store
//!
//! One-shot CLI runs and the long-running server share state through this
//! file: load on start, save after each import.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{
    InMemoryFundingPaymentRepository, InMemoryOrderFillRepository, InMemoryOrderRepository,
    InMemoryPortfolioRepository, InMemoryPositionRepository, InMemoryWalletRepository,
};
use crate::domain::{
    AccountingWallet, FundingPaymentRecord, OrderFillRecord, OrderRecord, PositionRecord,
    WalletPortfolio,
};

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to access snapshot {path}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("Failed to decode snapshot {path}: {error}")]
    Parse {
        path: PathBuf,
        error: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub wallets: Vec<AccountingWallet>,
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
    #[serde(default)]
    pub order_fills: Vec<OrderFillRecord>,
    #[serde(default)]
    pub positions: Vec<PositionRecord>,
    #[serde(default)]
    pub funding_payments: Vec<FundingPaymentRecord>,
    #[serde(default)]
    pub portfolios: Vec<WalletPortfolio>,
}

impl StoreSnapshot {
    pub fn capture(
        wallets: &InMemoryWalletRepository,
        orders: &InMemoryOrderRepository,
        order_fills: &InMemoryOrderFillRepository,
        positions: &InMemoryPositionRepository,
        funding_payments: &InMemoryFundingPaymentRepository,
        portfolios: &InMemoryPortfolioRepository,
    ) -> Self {
        Self {
            wallets: wallets.records(),
            orders: orders.records(),
            order_fills: order_fills.records(),
            positions: positions.records(),
            funding_payments: funding_payments.records(),
            portfolios: portfolios.records(),
        }
    }

    pub fn restore_into(
        self,
        wallets: &InMemoryWalletRepository,
        orders: &InMemoryOrderRepository,
        order_fills: &InMemoryOrderFillRepository,
        positions: &InMemoryPositionRepository,
        funding_payments: &InMemoryFundingPaymentRepository,
        portfolios: &InMemoryPortfolioRepository,
    ) {
        wallets.restore(self.wallets);
        orders.restore(self.orders);
        order_fills.restore(self.order_fills);
        positions.restore(self.positions);
        funding_payments.restore(self.funding_payments);
        portfolios.restore(self.portfolios);
    }

    /// Read a snapshot; a missing file is an empty store
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|error| SnapshotError::Io {
            path: path.to_path_buf(),
            error,
        })?;

        serde_json::from_str(&content).map_err(|error| SnapshotError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Write through a sibling temp file so a crash never leaves half a snapshot
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let io_error = |error| SnapshotError::Io {
            path: path.to_path_buf(),
            error,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|error| SnapshotError::Parse {
            path: path.to_path_buf(),
            error,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(io_error)?;
        fs::rename(&tmp, path).map_err(io_error)
    }
}
