use async_trait::async_trait;
use rust_decimal::Decimal;
use trading_core::{Position, Timestamp};

use crate::domain::{PositionRecord, WalletId};

#[async_trait]
pub trait PositionReader: Send + Sync {
    async fn list_by_wallet(&self, wallet_id: WalletId) -> Vec<PositionRecord>;

    /// A CLOSED position on `market` that was alive at `at`
    async fn find_closed_spanning(
        &self,
        wallet_id: WalletId,
        market: &str,
        at: Timestamp,
    ) -> Option<PositionRecord>;

    /// An OPEN position on `market` created at or before `at`
    async fn find_open_created_before(
        &self,
        wallet_id: WalletId,
        market: &str,
        at: Timestamp,
    ) -> Option<PositionRecord>;

    /// Any OPEN position on `market`
    async fn find_open(&self, wallet_id: WalletId, market: &str) -> Option<PositionRecord>;

    /// Sum of `value` over the wallet's OPEN positions
    async fn open_positions_value(&self, wallet_id: WalletId) -> Decimal;
}

#[async_trait]
pub trait PositionWriter: Send + Sync {
    /// Insert by natural key or overwrite every mutable field of the existing row
    async fn upsert(&self, wallet_id: WalletId, position: &Position) -> (PositionRecord, bool);

    /// Remove every OPEN position of the wallet, returning how many were removed
    async fn delete_open(&self, wallet_id: WalletId) -> usize;
}

pub trait PositionRepository: PositionReader + PositionWriter {}

impl<T: PositionReader + PositionWriter> PositionRepository for T {}
