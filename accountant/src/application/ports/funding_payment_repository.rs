use async_trait::async_trait;
use trading_core::{PositionFunding, Timestamp};

use crate::domain::{FundingPaymentRecord, WalletId};

#[async_trait]
pub trait FundingPaymentReader: Send + Sync {
    /// Latest `funding_created_at` stored for the wallet
    async fn latest_funding_created_at(&self, wallet_id: WalletId) -> Option<Timestamp>;

    async fn list_by_wallet(&self, wallet_id: WalletId) -> Vec<FundingPaymentRecord>;
}

#[async_trait]
pub trait FundingPaymentWriter: Send + Sync {
    /// Append unless an identical payment is already recorded
    async fn get_or_create(
        &self,
        wallet_id: WalletId,
        funding: &PositionFunding,
    ) -> (FundingPaymentRecord, bool);
}

pub trait FundingPaymentRepository: FundingPaymentReader + FundingPaymentWriter {}

impl<T: FundingPaymentReader + FundingPaymentWriter> FundingPaymentRepository for T {}
