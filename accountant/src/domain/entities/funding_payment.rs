use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trading_core::{PositionFunding, Timestamp, truncate_to_minute};

use super::WalletId;

pub type FundingPaymentId = u64;

/// Fields that identify a funding payment in the append-only ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FundingPaymentKey {
    pub wallet_id: WalletId,
    pub market: String,
    pub payment: Decimal,
    pub funding_rate: Decimal,
    pub position_size: Decimal,
    pub hash: Option<String>,
}

impl FundingPaymentKey {
    pub fn of(wallet_id: WalletId, funding: &PositionFunding) -> Self {
        FundingPaymentKey {
            wallet_id,
            market: funding.market.clone(),
            payment: funding.payment,
            funding_rate: funding.funding_rate,
            position_size: funding.position_size,
            hash: funding.hash.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingPaymentRecord {
    pub id: FundingPaymentId,
    pub wallet_id: WalletId,
    pub market: String,
    pub payment: Decimal,
    pub funding_rate: Decimal,
    pub position_size: Decimal,
    pub hash: Option<String>,
    /// Settlement time exactly as reported
    pub funding_timestamp: Timestamp,
    pub funding_created_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FundingPaymentRecord {
    pub fn new(
        id: FundingPaymentId,
        wallet_id: WalletId,
        funding: &PositionFunding,
        now: Timestamp,
    ) -> Self {
        FundingPaymentRecord {
            id,
            wallet_id,
            market: funding.market.clone(),
            payment: funding.payment,
            funding_rate: funding.funding_rate,
            position_size: funding.position_size,
            hash: funding.hash.clone(),
            funding_timestamp: funding.created_at,
            funding_created_at: truncate_to_minute(funding.created_at),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> FundingPaymentKey {
        FundingPaymentKey {
            wallet_id: self.wallet_id,
            market: self.market.clone(),
            payment: self.payment,
            funding_rate: self.funding_rate,
            position_size: self.position_size,
            hash: self.hash.clone(),
        }
    }
}
