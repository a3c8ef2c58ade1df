use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use trading_core::{PositionFunding, Timestamp};

use super::sequence::IdSequence;
use crate::application::ports::{FundingPaymentReader, FundingPaymentWriter};
use crate::domain::{Clock, FundingPaymentKey, FundingPaymentRecord, WalletId};
use crate::infrastructure::SystemClock;

/// In-memory funding ledger
pub struct InMemoryFundingPaymentRepository {
    payments: Arc<DashMap<FundingPaymentKey, FundingPaymentRecord>>,
    ids: Arc<IdSequence>,
    clock: Arc<dyn Clock>,
}

impl InMemoryFundingPaymentRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            payments: Arc::new(DashMap::new()),
            ids: Arc::new(IdSequence::default()),
            clock,
        }
    }

    pub fn records(&self) -> Vec<FundingPaymentRecord> {
        let mut payments: Vec<FundingPaymentRecord> =
            self.payments.iter().map(|p| p.value().clone()).collect();
        payments.sort_by_key(|p| p.id);
        payments
    }

    pub fn restore(&self, records: Vec<FundingPaymentRecord>) {
        for payment in records {
            self.ids.observe(payment.id);
            self.payments.insert(payment.key(), payment);
        }
    }
}

impl Default for InMemoryFundingPaymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryFundingPaymentRepository {
    fn clone(&self) -> Self {
        Self {
            payments: Arc::clone(&self.payments),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[async_trait]
impl FundingPaymentReader for InMemoryFundingPaymentRepository {
    async fn latest_funding_created_at(&self, wallet_id: WalletId) -> Option<Timestamp> {
        self.payments
            .iter()
            .filter(|p| p.wallet_id == wallet_id)
            .map(|p| p.funding_created_at)
            .max()
    }

    async fn list_by_wallet(&self, wallet_id: WalletId) -> Vec<FundingPaymentRecord> {
        let mut payments: Vec<FundingPaymentRecord> = self
            .payments
            .iter()
            .filter(|p| p.wallet_id == wallet_id)
            .map(|p| p.value().clone())
            .collect();
        payments.sort_by_key(|p| p.id);
        payments
    }
}

#[async_trait]
impl FundingPaymentWriter for InMemoryFundingPaymentRepository {
    async fn get_or_create(
        &self,
        wallet_id: WalletId,
        funding: &PositionFunding,
    ) -> (FundingPaymentRecord, bool) {
        let mut created = false;
        let payment = self
            .payments
            .entry(FundingPaymentKey::of(wallet_id, funding))
            .or_insert_with(|| {
                created = true;
                FundingPaymentRecord::new(self.ids.next(), wallet_id, funding, self.clock.now())
            })
            .value()
            .clone();

        (payment, created)
    }
}
