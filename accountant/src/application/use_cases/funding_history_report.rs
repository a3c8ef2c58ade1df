use std::sync::Arc;
use trading_core::PositionFundingHistory;

use crate::application::ports::{FundingPaymentReader, WalletReader};

use super::report_query::{ReportError, ReportQuery};

/// Chronological funding payments of a wallet
pub struct FundingHistoryReportUseCase<W, FP>
where
    W: WalletReader,
    FP: FundingPaymentReader,
{
    wallets: Arc<W>,
    fundings: Arc<FP>,
}

impl<W, FP> FundingHistoryReportUseCase<W, FP>
where
    W: WalletReader,
    FP: FundingPaymentReader,
{
    pub fn new(wallets: Arc<W>, fundings: Arc<FP>) -> Self {
        Self { wallets, fundings }
    }

    pub async fn execute(
        &self,
        query: &ReportQuery,
    ) -> Result<Vec<PositionFundingHistory>, ReportError> {
        let Some(wallet) = self.wallets.find(&query.wallet_address, query.provider).await else {
            tracing::error!(wallet_address = %query.wallet_address, provider = %query.provider, "Accounting wallet not found");
            return Err(ReportError::AccountingWalletNotFound {
                address: query.wallet_address.clone(),
                provider: query.provider,
            });
        };

        let mut payments = self.fundings.list_by_wallet(wallet.id).await;
        payments.retain(|payment| query.contains(payment.funding_created_at));
        payments.sort_by_key(|payment| payment.funding_timestamp);

        let rows: Vec<PositionFundingHistory> = payments
            .into_iter()
            .map(|payment| PositionFundingHistory {
                wallet_address: wallet.address.clone(),
                provider_name: wallet.provider,
                market: payment.market,
                amount_paid: payment.payment,
                funding_rate: payment.funding_rate,
                position_size: payment.position_size,
                hash: payment.hash,
                created_at: payment.funding_created_at,
            })
            .collect();

        tracing::info!(
            wallet_id = wallet.id,
            from = ?query.from,
            to = ?query.to,
            rows = rows.len(),
            "Built funding history"
        );
        Ok(rows)
    }
}
