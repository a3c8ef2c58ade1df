use std::sync::Arc;
use trading_core::Timestamp;

use crate::application::ports::{FundingPaymentRepository, TradingProvider, WalletReader};

use super::import_outcome::{ImportError, ImportSummary, require_wallet};

/// Append new funding payments to the wallet's ledger
///
/// Without `from` the import resumes at the newest stored payment; a wallet
/// with no payments yet does nothing. `to` without `from` is a no-op.
pub struct ImportFundingPaymentsUseCase<W, FP>
where
    W: WalletReader,
    FP: FundingPaymentRepository,
{
    provider: Arc<dyn TradingProvider>,
    wallets: Arc<W>,
    fundings: Arc<FP>,
}

impl<W, FP> ImportFundingPaymentsUseCase<W, FP>
where
    W: WalletReader,
    FP: FundingPaymentRepository,
{
    pub fn new(provider: Arc<dyn TradingProvider>, wallets: Arc<W>, fundings: Arc<FP>) -> Self {
        Self {
            provider,
            wallets,
            fundings,
        }
    }

    pub async fn execute(
        &self,
        wallet_address: &str,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<ImportSummary, ImportError> {
        let provider = self.provider.provider();
        let wallet = require_wallet(self.wallets.as_ref(), wallet_address, provider).await?;

        let from = match (from, to) {
            (Some(from), _) => from,
            (None, Some(_)) => {
                tracing::error!(wallet_id = wallet.id, "A start bound is required when an end bound is given");
                return Ok(ImportSummary::no_op());
            }
            (None, None) => match self.fundings.latest_funding_created_at(wallet.id).await {
                Some(watermark) => watermark,
                None => {
                    tracing::info!(wallet_id = wallet.id, "No stored funding payments to resume from");
                    return Ok(ImportSummary::no_op());
                }
            },
        };

        let fundings = match self
            .provider
            .get_position_fundings(&wallet.address, from, to)
            .await
        {
            Ok(fundings) => fundings,
            Err(e) => {
                tracing::error!(
                    wallet_id = wallet.id,
                    from = %from,
                    to = ?to,
                    error = %e,
                    "Unable to fetch funding payments"
                );
                return Ok(ImportSummary::aborted());
            }
        };

        let mut summary = ImportSummary::fetched(fundings.len());
        for funding in &fundings {
            if let (_, true) = self.fundings.get_or_create(wallet.id, funding).await {
                summary.created += 1;
            }
        }

        tracing::info!(wallet_id = wallet.id, from = %from, to = ?to, ?summary, "Imported funding payments");
        Ok(summary)
    }
}
