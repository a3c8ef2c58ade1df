use std::sync::Arc;
use trading_core::TimeWindow;

use crate::application::ports::{PositionRepository, TradingProvider, WalletReader};

use super::import_outcome::{ImportError, ImportSummary, require_wallet};

/// Mirror the exchange's positions
///
/// An empty answer means the exchange no longer holds any position for the
/// wallet, so every stored OPEN position is removed.
pub struct ImportPositionsUseCase<W, P>
where
    W: WalletReader,
    P: PositionRepository,
{
    provider: Arc<dyn TradingProvider>,
    wallets: Arc<W>,
    positions: Arc<P>,
}

impl<W, P> ImportPositionsUseCase<W, P>
where
    W: WalletReader,
    P: PositionRepository,
{
    pub fn new(provider: Arc<dyn TradingProvider>, wallets: Arc<W>, positions: Arc<P>) -> Self {
        Self {
            provider,
            wallets,
            positions,
        }
    }

    pub async fn execute(
        &self,
        wallet_address: &str,
        window: TimeWindow,
    ) -> Result<ImportSummary, ImportError> {
        let provider = self.provider.provider();
        let wallet = require_wallet(self.wallets.as_ref(), wallet_address, provider).await?;

        let positions = match self.provider.get_positions(&wallet.address, window).await {
            Ok(positions) => positions,
            Err(e) => {
                tracing::error!(wallet_id = wallet.id, %window, error = %e, "Unable to fetch positions");
                return Ok(ImportSummary::aborted());
            }
        };

        if positions.is_empty() {
            let deleted = self.positions.delete_open(wallet.id).await;
            tracing::info!(
                wallet_id = wallet.id,
                %window,
                deleted,
                "No positions reported, removed zombie positions"
            );
            return Ok(ImportSummary {
                deleted,
                ..Default::default()
            });
        }

        let mut summary = ImportSummary::fetched(positions.len());
        for position in &positions {
            match self.positions.upsert(wallet.id, position).await {
                (_, true) => summary.created += 1,
                (_, false) => summary.refreshed += 1,
            }
        }

        tracing::info!(wallet_id = wallet.id, %window, ?summary, "Finished importing positions");
        Ok(summary)
    }
}
