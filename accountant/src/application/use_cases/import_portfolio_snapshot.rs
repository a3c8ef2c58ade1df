use std::sync::Arc;

use crate::application::ports::{PortfolioRepository, PositionReader, TradingProvider, WalletReader};
use crate::domain::Clock;

use super::import_outcome::{ImportError, ImportSummary, require_wallet};

/// Record today's equity and open position value for the wallet
pub struct ImportPortfolioSnapshotUseCase<C, W, P, PF>
where
    C: Clock,
    W: WalletReader,
    P: PositionReader,
    PF: PortfolioRepository,
{
    clock: Arc<C>,
    provider: Arc<dyn TradingProvider>,
    wallets: Arc<W>,
    positions: Arc<P>,
    portfolios: Arc<PF>,
}

impl<C, W, P, PF> ImportPortfolioSnapshotUseCase<C, W, P, PF>
where
    C: Clock,
    W: WalletReader,
    P: PositionReader,
    PF: PortfolioRepository,
{
    pub fn new(
        clock: Arc<C>,
        provider: Arc<dyn TradingProvider>,
        wallets: Arc<W>,
        positions: Arc<P>,
        portfolios: Arc<PF>,
    ) -> Self {
        Self {
            clock,
            provider,
            wallets,
            positions,
            portfolios,
        }
    }

    pub async fn execute(&self, wallet_address: &str) -> Result<ImportSummary, ImportError> {
        let provider = self.provider.provider();
        let wallet = require_wallet(self.wallets.as_ref(), wallet_address, provider).await?;

        let account = match self.provider.get_account_portfolio(&wallet.address).await {
            Ok(account) => account,
            Err(e) => {
                tracing::error!(wallet_id = wallet.id, error = %e, "Unable to fetch wallet portfolio");
                return Ok(ImportSummary::aborted());
            }
        };

        let portfolio_value = self.positions.open_positions_value(wallet.id).await;
        let (snapshot, created) = self
            .portfolios
            .upsert(wallet.id, self.clock.today(), account.equity_value, portfolio_value)
            .await;

        tracing::info!(
            wallet_id = wallet.id,
            portfolio_id = snapshot.id,
            date = %snapshot.portfolio_date,
            equity = %snapshot.equity_value,
            value = %snapshot.portfolio_value,
            "Updated wallet portfolio"
        );

        Ok(ImportSummary {
            fetched: 1,
            created: usize::from(created),
            refreshed: usize::from(!created),
            ..Default::default()
        })
    }
}
