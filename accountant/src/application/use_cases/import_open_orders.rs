use std::collections::HashSet;
use std::sync::Arc;

use crate::application::ports::{OrderRepository, TradingProvider, WalletReader};
use crate::domain::AccountingWallet;

use super::import_outcome::{ImportError, ImportSummary, require_wallet};
use super::order_upsert::import_order;

/// Refresh the wallet's open orders
///
/// Every order the exchange reports as open is imported. Stored orders still
/// in an open status but no longer reported are stale: they are re-fetched
/// too, since they most likely changed state upstream.
pub struct ImportOpenOrdersUseCase<W, O>
where
    W: WalletReader,
    O: OrderRepository,
{
    provider: Arc<dyn TradingProvider>,
    wallets: Arc<W>,
    orders: Arc<O>,
}

impl<W, O> ImportOpenOrdersUseCase<W, O>
where
    W: WalletReader,
    O: OrderRepository,
{
    pub fn new(provider: Arc<dyn TradingProvider>, wallets: Arc<W>, orders: Arc<O>) -> Self {
        Self {
            provider,
            wallets,
            orders,
        }
    }

    pub async fn execute(&self, wallet_address: &str) -> Result<ImportSummary, ImportError> {
        let provider = self.provider.provider();
        let wallet = require_wallet(self.wallets.as_ref(), wallet_address, provider).await?;

        let open_order_ids = match self.provider.get_open_order_ids(&wallet.address).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(wallet_address, %provider, error = %e, "Unable to fetch open orders");
                return Ok(ImportSummary::aborted());
            }
        };

        tracing::info!(
            wallet_id = wallet.id,
            %provider,
            count = open_order_ids.len(),
            "Fetched open order ids to import"
        );

        let mut summary = ImportSummary::fetched(open_order_ids.len());
        for order_id in &open_order_ids {
            self.import_one(&wallet, order_id, &mut summary).await;
        }

        let reported: HashSet<&str> = open_order_ids.iter().map(String::as_str).collect();
        let stale_order_ids: Vec<String> = self
            .orders
            .list_order_ids_with_status(wallet.id, self.provider.order_open_statuses())
            .await
            .into_iter()
            .filter(|order_id| !reported.contains(order_id.as_str()))
            .collect();

        tracing::info!(
            wallet_id = wallet.id,
            count = stale_order_ids.len(),
            "Found stale open orders to re-check"
        );

        for order_id in &stale_order_ids {
            self.import_one(&wallet, order_id, &mut summary).await;
        }

        tracing::info!(wallet_id = wallet.id, ?summary, "Finished importing open orders");
        Ok(summary)
    }

    async fn import_one(
        &self,
        wallet: &AccountingWallet,
        order_id: &str,
        summary: &mut ImportSummary,
    ) {
        match import_order(self.provider.as_ref(), self.orders.as_ref(), wallet, order_id).await {
            Ok((_, true)) => summary.created += 1,
            Ok((_, false)) => summary.refreshed += 1,
            Err(e) => {
                tracing::warn!(order_id, error = %e, "Unable to import order, continuing");
                summary.skipped += 1;
            }
        }
    }
}
