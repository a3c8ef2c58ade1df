use std::sync::Arc;
use thiserror::Error;
use trading_core::TradingProviderId;

use crate::application::ports::WalletRepository;
use crate::domain::AccountingWallet;

#[derive(Debug, Clone)]
pub struct RegisterWalletResult {
    pub wallet: AccountingWallet,
    pub created: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterWalletError {
    #[error("Wallet address must not be empty")]
    EmptyAddress,
}

/// Register a wallet for accounting; registering twice returns the same wallet
pub struct RegisterWalletUseCase<W>
where
    W: WalletRepository,
{
    wallets: Arc<W>,
}

impl<W> RegisterWalletUseCase<W>
where
    W: WalletRepository,
{
    pub fn new(wallets: Arc<W>) -> Self {
        Self { wallets }
    }

    pub async fn execute(
        &self,
        wallet_address: &str,
        provider: TradingProviderId,
    ) -> Result<RegisterWalletResult, RegisterWalletError> {
        let address = wallet_address.trim();
        if address.is_empty() {
            return Err(RegisterWalletError::EmptyAddress);
        }

        let (wallet, created) = self.wallets.get_or_create(address, provider).await;
        if created {
            tracing::info!(wallet_id = wallet.id, wallet_address = address, %provider, "Registered accounting wallet");
        }

        Ok(RegisterWalletResult { wallet, created })
    }
}
