use std::collections::HashMap;
use std::sync::Arc;
use trading_core::TradingProviderId;

use super::{DydxProvider, HyperliquidProvider};
use crate::application::ports::{
    DydxGateway, HyperliquidGateway, PositionReader, ProviderError, TradingProvider,
};

/// Resolves a provider id to its adapter
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<TradingProviderId, Arc<dyn TradingProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with an adapter for every supported exchange
    pub fn with_defaults(
        dydx: Arc<dyn DydxGateway>,
        hyperliquid: Arc<dyn HyperliquidGateway>,
        positions: Arc<dyn PositionReader>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DydxProvider::new(dydx, positions)));
        registry.register(Arc::new(HyperliquidProvider::new(hyperliquid)));
        registry
    }

    /// Add or replace the adapter for `provider.provider()`
    pub fn register(&mut self, provider: Arc<dyn TradingProvider>) {
        self.providers.insert(provider.provider(), provider);
    }

    pub fn create(&self, id: TradingProviderId) -> Result<Arc<dyn TradingProvider>, ProviderError> {
        self.providers
            .get(&id)
            .cloned()
            .ok_or_else(|| ProviderError::ProviderNotSupported(id.to_string()))
    }

    /// Registered provider ids in declaration order
    pub fn provider_ids(&self) -> Vec<TradingProviderId> {
        TradingProviderId::ALL
            .into_iter()
            .filter(|id| self.providers.contains_key(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::{DydxConfig, HyperliquidConfig};
    use crate::infrastructure::{DydxRestClient, HyperliquidRestClient, InMemoryPositionRepository};

    fn registry() -> ProviderRegistry {
        ProviderRegistry::with_defaults(
            Arc::new(DydxRestClient::new(&DydxConfig::default())),
            Arc::new(HyperliquidRestClient::new(&HyperliquidConfig::default())),
            Arc::new(InMemoryPositionRepository::new()),
        )
    }

    #[test]
    fn test_create_is_total_over_provider_ids() {
        let registry = registry();
        for id in TradingProviderId::ALL {
            let provider = registry.create(id).unwrap();
            assert_eq!(provider.provider(), id);
        }
        assert_eq!(registry.provider_ids(), TradingProviderId::ALL.to_vec());
    }

    #[test]
    fn test_unregistered_provider_is_not_supported() {
        let result = ProviderRegistry::new().create(TradingProviderId::Dydx);
        assert!(matches!(result, Err(ProviderError::ProviderNotSupported(_))));
    }
}
