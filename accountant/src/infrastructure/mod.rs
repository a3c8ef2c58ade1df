pub mod clock;
pub mod config;
pub mod gateways;
pub mod providers;
pub mod repositories;

pub use clock::{FixedClock, SystemClock};
pub use config::{AccountantConfig, ConfigError};
pub use gateways::{DydxRestClient, HyperliquidRestClient};
pub use providers::{DydxProvider, HyperliquidProvider, ProviderRegistry};
pub use repositories::{
    InMemoryFundingPaymentRepository, InMemoryOrderFillRepository, InMemoryOrderRepository,
    InMemoryPortfolioRepository, InMemoryPositionRepository, InMemoryWalletRepository,
    SnapshotError, StoreSnapshot,
};
