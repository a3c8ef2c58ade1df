mod in_memory_funding_payment;
mod in_memory_order;
mod in_memory_order_fill;
mod in_memory_portfolio;
mod in_memory_position;
mod in_memory_wallet;
mod sequence;
mod snapshot;

pub use in_memory_funding_payment::InMemoryFundingPaymentRepository;
pub use in_memory_order::InMemoryOrderRepository;
pub use in_memory_order_fill::InMemoryOrderFillRepository;
pub use in_memory_portfolio::InMemoryPortfolioRepository;
pub use in_memory_position::InMemoryPositionRepository;
pub use in_memory_wallet::InMemoryWalletRepository;
pub use snapshot::{SnapshotError, StoreSnapshot};
