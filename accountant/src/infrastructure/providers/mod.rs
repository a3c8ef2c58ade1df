//! Exchange adapters
//!
//! Each adapter owns its gateway, validates the raw JSON against a serde
//! schema and maps the exchange vocabulary through literal decode tables.

mod decode;
mod dydx;
mod hyperliquid;
mod registry;

pub use dydx::DydxProvider;
pub use hyperliquid::HyperliquidProvider;
pub use registry::ProviderRegistry;

pub mod vocabulary {
    //! Decode tables, exposed for tooling and tests
    pub use super::dydx::{
        ORDER_SIDES as DYDX_ORDER_SIDES, ORDER_STATUSES as DYDX_ORDER_STATUSES,
        ORDER_TYPES as DYDX_ORDER_TYPES, POSITION_SIDES as DYDX_POSITION_SIDES,
        POSITION_STATUSES as DYDX_POSITION_STATUSES,
    };
    pub use super::hyperliquid::{
        ORDER_DIRECTIONS as HYPERLIQUID_ORDER_DIRECTIONS, ORDER_SIDES as HYPERLIQUID_ORDER_SIDES,
        ORDER_STATUSES as HYPERLIQUID_ORDER_STATUSES, ORDER_TYPES as HYPERLIQUID_ORDER_TYPES,
    };
}
