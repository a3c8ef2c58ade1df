pub mod export;
pub mod rest;

pub use rest::{AppState, create_router};
