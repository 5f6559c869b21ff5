pub mod fallback;
pub mod handlers;
pub mod models;
pub mod store;

pub use models::{MarketContext, MarketSnapshot};
pub use store::MarketDataStore;
