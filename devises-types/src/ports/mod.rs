//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The repository layer depends on these traits, not concrete implementations.

mod exchange;
mod store;

pub use exchange::ExchangeSource;
pub use store::CurrencyStore;
