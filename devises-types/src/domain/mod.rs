//! Domain models for the currency data-access layer.

pub mod currency;
pub mod exchange;
pub mod seed;

pub use currency::Currency;
pub use exchange::AvailableExchange;
pub use seed::SeedState;
