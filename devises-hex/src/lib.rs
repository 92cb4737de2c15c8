//! # Devises Hex
//!
//! Repository layer of the currency data-access stack.
//!
//! ## Architecture
//!
//! - `repository` - `CurrencyRepository` (seeding, reads, exchange lookups)
//! - `subscription` - single-shot streams handed to the presentation layer
//!
//! The repository is generic over `S: CurrencyStore` and `X: ExchangeSource`,
//! allowing different adapters to be injected.

pub mod repository;
pub mod subscription;

#[cfg(test)]
mod repository_tests;

pub use repository::CurrencyRepository;
pub use subscription::Subscription;
