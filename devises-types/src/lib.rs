//! # Devises Types
//!
//! Domain types and port traits for the currency data-access layer.
//! This crate has ZERO external IO dependencies - only data structures,
//! conversion rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain values (Currency, AvailableExchange)
//! - `ports/` - Trait definitions that store and exchange adapters must implement
//! - `dto/` - Persisted rows and wire responses crossing the port boundaries
//! - `error/` - Store, exchange and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{AvailableExchange, Currency, SeedState};
pub use dto::{ApiFailure, CurrencyRecord, ExchangeResponse};
pub use error::{AppError, ExchangeError, StoreError};
pub use ports::{CurrencyStore, ExchangeSource};
