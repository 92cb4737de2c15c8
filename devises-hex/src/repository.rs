//! Currency Repository
//!
//! Orchestrates the local store and the remote exchange source.
//! Contains NO infrastructure logic - seeding, mapping and error routing only.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{error, info, instrument, warn};

use devises_types::{
    AppError, AvailableExchange, Currency, CurrencyRecord, CurrencyStore, ExchangeSource,
    SeedState,
};

use crate::subscription::Subscription;

/// Data access for currencies and exchange rates.
///
/// Generic over `S: CurrencyStore` and `X: ExchangeSource` - the adapters are
/// injected at compile time. Cloning is cheap and shares the same state.
pub struct CurrencyRepository<S: CurrencyStore, X: ExchangeSource> {
    inner: Arc<Inner<S, X>>,
}

struct Inner<S, X> {
    store: S,
    source: X,
    seed: Vec<CurrencyRecord>,
    seed_lock: tokio::sync::Mutex<()>,
    seed_state: Mutex<SeedState>,
}

impl<S: CurrencyStore, X: ExchangeSource> Clone for CurrencyRepository<S, X> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CurrencyStore, X: ExchangeSource> CurrencyRepository<S, X> {
    /// Creates a repository without touching the store.
    ///
    /// `seed` is inserted by [`ensure_seeded`](Self::ensure_seeded) if the
    /// store turns out to be empty.
    pub fn new(store: S, source: X, seed: Vec<CurrencyRecord>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                source,
                seed,
                seed_lock: tokio::sync::Mutex::new(()),
                seed_state: Mutex::new(SeedState::NotChecked),
            }),
        }
    }

    /// Creates a repository and waits for seeding to settle.
    ///
    /// Reads issued on the returned repository never race the seed write.
    pub async fn bootstrap(store: S, source: X, seed: Vec<CurrencyRecord>) -> Self {
        let repo = Self::new(store, source, seed);
        repo.ensure_seeded().await;
        repo
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Returns a reference to the underlying exchange source.
    pub fn source(&self) -> &X {
        &self.inner.source
    }

    pub fn seed_state(&self) -> SeedState {
        *self
            .inner
            .seed_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn set_seed_state(&self, state: SeedState) {
        *self
            .inner
            .seed_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = state;
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Seeding
    // ─────────────────────────────────────────────────────────────────────────────

    /// Populates the store from the reference dataset if it holds no rows.
    ///
    /// Runs at most once per repository: after reaching a terminal state later
    /// calls return that state without querying the store. Failures are logged
    /// and reported only through the returned `SeedState::Failed`.
    pub async fn ensure_seeded(&self) -> SeedState {
        let _guard = self.inner.seed_lock.lock().await;

        let current = self.seed_state();
        if current.is_terminal() {
            return current;
        }

        self.set_seed_state(SeedState::Checking);
        let outcome = match self.inner.store.count_currencies().await {
            Ok(0) => {
                self.set_seed_state(SeedState::Populating);
                match self.inner.store.insert_all(&self.inner.seed).await {
                    Ok(()) => {
                        info!(rows = self.inner.seed.len(), "Currency store populated");
                        SeedState::Populated
                    }
                    Err(e) => {
                        error!(error = %e, "Currency store could not be populated");
                        SeedState::Failed
                    }
                }
            }
            Ok(count) => {
                info!(count, "Currency store already populated");
                SeedState::AlreadyPopulated
            }
            Err(e) => {
                error!(error = %e, "Could not count stored currencies");
                SeedState::Failed
            }
        };

        self.set_seed_state(outcome);
        outcome
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists every stored currency in store order.
    #[instrument(skip(self))]
    pub async fn currency_list(&self) -> Result<Vec<Currency>, AppError> {
        let records = self.inner.store.all_currencies().await?;
        Ok(records.into_iter().map(Currency::from).collect())
    }

    /// Looks up exchange rates for a comma-separated list of currency codes.
    #[instrument(skip(self))]
    pub async fn available_exchange(&self, codes: &str) -> Result<AvailableExchange, AppError> {
        if codes.trim().is_empty() {
            return Err(AppError::InvalidCurrencyCodes(codes.to_string()));
        }

        let response = self.inner.source.request_exchange(codes).await?;
        if response.success {
            Ok(AvailableExchange::from(response))
        } else {
            let detail = response.failure_detail();
            warn!(?detail, "Exchange source rejected the request");
            Err(AppError::RemoteExchange { detail })
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Streams
    // ─────────────────────────────────────────────────────────────────────────────

    /// Runs [`currency_list`](Self::currency_list) in the background.
    pub fn get_currency_list(&self) -> Subscription<Vec<Currency>> {
        let repo = self.clone();
        Subscription::spawn(async move { repo.currency_list().await })
    }

    /// Runs [`available_exchange`](Self::available_exchange) in the background.
    pub fn get_available_exchange(
        &self,
        codes: impl Into<String>,
    ) -> Subscription<AvailableExchange> {
        let repo = self.clone();
        let codes = codes.into();
        Subscription::spawn(async move { repo.available_exchange(&codes).await })
    }
}
