//! CurrencyRepository unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use futures::StreamExt;
    use tokio::sync::Notify;

    use devises_types::{
        AppError, CurrencyRecord, CurrencyStore, ExchangeError, ExchangeResponse, ExchangeSource,
        SeedState, StoreError,
    };

    use crate::CurrencyRepository;

    // ─────────────────────────────────────────────────────────────────────────────
    // Test doubles
    // ─────────────────────────────────────────────────────────────────────────────

    /// Simple in-memory store that records every insert.
    pub struct MockStore {
        rows: Mutex<Vec<CurrencyRecord>>,
        inserts: Mutex<Vec<Vec<CurrencyRecord>>>,
        count_calls: AtomicUsize,
        fail_count: bool,
        fail_insert: bool,
        fail_read: bool,
    }

    impl MockStore {
        pub fn new() -> Self {
            Self::with_rows(Vec::new())
        }

        pub fn with_rows(rows: Vec<CurrencyRecord>) -> Self {
            Self {
                rows: Mutex::new(rows),
                inserts: Mutex::new(Vec::new()),
                count_calls: AtomicUsize::new(0),
                fail_count: false,
                fail_insert: false,
                fail_read: false,
            }
        }

        pub fn failing_insert() -> Self {
            Self {
                fail_insert: true,
                ..Self::new()
            }
        }

        pub fn failing_count() -> Self {
            Self {
                fail_count: true,
                ..Self::new()
            }
        }

        pub fn failing_read() -> Self {
            Self {
                fail_read: true,
                ..Self::new()
            }
        }

        pub fn insert_batches(&self) -> Vec<Vec<CurrencyRecord>> {
            self.inserts.lock().unwrap().clone()
        }

        pub fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CurrencyStore for MockStore {
        async fn count_currencies(&self) -> Result<i64, StoreError> {
            self.count_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_count {
                return Err(StoreError::Database("no such table: currencies".into()));
            }
            Ok(self.rows.lock().unwrap().len() as i64)
        }

        async fn all_currencies(&self) -> Result<Vec<CurrencyRecord>, StoreError> {
            if self.fail_read {
                return Err(StoreError::Database("disk I/O error".into()));
            }
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn insert_all(&self, records: &[CurrencyRecord]) -> Result<(), StoreError> {
            self.inserts.lock().unwrap().push(records.to_vec());
            if self.fail_insert {
                return Err(StoreError::Database("database is locked".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            for record in records {
                let id = rows.len() as i64 + 1;
                rows.push(CurrencyRecord::stored(id, &record.code, &record.name));
            }
            Ok(())
        }
    }

    /// Exchange source answering every request the same way.
    pub struct MockSource {
        response: Option<ExchangeResponse>,
        calls: AtomicUsize,
        last_codes: Mutex<Option<String>>,
    }

    impl MockSource {
        pub fn responding(response: ExchangeResponse) -> Self {
            Self {
                response: Some(response),
                calls: AtomicUsize::new(0),
                last_codes: Mutex::new(None),
            }
        }

        /// Source whose transport always fails.
        pub fn unreachable() -> Self {
            Self {
                response: None,
                calls: AtomicUsize::new(0),
                last_codes: Mutex::new(None),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ExchangeSource for MockSource {
        async fn request_exchange(&self, codes: &str) -> Result<ExchangeResponse, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_codes.lock().unwrap() = Some(codes.to_string());
            self.response
                .clone()
                .ok_or_else(|| ExchangeError::Transport("connection reset".into()))
        }
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    /// Exchange source that never answers.
    pub struct PendingSource {
        started: Arc<Notify>,
        dropped: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ExchangeSource for PendingSource {
        async fn request_exchange(&self, _codes: &str) -> Result<ExchangeResponse, ExchangeError> {
            let _flag = DropFlag(Arc::clone(&self.dropped));
            self.started.notify_one();
            futures::future::pending().await
        }
    }

    fn reference_dataset() -> Vec<CurrencyRecord> {
        vec![
            CurrencyRecord::new("AUD", "Australian Dollar"),
            CurrencyRecord::new("EUR", "Euro"),
            CurrencyRecord::new("GBP", "British Pound"),
            CurrencyRecord::new("USD", "United States Dollar"),
        ]
    }

    fn ok_source() -> MockSource {
        MockSource::responding(ExchangeResponse::success([("USD", 1.0), ("EUR", 0.9)]))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Seeding
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_new_does_not_touch_store() {
        let repo = CurrencyRepository::new(MockStore::new(), ok_source(), reference_dataset());

        assert_eq!(repo.seed_state(), SeedState::NotChecked);
        assert_eq!(repo.store().count_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_seeds_empty_store_once_with_full_dataset() {
        let repo =
            CurrencyRepository::bootstrap(MockStore::new(), ok_source(), reference_dataset()).await;

        assert_eq!(repo.seed_state(), SeedState::Populated);
        assert_eq!(repo.store().insert_batches(), vec![reference_dataset()]);
    }

    #[tokio::test]
    async fn test_bootstrap_skips_populated_store() {
        let store = MockStore::with_rows(vec![CurrencyRecord::stored(1, "CLP", "Chilean Peso")]);

        let repo = CurrencyRepository::bootstrap(store, ok_source(), reference_dataset()).await;

        assert_eq!(repo.seed_state(), SeedState::AlreadyPopulated);
        assert!(repo.store().insert_batches().is_empty());
        assert_eq!(repo.store().row_count(), 1);
    }

    #[tokio::test]
    async fn test_seeding_twice_never_duplicates_rows() {
        let repo =
            CurrencyRepository::bootstrap(MockStore::new(), ok_source(), reference_dataset()).await;

        let second = repo.ensure_seeded().await;

        assert_eq!(second, SeedState::Populated);
        assert_eq!(repo.store().insert_batches().len(), 1);
        assert_eq!(repo.store().row_count(), reference_dataset().len());
        assert_eq!(repo.store().count_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_seeding_inserts_once() {
        let repo = CurrencyRepository::new(MockStore::new(), ok_source(), reference_dataset());
        let shared = repo.clone();

        let (a, b, c) = tokio::join!(
            repo.ensure_seeded(),
            repo.ensure_seeded(),
            shared.ensure_seeded()
        );

        assert_eq!([a, b, c], [SeedState::Populated; 3]);
        assert_eq!(repo.store().insert_batches().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_failure_is_swallowed_and_not_retried() {
        let repo = CurrencyRepository::bootstrap(
            MockStore::failing_insert(),
            ok_source(),
            reference_dataset(),
        )
        .await;

        assert_eq!(repo.seed_state(), SeedState::Failed);
        assert_eq!(repo.ensure_seeded().await, SeedState::Failed);
        assert_eq!(repo.store().insert_batches().len(), 1);

        // Reads still work; the list is simply empty.
        assert!(repo.currency_list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_count_failure_is_swallowed() {
        let repo = CurrencyRepository::bootstrap(
            MockStore::failing_count(),
            ok_source(),
            reference_dataset(),
        )
        .await;

        assert_eq!(repo.seed_state(), SeedState::Failed);
        assert!(repo.store().insert_batches().is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency list
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_currency_list_matches_seed_one_to_one() {
        let repo =
            CurrencyRepository::bootstrap(MockStore::new(), ok_source(), reference_dataset()).await;

        let list = repo.currency_list().await.unwrap();

        assert_eq!(list.len(), reference_dataset().len());
        for (currency, record) in list.iter().zip(reference_dataset()) {
            assert_eq!(currency.code, record.code);
            assert_eq!(currency.name, record.name);
        }
    }

    #[tokio::test]
    async fn test_currency_list_keeps_store_order() {
        let store = MockStore::with_rows(vec![
            CurrencyRecord::stored(1, "ZAR", "South African Rand"),
            CurrencyRecord::stored(2, "AUD", "Australian Dollar"),
            CurrencyRecord::stored(3, "MXN", "Mexican Peso"),
        ]);
        let repo = CurrencyRepository::new(store, ok_source(), Vec::new());

        let codes: Vec<String> = repo
            .currency_list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.code)
            .collect();

        assert_eq!(codes, vec!["ZAR", "AUD", "MXN"]);
    }

    #[tokio::test]
    async fn test_currency_list_propagates_store_error() {
        let repo = CurrencyRepository::new(MockStore::failing_read(), ok_source(), Vec::new());

        let result = repo.currency_list().await;

        assert!(matches!(
            result,
            Err(AppError::Store(StoreError::Database(_)))
        ));
    }

    #[tokio::test]
    async fn test_get_currency_list_yields_once() {
        let repo =
            CurrencyRepository::bootstrap(MockStore::new(), ok_source(), reference_dataset()).await;

        let mut stream = repo.get_currency_list();

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.len(), reference_dataset().len());
        assert!(stream.next().await.is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Available exchange
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_available_exchange_copies_rates() {
        let repo = CurrencyRepository::new(MockStore::new(), ok_source(), Vec::new());

        let exchange = repo.available_exchange("USD,EUR").await.unwrap();

        assert_eq!(exchange.rates.len(), 2);
        assert_eq!(exchange.rate("USD"), Some(1.0));
        assert_eq!(exchange.rate("EUR"), Some(0.9));
        assert_eq!(
            repo.source().last_codes.lock().unwrap().as_deref(),
            Some("USD,EUR")
        );
    }

    #[tokio::test]
    async fn test_available_exchange_unsuccessful_response() {
        let source = MockSource::responding(ExchangeResponse::failure(
            101,
            Some("invalid access key".into()),
        ));
        let repo = CurrencyRepository::new(MockStore::new(), source, Vec::new());

        let result = repo.available_exchange("USD,EUR").await;

        match result {
            Err(AppError::RemoteExchange { detail }) => {
                assert_eq!(detail.as_deref(), Some("[101] invalid access key"));
            }
            other => panic!("expected RemoteExchange, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_available_exchange_routes_failure_through_stream() {
        let source = MockSource::responding(ExchangeResponse::failure(202, None));
        let repo = CurrencyRepository::new(MockStore::new(), source, Vec::new());

        let mut stream = repo.get_available_exchange("XXX");

        assert!(matches!(
            stream.next().await,
            Some(Err(AppError::RemoteExchange { .. }))
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_get_available_exchange_success() {
        let repo = CurrencyRepository::new(MockStore::new(), ok_source(), Vec::new());

        let exchange = repo.get_available_exchange("USD,EUR").first().await.unwrap();

        assert_eq!(exchange.rate("EUR"), Some(0.9));
        assert_eq!(repo.source().calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_codes_rejected_without_request() {
        let repo = CurrencyRepository::new(MockStore::new(), ok_source(), Vec::new());

        let result = repo.available_exchange("  ").await;

        assert!(matches!(result, Err(AppError::InvalidCurrencyCodes(_))));
        assert_eq!(repo.source().calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let repo = CurrencyRepository::new(MockStore::new(), MockSource::unreachable(), Vec::new());

        let result = repo.available_exchange("USD").await;

        assert!(matches!(
            result,
            Err(AppError::Exchange(ExchangeError::Transport(_)))
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Subscription lifetime
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_dropping_subscription_aborts_request() {
        let started = Arc::new(Notify::new());
        let dropped = Arc::new(AtomicBool::new(false));
        let source = PendingSource {
            started: Arc::clone(&started),
            dropped: Arc::clone(&dropped),
        };
        let repo = CurrencyRepository::new(MockStore::new(), source, Vec::new());

        let subscription = repo.get_available_exchange("USD");
        started.notified().await;
        drop(subscription);

        for _ in 0..100 {
            if dropped.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancelled_subscription_reports_cancelled() {
        let source = PendingSource {
            started: Arc::new(Notify::new()),
            dropped: Arc::new(AtomicBool::new(false)),
        };
        let repo = CurrencyRepository::new(MockStore::new(), source, Vec::new());

        let mut subscription = repo.get_available_exchange("USD");
        subscription.cancel();

        assert!(matches!(
            subscription.next().await,
            Some(Err(AppError::Cancelled))
        ));
    }
}
