//! Exchange source selection.

use async_trait::async_trait;
use devises_client::ExchangeClient;
use devises_types::{ExchangeError, ExchangeResponse, ExchangeSource};
use exchange_rates::StaticExchangeSource;

use crate::config::Config;

/// Live API when an access key is configured, offline table otherwise.
pub enum Source {
    Live(ExchangeClient),
    Offline(StaticExchangeSource),
}

impl Source {
    pub fn from_config(config: &Config) -> Self {
        match &config.exchange_api_key {
            Some(key) => {
                tracing::info!("Using exchange API at {}", config.exchange_api_url);
                Source::Live(ExchangeClient::new(&config.exchange_api_url).with_access_key(key))
            }
            None => {
                tracing::info!("No EXCHANGE_API_KEY set, using offline exchange rates");
                Source::Offline(StaticExchangeSource::new())
            }
        }
    }
}

#[async_trait]
impl ExchangeSource for Source {
    async fn request_exchange(&self, codes: &str) -> Result<ExchangeResponse, ExchangeError> {
        match self {
            Source::Live(client) => client.request_exchange(codes).await,
            Source::Offline(table) => table.request_exchange(codes).await,
        }
    }
}
