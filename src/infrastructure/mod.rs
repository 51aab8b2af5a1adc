pub mod coingecko;
pub mod export;
pub mod http_client_factory;
pub mod sentiment;
pub mod storage;

pub use coingecko::CoinGeckoClient;
pub use http_client_factory::HttpClientFactory;
pub use sentiment::AlternativeMeSentimentProvider;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
