use crate::application::journal::Journal;
use crate::domain::errors::JournalError;
use crate::domain::exchange::{HANDSHAKE_DELAY, LinkRecord, LinkRequest};
use crate::domain::ports::KeyValueStore;
use std::time::Duration;
use tracing::{info, warn};

/// Demo exchange linker: validates the typed keys, waits out a fake
/// handshake, then records the exchange as linked. Keys are dropped with
/// the request.
pub struct ExchangeLinker {
    delay: Duration,
}

impl Default for ExchangeLinker {
    fn default() -> Self {
        Self::new(HANDSHAKE_DELAY)
    }
}

impl ExchangeLinker {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn link<S: KeyValueStore>(
        &self,
        journal: &mut Journal<S>,
        request: LinkRequest,
    ) -> Result<LinkRecord, JournalError> {
        request.validate()?;

        info!("Linking {}...", request.exchange);
        tokio::time::sleep(self.delay).await;

        if let Err(e) = request.handshake() {
            warn!("{}", e);
            return Err(e.into());
        }
        journal.record_link(&request.exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::LinkError;
    use crate::infrastructure::storage::InMemoryKeyValueStore;

    #[tokio::test]
    async fn test_link_records_status_without_keys() {
        let mut journal = Journal::open(InMemoryKeyValueStore::new());
        let linker = ExchangeLinker::new(Duration::ZERO);

        let record = linker
            .link(&mut journal, LinkRequest::new("Upbit", "access-key-1", "secret-key-1", ""))
            .await
            .unwrap();
        assert!(record.linked);
        assert!(journal.state().is_linked("Upbit"));

        let stored = journal.store().raw("dj_api_links_v1").unwrap();
        assert!(stored.contains("Upbit"));
        assert!(!stored.contains("access-key-1"));
    }

    #[tokio::test]
    async fn test_rejected_handshake_records_nothing() {
        let mut journal = Journal::open(InMemoryKeyValueStore::new());
        let linker = ExchangeLinker::new(Duration::ZERO);

        let result = linker
            .link(&mut journal, LinkRequest::new("Binance", "fail-key-1", "secret-key-1", ""))
            .await;
        assert!(matches!(
            result,
            Err(JournalError::Link(LinkError::Rejected { .. }))
        ));
        assert!(!journal.state().is_linked("Binance"));
    }
}
