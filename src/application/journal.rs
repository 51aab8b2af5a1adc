use crate::application::report::JournalReport;
use crate::application::state::{Action, AppState, Event, StorageKey, Transition, reduce};
use crate::domain::auth::Session;
use crate::domain::errors::{JournalError, StorageError};
use crate::domain::exchange::LinkRecord;
use crate::domain::journal::{Entry, EntryDraft};
use crate::domain::performance::PerformanceAnalysis;
use crate::domain::ports::KeyValueStore;
use crate::domain::settings::Settings;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

/// The journal: owned state plus the store it is persisted to.
///
/// Every mutation is computed by `reduce`, written to the store, and only
/// then committed in memory. When one of several keys fails to write, the
/// keys already written are restored from the committed state.
pub struct Journal<S: KeyValueStore> {
    store: S,
    state: AppState,
}

impl<S: KeyValueStore> Journal<S> {
    pub fn open(store: S) -> Self {
        let state = AppState::load(&store);
        info!(
            "Journal loaded: {} entries, {} users, session={}",
            state.entries.len(),
            state.users.len(),
            state.session.as_ref().map(|s| s.id.as_str()).unwrap_or("none")
        );
        Self { store, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn entries(&self) -> &[Entry] {
        &self.state.entries
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Event, JournalError> {
        let Transition {
            state,
            dirty,
            event,
        } = reduce(&self.state, action, Utc::now())?;

        for (idx, key) in dirty.iter().enumerate() {
            if let Err(e) = self.persist(&state, *key) {
                self.restore(&dirty[..idx]);
                return Err(e.into());
            }
        }

        self.state = state;
        Ok(event)
    }

    fn restore(&self, written: &[StorageKey]) {
        for key in written {
            match self.persist(&self.state, *key) {
                Ok(()) => debug!("Restored {} after a failed write", key.as_str()),
                Err(e) => error!("Could not restore {}: {}", key.as_str(), e),
            }
        }
    }

    fn persist(&self, state: &AppState, key: StorageKey) -> Result<(), StorageError> {
        let encoded = state.encode(key).map_err(|source| StorageError::Encode {
            key: key.as_str().to_string(),
            source,
        })?;
        self.store.set(key.as_str(), &encoded).inspect_err(|e| {
            warn!("Persisting {} failed: {}", key.as_str(), e);
        })
    }

    pub fn add_entry(&mut self, draft: EntryDraft) -> Result<Entry, JournalError> {
        match self.dispatch(Action::AddEntry(draft))? {
            Event::EntryAdded(entry) => {
                info!(
                    "Recorded {} {} {} on {}",
                    entry.symbol, entry.side, entry.pnl, entry.date
                );
                Ok(entry)
            }
            other => unreachable!("add produced {:?}", other),
        }
    }

    /// Remove an entry by id. Unknown ids are not an error.
    pub fn remove_entry(&mut self, id: &str) -> Result<Option<Entry>, JournalError> {
        match self.dispatch(Action::RemoveEntry { id: id.to_string() })? {
            Event::EntryRemoved(removed) => Ok(removed),
            other => unreachable!("remove produced {:?}", other),
        }
    }

    pub fn save_settings(
        &mut self,
        currency: &str,
        initial_equity: &str,
    ) -> Result<Settings, JournalError> {
        match self.dispatch(Action::SaveSettings {
            currency: currency.to_string(),
            initial_equity: initial_equity.to_string(),
        })? {
            Event::SettingsSaved(settings) => {
                info!(
                    "Settings saved: ccy={}, initial equity={}",
                    settings.ccy, settings.initial_equity
                );
                Ok(settings)
            }
            other => unreachable!("settings produced {:?}", other),
        }
    }

    /// Create an account and log straight into it.
    pub fn signup(
        &mut self,
        username: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Session, JournalError> {
        match self.dispatch(Action::Signup {
            username: username.to_string(),
            password: password.to_string(),
            confirm: confirm.to_string(),
        })? {
            Event::SignedUp(session) => {
                info!("Signed up and logged in as {}", session.id);
                Ok(session)
            }
            other => unreachable!("signup produced {:?}", other),
        }
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<Session, JournalError> {
        match self.dispatch(Action::Login {
            username: username.to_string(),
            password: password.to_string(),
        })? {
            Event::LoggedIn(session) => {
                info!("Logged in as {}", session.id);
                Ok(session)
            }
            other => unreachable!("login produced {:?}", other),
        }
    }

    pub fn logout(&mut self) -> Result<(), JournalError> {
        self.dispatch(Action::Logout)?;
        info!("Logged out");
        Ok(())
    }

    pub fn record_link(&mut self, exchange: &str) -> Result<LinkRecord, JournalError> {
        match self.dispatch(Action::RecordLink {
            exchange: exchange.to_string(),
        })? {
            Event::Linked { exchange, record } => {
                info!("{} marked as linked", exchange);
                Ok(record)
            }
            other => unreachable!("link produced {:?}", other),
        }
    }

    pub fn analysis(&self) -> PerformanceAnalysis {
        PerformanceAnalysis::analyze(&self.state.entries, self.state.settings.initial_equity)
    }

    /// Report for display or export, with KRW figures when a rate is known.
    pub fn report(&self, krw_per_usdt: Option<Decimal>) -> JournalReport {
        JournalReport::build(&self.state.entries, &self.state.settings, krw_per_usdt)
    }
}
