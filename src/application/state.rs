//! Owned application state and its update rules.
//!
//! `AppState` is plain data. `reduce` takes the current state plus an
//! `Action` and returns the next state together with the storage keys that
//! changed; it never touches storage itself. Loading goes through the
//! `KeyValueStore` port and falls back to defaults key by key.

use crate::domain::auth::{self, Session, UserMap};
use crate::domain::errors::JournalError;
use crate::domain::exchange::{LinkMap, LinkRecord};
use crate::domain::journal::{Entry, EntryDraft};
use crate::domain::ports::KeyValueStore;
use crate::domain::settings::Settings;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Settings,
    Entries,
    Auth,
    ApiLinks,
    Users,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Settings,
        StorageKey::Entries,
        StorageKey::Auth,
        StorageKey::ApiLinks,
        StorageKey::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Settings => "dj_settings_v1",
            StorageKey::Entries => "dj_entries_v1",
            StorageKey::Auth => "dj_auth_v1",
            StorageKey::ApiLinks => "dj_api_links_v1",
            StorageKey::Users => "dj_users_v1",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub settings: Settings,
    pub entries: Vec<Entry>,
    pub session: Option<Session>,
    pub api_links: LinkMap,
    pub users: UserMap,
}

impl AppState {
    /// Load every key, keeping the default for anything missing or corrupt.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            settings: load_key(store, StorageKey::Settings),
            entries: load_entries(store),
            session: load_key(store, StorageKey::Auth),
            api_links: load_key(store, StorageKey::ApiLinks),
            users: load_key(store, StorageKey::Users),
        }
    }

    /// JSON document stored under `key`
    pub fn encode(&self, key: StorageKey) -> Result<String, serde_json::Error> {
        match key {
            StorageKey::Settings => serde_json::to_string(&self.settings),
            StorageKey::Entries => serde_json::to_string(&self.entries),
            StorageKey::Auth => serde_json::to_string(&self.session),
            StorageKey::ApiLinks => serde_json::to_string(&self.api_links),
            StorageKey::Users => serde_json::to_string(&self.users),
        }
    }

    pub fn is_linked(&self, exchange: &str) -> bool {
        self.api_links.get(exchange).is_some_and(|l| l.linked)
    }
}

/// Entries are recovered record by record so one bad row does not cost the
/// rest of the history.
fn load_entries(store: &dyn KeyValueStore) -> Vec<Entry> {
    let records: Vec<Value> = load_key(store, StorageKey::Entries);
    records
        .into_iter()
        .enumerate()
        .filter_map(|(idx, record)| match serde_json::from_value::<Entry>(record) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Dropping stored entry #{}: {}", idx, e);
                None
            }
        })
        .collect()
}

fn load_key<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: StorageKey) -> T {
    let raw = match store.get(key.as_str()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!("Could not read {}: {}. Using defaults.", key.as_str(), e);
            return T::default();
        }
    };

    // A stored `null` counts as absent
    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!("Stored {} is corrupt ({}). Using defaults.", key.as_str(), e);
            T::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    AddEntry(EntryDraft),
    RemoveEntry { id: String },
    SaveSettings { currency: String, initial_equity: String },
    Signup { username: String, password: String, confirm: String },
    Login { username: String, password: String },
    Logout,
    RecordLink { exchange: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    EntryAdded(Entry),
    EntryRemoved(Option<Entry>),
    SettingsSaved(Settings),
    SignedUp(Session),
    LoggedIn(Session),
    LoggedOut,
    Linked { exchange: String, record: LinkRecord },
}

#[derive(Debug)]
pub struct Transition {
    pub state: AppState,
    pub dirty: Vec<StorageKey>,
    pub event: Event,
}

/// Compute the next state for `action`. Rejected actions leave nothing
/// behind: the caller still holds the untouched previous state.
pub fn reduce(
    current: &AppState,
    action: Action,
    now: DateTime<Utc>,
) -> Result<Transition, JournalError> {
    let mut state = current.clone();

    let (dirty, event) = match action {
        Action::AddEntry(draft) => {
            let entry = draft.into_entry()?;
            state.entries.push(entry.clone());
            (vec![StorageKey::Entries], Event::EntryAdded(entry))
        }
        Action::RemoveEntry { id } => {
            let removed = state
                .entries
                .iter()
                .position(|e| e.id == id)
                .map(|idx| state.entries.remove(idx));
            if removed.is_none() {
                debug!("No entry with id {} to remove", id);
            }
            (vec![StorageKey::Entries], Event::EntryRemoved(removed))
        }
        Action::SaveSettings {
            currency,
            initial_equity,
        } => {
            state.settings = state.settings.with_update(&currency, &initial_equity);
            (
                vec![StorageKey::Settings],
                Event::SettingsSaved(state.settings.clone()),
            )
        }
        Action::Signup {
            username,
            password,
            confirm,
        } => {
            let (id, record) = auth::register(&state.users, &username, &password, &confirm, now)?;
            let session = Session::for_user(&id);
            state.users.insert(id, record);
            state.session = Some(session.clone());
            (
                vec![StorageKey::Users, StorageKey::Auth],
                Event::SignedUp(session),
            )
        }
        Action::Login { username, password } => {
            let session = auth::authenticate(&state.users, &username, &password)?;
            state.session = Some(session.clone());
            (vec![StorageKey::Auth], Event::LoggedIn(session))
        }
        Action::Logout => {
            state.session = None;
            (vec![StorageKey::Auth], Event::LoggedOut)
        }
        Action::RecordLink { exchange } => {
            let record = LinkRecord {
                linked: true,
                at: now,
            };
            state.api_links.insert(exchange.clone(), record.clone());
            (
                vec![StorageKey::ApiLinks],
                Event::Linked { exchange, record },
            )
        }
    };

    Ok(Transition {
        state,
        dirty,
        event,
    })
}
