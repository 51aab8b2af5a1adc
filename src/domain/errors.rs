use thiserror::Error;

/// Errors related to journal entries and settings
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Select or type a ticker (e.g. BTC/USDT)")]
    MissingTicker,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors related to the local signup/login flow
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Enter a username and password")]
    MissingCredentials,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Username already exists: {username}")]
    DuplicateUser { username: String },

    #[error("Unknown username: {username}")]
    UnknownUser { username: String },

    #[error("Incorrect password")]
    WrongPassword,
}

/// Errors related to the demo exchange link flow
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("Unknown exchange: {exchange}")]
    UnknownExchange { exchange: String },

    #[error("Check the API key/secret (at least {min} characters)")]
    CredentialsTooShort { min: usize },

    #[error("Link to {exchange} failed: check the key details")]
    Rejected { exchange: String },
}

/// Errors raised by the key-value persistence boundary
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
