// Local demo accounts
pub mod auth;

// Domain-specific error types
pub mod errors;

// Demo exchange linking
pub mod exchange;

// Trade entries
pub mod journal;

// Header indicators (rate, dominance, sentiment)
pub mod market;

// Permissive number parsing
pub mod numeric;

// Daily aggregation, equity and drawdown
pub mod performance;

// Port interfaces
pub mod ports;

pub mod sentiment;

pub mod settings;
