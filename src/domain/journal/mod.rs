// Trade entries and ticker handling
pub mod entry;

pub use entry::{DEFAULT_TICKERS, Entry, EntryDraft, Side, normalize_ticker};
