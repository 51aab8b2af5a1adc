pub mod alternative_me;

pub use alternative_me::{AlternativeMeSentimentProvider, DEFAULT_FNG_URL};
