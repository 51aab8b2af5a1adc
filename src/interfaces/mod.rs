pub mod format;
pub mod forms;

#[cfg(feature = "ui")]
pub mod app;
#[cfg(feature = "ui")]
pub mod components;
#[cfg(feature = "ui")]
pub mod design_system;

#[cfg(feature = "ui")]
pub use app::JournalApp;
