pub mod bootstrap;
pub mod exchange_link;
pub mod indicators;
pub mod journal;
pub mod navigation;
pub mod report;
pub mod state;
