//! Live adapters for real external interactions.

pub mod api;
pub mod clock;
pub mod filesystem;

pub use api::LiveRecordSource;
pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
