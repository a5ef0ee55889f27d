//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the report pipeline and an
//! external system (time, filesystem, the records API).
//! Implementations live in `src/adapters/`.

pub mod api;
pub mod clock;
pub mod filesystem;

pub use api::{FetchFuture, RecordSource};
pub use clock::Clock;
pub use filesystem::FileSystem;
