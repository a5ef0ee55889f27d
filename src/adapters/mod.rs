//! Port adapters: live, recording, replaying and fixed implementations.

pub mod fixed;
pub mod live;
pub mod recording;
pub mod replaying;
