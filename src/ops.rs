//! Process-execution seam between `doona` and the outside world.
//!
//! - [`executor`]: spawning a child process and collecting its exit code and
//!   output streams
//!
//! The trait has a real implementation backed by `tokio::process` and a mock
//! implementation for unit tests, so the quilt client can be exercised without
//! quilt being installed.

pub mod executor;
