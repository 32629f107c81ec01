//! Client for the external patch-management tool.
//!
//! - [`quilt`]: applying, removing and deleting patches of a quilt series, and
//!   listing the patches that are still unapplied
//!
//! The client is generic over [`crate::ops::executor::Executor`] so its
//! argument construction and exit-code handling can be tested without quilt.

pub mod quilt;
