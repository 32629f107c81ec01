//! Command implementations behind the `doona` binary.
//!
//! Each command is an `App` method writing user-facing output to the supplied
//! writer, so tests can capture it.

pub mod delete;
pub mod list;
pub mod pop;
pub mod push;
pub mod status;
pub mod upgrade;
