//! Per-process context resolved once at startup.
//!
//! The instance identity is read from platform metadata before the server
//! starts and handed to `AppState` by value; handlers never look it up.

pub mod instance;

pub use instance::{resolve_instance_id, UNKNOWN_INSTANCE};
