//! Backend test support utilities
//!
//! Shared by the backend's unit tests and integration binaries: one logging
//! bootstrap and helpers for collision-free fixture names.

pub mod logging;
pub mod unique_helpers;
