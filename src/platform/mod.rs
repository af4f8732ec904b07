//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (animation clock in milliseconds)
//! - Storage (LocalStorage on web)
//! - Location (shareable query string, in-place history replace)

pub mod clock;
pub mod location;
pub mod storage;
