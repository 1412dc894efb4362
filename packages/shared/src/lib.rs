//! Utilities shared by the ytsync binaries.

pub mod logger;
pub mod time;
