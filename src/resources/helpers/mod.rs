//! Shared filesystem helpers for resource operations.
pub mod digest;
pub mod fs;
