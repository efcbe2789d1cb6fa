/// Shared kernel - cross-cutting error types, result alias, and utilities
pub mod error;
pub mod result;
pub mod security;
pub mod telemetry;

pub use result::Result;
