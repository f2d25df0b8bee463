// Internal library for testing purposes
// Not intended for external use as a library

pub mod cipher;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod escrow;
pub mod handoff;
pub mod logging;
pub mod prompt;
pub mod random;
pub mod record;
pub mod splitter;

pub use error::{EscrowError, Result};
