//! Fatal errors of the escrow flow
//!
//! Malformed or out-of-range answers never show up here: the controller
//! recovers from those locally by warning and asking again.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EscrowError {
    /// The prompt source could not deliver an answer (closed stdin, terminal error)
    #[error("failed to read operator input: {0}")]
    Input(#[from] io::Error),

    /// Two shares of one split were pointed at the same destination
    #[error("destination '{0}' is already used by another share")]
    DuplicateDestination(String),

    /// The sharing primitive rejected its parameters
    #[error("failed to split secret: {0}")]
    Split(String),

    /// Key derivation or cipher construction failed
    #[error("failed to encrypt share: {0}")]
    Cipher(String),

    #[error("failed to {action} {}: {source}", path.display())]
    Storage {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode share record: {0}")]
    Encode(#[from] serde_json::Error),

    /// The operating system's randomness source failed
    #[error("entropy source failed: {0}")]
    Entropy(#[from] rand::Error),
}

impl EscrowError {
    pub(crate) fn storage(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = EscrowError> = std::result::Result<T, E>;
