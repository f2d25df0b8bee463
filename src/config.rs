//! Escrow configuration
//!
//! Built once by the caller and handed to [`Escrow::new`](crate::escrow::Escrow::new).
//! The controller never consults command-line or environment state itself.

use crate::cipher::ShareCipher;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EscrowConfig {
    /// How each share is encrypted before it is written
    pub cipher: ShareCipher,
}

impl EscrowConfig {
    #[must_use]
    pub fn with_cipher(cipher: ShareCipher) -> Self {
        Self { cipher }
    }
}
