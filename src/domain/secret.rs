//! The passphrase being escrowed

use anyhow::{Result, bail};
use zeroize::Zeroizing;

/// Byte lengths a split secret may have when it must also work as a direct
/// unlock passphrase (AES-128, AES-192 and AES-256 key sizes).
pub const KEY_SIZES: [usize; 3] = [16, 24, 32];

/// A passphrase held in memory that is wiped on drop
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wraps a passphrase without any length policy
    #[must_use]
    pub fn new(passphrase: impl Into<Zeroizing<String>>) -> Self {
        Self(passphrase.into())
    }

    /// Wraps a passphrase that will be split and must stay directly usable
    ///
    /// # Errors
    /// Returns an error unless the passphrase is exactly 16, 24 or 32 bytes long
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharekeep::domain::Secret;
    ///
    /// assert!(Secret::unlockable("0123456789abcdef".to_string()).is_ok());
    /// assert!(Secret::unlockable("too short".to_string()).is_err());
    /// ```
    pub fn unlockable(passphrase: impl Into<Zeroizing<String>>) -> Result<Self> {
        let secret = Self::new(passphrase);
        if !KEY_SIZES.contains(&secret.len()) {
            bail!(
                "Passphrase size must be 128, 192 or 256 bits (got {} bits)",
                secret.len() * 8
            );
        }
        Ok(secret)
    }

    /// Gets the passphrase as a string slice
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Gets the passphrase bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret(<{} bytes redacted>)", self.len())
    }
}
