//! Threshold newtype for Shamir Secret Sharing

use anyhow::{Context, Result, bail};

/// Minimum number of shares needed to rebuild the passphrase
///
/// Invariant: threshold >= 2. With a threshold of 1 every share is a full copy
/// of the secret, which defeats the escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u8);

impl Threshold {
    /// Creates a new threshold
    ///
    /// # Errors
    /// Returns an error if the threshold is less than 2
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharekeep::domain::Threshold;
    ///
    /// let threshold = Threshold::new(3).unwrap();
    /// assert_eq!(*threshold, 3);
    ///
    /// assert!(Threshold::new(1).is_err());
    /// assert!(Threshold::new(0).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value < 2 {
            bail!("Threshold must be greater than 1 (got {value})");
        }
        Ok(Self(value))
    }

    /// Parses a threshold typed by the operator
    ///
    /// # Errors
    /// Returns an error if the text is not a number in 2..=255
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let value: u8 = trimmed
            .parse()
            .with_context(|| format!("'{trimmed}' is not a valid threshold"))?;
        Self::new(value)
    }
}

impl std::ops::Deref for Threshold {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
