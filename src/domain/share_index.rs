//! `ShareIndex` newtype

use anyhow::{Result, bail};

use super::ShareCount;

/// Share index (1..=9)
///
/// The x-coordinate the sharing primitive assigned to a share. Zero would be
/// the secret itself, so it never labels a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareIndex(u8);

impl ShareIndex {
    /// Creates a new share index
    ///
    /// # Errors
    /// Returns an error if index is 0 or above the maximum share count
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharekeep::domain::ShareIndex;
    ///
    /// let index = ShareIndex::new(1).unwrap();
    /// assert_eq!(*index, 1);
    ///
    /// assert!(ShareIndex::new(0).is_err());
    /// assert!(ShareIndex::new(10).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value == 0 {
            bail!("Share index 0 would expose the secret");
        }
        if value > ShareCount::MAX {
            bail!("Share index {value} exceeds the maximum share count {}", ShareCount::MAX);
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareIndex {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ShareIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
