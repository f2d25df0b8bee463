//! Configuration validation for passphrase splits

use anyhow::{Result, bail};

use super::{ShareCount, Threshold};

/// Validated pair of threshold and share count
///
/// Enforces the invariant `1 < threshold <= share_count`, so a split can
/// never ask for more shares than will exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    threshold: Threshold,
    share_count: ShareCount,
}

impl SplitConfig {
    /// Creates a new split configuration
    ///
    /// # Errors
    /// Returns an error if threshold exceeds share count
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharekeep::domain::{SplitConfig, Threshold, ShareCount};
    ///
    /// let config = SplitConfig::new(
    ///     Threshold::new(3).unwrap(),
    ///     ShareCount::new(5).unwrap()
    /// ).unwrap();
    ///
    /// assert_eq!(*config.threshold(), 3);
    /// assert_eq!(*config.share_count(), 5);
    ///
    /// let result = SplitConfig::new(
    ///     Threshold::new(5).unwrap(),
    ///     ShareCount::new(3).unwrap()
    /// );
    /// assert!(result.is_err());
    /// ```
    pub fn new(threshold: Threshold, share_count: ShareCount) -> Result<Self> {
        if *threshold > *share_count {
            bail!(
                "Threshold {} cannot exceed share count {}",
                *threshold,
                *share_count
            );
        }
        Ok(Self {
            threshold,
            share_count,
        })
    }

    /// Builds a configuration from the operator's threshold answer
    ///
    /// # Errors
    /// Returns an error when the answer is not a number, is 1 or less, or
    /// exceeds `share_count`. The caller re-prompts on any of these.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharekeep::domain::{ShareCount, SplitConfig};
    ///
    /// let five = ShareCount::new(5).unwrap();
    /// assert!(SplitConfig::from_answer("3", five).is_ok());
    /// assert!(SplitConfig::from_answer("6", five).is_err());
    /// ```
    pub fn from_answer(answer: &str, share_count: ShareCount) -> Result<Self> {
        let threshold = Threshold::parse(answer)?;
        Self::new(threshold, share_count)
    }

    /// Gets the threshold value
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Gets the share count value
    #[must_use]
    pub fn share_count(&self) -> ShareCount {
        self.share_count
    }
}
