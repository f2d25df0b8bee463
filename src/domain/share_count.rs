//! `ShareCount` newtype and split-count answer parsing

use anyhow::{Context, Result, bail};

/// Number of shares to create (2..=9)
///
/// A share count of 0 or 1 is not a split at all; those answers are
/// represented by [`SplitMode::Single`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShareCount(u8);

impl ShareCount {
    /// Minimum valid share count
    pub const MIN: u8 = 2;

    /// Maximum valid share count (9)
    pub const MAX: u8 = 9;

    /// Creates a new share count
    ///
    /// # Errors
    /// Returns an error if count is outside 2..=9
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharekeep::domain::ShareCount;
    ///
    /// let count = ShareCount::new(5).unwrap();
    /// assert_eq!(*count, 5);
    ///
    /// assert!(ShareCount::new(1).is_err());
    /// assert!(ShareCount::new(10).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value < Self::MIN {
            bail!("Share count must be at least {} (got {value})", Self::MIN);
        }
        if value > Self::MAX {
            bail!("Share count must be less than 10 (got {value})");
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareCount {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Which passphrase path the operator chose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// One ordinary passphrase, no escrow shares
    Single,
    /// Split the passphrase into this many shares
    Split(ShareCount),
}

impl SplitMode {
    /// Parses the operator's answer to the split-count question
    ///
    /// `0` and `1` select a single passphrase, `2..=9` a split.
    ///
    /// # Errors
    /// Returns an error for non-numeric input, negative numbers and values of 10 or more.
    /// These are never fatal; the caller warns and asks again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharekeep::domain::SplitMode;
    ///
    /// assert_eq!(SplitMode::parse("1").unwrap(), SplitMode::Single);
    /// assert!(matches!(SplitMode::parse("3").unwrap(), SplitMode::Split(n) if *n == 3));
    ///
    /// assert!(SplitMode::parse("10").is_err());
    /// assert!(SplitMode::parse("-1").is_err());
    /// assert!(SplitMode::parse("three").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let value: i64 = input
            .trim()
            .parse()
            .with_context(|| format!("'{}' is not a valid number", input.trim()))?;

        match value {
            0 | 1 => Ok(Self::Single),
            2..=9 => {
                // Safe: range checked by the match arm
                let count = u8::try_from(value).unwrap_or_else(|_| unreachable!("2..=9 fits in u8"));
                Ok(Self::Split(ShareCount::new(count)?))
            }
            _ => bail!("Share count is a non-negative integer less than 10 (got {value})"),
        }
    }
}
