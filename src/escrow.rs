//! Escrow controller
//!
//! Decides between a single passphrase and a split one, validates every
//! operator answer, and drives encryption and storage of each share.
//!
//! Each question runs as a small loop: ask, validate, then either accept or
//! warn and ask again. Blank answers are asked again without a warning. Only
//! failures of the input source itself, or of splitting, encryption and
//! storage, end the flow.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, trace, warn};

use crate::config::EscrowConfig;
use crate::domain::{Secret, ShareCount, SplitConfig, SplitMode};
use crate::error::{EscrowError, Result};
use crate::prompt::Prompt;
use crate::random::{self, RANDOM_SECRET_LEN};
use crate::record::ShareRecord;
use crate::splitter::{self, Share};

const SHARE_COUNT_QUESTION: &str =
    "How many shares should the passphrase be split into? Fewer than 2 keeps a single passphrase. <shares>: ";
const PASSPHRASE_QUESTION: &str = "Enter your passphrase: ";
const UNLOCKABLE_QUESTION: &str =
    "Should the split passphrase also unlock the keystore on its own (16, 24 or 32 bytes)?";

/// Result of validating one answer
enum Answer<T> {
    Accepted(T),
    Rejected(anyhow::Error),
    Blank,
}

impl<T> Answer<T> {
    fn classify(raw: &str, validate: impl FnOnce(&str) -> anyhow::Result<T>) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Blank;
        }
        match validate(trimmed) {
            Ok(value) => Self::Accepted(value),
            Err(e) => Self::Rejected(e),
        }
    }
}

/// Interactive passphrase acquisition with optional threshold escrow
pub struct Escrow<'p, P: Prompt + ?Sized> {
    prompt: &'p mut P,
    config: EscrowConfig,
}

impl<'p, P: Prompt + ?Sized> Escrow<'p, P> {
    pub fn new(prompt: &'p mut P, config: EscrowConfig) -> Self {
        Self { prompt, config }
    }

    /// Obtain the passphrase that will protect the keystore
    ///
    /// With a share count of 0 or 1 the operator simply types a passphrase.
    /// With 2..=9 the passphrase is split, every share is encrypted under its
    /// own password and written to its own destination, and the unsplit
    /// passphrase is returned.
    ///
    /// # Errors
    /// Returns [`EscrowError::Input`] when the prompt source fails,
    /// [`EscrowError::DuplicateDestination`] when a destination repeats, and
    /// any splitting, encryption, storage or entropy failure. Shares written
    /// before a failure stay on disk.
    pub fn acquire_passphrase(&mut self) -> Result<Secret> {
        info!("acquiring keystore passphrase");

        match self.ask_until(SHARE_COUNT_QUESTION, SplitMode::parse)? {
            SplitMode::Single => {
                trace!("single passphrase selected");
                self.single_passphrase()
            }
            SplitMode::Split(share_count) => self.split_passphrase(share_count),
        }
    }

    fn single_passphrase(&mut self) -> Result<Secret> {
        Ok(Secret::new(self.prompt.password(PASSPHRASE_QUESTION)?))
    }

    fn split_passphrase(&mut self, share_count: ShareCount) -> Result<Secret> {
        trace!(share_count = *share_count, "split passphrase selected");

        let question = format!(
            "Enter the threshold, between 2 and {}. <threshold>: ",
            *share_count
        );
        let config = self.ask_until(&question, |answer| {
            SplitConfig::from_answer(answer, share_count)
        })?;

        let (secret, single_unlock) = self.choose_secret()?;
        let shares = splitter::split_secret(secret.as_bytes(), config)?;
        info!(
            shares = shares.len(),
            threshold = *config.threshold(),
            single_unlock,
            "passphrase split"
        );

        self.distribute(&shares)?;
        Ok(secret)
    }

    /// Operator-chosen unlockable passphrase, or a random one
    ///
    /// A passphrase of the wrong length sends the operator back to the
    /// yes/no question, not just to the passphrase entry.
    fn choose_secret(&mut self) -> Result<(Secret, bool)> {
        loop {
            if !self.prompt.confirm(UNLOCKABLE_QUESTION)? {
                debug!("generating random {RANDOM_SECRET_LEN} byte passphrase");
                return Ok((random::generate(RANDOM_SECRET_LEN)?, false));
            }

            debug!("operator supplies a directly unlockable passphrase");
            let passphrase = self.prompt.password(PASSPHRASE_QUESTION)?;
            match Secret::unlockable(passphrase) {
                Ok(secret) => return Ok((secret, true)),
                Err(e) => warn!("{e:#}"),
            }
        }
    }

    fn distribute(&mut self, shares: &[Share]) -> Result<()> {
        let total = shares.len();
        let mut used = HashSet::with_capacity(total);

        for (position, share) in shares.iter().enumerate() {
            let question = format!(
                "Enter the path to store share ({}/{total}): ",
                position + 1
            );
            let destination = self.ask_until(&question, |answer| Ok(answer.to_string()))?;

            if !used.insert(destination.clone()) {
                error!(destination = %destination, "destination reused");
                return Err(EscrowError::DuplicateDestination(destination));
            }

            let written = self.store_share(Path::new(&destination), share)?;
            info!(
                index = *share.index(),
                path = %written.display(),
                "share stored"
            );
        }
        Ok(())
    }

    fn store_share(&mut self, destination: &Path, share: &Share) -> Result<PathBuf> {
        let index = *share.index();
        let password = self
            .prompt
            .password(&format!("Enter the password for share {index}: "))?;

        let payload = self
            .config
            .cipher
            .encrypt(&password, index, share.payload())
            .inspect_err(|e| error!(index, "share encryption failed: {e}"))?;

        ShareRecord::new(index, payload).store(destination)
    }

    /// Ask `question` until `validate` accepts the trimmed answer
    fn ask_until<T>(
        &mut self,
        question: &str,
        mut validate: impl FnMut(&str) -> anyhow::Result<T>,
    ) -> Result<T> {
        loop {
            let raw = self.prompt.input(question)?;
            match Answer::classify(&raw, &mut validate) {
                Answer::Accepted(value) => return Ok(value),
                Answer::Rejected(e) => warn!("{e:#}"),
                Answer::Blank => {}
            }
        }
    }
}
