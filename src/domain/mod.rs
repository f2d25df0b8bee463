//! Domain types for threshold passphrase escrow
//!
//! This module contains validated newtypes and configuration for escrowing a passphrase:
//! - [`SplitMode`] - Operator's answer to "how many shares?" (single passphrase or split)
//! - [`ShareCount`] - Total number of shares to create (2..=9)
//! - [`Threshold`] - Minimum shares required for reconstruction (>= 2)
//! - [`ShareIndex`] - Share identifier (1..=9)
//! - [`SplitConfig`] - Validated threshold and share count pair
//! - [`Secret`] - The passphrase being escrowed

mod config;
mod secret;
mod share_count;
mod share_index;
mod threshold;

pub use config::SplitConfig;
pub use secret::{KEY_SIZES, Secret};
pub use share_count::{ShareCount, SplitMode};
pub use share_index::ShareIndex;
pub use threshold::Threshold;
