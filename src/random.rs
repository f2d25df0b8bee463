//! Random passphrase generation
//!
//! Used when the operator does not want a memorable passphrase. Each character
//! is drawn independently from [`ALPHABET`] with `gen_range`, which rejects
//! out-of-zone samples instead of reducing modulo the alphabet size.

use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, Rng, SeedableRng};
use zeroize::Zeroizing;

use crate::domain::Secret;
use crate::error::Result;

/// The 80 symbols a generated passphrase may contain
pub const ALPHABET: &[u8; 80] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789~!@#$%^&*()_+{}|[]";

/// Length of the secret generated for a split that need not be directly unlockable
pub const RANDOM_SECRET_LEN: usize = 32;

/// Generates a random passphrase of `length` characters from OS entropy
///
/// # Errors
/// Returns [`EscrowError::Entropy`](crate::EscrowError::Entropy) if the OS
/// randomness source cannot seed the generator
pub fn generate(length: usize) -> Result<Secret> {
    let mut rng = StdRng::from_rng(OsRng)?;
    Ok(generate_with(&mut rng, length))
}

/// Generates a random passphrase from the given cryptographic RNG
pub fn generate_with<R: Rng + CryptoRng>(rng: &mut R, length: usize) -> Secret {
    let mut chars = Zeroizing::new(String::with_capacity(length));
    for _ in 0..length {
        let pick = rng.gen_range(0..ALPHABET.len());
        chars.push(char::from(ALPHABET[pick]));
    }
    Secret::new(chars)
}
