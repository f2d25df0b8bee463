use blahaj::Sharks;
use zeroize::Zeroizing;

use crate::domain::{ShareIndex, SplitConfig};
use crate::error::{EscrowError, Result};

/// One share of a split passphrase
///
/// The payload has the same length as the secret it came from.
#[derive(Clone)]
pub struct Share {
    index: ShareIndex,
    payload: Zeroizing<Vec<u8>>,
}

impl Share {
    #[must_use]
    pub fn index(&self) -> ShareIndex {
        self.index
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl std::fmt::Debug for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Share")
            .field("index", &*self.index)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

/// Split a secret into `share_count` shares, any `threshold` of which rebuild it
///
/// Shares come back ordered by index, starting at 1.
///
/// # Errors
/// Returns [`EscrowError::Split`] if the secret is empty or the primitive hands
/// back a malformed share
pub fn split_secret(secret: &[u8], config: SplitConfig) -> Result<Vec<Share>> {
    if secret.is_empty() {
        return Err(EscrowError::Split("cannot split an empty secret".to_string()));
    }

    let sharks = Sharks(*config.threshold());
    let dealer = sharks.dealer(secret);

    let mut shares = Vec::with_capacity(*config.share_count() as usize);
    for dealt in dealer.take(*config.share_count() as usize) {
        // Serialized as [x, y_0, y_1, ...]
        let bytes = Zeroizing::new(Vec::from(&dealt));
        let Some((&x, y)) = bytes.split_first() else {
            return Err(EscrowError::Split("primitive produced an empty share".to_string()));
        };
        let index = ShareIndex::new(x).map_err(|e| EscrowError::Split(e.to_string()))?;
        shares.push(Share {
            index,
            payload: Zeroizing::new(y.to_vec()),
        });
    }

    if shares.len() != *config.share_count() as usize {
        return Err(EscrowError::Split(format!(
            "expected {} shares, primitive produced {}",
            *config.share_count(),
            shares.len()
        )));
    }

    shares.sort_by_key(Share::index);
    Ok(shares)
}
