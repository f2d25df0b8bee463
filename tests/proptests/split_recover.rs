//! Property tests for splitting and share encryption

use blahaj::Sharks;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sharekeep::cipher::{self, BLOCK_SIZE};
use sharekeep::domain::{KEY_SIZES, ShareCount, SplitConfig, Threshold};
use sharekeep::splitter::{Share, split_secret};

/// Secret of one of the supported key sizes
#[derive(Clone, Debug)]
struct KeySizedSecret(Vec<u8>);

impl Arbitrary for KeySizedSecret {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = *g.choose(&KEY_SIZES).unwrap_or(&32);
        let bytes = (0..size).map(|_| u8::arbitrary(g)).collect();
        KeySizedSecret(bytes)
    }
}

/// Valid threshold and share count pair within the escrow limits
#[derive(Clone, Copy, Debug)]
struct EscrowParams {
    threshold: u8,
    share_count: u8,
}

impl Arbitrary for EscrowParams {
    fn arbitrary(g: &mut Gen) -> Self {
        let share_count = (u8::arbitrary(g) % 8) + 2; // 2..=9
        let threshold = (u8::arbitrary(g) % (share_count - 1)) + 2; // 2..=share_count
        EscrowParams {
            threshold,
            share_count,
        }
    }
}

impl EscrowParams {
    fn config(self) -> SplitConfig {
        SplitConfig::new(
            Threshold::new(self.threshold).unwrap(),
            ShareCount::new(self.share_count).unwrap(),
        )
        .unwrap()
    }
}

fn to_primitive(share: &Share) -> blahaj::Share {
    let mut bytes = vec![*share.index()];
    bytes.extend_from_slice(share.payload());
    blahaj::Share::try_from(bytes.as_slice()).unwrap()
}

/// Any `threshold` shares, picked by a seed, rebuild the secret
#[quickcheck]
fn prop_any_threshold_subset_recovers(
    secret: KeySizedSecret,
    params: EscrowParams,
    selection_seed: u64,
) -> bool {
    let KeySizedSecret(secret) = secret;
    let Ok(shares) = split_secret(&secret, params.config()) else {
        return false;
    };

    let mut order: Vec<usize> = (0..shares.len()).collect();
    let mut seed = selection_seed;
    for i in (1..order.len()).rev() {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let j = usize::try_from(seed >> 33).unwrap_or(0) % (i + 1);
        order.swap(i, j);
    }

    let selected: Vec<_> = order
        .iter()
        .take(params.threshold as usize)
        .map(|&i| to_primitive(&shares[i]))
        .collect();

    Sharks(params.threshold)
        .recover(&selected)
        .is_ok_and(|recovered| recovered == secret)
}

/// One share short of the threshold never yields the secret
#[quickcheck]
fn prop_below_threshold_does_not_recover(secret: KeySizedSecret, params: EscrowParams) -> bool {
    let KeySizedSecret(secret) = secret;
    let Ok(shares) = split_secret(&secret, params.config()) else {
        return false;
    };

    let insufficient: Vec<_> = shares
        .iter()
        .take(params.threshold as usize - 1)
        .map(to_primitive)
        .collect();

    match Sharks(params.threshold).recover(&insufficient) {
        Err(_) => true,
        Ok(recovered) => recovered != secret,
    }
}

/// Shares carry unique indices 1..=N and secret-length payloads
#[quickcheck]
fn prop_share_indices_and_lengths(secret: KeySizedSecret, params: EscrowParams) -> bool {
    let KeySizedSecret(secret) = secret;
    let Ok(shares) = split_secret(&secret, params.config()) else {
        return false;
    };

    let indices: Vec<u8> = shares.iter().map(|s| *s.index()).collect();
    let expected: Vec<u8> = (1..=params.share_count).collect();

    indices == expected && shares.iter().all(|s| s.payload().len() == secret.len())
}

/// Legacy encryption of every share is exactly one block
#[quickcheck]
fn prop_legacy_ciphertext_is_one_block(secret: KeySizedSecret, password: String) -> bool {
    let KeySizedSecret(secret) = secret;
    let config = EscrowParams {
        threshold: 2,
        share_count: 3,
    }
    .config();
    let Ok(shares) = split_secret(&secret, config) else {
        return false;
    };

    shares.iter().all(|share| {
        cipher::encrypt_legacy(&password, share.payload())
            .is_ok_and(|ciphertext| ciphertext.len() == BLOCK_SIZE)
    })
}
