//! Per-share encryption
//!
//! Two modes exist. [`ShareCipher::Legacy`] reproduces the on-disk format of
//! earlier escrow deployments: the key is Keccak-256 of the share password cut
//! down to the payload length, and exactly one AES block of the payload is
//! encrypted with no IV, no padding and no authentication. For a 24 or 32 byte
//! payload the bytes past the first block are dropped, so a legacy record is
//! NOT enough to rebuild the secret. It stays the default only so new shares
//! match existing ones.
//!
//! [`ShareCipher::Sealed`] derives a 32 byte key with Argon2id over a random
//! salt and encrypts the whole payload with AES-256-GCM under a random nonce,
//! binding the share index as associated data.

use aes::cipher::consts::U16;
use aes::cipher::{BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};
use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::Argon2;
use rand::RngCore;
use rand::rngs::OsRng;
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use crate::error::{EscrowError, Result};

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Salt length for the sealed-mode key derivation
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length
pub const NONCE_LEN: usize = 12;

const SEALED_KEY_LEN: usize = 32;

/// How a share payload is protected before it is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ShareCipher {
    /// Single AES block keyed by truncated Keccak-256 (compatible, insecure)
    #[default]
    Legacy,
    /// Argon2id + AES-256-GCM over the full payload
    Sealed,
}

/// Output of encrypting one share payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptedPayload {
    Legacy {
        ciphertext: Vec<u8>,
    },
    Sealed {
        ciphertext: Vec<u8>,
        nonce: [u8; NONCE_LEN],
        salt: [u8; SALT_LEN],
    },
}

impl EncryptedPayload {
    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        match self {
            Self::Legacy { ciphertext } | Self::Sealed { ciphertext, .. } => ciphertext,
        }
    }
}

impl ShareCipher {
    /// Encrypt one share payload under `password`
    ///
    /// # Errors
    /// Returns [`EscrowError::Cipher`] if the key cannot be derived or the
    /// cipher rejects it, and [`EscrowError::Entropy`] if sealed mode cannot
    /// draw its salt and nonce
    pub fn encrypt(self, password: &str, index: u8, payload: &[u8]) -> Result<EncryptedPayload> {
        match self {
            Self::Legacy => Ok(EncryptedPayload::Legacy {
                ciphertext: encrypt_legacy(password, payload)?.to_vec(),
            }),
            Self::Sealed => {
                let mut salt = [0u8; SALT_LEN];
                let mut nonce = [0u8; NONCE_LEN];
                OsRng.try_fill_bytes(&mut salt)?;
                OsRng.try_fill_bytes(&mut nonce)?;
                let ciphertext = seal(password, index, payload, &salt, &nonce)?;
                Ok(EncryptedPayload::Sealed {
                    ciphertext,
                    nonce,
                    salt,
                })
            }
        }
    }
}

/// Keccak-256 of the password truncated to `len` bytes
///
/// # Errors
/// Returns [`EscrowError::Cipher`] if `len` exceeds the 32 byte digest
pub fn derive_legacy_key(password: &str, len: usize) -> Result<Zeroizing<Vec<u8>>> {
    let digest = Zeroizing::new(Keccak256::digest(password.as_bytes()).to_vec());
    if len > digest.len() {
        return Err(EscrowError::Cipher(format!(
            "cannot derive a {len} byte key from a {} byte digest",
            digest.len()
        )));
    }
    Ok(Zeroizing::new(digest[..len].to_vec()))
}

/// Encrypt the first block of `payload` with a key as long as the payload
///
/// # Errors
/// Returns [`EscrowError::Cipher`] if the payload is shorter than one block or
/// its length is not an AES key size
pub fn encrypt_legacy(password: &str, payload: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
    if payload.len() < BLOCK_SIZE {
        return Err(EscrowError::Cipher(format!(
            "share payload of {} bytes is shorter than one cipher block",
            payload.len()
        )));
    }
    let key = derive_legacy_key(password, payload.len())?;
    let mut block = Block::clone_from_slice(&payload[..BLOCK_SIZE]);
    with_aes(&key, |c| c.encrypt(&mut block))?;
    let mut ciphertext = [0u8; BLOCK_SIZE];
    ciphertext.copy_from_slice(&block);
    Ok(ciphertext)
}

/// Reverse [`encrypt_legacy`], yielding the first block of the original payload
///
/// `payload_len` is the length of the share the record was made from; it
/// selects the key size.
///
/// # Errors
/// Returns [`EscrowError::Cipher`] if the ciphertext is not one block or the
/// key size is unsupported
pub fn decrypt_legacy(
    password: &str,
    ciphertext: &[u8],
    payload_len: usize,
) -> Result<Zeroizing<[u8; BLOCK_SIZE]>> {
    if ciphertext.len() != BLOCK_SIZE {
        return Err(EscrowError::Cipher(format!(
            "legacy ciphertext must be {BLOCK_SIZE} bytes, got {}",
            ciphertext.len()
        )));
    }
    let key = derive_legacy_key(password, payload_len)?;
    let mut block = Block::clone_from_slice(ciphertext);
    with_aes(&key, |c| c.decrypt(&mut block))?;
    let mut plaintext = Zeroizing::new([0u8; BLOCK_SIZE]);
    plaintext.copy_from_slice(&block);
    Ok(plaintext)
}

/// Decrypt a sealed payload
///
/// # Errors
/// Returns [`EscrowError::Cipher`] on a wrong password, a different index or
/// any tampering with the ciphertext
pub fn open_sealed(
    password: &str,
    index: u8,
    ciphertext: &[u8],
    salt: &[u8],
    nonce: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    if nonce.len() != NONCE_LEN {
        return Err(EscrowError::Cipher(format!(
            "nonce must be {NONCE_LEN} bytes, got {}",
            nonce.len()
        )));
    }
    let cipher = sealed_cipher(password, salt)?;
    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: &[index],
            },
        )
        .map_err(|_| EscrowError::Cipher("wrong password or corrupted share".to_string()))?;
    Ok(Zeroizing::new(plaintext))
}

fn seal(
    password: &str,
    index: u8,
    payload: &[u8],
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>> {
    let cipher = sealed_cipher(password, salt)?;
    cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: payload,
                aad: &[index],
            },
        )
        .map_err(|_| EscrowError::Cipher("AES-GCM encryption failed".to_string()))
}

fn sealed_cipher(password: &str, salt: &[u8]) -> Result<Aes256Gcm> {
    let mut key = Zeroizing::new([0u8; SEALED_KEY_LEN]);
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut *key)
        .map_err(|e| EscrowError::Cipher(format!("key derivation failed: {e}")))?;
    Aes256Gcm::new_from_slice(&*key).map_err(|e| EscrowError::Cipher(e.to_string()))
}

/// Run `op` with the AES variant matching the key length
fn with_aes(key: &[u8], op: impl FnOnce(&dyn AesBlock)) -> Result<()> {
    let invalid = |e: aes::cipher::InvalidLength| EscrowError::Cipher(e.to_string());
    match key.len() {
        16 => op(&Aes128::new_from_slice(key).map_err(invalid)?),
        24 => op(&Aes192::new_from_slice(key).map_err(invalid)?),
        32 => op(&Aes256::new_from_slice(key).map_err(invalid)?),
        n => {
            return Err(EscrowError::Cipher(format!(
                "invalid AES key size {n}, share length must be 16, 24 or 32 bytes"
            )));
        }
    }
    Ok(())
}

/// Object-safe view over the three AES key sizes
trait AesBlock {
    fn encrypt(&self, block: &mut Block);
    fn decrypt(&self, block: &mut Block);
}

impl<C: BlockEncrypt + BlockDecrypt + BlockSizeUser<BlockSize = U16>> AesBlock for C {
    fn encrypt(&self, block: &mut Block) {
        self.encrypt_block(block);
    }

    fn decrypt(&self, block: &mut Block) {
        self.decrypt_block(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_key_is_truncated_keccak() {
        // Keccak-256("") = c5d24601...5d85a470
        let key = derive_legacy_key("", 16).unwrap();
        assert_eq!(
            key.as_slice(),
            &[
                0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc,
                0xc7, 0x03, 0xc0
            ]
        );
        assert_eq!(derive_legacy_key("pw", 24).unwrap().len(), 24);
        assert_eq!(derive_legacy_key("pw", 32).unwrap().len(), 32);
        assert!(derive_legacy_key("pw", 33).is_err());
    }

    #[test]
    fn test_aes128_known_answer() {
        // FIPS-197 appendix C.1
        let key: Vec<u8> = (0x00..=0x0f).collect();
        let mut block = Block::clone_from_slice(&[
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ]);
        with_aes(&key, |c| c.encrypt(&mut block)).unwrap();
        assert_eq!(
            block.as_slice(),
            &[
                0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70,
                0xb4, 0xc5, 0x5a
            ]
        );
    }

    #[test]
    fn test_legacy_ciphertext_is_one_block_for_every_key_size() {
        for len in [16, 24, 32] {
            let payload: Vec<u8> = (0..len as u8).collect();
            let ciphertext = encrypt_legacy("share password", &payload).unwrap();
            assert_eq!(ciphertext.len(), BLOCK_SIZE);

            let first_block = decrypt_legacy("share password", &ciphertext, len).unwrap();
            assert_eq!(first_block.as_slice(), &payload[..BLOCK_SIZE]);
        }
    }

    #[test]
    fn test_legacy_rejects_unsupported_payload_lengths() {
        assert!(matches!(
            encrypt_legacy("pw", &[0u8; 8]),
            Err(EscrowError::Cipher(_))
        ));
        assert!(matches!(
            encrypt_legacy("pw", &[0u8; 20]),
            Err(EscrowError::Cipher(_))
        ));
        assert!(matches!(
            encrypt_legacy("pw", &[0u8; 40]),
            Err(EscrowError::Cipher(_))
        ));
    }

    #[test]
    fn test_legacy_different_passwords_differ() {
        let payload = [7u8; 32];
        assert_ne!(
            encrypt_legacy("one", &payload).unwrap(),
            encrypt_legacy("two", &payload).unwrap()
        );
    }

    #[test]
    fn test_sealed_round_trip() {
        let payload = [0x42u8; 32];
        let sealed = ShareCipher::Sealed.encrypt("custodian", 3, &payload).unwrap();
        let EncryptedPayload::Sealed {
            ciphertext,
            nonce,
            salt,
        } = sealed
        else {
            panic!("expected a sealed payload");
        };
        assert_eq!(ciphertext.len(), payload.len() + 16);

        let opened = open_sealed("custodian", 3, &ciphertext, &salt, &nonce).unwrap();
        assert_eq!(opened.as_slice(), &payload);
    }

    #[test]
    fn test_sealed_rejects_wrong_password_and_index() {
        let payload = [1u8; 16];
        let EncryptedPayload::Sealed {
            ciphertext,
            nonce,
            salt,
        } = ShareCipher::Sealed.encrypt("right", 1, &payload).unwrap()
        else {
            panic!("expected a sealed payload");
        };

        assert!(open_sealed("wrong", 1, &ciphertext, &salt, &nonce).is_err());
        assert!(open_sealed("right", 2, &ciphertext, &salt, &nonce).is_err());

        let mut tampered = ciphertext.clone();
        tampered[0] ^= 0x01;
        assert!(open_sealed("right", 1, &tampered, &salt, &nonce).is_err());
    }

    #[test]
    fn test_default_is_legacy() {
        assert_eq!(ShareCipher::default(), ShareCipher::Legacy);
        let out = ShareCipher::default().encrypt("pw", 1, &[0u8; 24]).unwrap();
        assert!(matches!(out, EncryptedPayload::Legacy { ref ciphertext } if ciphertext.len() == 16));
    }
}
