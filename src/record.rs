//! On-disk share record
//!
//! A record is a JSON object with PascalCase keys and byte fields in standard
//! base64:
//!
//! ```text
//! {"Index":2,"Share":"q83vEjRWeJq8..."}
//! ```
//!
//! Sealed records add `"Nonce"` and `"Salt"`. Each record lives at
//! `<destination>/passphrase/share.sss`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cipher::EncryptedPayload;
use crate::error::{EscrowError, Result};

/// Subdirectory created inside each destination
pub const SHARE_DIR: &str = "passphrase";

/// File name of the record inside [`SHARE_DIR`]
pub const SHARE_FILE: &str = "share.sss";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShareRecord {
    pub index: u8,
    #[serde(with = "base64_bytes")]
    pub share: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_opt")]
    pub nonce: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_opt")]
    pub salt: Option<Vec<u8>>,
}

impl ShareRecord {
    #[must_use]
    pub fn new(index: u8, payload: EncryptedPayload) -> Self {
        match payload {
            EncryptedPayload::Legacy { ciphertext } => Self {
                index,
                share: ciphertext,
                nonce: None,
                salt: None,
            },
            EncryptedPayload::Sealed {
                ciphertext,
                nonce,
                salt,
            } => Self {
                index,
                share: ciphertext,
                nonce: Some(nonce.to_vec()),
                salt: Some(salt.to_vec()),
            },
        }
    }

    /// Whether this record was written in sealed mode
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.nonce.is_some() && self.salt.is_some()
    }

    /// Path of the record file for a destination
    #[must_use]
    pub fn path_in(destination: &Path) -> PathBuf {
        destination.join(SHARE_DIR).join(SHARE_FILE)
    }

    /// Write the record under `destination`, replacing whatever was there
    ///
    /// The `passphrase` subdirectory is removed recursively, recreated, and the
    /// record written into it. Nothing is rolled back on failure, so an empty
    /// subdirectory can be left behind.
    ///
    /// # Errors
    /// Returns [`EscrowError::Encode`] if serialization fails and
    /// [`EscrowError::Storage`] if any filesystem step fails
    pub fn store(&self, destination: &Path) -> Result<PathBuf> {
        let bytes = serde_json::to_vec(self)?;

        let dir = destination.join(SHARE_DIR);
        clear_path(&dir).map_err(|e| EscrowError::storage("remove", &dir, e))?;
        create_private_dir(&dir).map_err(|e| EscrowError::storage("create directory", &dir, e))?;

        let file = dir.join(SHARE_FILE);
        write_private_file(&file, &bytes).map_err(|e| EscrowError::storage("write", &file, e))?;

        Ok(file)
    }

    /// Read a record back from `destination`
    ///
    /// # Errors
    /// Returns [`EscrowError::Storage`] if the file cannot be read and
    /// [`EscrowError::Encode`] if it is not a valid record
    pub fn load(destination: &Path) -> Result<Self> {
        let file = Self::path_in(destination);
        let bytes = fs::read(&file).map_err(|e| EscrowError::storage("read", &file, e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Remove a file, symlink or directory tree; a missing path is not an error
fn clear_path(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn create_private_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path)
}

fn write_private_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

mod base64_opt {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|encoded| STANDARD.decode(encoded).map_err(serde::de::Error::custom))
            .transpose()
    }
}
