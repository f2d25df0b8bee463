//! Delivery of the final passphrase to the keystore import step
//!
//! Writing the keystore is someone else's job. The passphrase either lands in
//! a password file, the form keystore import tools accept, or on stdout for
//! piping.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::Secret;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handoff {
    /// Write the passphrase, without a trailing newline, to this file (mode 0600)
    File(PathBuf),
    /// Print the passphrase on stdout
    Stdout,
}

impl Handoff {
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// # Errors
    /// Returns an error if the file or stdout cannot be written
    pub fn deliver(&self, secret: &Secret) -> io::Result<()> {
        match self {
            Self::File(path) => write_password_file(path, secret),
            Self::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{}", secret.expose())?;
                out.flush()
            }
        }
    }
}

fn write_password_file(path: &Path, secret: &Secret) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(secret.as_bytes())?;
    file.sync_all()
}
