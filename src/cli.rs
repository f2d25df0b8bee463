use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cipher::ShareCipher;
use crate::logging::LogFormat;

#[derive(Parser)]
#[command(name = "sharekeep")]
#[command(about = "Choose a keystore passphrase and escrow it as encrypted threshold shares")]
pub struct Cli {
    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Increase log detail (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactively obtain a passphrase, splitting and storing shares if requested
    Escrow {
        /// How shares are encrypted before they are written
        #[arg(long, value_enum, env = "SHAREKEEP_CIPHER", default_value_t = ShareCipher::Legacy)]
        cipher: ShareCipher,

        /// Write the passphrase to this file for the keystore import step
        /// instead of printing it
        #[arg(long, value_name = "PATH")]
        passphrase_file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escrow_defaults() {
        let cli = Cli::try_parse_from(["sharekeep", "escrow"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.log_format, LogFormat::Pretty);
        let Commands::Escrow {
            cipher,
            passphrase_file,
        } = cli.command;
        assert_eq!(passphrase_file, None);
        // Environment may override the default
        if std::env::var_os("SHAREKEEP_CIPHER").is_none() {
            assert_eq!(cipher, ShareCipher::Legacy);
        }
    }

    #[test]
    fn test_escrow_flags() {
        let cli = Cli::try_parse_from([
            "sharekeep",
            "-vv",
            "--log-format",
            "json",
            "escrow",
            "--cipher",
            "sealed",
            "--passphrase-file",
            "/tmp/pw",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);
        let Commands::Escrow {
            cipher,
            passphrase_file,
        } = cli.command;
        assert_eq!(cipher, ShareCipher::Sealed);
        assert_eq!(passphrase_file, Some(PathBuf::from("/tmp/pw")));
    }

    #[test]
    fn test_unknown_cipher_is_rejected() {
        assert!(Cli::try_parse_from(["sharekeep", "escrow", "--cipher", "rot13"]).is_err());
    }
}
