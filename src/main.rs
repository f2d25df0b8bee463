use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sharekeep::cli::{Cli, Commands};
use sharekeep::config::EscrowConfig;
use sharekeep::escrow::Escrow;
use sharekeep::handoff::Handoff;
use sharekeep::logging::{init_logging, level_for_verbosity};
use sharekeep::prompt::TerminalPrompt;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(level_for_verbosity(cli.verbose), cli.log_format);

    match cli.command {
        Commands::Escrow {
            cipher,
            passphrase_file,
        } => {
            let mut prompt = TerminalPrompt::new();
            let config = EscrowConfig::with_cipher(cipher);

            let passphrase = Escrow::new(&mut prompt, config)
                .acquire_passphrase()
                .context("Failed to make passphrase")?;

            let handoff = Handoff::from_path(passphrase_file);
            handoff
                .deliver(&passphrase)
                .context("Failed to hand the passphrase to the keystore step")?;

            if let Handoff::File(path) = &handoff {
                info!(path = %path.display(), "passphrase ready for keystore import");
            }
        }
    }

    Ok(())
}
