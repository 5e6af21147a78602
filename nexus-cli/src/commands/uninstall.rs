//! `nexus uninstall` - remove an installed plugin

use std::io::IsTerminal;

use anyhow::Result;
use clap::Args;
use dialoguer::{Confirm, theme::ColorfulTheme};
use nexus_core::{PluginError, PluginPaths, UninstallOutcome};

use super::print_available;

/// Uninstall arguments
#[derive(Args)]
pub struct UninstallArgs {
    /// Plugin id to remove
    pub plugin_id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Run the uninstall command.
///
/// Without `--force` the command prompts for confirmation; when stdin is
/// not a terminal it fails fast instead of hanging on input that will
/// never arrive. A declined confirmation exits 0 without touching disk.
pub fn run(args: UninstallArgs) -> Result<()> {
    let paths = PluginPaths::default();

    if !args.force && !std::io::stdin().is_terminal() {
        anyhow::bail!(
            "stdin is not a terminal; pass --force to uninstall without confirmation"
        );
    }

    let force = args.force;
    let outcome = nexus_core::uninstall(&args.plugin_id, &paths, |label| {
        if force {
            return true;
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Uninstall {label}?"))
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Confirmation prompt failed, treating as declined");
                false
            })
    });

    match outcome {
        Ok(UninstallOutcome::Removed) => {
            println!("Plugin uninstalled successfully");
            println!("Restart the app to update");
            Ok(())
        }
        Ok(UninstallOutcome::Declined) => {
            println!("Aborted, nothing removed");
            Ok(())
        }
        Err(PluginError::NotFound { id, available }) => {
            eprintln!("Plugin '{id}' not found");
            print_available(&available);
            anyhow::bail!("plugin '{id}' not found")
        }
        Err(e) => Err(e.into()),
    }
}
