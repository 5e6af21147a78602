//! `nexus install` - install a plugin from a zip archive or directory

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use nexus_core::PluginPaths;

/// Install arguments
#[derive(Args)]
pub struct InstallArgs {
    /// Path to a plugin zip archive or a plugin directory
    pub source: PathBuf,
}

/// Run the install command.
pub fn run(args: InstallArgs) -> Result<()> {
    let paths = PluginPaths::default();

    println!("Installing plugin into Nexus...");
    let installed = nexus_core::install(&args.source, &paths)?;

    println!(
        "Installed {} v{} to {}",
        installed.name,
        installed.version,
        installed.path.display()
    );
    println!("Restart the app to load the new plugin");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: InstallArgs,
    }

    #[test]
    fn test_source_is_positional() {
        let cli = TestCli::try_parse_from(["test", "bundles/wiki.zip"]).unwrap();
        assert_eq!(cli.args.source, PathBuf::from("bundles/wiki.zip"));
    }
}
