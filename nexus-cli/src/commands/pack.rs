//! `nexus pack` - build distributable archives

use anyhow::Result;
use clap::Args;
use nexus_core::{PluginError, PluginPaths};

use super::print_available;

/// Pack arguments
#[derive(Args)]
pub struct PackArgs {
    /// Plugin id to pack, or "all" for every installed plugin
    pub target: String,
}

/// Run the pack command.
///
/// Batch mode (`pack all`) isolates per-plugin failures and exits 0 with a
/// summary; single mode fails the command on the first error.
pub fn run(args: PackArgs) -> Result<()> {
    let paths = PluginPaths::default();

    if args.target == "all" {
        return pack_all(&paths);
    }
    pack_one(&args.target, &paths)
}

fn pack_one(id: &str, paths: &PluginPaths) -> Result<()> {
    println!("Packaging plugin: {id}");
    match nexus_core::pack(id, paths) {
        Ok(packed) => {
            println!("Packaged: {}", packed.archive_path.display());
            println!("Size: {:.2} MB", packed.size as f64 / 1024.0 / 1024.0);
            println!("Package info: {}", packed.info_path.display());
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

fn pack_all(paths: &PluginPaths) -> Result<()> {
    println!("Packaging ALL plugins...");
    let summary = nexus_core::pack_all(paths)?;

    println!();
    println!("Summary:");
    println!("  Packed: {}", summary.packed.len());
    println!("  Failed: {}", summary.failed.len());
    for (id, error) in &summary.failed {
        println!("    {id}: {error}");
    }
    println!("  Output: {}", paths.dist_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PackArgs,
    }

    #[test]
    fn test_target_accepts_id_or_all() {
        let cli = TestCli::try_parse_from(["test", "wiki-plugin"]).unwrap();
        assert_eq!(cli.args.target, "wiki-plugin");

        let cli = TestCli::try_parse_from(["test", "all"]).unwrap();
        assert_eq!(cli.args.target, "all");
    }

    #[test]
    fn test_target_is_required() {
        assert!(TestCli::try_parse_from(["test"]).is_err());
    }
}
