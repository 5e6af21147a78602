use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nexus", about = "Plugin lifecycle manager for the Nexus shell")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rescan the plugins root and rewrite the manifest
    ManifestGenerate,
    /// Install a plugin from a zip archive or a directory
    Install(commands::install::InstallArgs),
    /// Pack a plugin (or all plugins) into distributable archives
    Pack(commands::pack::PackArgs),
    /// Remove an installed plugin
    Uninstall(commands::uninstall::UninstallArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::ManifestGenerate => commands::manifest::run(),
        Commands::Install(args) => commands::install::run(args),
        Commands::Pack(args) => commands::pack::run(args),
        Commands::Uninstall(args) => commands::uninstall::run(args),
    }
}
