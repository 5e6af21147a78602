//! CLI command implementations

pub mod install;
pub mod manifest;
pub mod pack;
pub mod uninstall;

/// Print the ids of everything installed under the plugins root, for
/// not-found diagnostics.
pub(crate) fn print_available(available: &[String]) {
    if available.is_empty() {
        println!("No plugins installed");
        return;
    }
    println!("Available plugins:");
    for id in available {
        println!("  - {id}");
    }
}
