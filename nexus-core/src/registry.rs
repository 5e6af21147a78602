//! Runtime plugin registry - ordered, observable, in-memory only
//!
//! The registry is the sole live state the presentation layer consumes. It
//! is constructed explicitly at the host's composition root and passed by
//! reference to consumers; nothing here is global or persisted. The runtime
//! path is single-threaded, so mutation and notification run synchronously
//! on the caller's thread with no locking.

use crate::component::ComponentHandle;
use crate::manifest::ManifestEntry;

/// A loaded plugin: its manifest entry, its component handle, and its
/// runtime enabled flag.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// Manifest entry the plugin was loaded from (persisted state)
    pub manifest: ManifestEntry,
    /// Component handle bound at load time
    pub component: ComponentHandle,
    /// Runtime enabled flag; diverges from `manifest.enabled` after a toggle
    pub enabled: bool,
}

impl RegistryEntry {
    pub fn new(manifest: ManifestEntry, component: ComponentHandle) -> Self {
        let enabled = manifest.enabled;
        Self {
            manifest,
            component,
            enabled,
        }
    }

    pub fn id(&self) -> &str {
        &self.manifest.id
    }
}

/// Handle returned by [`PluginRegistry::subscribe`]; passing it back to
/// [`PluginRegistry::unsubscribe`] removes the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(&[RegistryEntry])>;

/// In-memory registry of loaded plugins with change notification.
///
/// Entries keep registration order. Every mutation that changes visible
/// state notifies all subscribers synchronously, in subscription order,
/// with the identical snapshot of the current list.
#[derive(Default)]
pub struct PluginRegistry {
    entries: Vec<RegistryEntry>,
    listeners: Vec<(u64, Listener)>,
    next_subscription: u64,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loaded plugin. Idempotent on id: a second registration of
    /// the same id is a no-op (first write wins) and returns false.
    pub fn register(&mut self, entry: RegistryEntry) -> bool {
        if self.entries.iter().any(|e| e.id() == entry.id()) {
            tracing::debug!(plugin = %entry.id(), "Already registered, ignoring");
            return false;
        }
        tracing::info!(plugin = %entry.manifest.name, id = %entry.id(), "Plugin registered");
        self.entries.push(entry);
        self.notify();
        true
    }

    /// Flip the runtime enabled flag for `id` in place.
    ///
    /// Returns the new state, or `None` when the id is unknown (no-op, no
    /// notification). The flip is runtime-only by design: it is never
    /// written back to the persisted manifest, so a restart resets every
    /// plugin to its manifest value.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.id() == id)?;
        entry.enabled = !entry.enabled;
        let enabled = entry.enabled;
        tracing::info!(plugin = %id, enabled, "Plugin toggled");
        self.notify();
        Some(enabled)
    }

    /// Remove the entry for `id` from the running registry.
    ///
    /// In-memory only - the plugin directory and manifest are untouched.
    /// Returns the removed entry, or `None` when the id is unknown.
    pub fn uninstall(&mut self, id: &str) -> Option<RegistryEntry> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        let removed = self.entries.remove(index);
        tracing::info!(plugin = %id, "Plugin removed from registry");
        self.notify();
        Some(removed)
    }

    /// Subscribe to registry changes. The callback receives a snapshot of
    /// the current list on every notification until unsubscribed.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&[RegistryEntry]) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Remove a listener. Returns false when the handle was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription.0);
        self.listeners.len() != before
    }

    /// Synchronously invoke every current subscriber with the identical
    /// snapshot of the entry list, in subscription order.
    pub fn notify(&mut self) {
        let snapshot = self.entries.clone();
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Entries whose runtime flag is enabled, in registration order.
    pub fn enabled(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter().filter(|e| e.enabled)
    }

    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
