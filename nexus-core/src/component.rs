//! Plugin component contract and registration table
//!
//! Loading is an explicit table lookup keyed by plugin id instead of
//! reflective resolution of code by string path: the host registers a
//! factory per plugin id at composition time (static linkage for closed
//! plugin sets, or a dynamic-loading facility behind the same table), and
//! the loader only binds ids it finds in both the manifest and the table.

use std::collections::HashMap;
use std::rc::Rc;

/// Contract every loadable plugin component fulfils.
///
/// The lifecycle subsystem treats components as opaque; what the host's
/// presentation layer does with one is out of scope here.
pub trait PluginComponent: std::fmt::Debug {
    /// Placement tag for the host surface. Defaults to the main zone.
    fn zone(&self) -> &str {
        "main"
    }
}

/// Shared handle to a resolved component, bound at load time.
///
/// `Rc` because the runtime path is single-threaded by design; entries are
/// cloned into notification snapshots without copying the component.
pub type ComponentHandle = Rc<dyn PluginComponent>;

type ComponentFactory = Box<dyn Fn() -> ComponentHandle>;

/// Registration table mapping plugin ids to component factories.
#[derive(Default)]
pub struct ComponentTable {
    factories: HashMap<String, ComponentFactory>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a plugin id. Last registration wins.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> ComponentHandle + 'static,
    {
        self.factories.insert(id.into(), Box::new(factory));
    }

    /// Instantiate the component for `id`, if one is registered.
    pub fn resolve(&self, id: &str) -> Option<ComponentHandle> {
        self.factories.get(id).map(|factory| factory())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
