use crate::{
    component::{ComponentCell, MakeError},
    context::RequestContext,
    input::InputBag,
};
use kiosk_schema::node::ComponentNode;
use std::{
    collections::BTreeMap,
    sync::{LazyLock, RwLock, RwLockWriteGuard},
};

/// Factory thunk emitted by the attribute macro: construct one instance for
/// a request and bind its inputs, then erase it into a cell.
pub type MakeFn = fn(&RequestContext, &InputBag) -> Result<ComponentCell, MakeError>;

///
/// ComponentVtable
/// Runtime half of a component class: its metadata node plus its factory.
///

#[derive(Clone, Copy)]
pub struct ComponentVtable {
    pub node: &'static ComponentNode,
    pub make: MakeFn,
}

///
/// VtableRegistry
/// Process-wide table of linked component classes, keyed by class path.
/// Registration happens in startup hooks; dispatch only reads.
///

#[derive(Default)]
pub struct VtableRegistry {
    entries: BTreeMap<String, ComponentVtable>,
}

impl VtableRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class vtable. Duplicate paths are a catalog-level problem
    /// and reported by the scanner; the registry keeps the first entry.
    pub fn insert(&mut self, vtable: ComponentVtable) {
        self.entries.entry(vtable.node.path()).or_insert(vtable);
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ComponentVtable> {
        self.entries.get(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// RUNTIME
/// the static data structure
///

static RUNTIME: LazyLock<RwLock<VtableRegistry>> =
    LazyLock::new(|| RwLock::new(VtableRegistry::new()));

/// Acquire a write guard to the global registry during startup registration.
pub fn runtime_write() -> RwLockWriteGuard<'static, VtableRegistry> {
    RUNTIME
        .write()
        .expect("vtable registry RwLock poisoned while acquiring write lock")
}

/// Copy out the vtable for a class path, if that class is linked in.
#[must_use]
pub fn lookup(path: &str) -> Option<ComponentVtable> {
    RUNTIME
        .read()
        .expect("vtable registry RwLock poisoned while acquiring read lock")
        .get(path)
        .copied()
}

/// Number of component classes linked into this process.
#[must_use]
pub fn linked_count() -> usize {
    RUNTIME
        .read()
        .expect("vtable registry RwLock poisoned while acquiring read lock")
        .len()
}
