//! In-memory accessible object registry.
//!
//! The registry is a reference [`AccessibleTree`] provider: an arena of
//! accessible objects with parent/child ownership, the way a toolkit exposes
//! its widget hierarchy to the accessibility bus.
//!
//! # Key Types
//!
//! - [`ObjectId`] - Stable handle for one accessible object
//! - [`AccessibleData`] - The role, states, attributes and interfaces of an object
//! - [`AccessibleRegistry`] - Single-threaded registry
//! - [`SharedAccessibleRegistry`] - Thread-safe wrapper around [`AccessibleRegistry`]
//!
//! # Consistency
//!
//! [`SharedAccessibleRegistry`] takes a fresh read lock for every
//! [`AccessibleTree`] call. A walk over it is therefore not a snapshot:
//! writers can reparent or destroy objects between two calls of the same
//! traversal, and the walker sees stale handles rather than a torn tree.

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use crate::attribute::Attribute;
use crate::error::{Error, Result};
use crate::interface::{Interface, InterfaceSet};
use crate::logging::targets;
use crate::role::Role;
use crate::state::{State, StateSet};
use crate::tree::{AccessibleTree, ObjectResolver};

/// Prefix of every object path published by the registry.
pub const PATH_PREFIX: &str = "/org/a11y/atspi/accessible/";

/// Path that resolves to the first root object.
pub const ROOT_PATH: &str = "/org/a11y/atspi/accessible/root";

new_key_type! {
    /// A unique identifier for an accessible object in the registry.
    ///
    /// IDs stay valid while the tree is rearranged and become stale when the
    /// object is destroyed. A stale ID is never reused for a new object.
    pub struct ObjectId;
}

impl ObjectId {
    /// Convert the ID to a raw u64 value, as used in object paths.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Recreate an ID from [`as_raw`](Self::as_raw) output.
    ///
    /// This does not check that the object exists.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// The accessibility-relevant properties of one object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessibleData {
    pub name: String,
    pub role: Role,
    pub states: StateSet,
    pub attributes: Vec<Attribute>,
    pub interfaces: InterfaceSet,
}

impl AccessibleData {
    /// Create object data with the given role and nothing else.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_state(mut self, state: State) -> Self {
        self.states.insert(state);
        self
    }

    pub fn with_states(mut self, states: impl IntoIterator<Item = State>) -> Self {
        self.states.extend(states);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_interface(mut self, iface: Interface) -> Self {
        self.interfaces.insert(iface);
        self
    }
}

/// Internal storage for each registered object.
struct Entry {
    data: AccessibleData,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
}

/// Arena-backed tree of accessible objects.
///
/// # Related
///
/// - [`SharedAccessibleRegistry`] - Thread-safe wrapper
/// - [`AccessibleTree`] - Read access used by the collection engine
pub struct AccessibleRegistry {
    objects: SlotMap<ObjectId, Entry>,
}

impl AccessibleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Register a new root object and return its ID.
    pub fn register(&mut self, data: AccessibleData) -> ObjectId {
        let role = data.role;
        let id = self.objects.insert(Entry {
            data,
            parent: None,
            children: Vec::new(),
        });
        tracing::trace!(target: targets::REGISTRY, ?id, %role, "registered object");
        id
    }

    /// Register a new object as the last child of `parent`.
    pub fn register_child(&mut self, parent: ObjectId, data: AccessibleData) -> Result<ObjectId> {
        if !self.objects.contains_key(parent) {
            return Err(Error::InvalidObjectId);
        }
        let id = self.register(data);
        self.set_parent(id, Some(parent))?;
        Ok(id)
    }

    /// Remove an object and all its descendants.
    #[tracing::instrument(skip(self), target = "horizon_atspi_core::registry", level = "trace")]
    pub fn destroy(&mut self, id: ObjectId) -> Result<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::trace!(
            target: targets::REGISTRY,
            ?id,
            descendant_count = descendants.len(),
            "destroying object tree"
        );

        self.detach(id);
        for child in descendants {
            self.objects.remove(child);
        }
        self.objects.remove(id);
        Ok(())
    }

    fn collect_descendants(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        let entry = self.objects.get(id).ok_or(Error::InvalidObjectId)?;
        let mut result = Vec::new();
        let mut pending: Vec<ObjectId> = entry.children.clone();
        while let Some(current) = pending.pop() {
            if let Some(entry) = self.objects.get(current) {
                pending.extend(entry.children.iter().copied());
            }
            result.push(current);
        }
        Ok(result)
    }

    /// Remove `id` from its parent's child list, leaving it a root.
    fn detach(&mut self, id: ObjectId) {
        let old_parent = self.objects.get_mut(id).and_then(|entry| entry.parent.take());
        if let Some(parent) = old_parent
            && let Some(parent_entry) = self.objects.get_mut(parent)
        {
            parent_entry.children.retain(|&child| child != id);
        }
    }

    /// Check if an object exists in the registry.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Set the parent of an object, appending it to the new parent's children.
    ///
    /// Passing `None` makes the object a root.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> Result<()> {
        match new_parent {
            Some(parent) => {
                let count = self
                    .children(parent)?
                    .iter()
                    .filter(|&&child| child != id)
                    .count();
                self.insert_child(parent, count, id)
            }
            None => {
                if !self.objects.contains_key(id) {
                    return Err(Error::InvalidObjectId);
                }
                self.detach(id);
                Ok(())
            }
        }
    }

    /// Move `child` under `parent` at position `index`.
    ///
    /// `index` may equal the current child count to append. When `child`
    /// already belongs to `parent`, the index refers to the list with
    /// `child` removed.
    pub fn insert_child(&mut self, parent: ObjectId, index: usize, child: ObjectId) -> Result<()> {
        if !self.objects.contains_key(child) || !self.objects.contains_key(parent) {
            return Err(Error::InvalidObjectId);
        }
        if self.is_ancestor_of(child, parent) {
            return Err(Error::CircularParentage);
        }

        let count = self.objects[parent]
            .children
            .iter()
            .filter(|&&existing| existing != child)
            .count();
        if index > count {
            return Err(Error::child_index_out_of_range(index, count));
        }

        self.detach(child);
        self.objects[parent].children.insert(index, child);
        self.objects[child].parent = Some(parent);
        tracing::trace!(target: targets::REGISTRY, ?child, ?parent, index, "reparented object");
        Ok(())
    }

    /// Check if `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.objects.get(current_id).and_then(|entry| entry.parent);
        }
        false
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> Result<Option<ObjectId>> {
        self.entry(id).map(|entry| entry.parent)
    }

    /// Get the children of an object.
    pub fn children(&self, id: ObjectId) -> Result<&[ObjectId]> {
        self.entry(id).map(|entry| entry.children.as_slice())
    }

    /// Get the index of an object among its siblings.
    ///
    /// Returns `None` for root objects.
    pub fn sibling_index(&self, id: ObjectId) -> Result<Option<usize>> {
        let parent = match self.entry(id)?.parent {
            Some(parent) => parent,
            None => return Ok(None),
        };
        Ok(self
            .objects
            .get(parent)
            .and_then(|entry| entry.children.iter().position(|&child| child == id)))
    }

    /// Get the accessible data of an object.
    pub fn data(&self, id: ObjectId) -> Result<&AccessibleData> {
        self.entry(id).map(|entry| &entry.data)
    }

    /// Get mutable access to the accessible data of an object.
    pub fn data_mut(&mut self, id: ObjectId) -> Result<&mut AccessibleData> {
        self.objects
            .get_mut(id)
            .map(|entry| &mut entry.data)
            .ok_or(Error::InvalidObjectId)
    }

    pub fn set_name(&mut self, id: ObjectId, name: impl Into<String>) -> Result<()> {
        self.data_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_role(&mut self, id: ObjectId, role: Role) -> Result<()> {
        self.data_mut(id)?.role = role;
        Ok(())
    }

    pub fn set_states(&mut self, id: ObjectId, states: StateSet) -> Result<()> {
        self.data_mut(id)?.states = states;
        Ok(())
    }

    /// Add or remove a single state.
    pub fn set_state(&mut self, id: ObjectId, state: State, enabled: bool) -> Result<()> {
        let states = &mut self.data_mut(id)?.states;
        if enabled {
            states.insert(state);
        } else {
            states.remove(state);
        }
        Ok(())
    }

    pub fn set_attributes(&mut self, id: ObjectId, attributes: Vec<Attribute>) -> Result<()> {
        self.data_mut(id)?.attributes = attributes;
        Ok(())
    }

    pub fn set_interfaces(&mut self, id: ObjectId, interfaces: InterfaceSet) -> Result<()> {
        self.data_mut(id)?.interfaces = interfaces;
        Ok(())
    }

    /// Get the total number of registered objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over all root objects (objects without a parent).
    pub fn root_objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .filter(|(_, entry)| entry.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Collect `id` and its descendants in document order.
    ///
    /// Visits the node first, then its children recursively.
    pub fn depth_first_preorder(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        let mut result = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let entry = self.entry(current)?;
            result.push(current);
            pending.extend(entry.children.iter().rev().copied());
        }
        Ok(result)
    }

    /// The object path of `id`.
    pub fn path_of(&self, id: ObjectId) -> String {
        format!("{PATH_PREFIX}{}", id.as_raw())
    }

    /// Resolve an object path to a live object.
    pub fn resolve_path(&self, path: &str) -> Option<ObjectId> {
        if path == ROOT_PATH {
            return self.root_objects().next();
        }
        let raw = path.strip_prefix(PATH_PREFIX)?.parse::<u64>().ok()?;
        let id = ObjectId::from_raw(raw);
        self.contains(id).then_some(id)
    }

    fn entry(&self, id: ObjectId) -> Result<&Entry> {
        self.objects.get(id).ok_or(Error::InvalidObjectId)
    }
}

impl Default for AccessibleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessibleTree for AccessibleRegistry {
    type Node = ObjectId;

    fn parent(&self, node: &ObjectId) -> Option<ObjectId> {
        self.objects.get(*node).and_then(|entry| entry.parent)
    }

    fn child_count(&self, node: &ObjectId) -> usize {
        self.objects.get(*node).map_or(0, |entry| entry.children.len())
    }

    fn child_at(&self, node: &ObjectId, index: usize) -> Option<ObjectId> {
        self.objects
            .get(*node)
            .and_then(|entry| entry.children.get(index).copied())
    }

    fn index_in_parent(&self, node: &ObjectId) -> Option<usize> {
        self.sibling_index(*node).ok().flatten()
    }

    fn role(&self, node: &ObjectId) -> Role {
        self.objects
            .get(*node)
            .map_or(Role::Invalid, |entry| entry.data.role)
    }

    fn state_set(&self, node: &ObjectId) -> StateSet {
        self.objects
            .get(*node)
            .map_or_else(StateSet::defunct, |entry| entry.data.states)
    }

    fn attributes(&self, node: &ObjectId) -> Vec<Attribute> {
        self.objects
            .get(*node)
            .map(|entry| entry.data.attributes.clone())
            .unwrap_or_default()
    }

    fn implements(&self, node: &ObjectId, iface: Interface) -> bool {
        self.objects
            .get(*node)
            .is_some_and(|entry| entry.data.interfaces.contains(iface))
    }

    fn is_valid(&self, node: &ObjectId) -> bool {
        self.contains(*node)
    }

    fn name(&self, node: &ObjectId) -> String {
        self.objects
            .get(*node)
            .map(|entry| entry.data.name.clone())
            .unwrap_or_default()
    }
}

impl ObjectResolver for AccessibleRegistry {
    fn resolve_path(&self, path: &str) -> Option<ObjectId> {
        AccessibleRegistry::resolve_path(self, path)
    }

    fn path_of(&self, node: &ObjectId) -> String {
        AccessibleRegistry::path_of(self, *node)
    }
}

/// A thread-safe wrapper around [`AccessibleRegistry`].
///
/// Provides concurrent read access with exclusive write access via `RwLock`.
/// Every method, including each [`AccessibleTree`] call, holds the lock only
/// for its own duration.
pub struct SharedAccessibleRegistry {
    inner: RwLock<AccessibleRegistry>,
}

impl SharedAccessibleRegistry {
    /// Create a new shared registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(AccessibleRegistry::new()),
        }
    }

    /// Register a new root object.
    pub fn register(&self, data: AccessibleData) -> ObjectId {
        self.inner.write().register(data)
    }

    /// Register a new object as the last child of `parent`.
    pub fn register_child(&self, parent: ObjectId, data: AccessibleData) -> Result<ObjectId> {
        self.inner.write().register_child(parent, data)
    }

    /// Destroy an object and its descendants.
    pub fn destroy(&self, id: ObjectId) -> Result<()> {
        self.inner.write().destroy(id)
    }

    /// Check if an object exists.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Set the parent of an object.
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> Result<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// Move `child` under `parent` at position `index`.
    pub fn insert_child(&self, parent: ObjectId, index: usize, child: ObjectId) -> Result<()> {
        self.inner.write().insert_child(parent, index, child)
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> Result<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// Get the children of an object (returns an owned Vec for thread safety).
    pub fn children(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        self.inner.read().children(id).map(<[ObjectId]>::to_vec)
    }

    /// Get the index of an object among its siblings.
    pub fn sibling_index(&self, id: ObjectId) -> Result<Option<usize>> {
        self.inner.read().sibling_index(id)
    }

    /// Get a copy of the accessible data of an object.
    pub fn data(&self, id: ObjectId) -> Result<AccessibleData> {
        self.inner.read().data(id).cloned()
    }

    pub fn set_name(&self, id: ObjectId, name: impl Into<String>) -> Result<()> {
        self.inner.write().set_name(id, name)
    }

    pub fn set_role(&self, id: ObjectId, role: Role) -> Result<()> {
        self.inner.write().set_role(id, role)
    }

    pub fn set_states(&self, id: ObjectId, states: StateSet) -> Result<()> {
        self.inner.write().set_states(id, states)
    }

    pub fn set_state(&self, id: ObjectId, state: State, enabled: bool) -> Result<()> {
        self.inner.write().set_state(id, state, enabled)
    }

    pub fn set_attributes(&self, id: ObjectId, attributes: Vec<Attribute>) -> Result<()> {
        self.inner.write().set_attributes(id, attributes)
    }

    pub fn set_interfaces(&self, id: ObjectId, interfaces: InterfaceSet) -> Result<()> {
        self.inner.write().set_interfaces(id, interfaces)
    }

    /// Get the total number of objects.
    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }

    /// Get all root objects.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.inner.read().root_objects().collect()
    }

    /// Collect `id` and its descendants in document order.
    pub fn depth_first_preorder(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        self.inner.read().depth_first_preorder(id)
    }

    /// Execute a closure with read access to the registry.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AccessibleRegistry) -> R,
    {
        f(&self.inner.read())
    }

    /// Execute a closure with write access to the registry.
    pub fn with_write<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut AccessibleRegistry) -> R,
    {
        f(&mut self.inner.write())
    }
}

impl Default for SharedAccessibleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessibleTree for SharedAccessibleRegistry {
    type Node = ObjectId;

    fn parent(&self, node: &ObjectId) -> Option<ObjectId> {
        AccessibleTree::parent(&*self.inner.read(), node)
    }

    fn child_count(&self, node: &ObjectId) -> usize {
        self.inner.read().child_count(node)
    }

    fn child_at(&self, node: &ObjectId, index: usize) -> Option<ObjectId> {
        self.inner.read().child_at(node, index)
    }

    fn index_in_parent(&self, node: &ObjectId) -> Option<usize> {
        self.inner.read().index_in_parent(node)
    }

    fn role(&self, node: &ObjectId) -> Role {
        self.inner.read().role(node)
    }

    fn state_set(&self, node: &ObjectId) -> StateSet {
        self.inner.read().state_set(node)
    }

    fn attributes(&self, node: &ObjectId) -> Vec<Attribute> {
        self.inner.read().attributes(node)
    }

    fn implements(&self, node: &ObjectId, iface: Interface) -> bool {
        self.inner.read().implements(node, iface)
    }

    fn is_valid(&self, node: &ObjectId) -> bool {
        self.inner.read().contains(*node)
    }

    fn name(&self, node: &ObjectId) -> String {
        AccessibleTree::name(&*self.inner.read(), node)
    }
}

impl ObjectResolver for SharedAccessibleRegistry {
    fn resolve_path(&self, path: &str) -> Option<ObjectId> {
        self.inner.read().resolve_path(path)
    }

    fn path_of(&self, node: &ObjectId) -> String {
        self.inner.read().path_of(*node)
    }
}

static_assertions::assert_impl_all!(SharedAccessibleRegistry: Send, Sync);
static_assertions::assert_impl_all!(ObjectId: Send, Sync, Copy);
