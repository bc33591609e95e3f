//! The tree-provider contract consumed by the collection engine.
//!
//! An [`AccessibleTree`] is owned by the application, not by whoever walks it.
//! Nodes are short-lived handles: every call re-reads the provider, and a
//! handle may go stale between two calls. Stale handles never fail; they
//! simply answer like an empty, defunct object (no parent, no children,
//! [`Role::Invalid`], a state set of [`State::Defunct`](crate::State::Defunct),
//! no attributes, no interfaces).

use std::fmt;

use crate::attribute::Attribute;
use crate::interface::Interface;
use crate::role::Role;
use crate::state::StateSet;

/// Read access to an externally owned accessibility tree.
pub trait AccessibleTree {
    /// Handle to one object in the tree. Equality is object identity.
    type Node: Clone + PartialEq + fmt::Debug;

    /// The parent of `node`, or `None` for roots and detached objects.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Number of children `node` currently has.
    fn child_count(&self, node: &Self::Node) -> usize;

    /// The child at `index`, or `None` if the index is no longer valid.
    fn child_at(&self, node: &Self::Node, index: usize) -> Option<Self::Node>;

    /// Position of `node` among its parent's children.
    ///
    /// `None` for roots and detached objects.
    fn index_in_parent(&self, node: &Self::Node) -> Option<usize>;

    fn role(&self, node: &Self::Node) -> Role;

    fn state_set(&self, node: &Self::Node) -> StateSet;

    /// The object's attributes, in provider order. Names may repeat.
    fn attributes(&self, node: &Self::Node) -> Vec<Attribute>;

    /// Whether `node` implements the given capability interface.
    fn implements(&self, node: &Self::Node, iface: Interface) -> bool;

    /// Whether the handle still refers to a live object.
    fn is_valid(&self, node: &Self::Node) -> bool;

    /// Whether `node` acts as a collection boundary.
    ///
    /// Every object is a collection unless the provider says otherwise.
    fn is_collection(&self, _node: &Self::Node) -> bool {
        true
    }

    /// A human-readable name, used only for diagnostics.
    fn name(&self, _node: &Self::Node) -> String {
        String::new()
    }
}

impl<T: AccessibleTree + ?Sized> AccessibleTree for &T {
    type Node = T::Node;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node> {
        (**self).parent(node)
    }
    fn child_count(&self, node: &Self::Node) -> usize {
        (**self).child_count(node)
    }
    fn child_at(&self, node: &Self::Node, index: usize) -> Option<Self::Node> {
        (**self).child_at(node, index)
    }
    fn index_in_parent(&self, node: &Self::Node) -> Option<usize> {
        (**self).index_in_parent(node)
    }
    fn role(&self, node: &Self::Node) -> Role {
        (**self).role(node)
    }
    fn state_set(&self, node: &Self::Node) -> StateSet {
        (**self).state_set(node)
    }
    fn attributes(&self, node: &Self::Node) -> Vec<Attribute> {
        (**self).attributes(node)
    }
    fn implements(&self, node: &Self::Node, iface: Interface) -> bool {
        (**self).implements(node, iface)
    }
    fn is_valid(&self, node: &Self::Node) -> bool {
        (**self).is_valid(node)
    }
    fn is_collection(&self, node: &Self::Node) -> bool {
        (**self).is_collection(node)
    }
    fn name(&self, node: &Self::Node) -> String {
        (**self).name(node)
    }
}

/// Maps between tree nodes and bus object paths.
pub trait ObjectResolver: AccessibleTree {
    /// Resolve an object path to a live node.
    fn resolve_path(&self, path: &str) -> Option<Self::Node>;

    /// The object path under which `node` is published.
    fn path_of(&self, node: &Self::Node) -> String;
}

impl<T: ObjectResolver + ?Sized> ObjectResolver for &T {
    fn resolve_path(&self, path: &str) -> Option<Self::Node> {
        (**self).resolve_path(path)
    }
    fn path_of(&self, node: &Self::Node) -> String {
        (**self).path_of(node)
    }
}
