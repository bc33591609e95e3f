//! Tree walks that feed matching objects into a result list.
//!
//! Three walks are provided, all on [`Walker`]:
//!
//! - [`canonical`](Walker::canonical): document pre-order over the children
//!   of a container, starting at a child index
//! - [`reverse_canonical`](Walker::reverse_canonical): backwards through
//!   document order from a node up to a boundary
//! - [`inorder`](Walker::inorder): the anchor's subtree, then everything after
//!   it in document order up to the collection root, then a wrap from the
//!   start of the collection back to the anchor
//!
//! A walk ends early when the result limit is reached or the stop node is
//! met; both surface as [`ControlFlow::Break`]. Children and parents that
//! have vanished since the previous tree call end the branch they were on.

mod canonical;
mod inorder;
mod reverse;

use std::ops::ControlFlow;

use horizon_atspi_core::AccessibleTree;
use horizon_atspi_core::logging::targets;

use crate::rule::RuleMatcher;

/// Walk state for one query: the match rule, the growing result list and
/// the bounds the walk must honour.
pub struct Walker<'a, T: AccessibleTree> {
    tree: &'a T,
    matcher: RuleMatcher<'a>,
    anchor: T::Node,
    limit: usize,
    max_depth: usize,
    stop: Option<T::Node>,
    traverse: bool,
    results: Vec<T::Node>,
}

impl<'a, T: AccessibleTree> Walker<'a, T> {
    /// Create a walker that never collects `anchor`.
    ///
    /// `limit` of 0 means unbounded.
    pub fn new(tree: &'a T, matcher: RuleMatcher<'a>, anchor: T::Node, limit: usize) -> Self {
        Self {
            tree,
            matcher,
            anchor,
            limit,
            max_depth: crate::config::DEFAULT_MAX_DEPTH,
            stop: None,
            traverse: true,
            results: Vec::new(),
        }
    }

    /// Abandon branches deeper than `max_depth` below the walk's start.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether to descend into children that are collections themselves.
    pub fn with_traverse(mut self, traverse: bool) -> Self {
        self.traverse = traverse;
        self
    }

    /// Node at which the walk ends without visiting it.
    ///
    /// For [`canonical`](Self::canonical) this is met as a child; for
    /// [`reverse_canonical`](Self::reverse_canonical) it is the boundary.
    pub fn with_stop(mut self, stop: Option<T::Node>) -> Self {
        self.stop = stop;
        self
    }

    pub fn results(&self) -> &[T::Node] {
        &self.results
    }

    pub fn into_results(self) -> Vec<T::Node> {
        self.results
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.limit != 0 && self.results.len() >= self.limit
    }

    #[inline]
    fn is_stop(&self, node: &T::Node) -> bool {
        self.stop.as_ref() == Some(node)
    }

    fn descends_into(&self, node: &T::Node) -> bool {
        self.traverse || !self.tree.is_collection(node)
    }

    /// Whether `node` is `collection` or lies below it.
    pub(crate) fn encloses(&self, collection: &T::Node, node: &T::Node) -> bool {
        let mut current = Some(node.clone());
        let mut levels = 0;
        while let Some(candidate) = current {
            if candidate == *collection {
                return true;
            }
            if levels > self.max_depth {
                tracing::warn!(
                    target: targets::TRAVERSAL,
                    max_depth = self.max_depth,
                    "maximum depth exceeded while looking for the collection"
                );
                return false;
            }
            current = self.tree.parent(&candidate);
            levels += 1;
        }
        false
    }

    /// Collect `node` if it matches. Breaks once the limit is reached.
    fn visit(&mut self, node: &T::Node) -> ControlFlow<()> {
        if self.is_full() {
            return ControlFlow::Break(());
        }
        if *node != self.anchor && self.matcher.matches(self.tree, node) {
            self.results.push(node.clone());
            if self.is_full() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}
