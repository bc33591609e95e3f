//! Whole-collection sweep starting after an anchor.

use std::ops::ControlFlow;

use horizon_atspi_core::AccessibleTree;
use horizon_atspi_core::logging::targets;

use super::Walker;

impl<T: AccessibleTree> Walker<'_, T> {
    /// Sweep `collection` in document order, starting just after `anchor`.
    ///
    /// The anchor's own subtree comes first, then the younger siblings of the
    /// anchor and of each of its ancestors up to `collection`. If the limit
    /// still allows, the sweep wraps to the first child of `collection` and
    /// continues until it meets the anchor again. Every object is visited at
    /// most once.
    ///
    /// An anchor that is not `collection` or one of its descendants yields
    /// nothing. Any stop node configured on the walker is replaced.
    pub fn inorder(&mut self, collection: &T::Node, anchor: &T::Node) -> ControlFlow<()> {
        if !self.encloses(collection, anchor) {
            tracing::debug!(
                target: targets::TRAVERSAL,
                ?anchor,
                "anchor is outside the collection"
            );
            return ControlFlow::Continue(());
        }
        self.stop = None;
        self.canonical(anchor, 0)?;

        let mut current = anchor.clone();
        let mut reached_collection = current == *collection;
        let mut levels = 0;
        while !reached_collection {
            let (Some(parent), Some(index)) =
                (self.tree.parent(&current), self.tree.index_in_parent(&current))
            else {
                tracing::debug!(
                    target: targets::TRAVERSAL,
                    node = ?current,
                    "ran out of ancestors before reaching the collection"
                );
                break;
            };
            if levels >= self.max_depth {
                tracing::warn!(
                    target: targets::TRAVERSAL,
                    max_depth = self.max_depth,
                    "maximum depth exceeded while ascending"
                );
                break;
            }

            self.canonical(&parent, index + 1)?;
            reached_collection = parent == *collection;
            current = parent;
            levels += 1;
        }

        if reached_collection && anchor != collection {
            self.stop = Some(anchor.clone());
            self.canonical(collection, 0)?;
        }
        ControlFlow::Continue(())
    }
}
