//! Backward document-order walk.

use std::ops::ControlFlow;

use horizon_atspi_core::AccessibleTree;
use horizon_atspi_core::logging::targets;

use super::Walker;

impl<T: AccessibleTree> Walker<'_, T> {
    /// Walk backwards through document order, starting at `from`.
    ///
    /// From each node the walk moves to the last descendant of its previous
    /// sibling, or to its parent when it is the first child. It ends at the
    /// stop node (the boundary, not visited), at a root, or when a node has
    /// vanished.
    pub fn reverse_canonical(&mut self, from: &T::Node) -> ControlFlow<()> {
        let mut current = Some(from.clone());
        while let Some(node) = current {
            if self.is_stop(&node) {
                break;
            }
            self.visit(&node)?;
            current = self.previous_in_order(&node);
        }
        ControlFlow::Continue(())
    }

    fn previous_in_order(&self, node: &T::Node) -> Option<T::Node> {
        let parent = self.tree.parent(node)?;
        match self.tree.index_in_parent(node) {
            Some(index) if index > 0 => {
                let sibling = self.tree.child_at(&parent, index - 1)?;
                Some(self.last_descendant(sibling))
            }
            _ => Some(parent),
        }
    }

    /// Follow last children down from `node` as far as the walk may descend.
    fn last_descendant(&self, mut node: T::Node) -> T::Node {
        let mut depth = 0;
        while self.descends_into(&node) {
            let count = self.tree.child_count(&node);
            if count == 0 {
                break;
            }
            if depth >= self.max_depth {
                tracing::warn!(
                    target: targets::TRAVERSAL,
                    ?node,
                    max_depth = self.max_depth,
                    "maximum depth exceeded, stopping drill-down"
                );
                break;
            }
            match self.tree.child_at(&node, count - 1) {
                Some(child) => node = child,
                None => break,
            }
            depth += 1;
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use horizon_atspi_core::ObjectId;

    use super::*;
    use crate::config::CollectionConfig;
    use crate::rule::{MatchRule, RuleMatcher};
    use crate::traverse::fixtures::Sample;

    fn walk_back(sample: &Sample, from: ObjectId, boundary: Option<ObjectId>, limit: usize) -> Vec<String> {
        let rule = MatchRule::any_object();
        let config = CollectionConfig::default();
        let mut walker = Walker::new(&sample.registry, RuleMatcher::new(&rule, &config), from, limit)
            .with_stop(boundary);
        let _ = walker.reverse_canonical(&from);
        sample.names(walker.results())
    }

    #[test]
    fn test_mirrors_document_order() {
        let sample = Sample::new();
        assert_eq!(
            walk_back(&sample, sample.c1, Some(sample.root), 0),
            ["C", "B", "A2", "A1", "A"]
        );
    }

    #[test]
    fn test_boundary_is_excluded() {
        let sample = Sample::new();
        assert_eq!(walk_back(&sample, sample.a2, Some(sample.a), 0), ["A1"]);
    }

    #[test]
    fn test_walk_without_boundary_reaches_root() {
        let sample = Sample::new();
        assert_eq!(walk_back(&sample, sample.b, None, 0), ["A2", "A1", "A", "Root"]);
    }

    #[test]
    fn test_limit_keeps_nearest_predecessors() {
        let sample = Sample::new();
        assert_eq!(walk_back(&sample, sample.c1, Some(sample.root), 2), ["C", "B"]);
    }

    #[test]
    fn test_detached_start_yields_nothing() {
        let sample = Sample::new();
        sample.registry.set_parent(sample.b, None).unwrap();
        assert!(walk_back(&sample, sample.b, Some(sample.root), 0).is_empty());
    }
}
