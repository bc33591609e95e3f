//! Forward document-order walk.

use std::ops::ControlFlow;

use horizon_atspi_core::AccessibleTree;
use horizon_atspi_core::logging::targets;

use super::Walker;

impl<T: AccessibleTree> Walker<'_, T> {
    /// Walk the children of `container` from `start` onward in pre-order.
    ///
    /// `container` itself is never visited. Each child is visited before its
    /// own children, which are entered only when the walker's traverse flag
    /// allows it.
    pub fn canonical(&mut self, container: &T::Node, start: usize) -> ControlFlow<()> {
        self.canonical_at(container, start, 0)
    }

    fn canonical_at(&mut self, container: &T::Node, start: usize, depth: usize) -> ControlFlow<()> {
        let mut index = start;
        // The child count is re-read every step; the tree may change under us.
        while index < self.tree.child_count(container) {
            let Some(child) = self.tree.child_at(container, index) else {
                break;
            };
            if self.is_stop(&child) {
                tracing::trace!(target: targets::TRAVERSAL, ?child, "reached stop node");
                return ControlFlow::Break(());
            }

            self.visit(&child)?;

            if self.descends_into(&child) {
                if depth >= self.max_depth {
                    tracing::warn!(
                        target: targets::TRAVERSAL,
                        ?child,
                        max_depth = self.max_depth,
                        "maximum depth exceeded, skipping subtree"
                    );
                } else {
                    self.canonical_at(&child, 0, depth + 1)?;
                }
            }
            index += 1;
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use horizon_atspi_core::{AccessibleData, ObjectId, Role};

    use super::*;
    use crate::config::CollectionConfig;
    use crate::rule::{MatchRule, RuleMatcher};
    use crate::traverse::fixtures::Sample;

    fn walk(sample: &Sample, container: ObjectId, start: usize, limit: usize) -> Vec<String> {
        let rule = MatchRule::any_object();
        let config = CollectionConfig::default();
        let mut walker = Walker::new(
            &sample.registry,
            RuleMatcher::new(&rule, &config),
            container,
            limit,
        );
        let _ = walker.canonical(&container, start);
        sample.names(walker.results())
    }

    #[test]
    fn test_preorder_from_root() {
        let sample = Sample::new();
        assert_eq!(walk(&sample, sample.root, 0, 0), ["A", "A1", "A2", "B", "C", "C1"]);
    }

    #[test]
    fn test_start_index_skips_older_children() {
        let sample = Sample::new();
        assert_eq!(walk(&sample, sample.root, 1, 0), ["B", "C", "C1"]);
        assert!(walk(&sample, sample.root, 3, 0).is_empty());
    }

    #[test]
    fn test_limit_stops_the_walk() {
        let sample = Sample::new();
        assert_eq!(walk(&sample, sample.root, 0, 3), ["A", "A1", "A2"]);
    }

    #[test]
    fn test_stop_node_ends_whole_walk() {
        let sample = Sample::new();
        let rule = MatchRule::any_object();
        let config = CollectionConfig::default();
        let mut walker = Walker::new(
            &sample.registry,
            RuleMatcher::new(&rule, &config),
            sample.root,
            0,
        )
        .with_stop(Some(sample.a2));

        assert!(walker.canonical(&sample.root, 0).is_break());
        assert_eq!(sample.names(walker.results()), ["A", "A1"]);
    }

    #[test]
    fn test_traverse_flag_controls_descent() {
        let sample = Sample::new();
        let rule = MatchRule::any_object();
        let config = CollectionConfig::default();
        let mut walker = Walker::new(
            &sample.registry,
            RuleMatcher::new(&rule, &config),
            sample.root,
            0,
        )
        .with_traverse(false);

        let _ = walker.canonical(&sample.root, 0);
        assert_eq!(sample.names(walker.results()), ["A", "B", "C"]);
    }

    #[test]
    fn test_max_depth_prunes_deep_branches() {
        let sample = Sample::new();
        let rule = MatchRule::any_object();
        let config = CollectionConfig::default();
        let mut walker = Walker::new(
            &sample.registry,
            RuleMatcher::new(&rule, &config),
            sample.root,
            0,
        )
        .with_max_depth(0);

        let _ = walker.canonical(&sample.root, 0);
        assert_eq!(sample.names(walker.results()), ["A", "B", "C"]);
    }

    #[test]
    fn test_walk_reflects_current_structure() {
        let sample = Sample::new();
        sample.registry.destroy(sample.b).unwrap();
        sample
            .registry
            .register_child(sample.c, AccessibleData::new(Role::Label).with_name("C2"))
            .unwrap();
        assert_eq!(walk(&sample, sample.root, 0, 0), ["A", "A1", "A2", "C", "C1", "C2"]);
    }
}
