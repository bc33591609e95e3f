//! Query orchestration: picks a walk for a scope and direction, applies the
//! limit and puts the results in the requested order.

use std::fmt;

use horizon_atspi_core::AccessibleTree;
use horizon_atspi_core::logging::targets;

use crate::config::CollectionConfig;
use crate::rule::{MatchRule, RuleMatcher};
use crate::traverse::Walker;

/// Order of the returned objects. The discriminant is the AT-SPI wire code.
///
/// Only [`Canonical`](Self::Canonical) and
/// [`ReverseCanonical`](Self::ReverseCanonical) are implemented; the others
/// yield an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum SortOrder {
    Invalid = 0,
    /// Document order.
    #[default]
    Canonical = 1,
    Flow = 2,
    Tab = 3,
    /// Reverse document order.
    ReverseCanonical = 4,
    ReverseFlow = 5,
    ReverseTab = 6,
}

impl SortOrder {
    /// Decode a wire code. Unknown codes decode as [`Invalid`](Self::Invalid).
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Canonical,
            2 => Self::Flow,
            3 => Self::Tab,
            4 => Self::ReverseCanonical,
            5 => Self::ReverseFlow,
            6 => Self::ReverseTab,
            _ => Self::Invalid,
        }
    }

    #[inline]
    pub fn as_raw(self) -> u32 {
        self as u32
    }

    /// Whether results come out in reverse, or `None` if unsupported.
    fn reversed(self) -> Option<bool> {
        match self {
            Self::Canonical => Some(false),
            Self::ReverseCanonical => Some(true),
            _ => None,
        }
    }
}

/// The part of the tree a directional query covers.
/// The discriminant is the AT-SPI wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TreeTraversal {
    /// The anchor's descendants.
    RestrictChildren = 0,
    /// The anchor's subtree and its younger siblings with their subtrees.
    RestrictSibling = 1,
    /// The whole collection, in document order around the anchor.
    Inorder = 2,
}

impl TreeTraversal {
    /// Decode a wire code.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::RestrictChildren),
            1 => Some(Self::RestrictSibling),
            2 => Some(Self::Inorder),
            _ => None,
        }
    }

    #[inline]
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Whether a query looks forward from the anchor or back towards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Objects after the anchor (`GetMatchesFrom`).
    From,
    /// Objects before the anchor (`GetMatchesTo`).
    To,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::From => "from",
            Direction::To => "to",
        })
    }
}

/// A complete directional query.
#[derive(Debug, Clone)]
pub struct Query<N> {
    /// The object the query is issued from. Never part of the result.
    pub anchor: N,
    /// The collection root; the upper bound for whole-collection scopes.
    pub collection: N,
    pub rule: MatchRule,
    pub sort: SortOrder,
    pub scope: TreeTraversal,
    pub direction: Direction,
    /// Maximum number of results, 0 for unbounded.
    pub limit: usize,
    /// For [`Direction::To`] with a restricted scope: only look back within
    /// the anchor's parent instead of the whole collection.
    pub recurse: bool,
    /// Whether to descend into children that are collections themselves.
    pub traverse: bool,
}

impl<N> Query<N> {
    /// A query over the anchor's children with no filter, in document order.
    pub fn new(collection: N, anchor: N) -> Self {
        Self {
            anchor,
            collection,
            rule: MatchRule::any_object(),
            sort: SortOrder::Canonical,
            scope: TreeTraversal::RestrictChildren,
            direction: Direction::From,
            limit: 0,
            recurse: false,
            traverse: true,
        }
    }

    pub fn with_rule(mut self, rule: MatchRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_scope(mut self, scope: TreeTraversal) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    pub fn with_traverse(mut self, traverse: bool) -> Self {
        self.traverse = traverse;
        self
    }
}

/// The collection query engine bound to one tree.
///
/// Queries hold no state between calls and never fail: stale anchors and
/// vanished nodes shorten the result, unsupported sort orders empty it.
pub struct Collection<'a, T: AccessibleTree> {
    tree: &'a T,
    config: &'a CollectionConfig,
}

impl<'a, T: AccessibleTree> Collection<'a, T> {
    pub fn new(tree: &'a T, config: &'a CollectionConfig) -> Self {
        Self { tree, config }
    }

    pub fn config(&self) -> &CollectionConfig {
        self.config
    }

    /// All matches below `collection`, in document order or its reverse.
    #[tracing::instrument(
        level = "debug",
        target = "horizon_atspi_collection",
        skip_all,
        fields(sort = ?sort, limit = limit, traverse = traverse)
    )]
    pub fn get_matches(
        &self,
        collection: &T::Node,
        rule: &MatchRule,
        sort: SortOrder,
        limit: usize,
        traverse: bool,
    ) -> Vec<T::Node> {
        let Some(reversed) = self.supported(sort) else {
            return Vec::new();
        };
        let mut walker = self
            .walker(rule, collection, limit)
            .with_traverse(traverse);
        let _ = walker.canonical(collection, 0);
        self.finish(walker.into_results(), reversed)
    }

    /// Matches after `current`, within `scope`.
    #[allow(clippy::too_many_arguments)]
    pub fn get_matches_from(
        &self,
        collection: &T::Node,
        current: &T::Node,
        rule: &MatchRule,
        sort: SortOrder,
        scope: TreeTraversal,
        limit: usize,
        traverse: bool,
    ) -> Vec<T::Node> {
        self.run(
            collection,
            current,
            rule,
            sort,
            scope,
            Direction::From,
            limit,
            false,
            traverse,
        )
    }

    /// Matches before `current`, within `scope`.
    ///
    /// For the restricted scopes, `recurse` limits the look-back to the
    /// children of `current`'s parent; otherwise it reaches back to
    /// `collection`. [`TreeTraversal::Inorder`] always reaches back to
    /// `collection`.
    #[allow(clippy::too_many_arguments)]
    pub fn get_matches_to(
        &self,
        collection: &T::Node,
        current: &T::Node,
        rule: &MatchRule,
        sort: SortOrder,
        scope: TreeTraversal,
        recurse: bool,
        limit: usize,
        traverse: bool,
    ) -> Vec<T::Node> {
        self.run(
            collection,
            current,
            rule,
            sort,
            scope,
            Direction::To,
            limit,
            recurse,
            traverse,
        )
    }

    /// Run a directional query.
    pub fn query(&self, query: &Query<T::Node>) -> Vec<T::Node> {
        self.run(
            &query.collection,
            &query.anchor,
            &query.rule,
            query.sort,
            query.scope,
            query.direction,
            query.limit,
            query.recurse,
            query.traverse,
        )
    }

    #[allow(clippy::too_many_arguments)]
    #[tracing::instrument(
        level = "debug",
        target = "horizon_atspi_collection",
        skip_all,
        fields(
            direction = %direction,
            sort = ?sort,
            scope = ?scope,
            limit = limit,
            recurse = recurse,
            traverse = traverse
        )
    )]
    fn run(
        &self,
        collection: &T::Node,
        anchor: &T::Node,
        rule: &MatchRule,
        sort: SortOrder,
        scope: TreeTraversal,
        direction: Direction,
        limit: usize,
        recurse: bool,
        traverse: bool,
    ) -> Vec<T::Node> {
        let Some(reversed) = self.supported(sort) else {
            return Vec::new();
        };
        if !self.tree.is_valid(anchor) {
            tracing::debug!(target: targets::COLLECTION, ?anchor, "anchor is stale");
            return Vec::new();
        }

        let walker = self.walker(rule, anchor, limit);
        if !walker.encloses(collection, anchor) {
            tracing::debug!(target: targets::COLLECTION, ?anchor, "anchor is outside the collection");
            return Vec::new();
        }
        match direction {
            Direction::From => {
                let results = self.walk_from(walker, collection, anchor, scope, traverse);
                self.finish(results, reversed)
            }
            // Looking back yields reverse document order, so a forward
            // request is the one that gets flipped.
            Direction::To => {
                let results = self.walk_to(walker, collection, anchor, scope, recurse, traverse);
                self.finish(results, !reversed)
            }
        }
    }

    fn walk_from(
        &self,
        walker: Walker<'_, T>,
        collection: &T::Node,
        anchor: &T::Node,
        scope: TreeTraversal,
        traverse: bool,
    ) -> Vec<T::Node> {
        // The whole-collection sweep always enters nested collections.
        let traverse = traverse || scope == TreeTraversal::Inorder;
        let mut walker = walker.with_traverse(traverse);
        match scope {
            TreeTraversal::RestrictChildren => {
                let _ = walker.canonical(anchor, 0);
            }
            // The collection's own siblings lie outside it.
            TreeTraversal::RestrictSibling if anchor == collection => {}
            TreeTraversal::RestrictSibling => {
                let parent = self.tree.parent(anchor);
                let index = self.tree.index_in_parent(anchor);
                match (parent, index) {
                    // Starting at the anchor's own slot covers its subtree too.
                    (Some(parent), Some(index)) => {
                        let _ = walker.canonical(&parent, index);
                    }
                    _ => tracing::debug!(target: targets::COLLECTION, ?anchor, "anchor has no parent"),
                }
            }
            TreeTraversal::Inorder => {
                let _ = walker.inorder(collection, anchor);
            }
        }
        walker.into_results()
    }

    fn walk_to(
        &self,
        walker: Walker<'_, T>,
        collection: &T::Node,
        anchor: &T::Node,
        scope: TreeTraversal,
        recurse: bool,
        traverse: bool,
    ) -> Vec<T::Node> {
        let (boundary, traverse) = match scope {
            TreeTraversal::Inorder => (Some(collection.clone()), true),
            _ if recurse && anchor != collection => match self.tree.parent(anchor) {
                Some(parent) => (Some(parent), traverse),
                None => {
                    tracing::debug!(target: targets::COLLECTION, ?anchor, "anchor has no parent");
                    return Vec::new();
                }
            },
            _ => (Some(collection.clone()), traverse),
        };
        let mut walker = walker.with_traverse(traverse).with_stop(boundary);
        let _ = walker.reverse_canonical(anchor);
        walker.into_results()
    }

    fn walker<'w>(&'w self, rule: &'w MatchRule, anchor: &T::Node, limit: usize) -> Walker<'w, T> {
        Walker::new(
            self.tree,
            RuleMatcher::new(rule, self.config),
            anchor.clone(),
            self.config.effective_limit(limit),
        )
        .with_max_depth(self.config.max_depth)
    }

    fn supported(&self, sort: SortOrder) -> Option<bool> {
        let reversed = sort.reversed();
        if reversed.is_none() {
            tracing::warn!(target: targets::COLLECTION, ?sort, "sort order not implemented");
        }
        reversed
    }

    fn finish(&self, mut results: Vec<T::Node>, reverse: bool) -> Vec<T::Node> {
        if reverse {
            results.reverse();
        }
        tracing::debug!(target: targets::COLLECTION, matches = results.len(), "query finished");
        results
    }
}

#[cfg(test)]
mod tests {
    use horizon_atspi_core::{ObjectId, Role};

    use super::*;
    use crate::rule::MatchType;
    use crate::traverse::fixtures::{PanelBoundaries, Sample};

    fn run(sample: &Sample, query: &Query<ObjectId>) -> Vec<String> {
        let config = CollectionConfig::default();
        let collection = Collection::new(&sample.registry, &config);
        sample.names(&collection.query(query))
    }

    /// Run against a view of the sample in which panels are collections.
    fn run_with_panel_boundaries(sample: &Sample, query: &Query<ObjectId>) -> Vec<String> {
        let tree = PanelBoundaries(&sample.registry);
        let config = CollectionConfig::default();
        let collection = Collection::new(&tree, &config);
        sample.names(&collection.query(query))
    }

    fn from_root(sample: &Sample) -> Query<ObjectId> {
        Query::new(sample.root, sample.root)
    }

    #[test]
    fn test_children_scope_in_document_order() {
        let sample = Sample::new();
        assert_eq!(run(&sample, &from_root(&sample)), ["A", "A1", "A2", "B", "C", "C1"]);
    }

    #[test]
    fn test_reverse_canonical_is_mirror() {
        let sample = Sample::new();
        let query = from_root(&sample).with_sort(SortOrder::ReverseCanonical);
        assert_eq!(run(&sample, &query), ["C1", "C", "B", "A2", "A1", "A"]);
    }

    #[test]
    fn test_interface_filter() {
        let sample = Sample::new();
        let rule = MatchRule::builder().interfaces(["text"], MatchType::Any).build();
        assert_eq!(run(&sample, &from_root(&sample).with_rule(rule)), ["C1"]);
    }

    #[test]
    fn test_limit_returns_prefix() {
        let sample = Sample::new();
        let full = run(&sample, &from_root(&sample));
        for limit in 1..full.len() {
            let limited = run(&sample, &from_root(&sample).with_limit(limit));
            assert_eq!(limited, full[..limit]);
        }
    }

    #[test]
    fn test_max_results_caps_limit() {
        let sample = Sample::new();
        let config = CollectionConfig::new().with_max_results(2);
        let collection = Collection::new(&sample.registry, &config);
        let results = collection.query(&from_root(&sample).with_limit(5));
        assert_eq!(sample.names(&results), ["A", "A1"]);
    }

    #[test]
    fn test_sibling_scope_covers_anchor_subtree_and_younger_siblings() {
        let sample = Sample::new();
        let query = Query::new(sample.root, sample.a).with_scope(TreeTraversal::RestrictSibling);
        assert_eq!(run(&sample, &query), ["A1", "A2", "B", "C", "C1"]);

        let query = Query::new(sample.root, sample.b).with_scope(TreeTraversal::RestrictSibling);
        assert_eq!(run(&sample, &query), ["C", "C1"]);
    }

    #[test]
    fn test_sibling_scope_on_root_is_empty() {
        let sample = Sample::new();
        let query = from_root(&sample).with_scope(TreeTraversal::RestrictSibling);
        assert!(run(&sample, &query).is_empty());
    }

    #[test]
    fn test_inorder_scope_wraps_around_collection() {
        let sample = Sample::new();
        let query = Query::new(sample.root, sample.a1).with_scope(TreeTraversal::Inorder);
        assert_eq!(run(&sample, &query), ["A2", "B", "C", "C1", "A"]);

        let reversed = query.with_sort(SortOrder::ReverseCanonical);
        assert_eq!(run(&sample, &reversed), ["A", "C1", "C", "B", "A2"]);
    }

    #[test]
    fn test_to_direction_sort_combinations() {
        let sample = Sample::new();
        let to = Query::new(sample.root, sample.c1).with_direction(Direction::To);

        assert_eq!(
            run(&sample, &to.clone().with_sort(SortOrder::Canonical)),
            ["A", "A1", "A2", "B", "C"]
        );
        assert_eq!(
            run(&sample, &to.with_sort(SortOrder::ReverseCanonical)),
            ["C", "B", "A2", "A1", "A"]
        );
    }

    #[test]
    fn test_from_direction_sort_combinations() {
        let sample = Sample::new();
        let from = Query::new(sample.root, sample.a).with_scope(TreeTraversal::RestrictSibling);

        assert_eq!(
            run(&sample, &from.clone().with_sort(SortOrder::Canonical)),
            ["A1", "A2", "B", "C", "C1"]
        );
        assert_eq!(
            run(&sample, &from.with_sort(SortOrder::ReverseCanonical)),
            ["C1", "C", "B", "A2", "A1"]
        );
    }

    #[test]
    fn test_to_direction_with_recurse_stays_in_parent() {
        let sample = Sample::new();
        let query = Query::new(sample.root, sample.a2)
            .with_direction(Direction::To)
            .with_recurse(true);
        assert_eq!(run(&sample, &query), ["A1"]);

        let whole = query.with_recurse(false);
        assert_eq!(run(&sample, &whole), ["A", "A1"]);
    }

    #[test]
    fn test_to_direction_limit_keeps_nearest() {
        let sample = Sample::new();
        let query = Query::new(sample.root, sample.c1)
            .with_direction(Direction::To)
            .with_limit(2);
        assert_eq!(run(&sample, &query), ["B", "C"]);
    }

    #[test]
    fn test_to_inorder_reaches_back_to_collection() {
        let sample = Sample::new();
        let query = Query::new(sample.root, sample.b)
            .with_direction(Direction::To)
            .with_scope(TreeTraversal::Inorder)
            .with_recurse(true);
        assert_eq!(run(&sample, &query), ["A", "A1", "A2"]);
    }

    #[test]
    fn test_anchor_is_never_returned() {
        let sample = Sample::new();
        let anchors = [sample.root, sample.a, sample.a1, sample.b, sample.c, sample.c1];
        let scopes = [
            TreeTraversal::RestrictChildren,
            TreeTraversal::RestrictSibling,
            TreeTraversal::Inorder,
        ];
        let config = CollectionConfig::default();
        let collection = Collection::new(&sample.registry, &config);

        for anchor in anchors {
            for scope in scopes {
                for direction in [Direction::From, Direction::To] {
                    for sort in [SortOrder::Canonical, SortOrder::ReverseCanonical] {
                        let query = Query::new(sample.root, anchor)
                            .with_scope(scope)
                            .with_direction(direction)
                            .with_sort(sort);
                        let results = collection.query(&query);
                        assert!(!results.contains(&anchor), "{query:?}");
                        let mut unique = results.clone();
                        unique.sort();
                        unique.dedup();
                        assert_eq!(unique.len(), results.len(), "{query:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_repeated_queries_agree() {
        let sample = Sample::new();
        let query = Query::new(sample.root, sample.a1).with_scope(TreeTraversal::Inorder);
        assert_eq!(run(&sample, &query), run(&sample, &query));
    }

    #[test]
    fn test_unsupported_sort_orders_are_empty() {
        let sample = Sample::new();
        for sort in [
            SortOrder::Invalid,
            SortOrder::Flow,
            SortOrder::Tab,
            SortOrder::ReverseFlow,
            SortOrder::ReverseTab,
        ] {
            assert!(run(&sample, &from_root(&sample).with_sort(sort)).is_empty());
        }
    }

    #[test]
    fn test_stale_anchor_is_empty() {
        let sample = Sample::new();
        sample.registry.destroy(sample.c).unwrap();
        let query = Query::new(sample.root, sample.c);
        assert!(run(&sample, &query).is_empty());
    }

    #[test]
    fn test_get_matches_covers_whole_collection() {
        let sample = Sample::new();
        let config = CollectionConfig::default();
        let collection = Collection::new(&sample.registry, &config);
        let rule = MatchRule::builder()
            .roles([Role::PushButton, Role::Entry], MatchType::Any)
            .build();

        let forward = collection.get_matches(&sample.root, &rule, SortOrder::Canonical, 0, true);
        assert_eq!(sample.names(&forward), ["A1", "A2", "C1"]);
        let backward =
            collection.get_matches(&sample.root, &rule, SortOrder::ReverseCanonical, 0, true);
        assert_eq!(sample.names(&backward), ["C1", "A2", "A1"]);
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(SortOrder::from_raw(4), SortOrder::ReverseCanonical);
        assert_eq!(SortOrder::from_raw(42), SortOrder::Invalid);
        assert_eq!(SortOrder::Tab.as_raw(), 3);
        assert_eq!(TreeTraversal::from_raw(1), Some(TreeTraversal::RestrictSibling));
        assert_eq!(TreeTraversal::from_raw(3), None);
    }

    #[test]
    fn test_anchor_outside_collection_is_empty() {
        let sample = Sample::new();
        let inorder = Query::new(sample.c, sample.a1).with_scope(TreeTraversal::Inorder);
        assert!(run(&sample, &inorder).is_empty());
        assert!(run(&sample, &inorder.with_direction(Direction::To)).is_empty());

        let back = Query::new(sample.a, sample.c1).with_direction(Direction::To);
        assert!(run(&sample, &back).is_empty());
        let children = Query::new(sample.a, sample.c);
        assert!(run(&sample, &children).is_empty());

        // The collection's ancestors are outside it too.
        let above = Query::new(sample.a, sample.root).with_scope(TreeTraversal::Inorder);
        assert!(run(&sample, &above).is_empty());
    }

    #[test]
    fn test_queries_from_the_collection_itself_stay_inside() {
        let sample = Sample::new();
        let siblings = Query::new(sample.c, sample.c).with_scope(TreeTraversal::RestrictSibling);
        assert!(run(&sample, &siblings).is_empty());

        let back = Query::new(sample.c, sample.c)
            .with_direction(Direction::To)
            .with_recurse(true);
        assert!(run(&sample, &back).is_empty());
        let back_siblings = back.with_scope(TreeTraversal::RestrictSibling);
        assert!(run(&sample, &back_siblings).is_empty());

        let children = Query::new(sample.c, sample.c);
        assert_eq!(run(&sample, &children), ["C1"]);
    }

    #[test]
    fn test_anchor_inside_nested_collection() {
        let sample = Sample::new();
        let back = Query::new(sample.a, sample.a2).with_direction(Direction::To);
        assert_eq!(run(&sample, &back), ["A1"]);

        let sweep = Query::new(sample.a, sample.a1).with_scope(TreeTraversal::Inorder);
        assert_eq!(run(&sample, &sweep), ["A2"]);
    }

    #[test]
    fn test_traverse_off_skips_nested_collections() {
        let sample = Sample::new();
        let query = from_root(&sample).with_traverse(false);
        assert_eq!(run_with_panel_boundaries(&sample, &query), ["A", "B", "C"]);
        assert_eq!(
            run_with_panel_boundaries(&sample, &query.with_traverse(true)),
            ["A", "A1", "A2", "B", "C", "C1"]
        );
    }

    #[test]
    fn test_inorder_descends_regardless_of_traverse() {
        let sample = Sample::new();
        let query = Query::new(sample.root, sample.a1)
            .with_scope(TreeTraversal::Inorder)
            .with_traverse(false);
        assert_eq!(run_with_panel_boundaries(&sample, &query), ["A2", "B", "C", "C1", "A"]);

        let back = Query::new(sample.root, sample.c1)
            .with_scope(TreeTraversal::Inorder)
            .with_direction(Direction::To)
            .with_traverse(false);
        assert_eq!(run_with_panel_boundaries(&sample, &back), ["A", "A1", "A2", "B", "C"]);
    }

    #[test]
    fn test_looking_back_without_traverse_stays_at_sibling_level() {
        let sample = Sample::new();
        let back = Query::new(sample.root, sample.c1)
            .with_direction(Direction::To)
            .with_traverse(false);
        assert_eq!(run_with_panel_boundaries(&sample, &back), ["A", "B", "C"]);
        assert_eq!(
            run_with_panel_boundaries(&sample, &back.clone().with_sort(SortOrder::ReverseCanonical)),
            ["C", "B", "A"]
        );
        assert_eq!(
            run_with_panel_boundaries(&sample, &back.with_traverse(true)),
            ["A", "A1", "A2", "B", "C"]
        );
    }
}
