//! Bus-facing entry points of the `org.a11y.atspi.Collection` interface.
//!
//! The adaptor speaks in object paths and raw wire codes. It resolves both
//! ends of a request through an [`ObjectResolver`], decodes the match rule,
//! and hands the typed query to [`Collection`].

use std::fmt;

use horizon_atspi_collection::{
    Collection, CollectionConfig, Error, MatchRuleArgs, Result, SortOrder, TreeTraversal,
    limit_from_raw,
};
use horizon_atspi_core::{ObjectResolver, PerfSpan};
use horizon_atspi_core::logging::{span_names, targets};

/// A reference to a matched object, as returned on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectReference {
    pub path: String,
}

impl ObjectReference {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Serves Collection requests against one tree provider.
pub struct CollectionAdaptor<T: ObjectResolver> {
    tree: T,
    config: CollectionConfig,
}

impl<T: ObjectResolver> CollectionAdaptor<T> {
    /// Create an adaptor with the default engine configuration.
    pub fn new(tree: T) -> Self {
        Self::with_config(tree, CollectionConfig::default())
    }

    pub fn with_config(tree: T, config: CollectionConfig) -> Self {
        Self { tree, config }
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// `GetMatches`: every match below the object at `path`.
    pub fn get_matches(
        &self,
        path: &str,
        args: MatchRuleArgs,
        sortby: u32,
        count: i32,
        traverse: bool,
    ) -> Result<Vec<ObjectReference>> {
        let _span = tracing::debug_span!(
            target: targets::ADAPTOR,
            span_names::ADAPTOR_CALL,
            method = "GetMatches",
            path,
            sortby,
            count
        )
        .entered();
        let _perf = PerfSpan::new("GetMatches");

        let collection = self.resolve(path)?;
        let rule = args.into_rule()?;
        let limit = limit_from_raw(count)?;

        let found = self.engine().get_matches(
            &collection,
            &rule,
            SortOrder::from_raw(sortby),
            limit,
            traverse,
        );
        Ok(self.references(&found))
    }

    /// `GetMatchesFrom`: matches after the object at `current_path`.
    #[allow(clippy::too_many_arguments)]
    pub fn get_matches_from(
        &self,
        path: &str,
        current_path: &str,
        args: MatchRuleArgs,
        sortby: u32,
        tree: u32,
        count: i32,
        traverse: bool,
    ) -> Result<Vec<ObjectReference>> {
        let _span = tracing::debug_span!(
            target: targets::ADAPTOR,
            span_names::ADAPTOR_CALL,
            method = "GetMatchesFrom",
            path,
            current_path,
            sortby,
            tree,
            count
        )
        .entered();
        let _perf = PerfSpan::new("GetMatchesFrom");

        let collection = self.resolve(path)?;
        let current = self.resolve(current_path)?;
        let rule = args.into_rule()?;
        let scope = scope_from_raw(tree)?;
        let limit = limit_from_raw(count)?;

        let found = self.engine().get_matches_from(
            &collection,
            &current,
            &rule,
            SortOrder::from_raw(sortby),
            scope,
            limit,
            traverse,
        );
        Ok(self.references(&found))
    }

    /// `GetMatchesTo`: matches before the object at `current_path`.
    #[allow(clippy::too_many_arguments)]
    pub fn get_matches_to(
        &self,
        path: &str,
        current_path: &str,
        args: MatchRuleArgs,
        sortby: u32,
        tree: u32,
        recurse: bool,
        count: i32,
        traverse: bool,
    ) -> Result<Vec<ObjectReference>> {
        let _span = tracing::debug_span!(
            target: targets::ADAPTOR,
            span_names::ADAPTOR_CALL,
            method = "GetMatchesTo",
            path,
            current_path,
            sortby,
            tree,
            recurse,
            count
        )
        .entered();
        let _perf = PerfSpan::new("GetMatchesTo");

        let collection = self.resolve(path)?;
        let current = self.resolve(current_path)?;
        let rule = args.into_rule()?;
        let scope = scope_from_raw(tree)?;
        let limit = limit_from_raw(count)?;

        let found = self.engine().get_matches_to(
            &collection,
            &current,
            &rule,
            SortOrder::from_raw(sortby),
            scope,
            recurse,
            limit,
            traverse,
        );
        Ok(self.references(&found))
    }

    fn engine(&self) -> Collection<'_, T> {
        Collection::new(&self.tree, &self.config)
    }

    fn resolve(&self, path: &str) -> Result<T::Node> {
        self.tree.resolve_path(path).ok_or_else(|| {
            tracing::debug!(target: targets::ADAPTOR, path, "object path does not resolve");
            Error::object_not_found(path)
        })
    }

    fn references(&self, nodes: &[T::Node]) -> Vec<ObjectReference> {
        nodes
            .iter()
            .map(|node| ObjectReference::new(self.tree.path_of(node)))
            .collect()
    }
}

fn scope_from_raw(raw: u32) -> Result<TreeTraversal> {
    TreeTraversal::from_raw(raw)
        .ok_or_else(|| Error::invalid_arguments(format!("unknown tree traversal {raw}")))
}

static_assertions::assert_impl_all!(
    CollectionAdaptor<horizon_atspi_core::SharedAccessibleRegistry>: Send, Sync
);
