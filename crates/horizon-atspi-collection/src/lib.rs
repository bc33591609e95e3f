//! Collection query engine for Horizon AT-SPI.
//!
//! The engine answers the three `org.a11y.atspi.Collection` methods over any
//! [`AccessibleTree`](horizon_atspi_core::AccessibleTree):
//!
//! - **Match rules**: [`MatchRule`] with per-criterion [`MatchType`]s,
//!   evaluated by [`RuleMatcher`]
//! - **Traversal**: forward, backward and wrap-around walks on
//!   [`traverse::Walker`]
//! - **Orchestration**: [`Collection`] maps a scope, direction and sort order
//!   onto a walk
//! - **Wire arguments**: [`MatchRuleArgs`] decodes the bus representation
//!
//! # Example
//!
//! ```
//! use horizon_atspi_collection::{Collection, CollectionConfig, MatchRule, MatchType, SortOrder};
//! use horizon_atspi_core::{AccessibleData, Role, SharedAccessibleRegistry};
//!
//! let registry = SharedAccessibleRegistry::new();
//! let root = registry.register(AccessibleData::new(Role::Frame));
//! let ok = registry.register_child(root, AccessibleData::new(Role::PushButton)).unwrap();
//! registry.register_child(root, AccessibleData::new(Role::Label)).unwrap();
//!
//! let config = CollectionConfig::default();
//! let collection = Collection::new(&registry, &config);
//! let buttons = MatchRule::builder().roles([Role::PushButton], MatchType::All).build();
//!
//! let found = collection.get_matches(&root, &buttons, SortOrder::Canonical, 0, true);
//! assert_eq!(found, vec![ok]);
//! ```

pub mod args;
pub mod config;
mod error;
mod query;
pub mod rule;
pub mod traverse;

pub use args::{AttributeArgs, MatchRuleArgs, limit_from_raw};
pub use config::{CollectionConfig, StateAnyPolarity};
pub use error::{Error, Result};
pub use query::{Collection, Direction, Query, SortOrder, TreeTraversal};
pub use rule::{MatchRule, MatchRuleBuilder, MatchType, RuleMatcher};
