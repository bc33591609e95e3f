//! Horizon AT-SPI: the accessibility Collection service for Horizon toolkits.
//!
//! This crate bundles the tree-provider contract, the reference object
//! registry and the Collection query engine, and adds the bus-facing
//! [`CollectionAdaptor`] that answers `GetMatches`, `GetMatchesFrom` and
//! `GetMatchesTo` in terms of object paths.
//!
//! # Quick Start
//!
//! ```
//! use horizon_atspi::prelude::*;
//!
//! let registry = SharedAccessibleRegistry::new();
//! let window = registry.register(AccessibleData::new(Role::Frame).with_name("main"));
//! let ok = registry
//!     .register_child(window, AccessibleData::new(Role::PushButton).with_name("OK"))
//!     .unwrap();
//!
//! let adaptor = CollectionAdaptor::new(registry);
//! let buttons = MatchRuleArgs {
//!     // Role bits, 32 per word.
//!     roles: vec![0, 1 << (Role::PushButton.as_raw() - 32)],
//!     role_match: MatchType::All.as_raw(),
//!     ..Default::default()
//! };
//! let window_path = adaptor.tree().path_of(&window);
//! let found = adaptor.get_matches(&window_path, buttons, 1, 0, true).unwrap();
//!
//! assert_eq!(found, vec![ObjectReference::new(adaptor.tree().path_of(&ok))]);
//! ```
//!
//! # Crate Organization
//!
//! - Core types are re-exported at the crate root
//! - [`collection`]: match rules, traversal and query orchestration
//! - [`adaptor`]: path-based entry points

pub mod adaptor;

pub use adaptor::{CollectionAdaptor, ObjectReference};
pub use horizon_atspi_core::*;

/// Collection query engine.
pub mod collection {
    pub use horizon_atspi_collection::*;
}

/// Commonly used types.
pub mod prelude {
    pub use crate::adaptor::{CollectionAdaptor, ObjectReference};
    pub use horizon_atspi_collection::{
        Collection, CollectionConfig, Direction, MatchRule, MatchRuleArgs, MatchType, Query,
        SortOrder, TreeTraversal,
    };
    pub use horizon_atspi_core::{
        AccessibleData, AccessibleTree, Attribute, Interface, ObjectId, ObjectResolver, Role,
        SharedAccessibleRegistry, State, StateSet,
    };
}
