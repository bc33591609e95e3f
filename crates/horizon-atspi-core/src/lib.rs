//! Core types for Horizon AT-SPI.
//!
//! This crate provides the pieces every AT-SPI adaptor shares:
//!
//! - **Tree contract**: [`AccessibleTree`], read access to an externally owned,
//!   mutable accessibility tree through short-lived node handles
//! - **Vocabulary**: [`Role`], [`State`]/[`StateSet`], [`Interface`]/[`InterfaceSet`]
//!   and [`Attribute`]
//! - **Object registry**: [`AccessibleRegistry`] and [`SharedAccessibleRegistry`],
//!   an in-memory tree provider with bus object paths
//! - **Logging**: tracing targets and a tree renderer for diagnostics
//!
//! # Example
//!
//! ```
//! use horizon_atspi_core::{AccessibleData, AccessibleTree, Role, SharedAccessibleRegistry, State};
//!
//! let registry = SharedAccessibleRegistry::new();
//! let frame = registry.register(AccessibleData::new(Role::Frame).with_name("main"));
//! let button = registry
//!     .register_child(frame, AccessibleData::new(Role::PushButton).with_state(State::Focusable))
//!     .unwrap();
//!
//! assert_eq!(registry.child_at(&frame, 0), Some(button));
//! assert_eq!(registry.role(&button), Role::PushButton);
//! ```

pub mod attribute;
mod error;
pub mod interface;
pub mod logging;
pub mod registry;
pub mod role;
pub mod state;
pub mod tree;

pub use attribute::Attribute;
pub use error::{Error, Result};
pub use interface::{Interface, InterfaceSet};
pub use logging::{AccessibleTreeDebug, PerfSpan, TreeFormatOptions, TreeStyle};
pub use registry::{AccessibleData, AccessibleRegistry, ObjectId, SharedAccessibleRegistry};
pub use role::Role;
pub use state::{State, StateSet};
pub use tree::{AccessibleTree, ObjectResolver};
