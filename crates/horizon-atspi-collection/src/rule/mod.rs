//! Match rules: the filter half of a collection query.
//!
//! A [`MatchRule`] carries four independent criteria (states, attributes,
//! roles and interfaces), each with its own [`MatchType`]. An object matches
//! the rule when it satisfies all four.
//!
//! ```
//! use horizon_atspi_collection::{MatchRule, MatchType};
//! use horizon_atspi_core::{Role, State};
//!
//! let rule = MatchRule::builder()
//!     .states([State::Focusable, State::Showing], MatchType::All)
//!     .roles([Role::PushButton, Role::ToggleButton], MatchType::Any)
//!     .build();
//! assert_eq!(rule.role_match(), MatchType::Any);
//! ```

mod matcher;

pub use matcher::RuleMatcher;

use horizon_atspi_core::{AccessibleTree, Attribute, Role, State, StateSet};

use crate::config::CollectionConfig;

/// How the entries of one criterion combine.
///
/// The discriminant is the AT-SPI wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum MatchType {
    /// Unspecified. Only an empty criterion matches.
    Invalid = 0,
    /// Every entry must be satisfied.
    #[default]
    All = 1,
    /// At least one entry must be satisfied.
    Any = 2,
    /// No entry may be satisfied.
    None = 3,
    /// Like [`All`](Self::All); with no entries, the object's own set must be empty.
    Empty = 4,
}

impl MatchType {
    /// Decode a wire code.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Invalid),
            1 => Some(Self::All),
            2 => Some(Self::Any),
            3 => Some(Self::None),
            4 => Some(Self::Empty),
            _ => None,
        }
    }

    #[inline]
    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

/// The criteria of one collection query.
///
/// Immutable once built; use [`MatchRule::builder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRule {
    states: StateSet,
    state_match: MatchType,
    attributes: Vec<Attribute>,
    attribute_match: MatchType,
    roles: Vec<Role>,
    role_match: MatchType,
    interfaces: Vec<String>,
    interface_match: MatchType,
    invert: bool,
}

impl MatchRule {
    /// A rule with every criterion empty. It matches every live object.
    pub fn any_object() -> Self {
        Self::default()
    }

    pub fn builder() -> MatchRuleBuilder {
        MatchRuleBuilder::default()
    }

    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn state_match(&self) -> MatchType {
        self.state_match
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute_match(&self) -> MatchType {
        self.attribute_match
    }

    /// Requested roles, without duplicates, in the order first given.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn role_match(&self) -> MatchType {
        self.role_match
    }

    /// Requested interface names, as given.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn interface_match(&self) -> MatchType {
        self.interface_match
    }

    pub fn invert(&self) -> bool {
        self.invert
    }

    /// Evaluate the rule against one object with the default configuration.
    pub fn matches<T: AccessibleTree>(&self, tree: &T, node: &T::Node) -> bool {
        RuleMatcher::new(self, &CollectionConfig::default()).matches(tree, node)
    }
}

/// Builder for [`MatchRule`].
#[derive(Debug, Clone, Default)]
pub struct MatchRuleBuilder {
    rule: MatchRule,
}

impl MatchRuleBuilder {
    pub fn states(mut self, states: impl IntoIterator<Item = State>, match_type: MatchType) -> Self {
        self.rule.states = states.into_iter().collect();
        self.rule.state_match = match_type;
        self
    }

    pub fn state_set(mut self, states: StateSet, match_type: MatchType) -> Self {
        self.rule.states = states;
        self.rule.state_match = match_type;
        self
    }

    pub fn attributes(
        mut self,
        attributes: impl IntoIterator<Item = Attribute>,
        match_type: MatchType,
    ) -> Self {
        self.rule.attributes = attributes.into_iter().collect();
        self.rule.attribute_match = match_type;
        self
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>, match_type: MatchType) -> Self {
        let mut unique = Vec::new();
        for role in roles {
            if !unique.contains(&role) {
                unique.push(role);
            }
        }
        self.rule.roles = unique;
        self.rule.role_match = match_type;
        self
    }

    pub fn interfaces<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
        match_type: MatchType,
    ) -> Self {
        self.rule.interfaces = names.into_iter().map(Into::into).collect();
        self.rule.interface_match = match_type;
        self
    }

    pub fn invert(mut self, invert: bool) -> Self {
        self.rule.invert = invert;
        self
    }

    pub fn build(self) -> MatchRule {
        self.rule
    }
}
