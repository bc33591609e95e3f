//! Decoding of bus-level collection arguments.
//!
//! The match rule travels as the struct `(aiisiaiisib)`, or `(aii(as)iaiisib)`
//! when the attributes are sent as a string list. [`MatchRuleArgs`] is a
//! field-for-field mirror of it; [`MatchRuleArgs::into_rule`] validates and
//! converts it into a [`MatchRule`].

use horizon_atspi_core::{Attribute, Role, StateSet};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rule::{MatchRule, MatchType};

/// The attribute criterion as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeArgs {
    /// `name:value` pairs separated by newlines.
    String(String),
    /// One `name:value` pair per entry.
    List(Vec<String>),
}

impl Default for AttributeArgs {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl AttributeArgs {
    /// Parse into attributes. Blank entries are dropped.
    pub fn parse(&self) -> Vec<Attribute> {
        let entries: Vec<&str> = match self {
            AttributeArgs::String(text) => text.split('\n').collect(),
            AttributeArgs::List(items) => items.iter().map(String::as_str).collect(),
        };
        entries
            .into_iter()
            .filter(|entry| !entry.is_empty())
            .map(Attribute::parse)
            .collect()
    }
}

/// Raw match rule arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRuleArgs {
    /// State bit array, 32 states per word.
    pub states: Vec<i32>,
    pub state_match: i32,
    pub attributes: AttributeArgs,
    pub attribute_match: i32,
    /// Role bit array, 32 roles per word.
    pub roles: Vec<i32>,
    pub role_match: i32,
    /// Interface names separated by `;`.
    pub interfaces: String,
    pub interface_match: i32,
    pub invert: bool,
}

impl MatchRuleArgs {
    /// Validate and convert into a [`MatchRule`].
    ///
    /// Fails on bits that name no state or role, and on unknown match codes.
    pub fn into_rule(self) -> Result<MatchRule> {
        let words: Vec<u32> = self.states.iter().map(|word| *word as u32).collect();
        let (states, unknown) = StateSet::from_bits(&words);
        if let Some(bit) = unknown {
            return Err(Error::invalid_arguments(format!("unknown state bit {bit}")));
        }

        let roles = bitarray_to_seq(&self.roles)
            .map(|raw| {
                Role::from_raw(raw)
                    .ok_or_else(|| Error::invalid_arguments(format!("unknown role {raw}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let interfaces: Vec<&str> = self
            .interfaces
            .split(';')
            .filter(|name| !name.is_empty())
            .collect();

        Ok(MatchRule::builder()
            .state_set(states, match_type(self.state_match, "state")?)
            .attributes(self.attributes.parse(), match_type(self.attribute_match, "attribute")?)
            .roles(roles, match_type(self.role_match, "role")?)
            .interfaces(interfaces, match_type(self.interface_match, "interface")?)
            .invert(self.invert)
            .build())
    }
}

/// Positions of the set bits in a little-endian word array.
fn bitarray_to_seq(words: &[i32]) -> impl Iterator<Item = u32> + '_ {
    words.iter().enumerate().flat_map(|(index, word)| {
        let word = *word as u32;
        (0..32u32)
            .filter(move |bit| word & (1 << bit) != 0)
            .map(move |bit| index as u32 * 32 + bit)
    })
}

fn match_type(raw: i32, criterion: &str) -> Result<MatchType> {
    MatchType::from_raw(raw)
        .ok_or_else(|| Error::invalid_arguments(format!("unknown {criterion} match type {raw}")))
}

/// Convert a wire result count. 0 means unbounded; negative counts are rejected.
pub fn limit_from_raw(count: i32) -> Result<usize> {
    usize::try_from(count)
        .map_err(|_| Error::invalid_arguments(format!("negative result count {count}")))
}
