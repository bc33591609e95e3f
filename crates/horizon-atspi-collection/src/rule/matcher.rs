//! Match rule evaluation.

use horizon_atspi_core::{AccessibleTree, Interface, Role};

use super::{MatchRule, MatchType};
use crate::config::{CollectionConfig, StateAnyPolarity};

/// Evaluates a [`MatchRule`] against live objects.
///
/// Every call goes back to the tree; nothing is cached between objects or
/// between calls for the same object.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatcher<'a> {
    rule: &'a MatchRule,
    config: &'a CollectionConfig,
}

impl<'a> RuleMatcher<'a> {
    pub fn new(rule: &'a MatchRule, config: &'a CollectionConfig) -> Self {
        Self { rule, config }
    }

    pub fn rule(&self) -> &'a MatchRule {
        self.rule
    }

    /// Check whether `node` satisfies all four criteria of the rule.
    ///
    /// Stale nodes never match.
    pub fn matches<T: AccessibleTree>(&self, tree: &T, node: &T::Node) -> bool {
        if !tree.is_valid(node) {
            return false;
        }

        let matched = self.interfaces_match(tree, node)
            && self.states_match(tree, node)
            && self.roles_match(tree, node)
            && self.attributes_match(tree, node);

        if self.config.honor_invert && self.rule.invert {
            !matched
        } else {
            matched
        }
    }

    fn states_match<T: AccessibleTree>(&self, tree: &T, node: &T::Node) -> bool {
        let rule = self.rule;
        if rule.states.is_empty() && rule.state_match != MatchType::Empty {
            return true;
        }

        let own = tree.state_set(node);
        let absent_counts = rule.state_match == MatchType::Any
            && self.config.state_any == StateAnyPolarity::LegacyAbsent;
        let hits = rule
            .states
            .iter()
            .map(|state| own.contains(state) != absent_counts);
        combine(rule.state_match, hits, || own.is_empty())
    }

    fn roles_match<T: AccessibleTree>(&self, tree: &T, node: &T::Node) -> bool {
        let rule = self.rule;
        if rule.roles.is_empty() && rule.role_match != MatchType::Empty {
            return true;
        }

        // A node has exactly one role, so `All` over two or more distinct
        // roles can never be satisfied.
        let own = tree.role(node);
        let hits = rule.roles.iter().map(|role| *role == own);
        combine(rule.role_match, hits, || own == Role::Invalid)
    }

    fn interfaces_match<T: AccessibleTree>(&self, tree: &T, node: &T::Node) -> bool {
        let rule = self.rule;
        if rule.interfaces.is_empty() && rule.interface_match != MatchType::Empty {
            return true;
        }

        let hits = rule.interfaces.iter().map(|name| {
            Interface::from_name(name).is_some_and(|iface| tree.implements(node, iface))
        });
        combine(rule.interface_match, hits, || {
            Interface::ALL.iter().all(|iface| !tree.implements(node, *iface))
        })
    }

    fn attributes_match<T: AccessibleTree>(&self, tree: &T, node: &T::Node) -> bool {
        let rule = self.rule;
        if rule.attributes.is_empty() && rule.attribute_match != MatchType::Empty {
            return true;
        }

        let own = tree.attributes(node);
        let hits = rule
            .attributes
            .iter()
            .map(|wanted| wanted.satisfied_by(&own));
        combine(rule.attribute_match, hits, || own.is_empty())
    }
}

/// Fold the per-entry results of one criterion under `match_type`.
///
/// `own_is_empty` is only consulted for an empty criterion under
/// [`MatchType::Empty`]; every other empty criterion matches.
fn combine<I, F>(match_type: MatchType, hits: I, own_is_empty: F) -> bool
where
    I: IntoIterator<Item = bool>,
    F: FnOnce() -> bool,
{
    let mut hits = hits.into_iter().peekable();
    if hits.peek().is_none() {
        return match match_type {
            MatchType::Empty => own_is_empty(),
            _ => true,
        };
    }

    match match_type {
        MatchType::All | MatchType::Empty => hits.all(|hit| hit),
        MatchType::Any => hits.any(|hit| hit),
        MatchType::None => !hits.any(|hit| hit),
        MatchType::Invalid => false,
    }
}

#[cfg(test)]
mod tests {
    use horizon_atspi_core::{
        AccessibleData, Attribute, ObjectId, Role, SharedAccessibleRegistry, State,
    };

    use super::*;

    fn setup() -> (SharedAccessibleRegistry, ObjectId) {
        let registry = SharedAccessibleRegistry::new();
        let entry = registry.register(
            AccessibleData::new(Role::Entry)
                .with_states([State::Enabled, State::Focusable, State::Showing])
                .with_attribute(Attribute::new("xml-roles", "searchbox"))
                .with_attribute(Attribute::new("Placeholder", "Search"))
                .with_interface(Interface::Text)
                .with_interface(Interface::EditableText),
        );
        (registry, entry)
    }

    fn check(rule: &MatchRule, tree: &SharedAccessibleRegistry, node: ObjectId) -> bool {
        RuleMatcher::new(rule, &CollectionConfig::default()).matches(tree, &node)
    }

    #[test]
    fn test_empty_criteria_match_under_every_combinator() {
        let (registry, entry) = setup();
        for match_type in [
            MatchType::Invalid,
            MatchType::All,
            MatchType::Any,
            MatchType::None,
        ] {
            let rule = MatchRule::builder()
                .states([], match_type)
                .attributes([], match_type)
                .roles([], match_type)
                .interfaces(Vec::<String>::new(), match_type)
                .build();
            assert!(check(&rule, &registry, entry), "{match_type:?}");
        }
    }

    #[test]
    fn test_state_combinators() {
        let (registry, entry) = setup();
        let all = MatchRule::builder()
            .states([State::Enabled, State::Showing], MatchType::All)
            .build();
        let all_missing = MatchRule::builder()
            .states([State::Enabled, State::Checked], MatchType::All)
            .build();
        let any = MatchRule::builder()
            .states([State::Checked, State::Focusable], MatchType::Any)
            .build();
        let any_missing = MatchRule::builder()
            .states([State::Checked, State::Pressed], MatchType::Any)
            .build();
        let none = MatchRule::builder()
            .states([State::Checked, State::Pressed], MatchType::None)
            .build();
        let none_hit = MatchRule::builder()
            .states([State::Checked, State::Enabled], MatchType::None)
            .build();

        assert!(check(&all, &registry, entry));
        assert!(!check(&all_missing, &registry, entry));
        assert!(check(&any, &registry, entry));
        assert!(!check(&any_missing, &registry, entry));
        assert!(check(&none, &registry, entry));
        assert!(!check(&none_hit, &registry, entry));
    }

    #[test]
    fn test_legacy_state_any_counts_absent_states() {
        let (registry, entry) = setup();
        let config = CollectionConfig::new().with_state_any(StateAnyPolarity::LegacyAbsent);
        let all_present = MatchRule::builder()
            .states([State::Enabled, State::Focusable], MatchType::Any)
            .build();
        let one_absent = MatchRule::builder()
            .states([State::Enabled, State::Checked], MatchType::Any)
            .build();

        assert!(!RuleMatcher::new(&all_present, &config).matches(&registry, &entry));
        assert!(RuleMatcher::new(&one_absent, &config).matches(&registry, &entry));
    }

    #[test]
    fn test_role_all_with_several_roles_never_matches() {
        let (registry, entry) = setup();
        let single = MatchRule::builder().roles([Role::Entry], MatchType::All).build();
        let several = MatchRule::builder()
            .roles([Role::Entry, Role::Text], MatchType::All)
            .build();
        let repeated = MatchRule::builder()
            .roles([Role::Entry, Role::Entry], MatchType::All)
            .build();

        assert!(check(&single, &registry, entry));
        assert!(!check(&several, &registry, entry));
        assert!(check(&repeated, &registry, entry));
    }

    #[test]
    fn test_role_any_and_none() {
        let (registry, entry) = setup();
        let any = MatchRule::builder()
            .roles([Role::Text, Role::Entry], MatchType::Any)
            .build();
        let none = MatchRule::builder()
            .roles([Role::Text, Role::Entry], MatchType::None)
            .build();

        assert!(check(&any, &registry, entry));
        assert!(!check(&none, &registry, entry));
    }

    #[test]
    fn test_interface_combinators_ignore_case() {
        let (registry, entry) = setup();
        let all = MatchRule::builder()
            .interfaces(["Text", "EDITABLETEXT"], MatchType::All)
            .build();
        let any = MatchRule::builder()
            .interfaces(["table", "text"], MatchType::Any)
            .build();
        let none = MatchRule::builder()
            .interfaces(["table", "value"], MatchType::None)
            .build();
        let unknown = MatchRule::builder()
            .interfaces(["text", "accessible"], MatchType::All)
            .build();

        assert!(check(&all, &registry, entry));
        assert!(check(&any, &registry, entry));
        assert!(check(&none, &registry, entry));
        assert!(!check(&unknown, &registry, entry));
    }

    #[test]
    fn test_attribute_combinators() {
        let (registry, entry) = setup();
        let all = MatchRule::builder()
            .attributes(
                [
                    Attribute::new("XML-ROLES", "SearchBox"),
                    Attribute::key("placeholder"),
                ],
                MatchType::All,
            )
            .build();
        let any = MatchRule::builder()
            .attributes(
                [Attribute::new("level", "1"), Attribute::new("placeholder", "search")],
                MatchType::Any,
            )
            .build();
        let none = MatchRule::builder()
            .attributes([Attribute::new("xml-roles", "button")], MatchType::None)
            .build();
        let wrong_value = MatchRule::builder()
            .attributes([Attribute::new("xml-roles", "button")], MatchType::All)
            .build();

        assert!(check(&all, &registry, entry));
        assert!(check(&any, &registry, entry));
        assert!(check(&none, &registry, entry));
        assert!(!check(&wrong_value, &registry, entry));
    }

    #[test]
    fn test_invalid_combinator_with_entries_never_matches() {
        let (registry, entry) = setup();
        let rule = MatchRule::builder()
            .states([State::Enabled], MatchType::Invalid)
            .build();
        assert!(!check(&rule, &registry, entry));
    }

    #[test]
    fn test_empty_combinator() {
        let (registry, entry) = setup();
        let bare = registry.register(AccessibleData::new(Role::Invalid));

        let no_states = MatchRule::builder().states([], MatchType::Empty).build();
        let no_attributes = MatchRule::builder().attributes([], MatchType::Empty).build();
        let no_role = MatchRule::builder().roles([], MatchType::Empty).build();
        let no_interfaces = MatchRule::builder()
            .interfaces(Vec::<String>::new(), MatchType::Empty)
            .build();
        let with_entries = MatchRule::builder()
            .states([State::Enabled, State::Showing], MatchType::Empty)
            .build();

        for rule in [&no_states, &no_attributes, &no_role, &no_interfaces] {
            assert!(!check(rule, &registry, entry));
            assert!(check(rule, &registry, bare));
        }
        assert!(check(&with_entries, &registry, entry));
        assert!(!check(&with_entries, &registry, bare));
    }

    #[test]
    fn test_criteria_are_conjoined() {
        let (registry, entry) = setup();
        let rule = MatchRule::builder()
            .states([State::Enabled], MatchType::All)
            .roles([Role::PushButton], MatchType::Any)
            .build();
        assert!(!check(&rule, &registry, entry));
    }

    #[test]
    fn test_invert_is_inert_unless_enabled() {
        let (registry, entry) = setup();
        let rule = MatchRule::builder()
            .roles([Role::Entry], MatchType::All)
            .invert(true)
            .build();

        assert!(check(&rule, &registry, entry));
        let honoring = CollectionConfig::new().with_honor_invert(true);
        assert!(!RuleMatcher::new(&rule, &honoring).matches(&registry, &entry));
    }

    #[test]
    fn test_stale_nodes_never_match() {
        let (registry, entry) = setup();
        registry.destroy(entry).unwrap();
        assert!(!check(&MatchRule::any_object(), &registry, entry));
    }

    #[test]
    fn test_evaluation_reads_current_state() {
        let (registry, entry) = setup();
        let rule = MatchRule::builder()
            .states([State::Focused], MatchType::All)
            .build();

        assert!(!rule.matches(&registry, &entry));
        registry.set_state(entry, State::Focused, true).unwrap();
        assert!(rule.matches(&registry, &entry));
    }
}
