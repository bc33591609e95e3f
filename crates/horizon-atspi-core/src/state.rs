//! Accessible states and state sets.

use std::fmt;

/// An AT-SPI state an accessible object may be in.
///
/// The discriminant is the bit position used in wire state bit arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum State {
    /// Placeholder for an invalid state.
    Invalid = 0,
    /// The window or dialog is the active one.
    Active,
    /// The object is armed (e.g. a pressed menu item).
    Armed,
    /// The object is busy and may not respond.
    Busy,
    /// The object is checked.
    Checked,
    /// The object is collapsed.
    Collapsed,
    /// The backing object no longer exists.
    Defunct,
    /// The text content can be edited.
    Editable,
    /// The object is enabled.
    Enabled,
    /// The object can be expanded.
    Expandable,
    /// The object is expanded.
    Expanded,
    /// The object can accept keyboard focus.
    Focusable,
    /// The object has keyboard focus.
    Focused,
    /// The object has an associated tooltip.
    HasTooltip,
    /// The object is oriented horizontally.
    Horizontal,
    /// The window is minimized.
    Iconified,
    /// The object blocks interaction with other windows.
    Modal,
    /// The text object supports multiple lines.
    MultiLine,
    /// More than one child may be selected.
    Multiselectable,
    /// The object paints every pixel of its area.
    Opaque,
    /// The object is pressed.
    Pressed,
    /// The object can be resized.
    Resizable,
    /// The object can be selected.
    Selectable,
    /// The object is selected.
    Selected,
    /// The object responds to user interaction.
    Sensitive,
    /// The object and all its ancestors are visible.
    Showing,
    /// The text object supports a single line only.
    SingleLine,
    /// Cached information about the object is out of date.
    Stale,
    /// The object is transient.
    Transient,
    /// The object is oriented vertically.
    Vertical,
    /// The object is visible.
    Visible,
    /// Children are managed and may not be individually exposed.
    ManagesDescendants,
    /// A check state that is neither checked nor unchecked.
    Indeterminate,
    /// User input is required.
    Required,
    /// The content is truncated.
    Truncated,
    /// The object is animated.
    Animated,
    /// User input is invalid.
    InvalidEntry,
    /// The object supports text autocompletion.
    SupportsAutocompletion,
    /// The object's text can be selected.
    SelectableText,
    /// The object is the default action target.
    IsDefault,
    /// A link that has been visited.
    Visited,
}

impl State {
    /// Every state, indexed by its bit position.
    pub const ALL: [State; 41] = [
        State::Invalid,
        State::Active,
        State::Armed,
        State::Busy,
        State::Checked,
        State::Collapsed,
        State::Defunct,
        State::Editable,
        State::Enabled,
        State::Expandable,
        State::Expanded,
        State::Focusable,
        State::Focused,
        State::HasTooltip,
        State::Horizontal,
        State::Iconified,
        State::Modal,
        State::MultiLine,
        State::Multiselectable,
        State::Opaque,
        State::Pressed,
        State::Resizable,
        State::Selectable,
        State::Selected,
        State::Sensitive,
        State::Showing,
        State::SingleLine,
        State::Stale,
        State::Transient,
        State::Vertical,
        State::Visible,
        State::ManagesDescendants,
        State::Indeterminate,
        State::Required,
        State::Truncated,
        State::Animated,
        State::InvalidEntry,
        State::SupportsAutocompletion,
        State::SelectableText,
        State::IsDefault,
        State::Visited,
    ];

    /// Decode a state from its bit position.
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    /// The bit position of this state.
    #[inline]
    pub fn as_raw(self) -> u32 {
        self as u32
    }

    #[inline]
    fn mask(self) -> u64 {
        1u64 << self.as_raw()
    }
}

/// A set of [`State`]s, stored as a bitset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateSet(u64);

impl StateSet {
    /// Create an empty state set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The state set reported for objects that no longer exist.
    pub fn defunct() -> Self {
        Self::from_iter([State::Defunct])
    }

    /// Add a state. Returns `true` if it was not already present.
    pub fn insert(&mut self, state: State) -> bool {
        let had = self.contains(state);
        self.0 |= state.mask();
        !had
    }

    /// Remove a state. Returns `true` if it was present.
    pub fn remove(&mut self, state: State) -> bool {
        let had = self.contains(state);
        self.0 &= !state.mask();
        had
    }

    /// Builder-style insert.
    pub fn with(mut self, state: State) -> Self {
        self.insert(state);
        self
    }

    #[inline]
    pub fn contains(&self, state: State) -> bool {
        self.0 & state.mask() != 0
    }

    /// True if every state of `other` is in `self`.
    pub fn contains_all(&self, other: &StateSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if at least one state of `other` is in `self`.
    pub fn contains_any(&self, other: &StateSet) -> bool {
        self.0 & other.0 != 0
    }

    /// True if no state of `other` is in `self`.
    pub fn contains_none(&self, other: &StateSet) -> bool {
        !self.contains_any(other)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the states in bit order.
    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        State::ALL.iter().copied().filter(|state| self.contains(*state))
    }

    /// Encode as the two-word wire bit array.
    pub fn to_bits(&self) -> [u32; 2] {
        [self.0 as u32, (self.0 >> 32) as u32]
    }

    /// Decode a wire bit array.
    ///
    /// Returns the set of known states plus the first bit position that does
    /// not name a state, if any.
    pub fn from_bits(words: &[u32]) -> (Self, Option<u32>) {
        let mut set = Self::empty();
        let mut unknown = None;
        for (word_index, word) in words.iter().enumerate() {
            for bit in 0..32u32 {
                if word & (1 << bit) == 0 {
                    continue;
                }
                let position = word_index as u32 * 32 + bit;
                match State::from_raw(position) {
                    Some(state) => {
                        set.insert(state);
                    }
                    None => {
                        unknown.get_or_insert(position);
                    }
                }
            }
        }
        (set, unknown)
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let mut set = Self::empty();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl Extend<State> for StateSet {
    fn extend<I: IntoIterator<Item = State>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = StateSet::empty();
        assert!(set.insert(State::Focusable));
        assert!(!set.insert(State::Focusable));
        assert!(set.contains(State::Focusable));
        assert!(!set.contains(State::Focused));
        assert!(set.remove(State::Focusable));
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_relations() {
        let node: StateSet = [State::Enabled, State::Visible, State::Showing].into_iter().collect();
        let wanted: StateSet = [State::Enabled, State::Visible].into_iter().collect();
        let other: StateSet = [State::Checked, State::Pressed].into_iter().collect();

        assert!(node.contains_all(&wanted));
        assert!(!node.contains_all(&other));
        assert!(node.contains_any(&wanted));
        assert!(node.contains_none(&other));
        assert_eq!(node.len(), 3);
    }

    #[test]
    fn test_wire_bits_round_trip_high_states() {
        let set: StateSet = [State::Active, State::Visited].into_iter().collect();
        let bits = set.to_bits();
        assert_eq!(bits[0], 1 << 1);
        assert_eq!(bits[1], 1 << (40 - 32));
        assert_eq!(StateSet::from_bits(&bits), (set, None));
    }

    #[test]
    fn test_from_bits_reports_unknown_positions() {
        let (set, unknown) = StateSet::from_bits(&[1 << 8, 1 << 20]);
        assert!(set.contains(State::Enabled));
        assert_eq!(unknown, Some(52));
    }

    #[test]
    fn test_defunct_set() {
        let set = StateSet::defunct();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![State::Defunct]);
    }
}
