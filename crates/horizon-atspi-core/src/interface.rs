//! Capability interfaces an accessible object may implement.

use std::fmt;

/// A named behavioural facet of an accessible object.
///
/// Collection match rules name interfaces by string; [`Interface::from_name`]
/// performs the case-insensitive lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Interface {
    Action,
    Collection,
    Component,
    Document,
    EditableText,
    Hypertext,
    Image,
    Selection,
    StreamableContent,
    Table,
    Text,
    Value,
}

impl Interface {
    /// Every interface, in declaration order.
    pub const ALL: [Interface; 12] = [
        Interface::Action,
        Interface::Collection,
        Interface::Component,
        Interface::Document,
        Interface::EditableText,
        Interface::Hypertext,
        Interface::Image,
        Interface::Selection,
        Interface::StreamableContent,
        Interface::Table,
        Interface::Text,
        Interface::Value,
    ];

    /// The lower-case name used in match rules.
    pub fn name(self) -> &'static str {
        match self {
            Interface::Action => "action",
            Interface::Collection => "collection",
            Interface::Component => "component",
            Interface::Document => "document",
            Interface::EditableText => "editabletext",
            Interface::Hypertext => "hypertext",
            Interface::Image => "image",
            Interface::Selection => "selection",
            Interface::StreamableContent => "streamablecontent",
            Interface::Table => "table",
            Interface::Text => "text",
            Interface::Value => "value",
        }
    }

    /// Look an interface up by name, ignoring ASCII case.
    ///
    /// Returns `None` for names no object can implement.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|iface| iface.name().eq_ignore_ascii_case(name))
    }

    #[inline]
    fn mask(self) -> u16 {
        1 << (self as u8)
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`Interface`]s implemented by one object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InterfaceSet(u16);

impl InterfaceSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, iface: Interface) {
        self.0 |= iface.mask();
    }

    pub fn remove(&mut self, iface: Interface) {
        self.0 &= !iface.mask();
    }

    /// Builder-style insert.
    pub fn with(mut self, iface: Interface) -> Self {
        self.insert(iface);
        self
    }

    #[inline]
    pub fn contains(&self, iface: Interface) -> bool {
        self.0 & iface.mask() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Interface> + '_ {
        Interface::ALL.iter().copied().filter(|iface| self.contains(*iface))
    }
}

impl FromIterator<Interface> for InterfaceSet {
    fn from_iter<I: IntoIterator<Item = Interface>>(iter: I) -> Self {
        let mut set = Self::empty();
        for iface in iter {
            set.insert(iface);
        }
        set
    }
}

impl fmt::Debug for InterfaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
