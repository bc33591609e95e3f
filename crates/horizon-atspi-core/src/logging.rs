//! Logging and debugging facilities for Horizon AT-SPI.
//!
//! This module provides:
//! - Target and span names for filtering `tracing` output by subsystem
//! - A text renderer for any [`AccessibleTree`] subtree
//! - A performance span guard
//!
//! # Tracing Integration
//!
//! Nothing is printed unless the host installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_atspi_collection=debug")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! ```ignore
//! use horizon_atspi_core::logging::AccessibleTreeDebug;
//!
//! let debug = AccessibleTreeDebug::new();
//! println!("{}", debug.format_subtree(&registry, &root));
//! ```

use std::fmt::Write as FmtWrite;

use crate::tree::AccessibleTree;

/// Span names used for tracing.
pub mod span_names {
    /// One bus-level collection method call.
    pub const ADAPTOR_CALL: &str = "horizon_atspi::adaptor_call";
    /// Performance measurement span.
    pub const PERF: &str = "horizon_atspi::perf";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_atspi_core";
    /// Object registry target.
    pub const REGISTRY: &str = "horizon_atspi_core::registry";
    /// Collection query orchestration target.
    pub const COLLECTION: &str = "horizon_atspi_collection";
    /// Tree traversal target.
    pub const TRAVERSAL: &str = "horizon_atspi_collection::traverse";
    /// Bus adaptor target.
    pub const ADAPTOR: &str = "horizon_atspi::adaptor";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Plain indentation only.
    Compact,
}

impl TreeStyle {
    /// (continuing branch, tee, corner) glyphs.
    fn glyphs(self) -> (&'static str, &'static str, &'static str) {
        match self {
            TreeStyle::Ascii => ("|", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            TreeStyle::Compact => ("", "", ""),
        }
    }
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Whether to show node handles.
    pub show_ids: bool,
    /// Whether to show roles.
    pub show_roles: bool,
    /// Whether to show state sets.
    pub show_states: bool,
    /// Maximum depth to render (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_roles: true,
            show_states: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_states: true,
            ..Default::default()
        }
    }

    /// Options for names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_roles: false,
            show_states: false,
            ..Default::default()
        }
    }
}

/// Debug utility for rendering accessible trees as text.
#[derive(Debug, Clone, Default)]
pub struct AccessibleTreeDebug {
    options: TreeFormatOptions,
}

impl AccessibleTreeDebug {
    /// Create a renderer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Render `root` and its descendants, one object per line.
    ///
    /// Stale children are skipped.
    pub fn format_subtree<T: AccessibleTree>(&self, tree: &T, root: &T::Node) -> String {
        let mut output = String::new();
        let mut open_levels = Vec::new();
        self.format_node(tree, root, &mut open_levels, true, &mut output);
        output
    }

    fn format_node<T: AccessibleTree>(
        &self,
        tree: &T,
        node: &T::Node,
        open_levels: &mut Vec<bool>,
        is_last: bool,
        output: &mut String,
    ) {
        let depth = open_levels.len();
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        self.write_prefix(open_levels, is_last, output);

        let name = tree.name(node);
        output.push_str(if name.is_empty() { "(unnamed)" } else { &name });
        if self.options.show_roles {
            let _ = write!(output, " <{}>", tree.role(node));
        }
        if self.options.show_ids {
            let _ = write!(output, " [{node:?}]");
        }
        if self.options.show_states {
            let _ = write!(output, " {:?}", tree.state_set(node));
        }
        output.push('\n');

        let children: Vec<T::Node> = (0..tree.child_count(node))
            .filter_map(|index| tree.child_at(node, index))
            .collect();
        let count = children.len();
        if depth > 0 {
            open_levels.push(!is_last);
        } else {
            open_levels.push(false);
        }
        for (index, child) in children.iter().enumerate() {
            self.format_node(tree, child, open_levels, index + 1 == count, output);
        }
        open_levels.pop();
    }

    fn write_prefix(&self, open_levels: &[bool], is_last: bool, output: &mut String) {
        let depth = open_levels.len();
        if depth == 0 {
            return;
        }
        let (branch, tee, corner) = self.options.style.glyphs();
        let indent = " ".repeat(self.options.indent_size);

        // Skip the root level; it has no connector column.
        for &open in &open_levels[1..] {
            output.push_str(if open { branch } else { " " });
            output.push_str(&indent);
        }
        match self.options.style {
            TreeStyle::Compact => output.push_str(&indent),
            _ => output.push_str(if is_last { corner } else { tee }),
        }
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a query with a span-timing subscriber.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: span_names::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
