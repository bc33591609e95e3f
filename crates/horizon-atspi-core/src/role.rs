//! Accessibility roles as exposed over AT-SPI.

use std::fmt;

/// The AT-SPI role of an accessible object.
///
/// The discriminants are the wire values used by the Collection interface's
/// role bit arrays, so the order of the variants must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u32)]
pub enum Role {
    /// An object whose role could not be determined or which is defunct.
    #[default]
    Invalid = 0,
    /// A label for a keyboard accelerator.
    AcceleratorLabel,
    /// An alert or condition the user should know about.
    Alert,
    /// An animated image.
    Animation,
    /// An arrow in one of the four cardinal directions.
    Arrow,
    /// A calendar view.
    Calendar,
    /// An object that can be drawn into.
    Canvas,
    /// A checkbox.
    CheckBox,
    /// A menu item with a check box.
    CheckMenuItem,
    /// A dialog for choosing a colour.
    ColorChooser,
    /// A column header.
    ColumnHeader,
    /// A combo box / dropdown.
    ComboBox,
    /// An editor for dates.
    DateEditor,
    /// An iconified internal frame.
    DesktopIcon,
    /// A pane holding internal frames.
    DesktopFrame,
    /// A dial or knob.
    Dial,
    /// A dialog box.
    Dialog,
    /// A pane for navigating directories.
    DirectoryPane,
    /// A generic drawing area.
    DrawingArea,
    /// A dialog for choosing files.
    FileChooser,
    /// A layout filler with no semantics.
    Filler,
    /// Obsolete focus-traversable object.
    FocusTraversable,
    /// A dialog for choosing fonts.
    FontChooser,
    /// A top-level window with decorations.
    Frame,
    /// A pane drawn over all others.
    GlassPane,
    /// A container for HTML content.
    HtmlContainer,
    /// A small fixed-size picture.
    Icon,
    /// An image.
    Image,
    /// A frame confined to a desktop pane.
    InternalFrame,
    /// A static text label.
    Label,
    /// A pane allowing layered children.
    LayeredPane,
    /// A list of items.
    List,
    /// An item within a list.
    ListItem,
    /// A menu (popup or submenu).
    Menu,
    /// A menu bar.
    MenuBar,
    /// A menu item.
    MenuItem,
    /// A pane inside an option dialog.
    OptionPane,
    /// A single tab.
    PageTab,
    /// A tab list container.
    PageTabList,
    /// A generic grouping panel.
    Panel,
    /// A text field whose content is hidden.
    PasswordText,
    /// A popup menu.
    PopupMenu,
    /// A progress indicator.
    ProgressBar,
    /// A push button.
    PushButton,
    /// A radio button.
    RadioButton,
    /// A menu item with a radio button.
    RadioMenuItem,
    /// The root pane of a frame.
    RootPane,
    /// A row header.
    RowHeader,
    /// A scroll bar.
    ScrollBar,
    /// A scrollable area.
    ScrollPane,
    /// A separator line.
    Separator,
    /// A slider for selecting a value from a range.
    Slider,
    /// A spin button for numeric input.
    SpinButton,
    /// A splitter/divider.
    SplitPane,
    /// A status bar.
    StatusBar,
    /// A table/grid.
    Table,
    /// A cell within a table.
    TableCell,
    /// A column header within a table.
    TableColumnHeader,
    /// A row header within a table.
    TableRowHeader,
    /// A menu item that detaches its menu.
    TearoffMenuItem,
    /// A terminal emulator.
    Terminal,
    /// Editable or read-only text.
    Text,
    /// A two-state toggle button.
    ToggleButton,
    /// A toolbar.
    ToolBar,
    /// A tooltip.
    ToolTip,
    /// A tree view.
    Tree,
    /// A tree whose items have columns.
    TreeTable,
    /// A role not covered by any other variant.
    Unknown,
    /// A viewport onto scrollable content.
    Viewport,
    /// A top-level window without decorations.
    Window,
    /// A toolkit-specific role.
    Extended,
    /// A document header.
    Header,
    /// A document footer.
    Footer,
    /// A paragraph of text.
    Paragraph,
    /// A ruler.
    Ruler,
    /// An application root.
    Application,
    /// An autocompletion popup.
    Autocomplete,
    /// An editable text bar.
    Editbar,
    /// An embedded component from another process.
    Embedded,
    /// A single-line text entry.
    Entry,
    /// A chart.
    Chart,
    /// A caption for a table or figure.
    Caption,
    /// The frame of a document.
    DocumentFrame,
    /// A heading.
    Heading,
    /// A page within a document.
    Page,
    /// A document section.
    Section,
    /// An object present only for layout reasons.
    RedundantObject,
    /// A form.
    Form,
    /// A hyperlink.
    Link,
    /// An input method window.
    InputMethodWindow,
}

impl Role {
    /// Every role, indexed by its wire value.
    pub const ALL: [Role; 90] = [
        Role::Invalid,
        Role::AcceleratorLabel,
        Role::Alert,
        Role::Animation,
        Role::Arrow,
        Role::Calendar,
        Role::Canvas,
        Role::CheckBox,
        Role::CheckMenuItem,
        Role::ColorChooser,
        Role::ColumnHeader,
        Role::ComboBox,
        Role::DateEditor,
        Role::DesktopIcon,
        Role::DesktopFrame,
        Role::Dial,
        Role::Dialog,
        Role::DirectoryPane,
        Role::DrawingArea,
        Role::FileChooser,
        Role::Filler,
        Role::FocusTraversable,
        Role::FontChooser,
        Role::Frame,
        Role::GlassPane,
        Role::HtmlContainer,
        Role::Icon,
        Role::Image,
        Role::InternalFrame,
        Role::Label,
        Role::LayeredPane,
        Role::List,
        Role::ListItem,
        Role::Menu,
        Role::MenuBar,
        Role::MenuItem,
        Role::OptionPane,
        Role::PageTab,
        Role::PageTabList,
        Role::Panel,
        Role::PasswordText,
        Role::PopupMenu,
        Role::ProgressBar,
        Role::PushButton,
        Role::RadioButton,
        Role::RadioMenuItem,
        Role::RootPane,
        Role::RowHeader,
        Role::ScrollBar,
        Role::ScrollPane,
        Role::Separator,
        Role::Slider,
        Role::SpinButton,
        Role::SplitPane,
        Role::StatusBar,
        Role::Table,
        Role::TableCell,
        Role::TableColumnHeader,
        Role::TableRowHeader,
        Role::TearoffMenuItem,
        Role::Terminal,
        Role::Text,
        Role::ToggleButton,
        Role::ToolBar,
        Role::ToolTip,
        Role::Tree,
        Role::TreeTable,
        Role::Unknown,
        Role::Viewport,
        Role::Window,
        Role::Extended,
        Role::Header,
        Role::Footer,
        Role::Paragraph,
        Role::Ruler,
        Role::Application,
        Role::Autocomplete,
        Role::Editbar,
        Role::Embedded,
        Role::Entry,
        Role::Chart,
        Role::Caption,
        Role::DocumentFrame,
        Role::Heading,
        Role::Page,
        Role::Section,
        Role::RedundantObject,
        Role::Form,
        Role::Link,
        Role::InputMethodWindow,
    ];

    /// Decode a role from its wire value.
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    /// The wire value of this role.
    #[inline]
    pub fn as_raw(self) -> u32 {
        self as u32
    }

    /// The human-readable AT-SPI role name (e.g. `"push button"`).
    pub fn name(self) -> &'static str {
        match self {
            Role::Invalid => "invalid",
            Role::AcceleratorLabel => "accelerator label",
            Role::Alert => "alert",
            Role::Animation => "animation",
            Role::Arrow => "arrow",
            Role::Calendar => "calendar",
            Role::Canvas => "canvas",
            Role::CheckBox => "check box",
            Role::CheckMenuItem => "check menu item",
            Role::ColorChooser => "color chooser",
            Role::ColumnHeader => "column header",
            Role::ComboBox => "combo box",
            Role::DateEditor => "date editor",
            Role::DesktopIcon => "desktop icon",
            Role::DesktopFrame => "desktop frame",
            Role::Dial => "dial",
            Role::Dialog => "dialog",
            Role::DirectoryPane => "directory pane",
            Role::DrawingArea => "drawing area",
            Role::FileChooser => "file chooser",
            Role::Filler => "filler",
            Role::FocusTraversable => "focus traversable",
            Role::FontChooser => "font chooser",
            Role::Frame => "frame",
            Role::GlassPane => "glass pane",
            Role::HtmlContainer => "html container",
            Role::Icon => "icon",
            Role::Image => "image",
            Role::InternalFrame => "internal frame",
            Role::Label => "label",
            Role::LayeredPane => "layered pane",
            Role::List => "list",
            Role::ListItem => "list item",
            Role::Menu => "menu",
            Role::MenuBar => "menu bar",
            Role::MenuItem => "menu item",
            Role::OptionPane => "option pane",
            Role::PageTab => "page tab",
            Role::PageTabList => "page tab list",
            Role::Panel => "panel",
            Role::PasswordText => "password text",
            Role::PopupMenu => "popup menu",
            Role::ProgressBar => "progress bar",
            Role::PushButton => "push button",
            Role::RadioButton => "radio button",
            Role::RadioMenuItem => "radio menu item",
            Role::RootPane => "root pane",
            Role::RowHeader => "row header",
            Role::ScrollBar => "scroll bar",
            Role::ScrollPane => "scroll pane",
            Role::Separator => "separator",
            Role::Slider => "slider",
            Role::SpinButton => "spin button",
            Role::SplitPane => "split pane",
            Role::StatusBar => "status bar",
            Role::Table => "table",
            Role::TableCell => "table cell",
            Role::TableColumnHeader => "table column header",
            Role::TableRowHeader => "table row header",
            Role::TearoffMenuItem => "tearoff menu item",
            Role::Terminal => "terminal",
            Role::Text => "text",
            Role::ToggleButton => "toggle button",
            Role::ToolBar => "tool bar",
            Role::ToolTip => "tool tip",
            Role::Tree => "tree",
            Role::TreeTable => "tree table",
            Role::Unknown => "unknown",
            Role::Viewport => "viewport",
            Role::Window => "window",
            Role::Extended => "extended",
            Role::Header => "header",
            Role::Footer => "footer",
            Role::Paragraph => "paragraph",
            Role::Ruler => "ruler",
            Role::Application => "application",
            Role::Autocomplete => "autocomplete",
            Role::Editbar => "editbar",
            Role::Embedded => "embedded",
            Role::Entry => "entry",
            Role::Chart => "chart",
            Role::Caption => "caption",
            Role::DocumentFrame => "document frame",
            Role::Heading => "heading",
            Role::Page => "page",
            Role::Section => "section",
            Role::RedundantObject => "redundant object",
            Role::Form => "form",
            Role::Link => "link",
            Role::InputMethodWindow => "input method window",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Toolkits built on AccessKit can hand their roles straight to the registry.
#[cfg(feature = "accesskit")]
impl From<accesskit::Role> for Role {
    fn from(role: accesskit::Role) -> Self {
        use accesskit::Role as Ak;
        match role {
            Ak::Unknown => Role::Unknown,
            Ak::Window => Role::Frame,
            Ak::Dialog => Role::Dialog,
            Ak::Button => Role::PushButton,
            Ak::CheckBox => Role::CheckBox,
            Ak::RadioButton => Role::RadioButton,
            Ak::TextInput => Role::Entry,
            Ak::MultilineTextInput => Role::Text,
            Ak::Label => Role::Label,
            Ak::Link => Role::Link,
            Ak::Image => Role::Image,
            Ak::ProgressIndicator => Role::ProgressBar,
            Ak::Slider => Role::Slider,
            Ak::SpinButton => Role::SpinButton,
            Ak::ComboBox => Role::ComboBox,
            Ak::List => Role::List,
            Ak::ListItem => Role::ListItem,
            Ak::Tree => Role::Tree,
            Ak::TreeItem => Role::ListItem,
            Ak::Table => Role::Table,
            Ak::Cell => Role::TableCell,
            Ak::ColumnHeader => Role::ColumnHeader,
            Ak::RowHeader => Role::RowHeader,
            Ak::MenuBar => Role::MenuBar,
            Ak::Menu => Role::Menu,
            Ak::MenuItem => Role::MenuItem,
            Ak::MenuItemCheckBox => Role::CheckMenuItem,
            Ak::MenuItemRadio => Role::RadioMenuItem,
            Ak::Toolbar => Role::ToolBar,
            Ak::Status => Role::StatusBar,
            Ak::TabList => Role::PageTabList,
            Ak::Tab => Role::PageTab,
            Ak::TabPanel => Role::Panel,
            Ak::ScrollBar => Role::ScrollBar,
            Ak::ScrollView => Role::ScrollPane,
            Ak::Splitter => Role::SplitPane,
            Ak::Group => Role::Panel,
            Ak::Tooltip => Role::ToolTip,
            Ak::Grid => Role::Table,
            Ak::ColorWell => Role::ColorChooser,
            Ak::Alert => Role::Alert,
            Ak::GenericContainer => Role::Panel,
            Ak::Pane => Role::Panel,
            _ => Role::Unknown,
        }
    }
}
