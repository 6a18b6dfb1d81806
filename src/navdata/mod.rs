//! Doxygen navigation data
//!
//! Doxygen emits its navigation panes as JavaScript files declaring a
//! handful of `var NAME = ...;` globals: nested label/link trees
//! (`NAVTREE`, `hierarchy`), a flat page index (`NAVTREEINDEX`), and two
//! pane-synchronisation strings. This module parses those declarations,
//! validates them, and writes them back byte-identically.

mod parse;
mod validate;
mod write;

pub use parse::parse;

/// Children of a navigation node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavChildren {
    /// No children (JS `null`)
    None,
    /// Children live in another script, referenced by page name
    External(String),
    /// Children nested inline
    Inline(Vec<NavNode>),
}

/// One `[label, link, children]` entry of a navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    /// Display label
    pub label: String,
    /// Relative link target, absent when the entry is not clickable
    pub link: Option<String>,
    /// Child entries
    pub children: NavChildren,
}

impl NavNode {
    /// Create a leaf entry
    #[must_use]
    pub fn leaf(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: Some(link.into()),
            children: NavChildren::None,
        }
    }

    /// Create an entry with inline children
    #[must_use]
    pub fn branch(
        label: impl Into<String>,
        link: impl Into<String>,
        children: Vec<NavNode>,
    ) -> Self {
        Self {
            label: label.into(),
            link: Some(link.into()),
            children: NavChildren::Inline(children),
        }
    }
}

/// The value bound by one `var` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavValue {
    /// An ordered forest of navigation nodes
    Tree(Vec<NavNode>),
    /// A flat ordered list of link strings
    Index(Vec<String>),
    /// A single-quoted UI string
    Text(String),
}

/// One `var NAME = ...;` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Variable name
    pub name: String,
    /// Bound value
    pub value: NavValue,
    /// Spaces of indentation for top-level array entries
    pub indent: usize,
}

/// A parsed navigation data file.
///
/// The leading comment block, if any, is preserved verbatim so that
/// writing reproduces the input byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavData {
    /// Text preceding the first declaration, typically a license comment
    pub header: Option<String>,
    /// Declarations in file order
    pub declarations: Vec<Declaration>,
}

impl NavData {
    /// Declaration with the given variable name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }
}

/// Errors from parsing or validating navigation data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDataError {
    /// The file's surface syntax is malformed
    Syntax {
        /// 1-based line of the problem
        line: usize,
        /// What went wrong
        message: String,
    },
    /// An array body is not well-formed JSON
    Json {
        /// Name of the declaration being parsed
        name: String,
        /// Decoder error text
        message: String,
    },
    /// An entry does not have the `[label, link, children]` shape
    BadNode {
        /// Path to the entry, e.g. `NAVTREE[0][2][1]`
        path: String,
        /// What went wrong
        message: String,
    },
    /// A structural rule was violated
    Invalid {
        /// Path to the offending value
        path: String,
        /// Which rule failed
        message: String,
    },
}

impl std::fmt::Display for NavDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax { line, message } => write!(f, "Syntax error at line {line}: {message}"),
            Self::Json { name, message } => write!(f, "Bad JSON in '{name}': {message}"),
            Self::BadNode { path, message } => write!(f, "Bad node at {path}: {message}"),
            Self::Invalid { path, message } => write!(f, "Invalid data at {path}: {message}"),
        }
    }
}

impl std::error::Error for NavDataError {}
