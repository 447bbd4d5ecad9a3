//! Rendered output of a view tree.

use crate::clipboard::{Clipboard, ClipboardError};

/// Text shown while a read is in flight.
pub const LOADING_TEXT: &str = "Loading...";

/// Text shown when a read rejects.
pub const FAILURE_TEXT: &str = "Failed to retrieve data";

/// Visual treatment of a text node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    #[default]
    Normal,
    Muted,
    Error,
}

/// A rendered node, handed to whatever host draws the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Renders nothing.
    Empty,
    /// A line of text.
    Text { text: String, style: Style },
    /// A titled value; rows with a value offer a copy action.
    Row { title: String, value: Option<String> },
    /// Children rendered in order.
    List(Vec<Node>),
}

impl Node {
    /// A plain text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            style: Style::Normal,
        }
    }

    /// The placeholder for a read that has not settled.
    pub fn loading() -> Self {
        Self::Text {
            text: LOADING_TEXT.to_string(),
            style: Style::Muted,
        }
    }

    /// The placeholder for a read that rejected.
    pub fn failure() -> Self {
        Self::Text {
            text: FAILURE_TEXT.to_string(),
            style: Style::Error,
        }
    }

    /// Returns true if this node offers a copy action.
    pub fn is_copyable(&self) -> bool {
        matches!(self, Self::Row { value: Some(_), .. })
    }

    /// Runs this node's copy action, if it has one.
    ///
    /// Returns `Ok(false)` when there is nothing to copy.
    pub fn copy_to(&self, clipboard: &dyn Clipboard) -> Result<bool, ClipboardError> {
        match self {
            Self::Row {
                value: Some(value), ..
            } => {
                clipboard.set_text(value)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Finds the first row titled `title`, searching depth-first.
    pub fn find_row(&self, title: &str) -> Option<&Node> {
        match self {
            Self::Row { title: t, .. } if t == title => Some(self),
            Self::List(children) => children.iter().find_map(|child| child.find_row(title)),
            _ => None,
        }
    }

    /// Counts every node below and including this one that is not a list.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::List(children) => children.iter().map(Node::leaf_count).sum(),
            Self::Empty => 0,
            _ => 1,
        }
    }

    fn write_lines(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Self::Empty => Ok(()),
            Self::Text { text, style } => match style {
                Style::Normal => writeln!(f, "{indent}{text}"),
                Style::Muted => writeln!(f, "{indent}({text})"),
                Style::Error => writeln!(f, "{indent}! {text}"),
            },
            Self::Row {
                title,
                value: Some(value),
            } => writeln!(f, "{indent}{title}: {value} [copy]"),
            Self::Row { title, value: None } => writeln!(f, "{indent}{title}: -"),
            Self::List(children) => {
                for child in children {
                    let child_depth = if matches!(child, Self::List(_)) {
                        depth + 1
                    } else {
                        depth
                    };
                    child.write_lines(f, child_depth)?;
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_lines(f, 0)
    }
}
