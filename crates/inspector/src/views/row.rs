//! Default titled value presentation.

use serde_json::Value;

use crate::{BuildContext, Element, Node, Result, View};

/// A titled row showing an optional value.
///
/// The rendered row carries a copy action only when a value is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRow {
    title: String,
    value: Option<String>,
}

impl ValueRow {
    /// Creates a row for `title` showing `value`.
    pub fn new(title: impl Into<String>, value: Option<String>) -> Self {
        Self {
            title: title.into(),
            value,
        }
    }

    /// Creates a row from a stored value.
    ///
    /// Strings are shown as-is, other values as compact JSON. A missing
    /// value or JSON `null` shows as no value.
    pub fn for_value(title: impl Into<String>, value: Option<&Value>) -> Self {
        Self::new(title, value.and_then(display_value))
    }

    /// Returns the row title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the displayed value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns true if the rendered row offers a copy action.
    pub fn has_copy_action(&self) -> bool {
        self.value.is_some()
    }

    /// Renders the row.
    pub fn into_node(self) -> Node {
        Node::Row {
            title: self.title,
            value: self.value,
        }
    }
}

impl From<ValueRow> for Node {
    fn from(row: ValueRow) -> Self {
        row.into_node()
    }
}

impl View for ValueRow {
    fn build(&self, _ctx: &BuildContext) -> Result<Element> {
        Ok(Element::Static(self.clone().into_node()))
    }
}

/// Text for a stored value, or `None` when there is nothing to show.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_values_are_unquoted() {
        let row = ValueRow::for_value("first", Some(&json!("first value")));
        assert_eq!(row.value(), Some("first value"));
        assert!(row.has_copy_action());
    }

    #[test]
    fn structured_values_are_compact_json() {
        let row = ValueRow::for_value("prefs", Some(&json!({"dark": true})));
        assert_eq!(row.value(), Some(r#"{"dark":true}"#));

        let row = ValueRow::for_value("count", Some(&json!(3)));
        assert_eq!(row.value(), Some("3"));
    }

    #[test]
    fn absent_and_null_have_no_copy_action() {
        assert!(!ValueRow::for_value("missing", None).has_copy_action());
        assert!(!ValueRow::for_value("null", Some(&Value::Null)).has_copy_action());
    }

    #[test]
    fn renders_as_row_node() {
        let node: Node = ValueRow::new("title", Some("v".into())).into();
        assert_eq!(
            node,
            Node::Row {
                title: "title".into(),
                value: Some("v".into())
            }
        );
        assert!(node.is_copyable());
    }
}
