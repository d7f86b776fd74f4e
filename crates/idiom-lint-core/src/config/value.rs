//! Path-tracked access to semi-structured document values.
//!
//! Decoding walks a parsed YAML tree field by field. [`DocValue`] wraps each
//! visited value together with the route taken from the document root, so a
//! failure deep inside a rule body can say where it happened and show the
//! smallest enclosing piece of the document that still fits on screen.

use serde_yaml::Value;
use std::fmt;

/// Upper bound on rendered excerpt length in error messages.
const EXCERPT_LIMIT: usize = 250;

/// Error produced while decoding a document value.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The value had the wrong shape for the schema.
    #[error("{message}\n  at: {path}\n  in: {excerpt}")]
    Schema {
        /// What the schema expected.
        message: String,
        /// Route from the document root to the offending value.
        path: String,
        /// Bounded rendering of the document around the failure.
        excerpt: String,
    },
    /// An embedded source snippet failed to parse.
    #[error("{message}, when parsing:\n  {input}")]
    Syntax {
        /// The snippet parser's own message.
        message: String,
        /// Route from the document root to the snippet.
        path: String,
        /// The text that failed to parse.
        input: String,
    },
}

/// One step on the route from the document root.
#[derive(Debug, Clone)]
enum Label {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone)]
struct Step<'a> {
    label: Label,
    /// The value this step descended into, kept for excerpts.
    enclosing: &'a Value,
}

/// A document value plus the route that led to it.
#[derive(Debug, Clone)]
pub(crate) struct DocValue<'a> {
    focus: &'a Value,
    path: Vec<Step<'a>>,
}

impl<'a> DocValue<'a> {
    /// Wraps the document root.
    pub(crate) fn root(value: &'a Value) -> Self {
        Self {
            focus: value,
            path: Vec::new(),
        }
    }

    fn child(&self, label: Label, value: &'a Value) -> Self {
        let mut path = self.path.clone();
        path.push(Step {
            label,
            enclosing: self.focus,
        });
        Self { focus: value, path }
    }

    /// The route from the root, rendered like `groups[0].rules[1].warn`.
    pub(crate) fn path(&self) -> String {
        if self.path.is_empty() {
            return "document root".to_string();
        }
        let mut out = String::new();
        for step in &self.path {
            match &step.label {
                Label::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                Label::Index(index) => out.push_str(&format!("[{index}]")),
            }
        }
        out
    }

    /// Builds a schema error at this value.
    pub(crate) fn error(&self, message: impl Into<String>) -> DecodeError {
        DecodeError::Schema {
            message: message.into(),
            path: self.path(),
            excerpt: self.excerpt(),
        }
    }

    /// Lenient array view: sequences yield their elements, null yields
    /// nothing, and any other value yields itself as a singleton.
    pub(crate) fn into_array(self) -> Vec<DocValue<'a>> {
        match self.focus {
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.child(Label::Index(i), item))
                .collect(),
            Value::Null => Vec::new(),
            _ => vec![self],
        }
    }

    fn mapping(&self) -> Result<&'a serde_yaml::Mapping, DecodeError> {
        match self.focus {
            Value::Mapping(map) => Ok(map),
            _ => Err(self.error("Expected an Object")),
        }
    }

    /// The mapping's keys in document order. Fails on non-mappings and on
    /// non-string keys.
    pub(crate) fn keys(&self) -> Result<Vec<&'a str>, DecodeError> {
        let mut keys = Vec::new();
        for key in self.mapping()?.keys() {
            match key {
                Value::String(s) => keys.push(s.as_str()),
                _ => return Err(self.error("Expected a String key")),
            }
        }
        Ok(keys)
    }

    /// Looks up an optional field. Fails when this value is not a mapping.
    pub(crate) fn opt_field(&self, name: &str) -> Result<Option<DocValue<'a>>, DecodeError> {
        for (key, value) in self.mapping()? {
            if key.as_str() == Some(name) {
                return Ok(Some(self.child(Label::Key(name.to_string()), value)));
            }
        }
        Ok(None)
    }

    /// Looks up a required field.
    pub(crate) fn field(&self, name: &str) -> Result<DocValue<'a>, DecodeError> {
        self.opt_field(name)?
            .ok_or_else(|| self.error(format!("Expected a field named `{name}`")))
    }

    /// Fails when the mapping contains keys outside `allowed`.
    pub(crate) fn reject_unknown(&self, allowed: &[&str]) -> Result<(), DecodeError> {
        let unknown: Vec<&str> = self
            .keys()?
            .into_iter()
            .filter(|key| !allowed.contains(key))
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(self.error(format!("Unexpected keys: {}", unknown.join(" "))))
        }
    }

    pub(crate) fn as_str(&self) -> Result<&'a str, DecodeError> {
        match self.focus {
            Value::String(s) => Ok(s.as_str()),
            _ => Err(self.error("Expected a String")),
        }
    }

    pub(crate) fn as_bool(&self) -> Result<bool, DecodeError> {
        match self.focus {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.error("Expected a Bool")),
        }
    }

    /// Reads a string and runs an embedded-syntax parser over it, turning
    /// parser failures into [`DecodeError::Syntax`] with the text attached.
    pub(crate) fn as_syntax<T, E: fmt::Display>(
        &self,
        parse: impl FnOnce(&str) -> Result<T, E>,
    ) -> Result<T, DecodeError> {
        let text = self.as_str()?;
        parse(text).map_err(|e| DecodeError::Syntax {
            message: format!("Failed to parse {e}"),
            path: self.path(),
            input: text.to_string(),
        })
    }

    /// Smallest enclosing value whose rendering fits the excerpt cap,
    /// falling back to a truncated rendering of the focus itself.
    fn excerpt(&self) -> String {
        for step in self.path.iter().rev() {
            let rendered = render_value(step.enclosing);
            if rendered.len() <= EXCERPT_LIMIT {
                return rendered;
            }
        }
        let mut rendered = render_value(self.focus);
        if rendered.len() > EXCERPT_LIMIT {
            let mut cut = EXCERPT_LIMIT;
            while !rendered.is_char_boundary(cut) {
                cut -= 1;
            }
            rendered.truncate(cut);
            rendered.push_str("...");
        }
        rendered
    }
}

/// Renders a value on one line, flow style.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", render_key(key), render_value(value)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, render_value(&tagged.value)),
    }
}

fn render_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => render_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    // -- Array leniency --

    #[test]
    fn sequences_become_their_elements() {
        let doc = value("[1, 2, 3]");
        assert_eq!(DocValue::root(&doc).into_array().len(), 3);
    }

    #[test]
    fn null_becomes_the_empty_array() {
        let doc = value("null");
        assert!(DocValue::root(&doc).into_array().is_empty());
    }

    #[test]
    fn scalars_and_mappings_become_singletons() {
        let doc = value("just a string");
        assert_eq!(DocValue::root(&doc).into_array().len(), 1);

        let doc = value("{a: 1}");
        assert_eq!(DocValue::root(&doc).into_array().len(), 1);
    }

    // -- Field access --

    #[test]
    fn field_access_tracks_the_path() {
        let doc = value("{group: g, rules: [{warn: {lhs: x}}]}");
        let root = DocValue::root(&doc);

        let rules = root.field("rules").unwrap().into_array();
        let lhs = rules[0].field("warn").unwrap().field("lhs").unwrap();
        assert_eq!(lhs.path(), "rules[0].warn.lhs");
        assert_eq!(lhs.as_str().ok(), Some("x"));
    }

    #[test]
    fn missing_required_field() {
        let doc = value("{rhs: x}");
        let err = DocValue::root(&doc).field("lhs").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected a field named `lhs`\n  at: document root\n  in: {rhs: \"x\"}"
        );
    }

    #[test]
    fn non_object_field_access() {
        let doc = value("plain");
        let err = DocValue::root(&doc).opt_field("x").unwrap_err();
        assert!(err.to_string().starts_with("Expected an Object"));
    }

    #[test]
    fn unknown_keys_are_listed_in_document_order() {
        let doc = value("{lhs: a, bogus: 1, extra: 2}");
        let err = DocValue::root(&doc)
            .reject_unknown(&["lhs", "rhs"])
            .unwrap_err();
        assert!(err.to_string().starts_with("Unexpected keys: bogus extra"));
    }

    #[test]
    fn scalar_accessors_check_the_shape() {
        let doc = value("{flag: true, name: x}");
        let root = DocValue::root(&doc);

        let flag = root.field("flag").unwrap();
        assert_eq!(flag.as_bool().ok(), Some(true));
        assert!(flag.as_str().is_err());

        let name = root.field("name").unwrap();
        assert!(name.as_bool().is_err());
    }

    // -- Embedded syntax --

    #[test]
    fn syntax_errors_carry_the_offending_text() {
        let doc = value("{lhs: \"concat (\"}");
        let root = DocValue::root(&doc);
        let lhs = root.field("lhs").unwrap();

        let err = lhs
            .as_syntax(|_| Err::<(), _>("unexpected end of input".to_string()))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to parse unexpected end of input, when parsing:\n  concat ("
        );
    }

    // -- Excerpts --

    #[test]
    fn excerpt_shows_the_smallest_enclosing_value() {
        let doc = value("{rules: [{warn: {rhs: x}}]}");
        let root = DocValue::root(&doc);
        let rules = root.field("rules").unwrap().into_array();
        let warn = rules[0].field("warn").unwrap();

        let err = warn.field("lhs").unwrap_err();
        // The rule object fits the cap, so the excerpt stops there.
        assert!(err.to_string().ends_with("in: {warn: {rhs: \"x\"}}"));
    }

    #[test]
    fn oversized_excerpts_fall_back_to_the_truncated_focus() {
        let long = "x".repeat(400);
        let doc = value(&format!("{{big: {long}}}"));
        let root = DocValue::root(&doc);
        let big = root.field("big").unwrap();

        let DecodeError::Schema { excerpt, .. } = big.error("boom") else {
            panic!("expected a schema error");
        };
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.len() <= EXCERPT_LIMIT + 3);
    }
}
