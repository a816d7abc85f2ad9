//! Frontmatter types and data structures.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;

/// Represents parsed YAML frontmatter from a markdown document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Fields as key-value pairs.
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl Frontmatter {
    /// String value of a field. Numbers and booleans are stringified.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.fields.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.fields.get(key)?.as_bool()
    }
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if present).
    pub frontmatter: Option<Frontmatter>,
    /// The markdown body (everything after frontmatter).
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm(yaml: &str) -> Frontmatter {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_get_str_stringifies_scalars() {
        let fm = fm("id: 42\ntitle: Foo\nflag: true\nlist: [a]");
        assert_eq!(fm.get_str("id").as_deref(), Some("42"));
        assert_eq!(fm.get_str("title").as_deref(), Some("Foo"));
        assert_eq!(fm.get_str("flag").as_deref(), Some("true"));
        assert_eq!(fm.get_str("list"), None);
        assert_eq!(fm.get_str("missing"), None);
    }

    #[test]
    fn test_get_i64() {
        let fm = fm("created: 1700000000000\nupdated: '12'");
        assert_eq!(fm.get_i64("created"), Some(1_700_000_000_000));
        assert_eq!(fm.get_i64("updated"), Some(12));
    }

    #[test]
    fn test_get_bool() {
        let fm = fm("stub: true\nother: yes-ish");
        assert_eq!(fm.get_bool("stub"), Some(true));
        assert_eq!(fm.get_bool("other"), None);
    }
}
