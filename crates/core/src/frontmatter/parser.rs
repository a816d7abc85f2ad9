//! Frontmatter parsing from markdown documents.

use super::types::{Frontmatter, ParsedDocument};
use thiserror::Error;

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Split a document into its raw frontmatter YAML and body.
///
/// Returns `None` when the document does not open with a `---` block that is
/// closed by another `---` line.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let trimmed = content.trim_start();
    let after_first = trimmed.strip_prefix("---")?;

    // Skip the newline after opening ---
    let after_newline = after_first
        .strip_prefix('\n')
        .or_else(|| after_first.strip_prefix("\r\n"))
        .unwrap_or(after_first);

    let end_pos = find_closing_delimiter(after_newline)?;
    let yaml = &after_newline[..end_pos];

    let after_closing = &after_newline[end_pos..];
    let after_closing = after_closing.trim_start_matches(['-', ' ', '\t']);
    let body = after_closing
        .strip_prefix('\n')
        .or_else(|| after_closing.strip_prefix("\r\n"))
        .unwrap_or(after_closing);

    Some((yaml, body))
}

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` at the start of the document:
/// ```markdown
/// ---
/// id: 4f2a
/// title: Foo
/// ---
/// # Document content
/// ```
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    let Some((yaml, body)) = split(content) else {
        return Ok(ParsedDocument { frontmatter: None, body: content.to_string() });
    };

    let frontmatter: Frontmatter = if yaml.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml.trim())?
    };

    Ok(ParsedDocument { frontmatter: Some(frontmatter), body: body.to_string() })
}

/// Byte position of the closing `---` line.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        if line.trim() == "---" {
            return Some(pos);
        }
        pos += line.len();
    }
    None
}
