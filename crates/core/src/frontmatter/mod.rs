//! YAML frontmatter splitting and parsing for note files.

pub mod parser;
pub mod types;

pub use parser::{FrontmatterParseError, parse, split};
pub use types::{Frontmatter, ParsedDocument};
