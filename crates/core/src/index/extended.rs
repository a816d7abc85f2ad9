//! Extended query syntax.
//!
//! A query is split on `|` into alternative groups; each group is split on
//! spaces (outside double quotes) into tokens that must all match.
//!
//! | Token    | Matches when the text...   |
//! |----------|----------------------------|
//! | `foo`    | fuzzy-matches `foo`        |
//! | `=foo`   | is exactly `foo`           |
//! | `'foo`   | contains `foo`             |
//! | `^foo`   | starts with `foo`          |
//! | `foo$`   | ends with `foo`            |
//! | `!foo`   | does not contain `foo`     |
//! | `!^foo`  | does not start with `foo`  |
//! | `!foo$`  | does not end with `foo`    |
//!
//! Wrapping the operand in double quotes (`^"foo bar"`) keeps spaces.

use std::sync::LazyLock;

use regex::Regex;

use super::bitap::{BitapOptions, BitapPattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Exact,
    Include,
    Prefix,
    InversePrefix,
    InverseSuffix,
    Suffix,
    InverseExact,
    Fuzzy,
}

struct TokenRule {
    kind: TokenKind,
    quoted: Regex,
    bare: Regex,
}

// Order matters: the first rule whose pattern captures a non-empty operand wins.
static TOKEN_RULES: LazyLock<Vec<TokenRule>> = LazyLock::new(|| {
    let rule = |kind, quoted: &str, bare: &str| TokenRule {
        kind,
        quoted: Regex::new(quoted).unwrap(),
        bare: Regex::new(bare).unwrap(),
    };
    vec![
        rule(TokenKind::Exact, r#"^="(.*)"$"#, r"^=(.*)$"),
        rule(TokenKind::Include, r#"^'"(.*)"$"#, r"^'(.*)$"),
        rule(TokenKind::Prefix, r#"^\^"(.*)"$"#, r"^\^(.*)$"),
        rule(TokenKind::InversePrefix, r#"^!\^"(.*)"$"#, r"^!\^(.*)$"),
        rule(TokenKind::InverseSuffix, r#"^!"(.*)"\$$"#, r"^!(.*)\$$"),
        rule(TokenKind::Suffix, r#"^"(.*)"\$$"#, r"^(.*)\$$"),
        rule(TokenKind::InverseExact, r#"^!"(.*)"$"#, r"^!(.*)$"),
        rule(TokenKind::Fuzzy, r#"^"(.*)"$"#, r"^(.*)$"),
    ]
});

#[derive(Debug, Clone)]
enum Matcher {
    Exact(String),
    Include(String),
    Prefix(String),
    InversePrefix(String),
    InverseSuffix(String),
    Suffix(String),
    InverseExact(String),
    Fuzzy(BitapPattern),
}

impl Matcher {
    fn new(kind: TokenKind, operand: &str) -> Self {
        let operand = operand.to_lowercase();
        match kind {
            TokenKind::Exact => Self::Exact(operand),
            TokenKind::Include => Self::Include(operand),
            TokenKind::Prefix => Self::Prefix(operand),
            TokenKind::InversePrefix => Self::InversePrefix(operand),
            TokenKind::InverseSuffix => Self::InverseSuffix(operand),
            TokenKind::Suffix => Self::Suffix(operand),
            TokenKind::InverseExact => Self::InverseExact(operand),
            TokenKind::Fuzzy => Self::Fuzzy(BitapPattern::new(&operand)),
        }
    }

    /// Score for a lowercased text, or `None` when it doesn't match.
    fn score(&self, text: &str, opts: &BitapOptions) -> Option<f64> {
        let matched = match self {
            Self::Exact(p) => text == p,
            Self::Include(p) => text.contains(p.as_str()),
            Self::Prefix(p) => text.starts_with(p.as_str()),
            Self::InversePrefix(p) => !text.starts_with(p.as_str()),
            Self::InverseSuffix(p) => !text.ends_with(p.as_str()),
            Self::Suffix(p) => text.ends_with(p.as_str()),
            Self::InverseExact(p) => !text.contains(p.as_str()),
            Self::Fuzzy(pattern) => {
                let m = pattern.search(text, opts);
                return m.is_match.then_some(m.score);
            }
        };
        matched.then_some(0.0)
    }
}

/// A parsed extended query, ready to be matched against many texts.
#[derive(Debug, Clone)]
pub struct ExtendedQuery {
    groups: Vec<Vec<Matcher>>,
    options: BitapOptions,
}

impl ExtendedQuery {
    pub fn parse(query: &str, options: BitapOptions) -> Self {
        let groups = query
            .split('|')
            .map(|group| split_tokens(group.trim()).into_iter().map(parse_token).collect())
            .collect();
        Self { groups, options }
    }

    /// Score of the first group whose tokens all match, averaged over its tokens.
    ///
    /// Returns `None` when no group matches.
    pub fn search_in(&self, text: &str) -> Option<f64> {
        let text = text.to_lowercase();
        for group in &self.groups {
            if group.is_empty() {
                continue;
            }
            let scores: Option<Vec<f64>> =
                group.iter().map(|m| m.score(&text, &self.options)).collect();
            if let Some(scores) = scores {
                return Some(scores.iter().sum::<f64>() / scores.len() as f64);
            }
        }
        None
    }
}

/// Split on runs of spaces that are not inside double quotes.
fn split_tokens(group: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in group.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' if !in_quotes => {
                if i > start {
                    tokens.push(&group[start..i]);
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < group.len() {
        tokens.push(&group[start..]);
    }

    tokens
}

fn parse_token(token: &str) -> Matcher {
    let capture = |re: &Regex| {
        re.captures(token)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
    };

    TOKEN_RULES
        .iter()
        .find_map(|rule| capture(&rule.quoted).map(|op| (rule.kind, op)))
        .or_else(|| {
            TOKEN_RULES.iter().find_map(|rule| capture(&rule.bare).map(|op| (rule.kind, op)))
        })
        .map_or_else(|| Matcher::new(TokenKind::Fuzzy, token), |(kind, op)| Matcher::new(kind, op))
}
