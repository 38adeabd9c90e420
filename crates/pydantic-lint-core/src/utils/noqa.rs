//! `# noqa` suppression comments.
//!
//! Supports the flake8 forms:
//! ```text
//! x = 1  # noqa
//! x = 1  # noqa: RULE-NONANNOTATED-ATTR, RULE-DUPLICATE-FIELD
//! ```
//!
//! Directives are read from comments only, so `"# noqa"` inside a string
//! suppresses nothing. A listed code suppresses every code it is a prefix
//! of, compared case-insensitively.

use std::collections::HashMap;

use crate::ast::Comment;

/// Parsed `# noqa` directive of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Noqa {
    /// Bare `# noqa`: everything on the line is suppressed.
    All,
    /// `# noqa: A, B`: only the listed codes (uppercased) are suppressed.
    Codes(Vec<String>),
}

impl Noqa {
    /// Returns true if this directive suppresses `code`.
    #[must_use]
    pub fn suppresses(&self, code: &str) -> bool {
        match self {
            Self::All => true,
            Self::Codes(codes) => {
                let code = code.to_ascii_uppercase();
                codes.iter().any(|c| code.starts_with(c.as_str()))
            }
        }
    }
}

/// `# noqa` directives of a file, indexed by line.
#[derive(Debug, Clone, Default)]
pub struct NoqaIndex {
    lines: HashMap<usize, Noqa>,
}

impl NoqaIndex {
    /// Collects the directives of a file from its comments.
    #[must_use]
    pub fn from_comments(comments: &[Comment]) -> Self {
        let lines = comments
            .iter()
            .filter_map(|c| parse_noqa(&c.text).map(|noqa| (c.position.line, noqa)))
            .collect();
        Self { lines }
    }

    /// Returns true if `code` is suppressed on `line` (1-indexed).
    #[must_use]
    pub fn is_suppressed(&self, line: usize, code: &str) -> bool {
        self.lines
            .get(&line)
            .is_some_and(|noqa| noqa.suppresses(code))
    }
}

/// Parses a `# noqa` directive from the text of a comment.
#[must_use]
pub fn parse_noqa(line: &str) -> Option<Noqa> {
    line.match_indices('#')
        .find_map(|(i, _)| parse_comment(&line[i + 1..]))
}

fn parse_comment(comment: &str) -> Option<Noqa> {
    let comment = comment.trim_start();
    let keyword = comment.get(..4)?;
    if !keyword.eq_ignore_ascii_case("noqa") {
        return None;
    }

    let rest = &comment[4..];
    let Some(list) = rest.strip_prefix(':') else {
        // `# noqa` must not run into a following word (`# noqasomething`).
        return match rest.chars().next() {
            Some(c) if c.is_alphanumeric() => None,
            _ => Some(Noqa::All),
        };
    };

    let codes: Vec<String> = list
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|code| code.trim_matches(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_')))
        .take_while(|code| code.is_empty() || is_code(code))
        .filter(|code| !code.is_empty())
        .map(str::to_ascii_uppercase)
        .collect();

    if codes.is_empty() {
        Some(Noqa::All)
    } else {
        Some(Noqa::Codes(codes))
    }
}

fn is_code(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_alphabetic())
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && token.chars().any(|c| c == '-' || c.is_ascii_digit())
}
