//! `# noqa` suppression comments.
//!
//! Supports the flake8 forms:
//! ```text
//! def move(self): ...  # noqa
//! def move(self): ...  # noqa: OVR100
//! def move(self): ...  # NOQA:OVR100,E501
//! ```

/// A parsed `# noqa` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoqaDirective {
    /// Bare `# noqa`: suppresses every code on the line.
    All,
    /// `# noqa: CODE[, CODE...]`: suppresses the listed codes (prefix match).
    Codes(Vec<String>),
}

impl NoqaDirective {
    /// Returns true if this directive suppresses `code`.
    #[must_use]
    pub fn suppresses(&self, code: &str) -> bool {
        match self {
            Self::All => true,
            Self::Codes(codes) => codes.iter().any(|c| code.starts_with(c.as_str())),
        }
    }
}

/// Checks whether a physical source line suppresses `code`.
#[must_use]
pub fn is_suppressed(line: &str, code: &str) -> bool {
    parse_noqa(line).is_some_and(|directive| directive.suppresses(code))
}

/// Parses the first `# noqa` comment on a line.
#[must_use]
pub fn parse_noqa(line: &str) -> Option<NoqaDirective> {
    line.match_indices('#')
        .find_map(|(index, _)| parse_comment(&line[index + 1..]))
}

fn parse_comment(comment: &str) -> Option<NoqaDirective> {
    let comment = comment.trim_start();
    let keyword = comment.get(..4)?;
    if !keyword.eq_ignore_ascii_case("noqa") {
        return None;
    }

    let Some(rest) = comment[4..].strip_prefix(':') else {
        return Some(NoqaDirective::All);
    };

    let codes: Vec<String> = rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .take_while(|token| is_code(token))
        .map(str::to_owned)
        .collect();

    if codes.is_empty() {
        Some(NoqaDirective::All)
    } else {
        Some(NoqaDirective::Codes(codes))
    }
}

/// A code is letters followed by digits, e.g. `OVR100` or `E501`.
fn is_code(token: &str) -> bool {
    let digits_at = token
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(token.len());
    let (letters, digits) = token.split_at(digits_at);
    !letters.is_empty()
        && !digits.is_empty()
        && letters.chars().all(|c| c.is_ascii_alphabetic())
        && digits.chars().all(|c| c.is_ascii_digit())
}
