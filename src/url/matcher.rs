//! Shell-style glob matching for crawl eligibility
//!
//! Supported syntax:
//! - `*` matches any run of characters, including `/` and the empty run
//! - `?` matches exactly one character
//! - `[...]` matches one character from the set; ranges (`a-z`) are allowed,
//!   `[!...]` negates the set, and a `]` right after `[` or `[!` is literal
//!
//! An unterminated `[` is matched literally. Matching is case-sensitive and
//! must cover the whole candidate.

/// A single compiled glob element
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyChar,
    AnyRun,
    Class {
        negated: bool,
        ranges: Vec<(char, char)>,
    },
}

impl Token {
    /// Tests a single character against a non-star token
    fn accepts(&self, c: char) -> bool {
        match self {
            Token::Literal(l) => *l == c,
            Token::AnyChar => true,
            Token::AnyRun => false,
            Token::Class { negated, ranges } => {
                let hit = ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi);
                hit != *negated
            }
        }
    }
}

/// A compiled glob pattern
///
/// Compile once with [`GlobPattern::new`] and test many candidates with
/// [`GlobPattern::matches`].
///
/// # Examples
///
/// ```
/// use sumi_glean::url::GlobPattern;
///
/// let pattern = GlobPattern::new("https://x.test/docs/**");
/// assert!(pattern.matches("https://x.test/docs/guide/intro"));
/// assert!(!pattern.matches("https://x.test/blog/post"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    source: String,
    tokens: Vec<Token>,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            source: pattern.to_string(),
            tokens: compile(pattern),
        }
    }

    /// The pattern text this glob was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the entire candidate matches the pattern
    ///
    /// Runs in O(pattern × candidate): on a mismatch only the most recent
    /// star is widened, which is sufficient because a later star can absorb
    /// anything an earlier one could.
    pub fn matches(&self, candidate: &str) -> bool {
        let text: Vec<char> = candidate.chars().collect();
        let tokens = &self.tokens;

        let mut p = 0;
        let mut t = 0;
        // (token index after the star, text index the star currently ends at)
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            if p < tokens.len() {
                if tokens[p] == Token::AnyRun {
                    backtrack = Some((p + 1, t));
                    p += 1;
                    continue;
                }
                if tokens[p].accepts(text[t]) {
                    p += 1;
                    t += 1;
                    continue;
                }
            }

            match backtrack {
                Some((after_star, star_end)) => {
                    p = after_star;
                    t = star_end + 1;
                    backtrack = Some((after_star, star_end + 1));
                }
                None => return false,
            }
        }

        while p < tokens.len() && tokens[p] == Token::AnyRun {
            p += 1;
        }

        p == tokens.len()
    }
}

/// Checks whether `url` matches the glob `pattern`
///
/// Convenience wrapper that compiles the pattern on every call; the
/// orchestrator keeps a compiled [`GlobPattern`] instead.
///
/// # Examples
///
/// ```
/// use sumi_glean::url::matches;
///
/// assert!(matches("https://x.test/b", "https://x.test/**"));
/// assert!(matches("https://x.test/page1", "https://x.test/page?"));
/// assert!(!matches("https://other.test/b", "https://x.test/**"));
/// ```
pub fn matches(url: &str, pattern: &str) -> bool {
    GlobPattern::new(pattern).matches(url)
}

fn compile(pattern: &str) -> Vec<Token> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                // Collapse runs of stars
                if tokens.last() != Some(&Token::AnyRun) {
                    tokens.push(Token::AnyRun);
                }
                i += 1;
            }
            '?' => {
                tokens.push(Token::AnyChar);
                i += 1;
            }
            '[' => match parse_class(&chars, i + 1) {
                Some((token, next)) => {
                    tokens.push(token);
                    i = next;
                }
                None => {
                    tokens.push(Token::Literal('['));
                    i += 1;
                }
            },
            c => {
                tokens.push(Token::Literal(c));
                i += 1;
            }
        }
    }

    tokens
}

/// Parses a bracket expression starting just after `[`
///
/// Returns the class token and the index after the closing `]`, or None when
/// the bracket is never closed.
fn parse_class(chars: &[char], start: usize) -> Option<(Token, usize)> {
    let mut j = start;
    let negated = chars.get(j) == Some(&'!');
    if negated {
        j += 1;
    }

    let members_start = j;
    // A leading ']' is a member, not the terminator
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    if j >= chars.len() {
        return None;
    }

    let members = &chars[members_start..j];
    let mut ranges = Vec::new();
    let mut k = 0;
    while k < members.len() {
        if k + 2 < members.len() && members[k + 1] == '-' {
            ranges.push((members[k], members[k + 2]));
            k += 3;
        } else {
            ranges.push((members[k], members[k]));
            k += 1;
        }
    }

    Some((Token::Class { negated, ranges }, j + 1))
}
