//! core/rules/glob.rs
//! Shell-style glob patterns, compiled once into a `Regex`.
//!
//! Supported syntax:
//! - `*` any run of characters (including none)
//! - `?` exactly one character
//! - `[seq]` / `[!seq]` character class / negated class
//! - anything else matches literally
//!
//! Matching is case-insensitive: both pattern and value are lower-cased.

use regex::Regex;

#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&translate(&pattern.to_lowercase()))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whole-string, case-insensitive match.
    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(&value.to_lowercase())
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Translate a glob into an anchored regex.
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2 + 8);
    out.push_str("(?s)^(?:");

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;

        match c {
            '*' => {
                // Collapse runs of '*'.
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&translate_class(&chars[i..end]));
                    i = end + 1;
                }
                None => out.push_str("\\["),
            },
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
    }

    out.push_str(")$");
    out
}

/// Index of the `]` closing a class that opened just before `start`.
/// A `!` and then a `]` directly after the opening bracket are class content.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if j < chars.len() && chars[j] == '!' {
        j += 1;
    }
    if j < chars.len() && chars[j] == ']' {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

/// Class body to regex, fnmatch style: `x-y` is a range (a reversed range is
/// empty), a `-` that cannot form a range is literal, and every member is
/// escaped so the regex crate never sees its own class operators.
fn translate_class(body: &[char]) -> String {
    let (negated, members) = match body.split_first() {
        Some(('!', tail)) => (true, tail),
        _ => (false, body),
    };

    let mut items = String::new();
    let mut k = 0;
    while k < members.len() {
        let lo = members[k];
        if k + 2 < members.len() && members[k + 1] == '-' {
            let hi = members[k + 2];
            k += 3;
            if lo <= hi {
                items.push_str(&escape_member(lo));
                items.push('-');
                items.push_str(&escape_member(hi));
            }
        } else {
            items.push_str(&escape_member(lo));
            k += 1;
        }
    }

    match (negated, items.is_empty()) {
        // Nothing left: the class can never match.
        (false, true) => r"[^\x00-\x{10FFFF}]".to_string(),
        (true, true) => ".".to_string(),
        (false, false) => format!("[{items}]"),
        (true, false) => format!("[^{items}]"),
    }
}

fn escape_member(c: char) -> String {
    regex::escape(c.encode_utf8(&mut [0u8; 4]))
}
