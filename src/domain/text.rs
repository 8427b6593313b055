//! String helpers: case conversion, marker search and positional splitting.

use std::collections::HashMap;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::{Captures, Regex};

use crate::domain::error::{DomainError, DomainResult};

static WORD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("literal pattern"));
static STUDLY_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[-_]+)((?-u:\w))").expect("literal pattern"));
static CAMEL_HUMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("literal pattern"));

/// Uppercase the first character (Unicode aware).
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character (Unicode aware).
pub fn lcfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Apply [`ucfirst`] to every run of non-whitespace.
pub fn ucwords(s: &str) -> String {
    WORD_RUN
        .replace_all(s, |caps: &Captures| ucfirst(&caps[0]))
        .into_owned()
}

/// `foo_bar-baz` -> `FooBarBaz`.
pub fn studly_caps(under_scored: &str) -> String {
    STUDLY_BOUNDARY
        .replace_all(under_scored, |caps: &Captures| caps[1].to_ascii_uppercase())
        .into_owned()
}

/// `foo_bar` -> `fooBar`.
pub fn camel_case(under_scored: &str) -> String {
    let studly = studly_caps(under_scored);
    let mut chars = studly.chars();
    match chars.next() {
        Some(first) => std::iter::once(first.to_ascii_lowercase())
            .chain(chars)
            .collect(),
        None => String::new(),
    }
}

/// `fooBarBaz` -> `foo_bar_baz`; with `include_dashes`, `-` becomes `_` as well.
///
/// Only a lowercase letter or digit followed by an uppercase letter starts a
/// new word, so `HTTPServer` becomes `httpserver`.
pub fn under_score(camel: &str, include_dashes: bool) -> String {
    let source = if include_dashes {
        camel.replace('-', "_")
    } else {
        camel.to_string()
    };
    CAMEL_HUMP
        .replace_all(&source, "${1}_${2}")
        .to_ascii_lowercase()
}

/// Map every char of `from` to the char at the same position in `to`, in one pass.
///
/// Extra chars in the longer string are ignored; the first mapping of a
/// repeated source char wins.
pub fn translate_chars(s: &str, from: &str, to: &str) -> String {
    let mut table: HashMap<char, char> = HashMap::new();
    for (f, t) in from.chars().zip(to.chars()) {
        table.entry(f).or_insert(t);
    }
    s.chars()
        .map(|c| table.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Replace every pair in order; later pairs see the output of earlier ones.
pub fn replace_pairs(s: &str, pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .filter(|(from, _)| !from.is_empty())
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Collect the substrings enclosed by `start` and the next `end`.
///
/// A `start` without a following `end` yields the remainder of the string and
/// ends the search. `limit` of `None` or `Some(0)` means no limit. Empty markers
/// find nothing.
pub fn str_search(
    s: &str,
    start: &str,
    end: &str,
    limit: Option<usize>,
    trim: bool,
) -> Vec<String> {
    let mut found = Vec::new();
    if start.is_empty() || end.is_empty() {
        return found;
    }
    let limit = limit.filter(|&n| n > 0);

    let mut rest = s;
    while let Some(pos) = rest.find(start) {
        rest = &rest[pos + start.len()..];
        let (value, done) = match rest.find(end) {
            Some(end_pos) => {
                let value = &rest[..end_pos];
                rest = &rest[end_pos + end.len()..];
                (value, false)
            }
            None => (rest, true),
        };
        let value = if trim { value.trim() } else { value };
        found.push(value.to_string());

        if done || limit.is_some_and(|n| found.len() >= n) {
            break;
        }
    }
    found
}

/// First substring enclosed by `start` and `end`.
pub fn str_search_first(s: &str, start: &str, end: &str, trim: bool) -> Option<String> {
    str_search(s, start, end, Some(1), trim).into_iter().next()
}

/// Split at char positions; a negative position counts from the end.
///
/// ```
/// use vvkit::domain::text::split_pos;
///
/// assert_eq!(split_pos("01234567898765", &[5, -3], false), ["01234", "567898", "765"]);
/// ```
pub fn split_pos(s: &str, positions: &[isize], skip_last: bool) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as isize;

    let mut parts: Vec<String> = Vec::with_capacity(positions.len() + 1);
    let mut prev = 0usize;
    for &p in positions {
        let p = (if p < 0 { len + p } else { p }).clamp(0, len) as usize;
        let (from, to) = (p.min(prev), p.max(prev));
        parts.push(chars[from..to].iter().collect());
        prev = to;
    }
    if !skip_last {
        parts.push(chars[prev..].iter().collect());
    }
    parts
}

/// Split into consecutive chunks of the given char lengths.
pub fn split_chunks(s: &str, lengths: &[usize], skip_last: bool) -> Vec<String> {
    let positions: Vec<isize> = lengths
        .iter()
        .scan(0isize, |acc, &l| {
            *acc += l as isize;
            Some(*acc)
        })
        .collect();
    split_pos(s, &positions, skip_last)
}

/// Split into pieces of `len` chars; the last piece may be shorter.
///
/// A zero `len` yields nothing.
pub fn str_split(s: &str, len: usize) -> Vec<String> {
    if len == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = s.chars().collect();
    chars.chunks(len).map(|piece| piece.iter().collect()).collect()
}

/// [`split_chunks`] joined with `separator`.
///
/// ```
/// use vvkit::domain::text::str_chunks;
///
/// assert_eq!(str_chunks("01234567898765", &[4, 4], " "), "0123 4567 898765");
/// ```
pub fn str_chunks(s: &str, lengths: &[usize], separator: &str) -> String {
    split_chunks(s, lengths, false).iter().join(separator)
}

/// Split on a delimiter regex, dropping empty pieces.
///
/// With `trim`, the input is trimmed and whitespace around each delimiter is
/// swallowed.
pub fn split_no_empty(s: &str, delimiter: &str, trim: bool) -> DomainResult<Vec<String>> {
    let (pattern, input) = if trim {
        (format!(r"\s*(?:{})\s*", delimiter), s.trim())
    } else {
        (delimiter.to_string(), s)
    };
    let re = Regex::new(&pattern).map_err(|e| DomainError::InvalidPattern {
        pattern: delimiter.to_string(),
        message: e.to_string(),
    })?;
    Ok(re
        .split(input)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect())
}
