// SPDX-License-Identifier: PMPL-1.0-or-later

//! Natural ordering for file names: `file2` sorts before `file10`.

use std::cmp::Ordering;

/// One run of a name, split at digit boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    Text(String),
    /// Digits with leading zeros stripped, compared by length then value
    Number(String),
}

/// Sort key alternating text and number runs, always starting with text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalKey {
    chunks: Vec<Chunk>,
    raw: String,
}

impl NaturalKey {
    pub fn new(name: &str) -> Self {
        let mut chunks = Vec::new();
        let mut text = String::new();
        let mut digits = String::new();

        for ch in name.chars() {
            if ch.is_ascii_digit() {
                if digits.is_empty() {
                    chunks.push(Chunk::Text(std::mem::take(&mut text).to_lowercase()));
                }
                digits.push(ch);
            } else {
                if !digits.is_empty() {
                    chunks.push(Chunk::Number(strip_zeros(&std::mem::take(&mut digits))));
                }
                text.push(ch);
            }
        }
        if !digits.is_empty() {
            chunks.push(Chunk::Number(strip_zeros(&digits)));
        }
        chunks.push(Chunk::Text(text.to_lowercase()));

        Self {
            chunks,
            raw: name.to_string(),
        }
    }
}

fn strip_zeros(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

impl Ord for Chunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
            (Chunk::Number(a), Chunk::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            // Keys built by `new` alternate from a text run, so runs at the
            // same position always share a variant.
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Chunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NaturalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chunks
            .cmp(&other.chunks)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for NaturalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two names naturally
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalKey::new(a).cmp(&NaturalKey::new(b))
}

/// Sort names in place by natural order
pub fn natural_sort<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by_cached_key(|name| NaturalKey::new(name.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_runs_compare_as_integers() {
        let mut names = vec!["a2", "a10", "a1"];
        natural_sort(&mut names);
        assert_eq!(names, vec!["a1", "a2", "a10"]);
    }

    #[test]
    fn text_runs_ignore_case() {
        assert_eq!(natural_cmp("Issue2", "issue10"), Ordering::Less);
        assert_eq!(natural_cmp("b", "A"), Ordering::Greater);
    }

    #[test]
    fn dates_sort_chronologically() {
        let mut names = vec!["1945.10.01", "1945.09.30", "1944.12.31", "1945.10.1"];
        natural_sort(&mut names);
        assert_eq!(
            names,
            vec!["1944.12.31", "1945.09.30", "1945.10.01", "1945.10.1"]
        );
    }

    #[test]
    fn equal_numbers_break_ties_by_raw_name() {
        assert_eq!(natural_cmp("file01", "file1"), Ordering::Less);
        assert_eq!(natural_cmp("file1", "file1"), Ordering::Equal);
    }

    #[test]
    fn huge_digit_runs_do_not_overflow() {
        assert_eq!(
            natural_cmp("x99999999999999999999999999", "x100000000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(natural_cmp("a", "a1"), Ordering::Less);
        assert_eq!(natural_cmp("1945", "1945_t"), Ordering::Less);
    }
}
