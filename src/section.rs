//! Named, ordered collections of entries.

use std::collections::HashMap;
use std::sync::Arc;

use crate::entry::Entry;
use crate::error::LookupError;

/// A named group of entries, in file order, with a keyword index.
///
/// Entries of the same keyword accumulate; they are never overwritten.
/// This matters for keywords meant to repeat, e.g. a multi-valued
/// setting spread across several lines. Callers that want last-wins
/// semantics take the last element of [`get`](Self::get).
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    entries: Vec<Arc<Entry>>,
    index: HashMap<String, Vec<Arc<Entry>>>,
}

impl Section {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The section name. The implicit top-level section is named
    /// [`GLOBAL`](crate::GLOBAL).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an entry, keeping the keyword index in step with the
    /// ordered sequence.
    pub(crate) fn push(&mut self, entry: Arc<Entry>) {
        self.index
            .entry(entry.keyword.clone())
            .or_default()
            .push(Arc::clone(&entry));
        self.entries.push(entry);
    }

    /// True if at least one entry exists for `keyword`.
    pub fn has(&self, keyword: &str) -> bool {
        self.index.contains_key(keyword)
    }

    /// All entries for `keyword`, in file order. Empty if absent.
    pub fn get(&self, keyword: &str) -> &[Arc<Entry>] {
        self.index.get(keyword).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The single token of a keyword expected to occur exactly once
    /// with exactly one token.
    ///
    /// Fails if the keyword has zero or more than one entry, or if
    /// that entry has zero or more than one token.
    pub fn get_arg(&self, keyword: &str) -> Result<&str, LookupError> {
        let entries = self
            .index
            .get(keyword)
            .ok_or_else(|| LookupError::Missing(keyword.to_string()))?;
        if entries.len() != 1 {
            return Err(LookupError::EntryCount {
                keyword: keyword.to_string(),
                count: entries.len(),
            });
        }
        let entry = &entries[0];
        if entry.tokens.len() != 1 {
            return Err(LookupError::TokenCount {
                keyword: keyword.to_string(),
                count: entry.tokens.len(),
            });
        }
        Ok(&entry.tokens[0])
    }

    /// All entries in this section, in original file order.
    pub fn entries(&self) -> &[Arc<Entry>] {
        &self.entries
    }

    /// Number of entries in this section.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the section holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(keyword: &str, tokens: &[&str]) -> Arc<Entry> {
        Arc::new(Entry {
            keyword: keyword.to_string(),
            source: "test".to_string(),
            lineno: 1,
            line: keyword.to_string(),
            args: tokens.join(","),
            tokens: tokens.iter().map(|t| (*t).to_string()).collect(),
        })
    }

    #[test]
    fn test_duplicates_accumulate() {
        let mut section = Section::new("s");
        section.push(entry("key", &["a"]));
        section.push(entry("other", &["x"]));
        section.push(entry("key", &["b"]));

        let entries = section.get("key");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].tokens, vec!["a"]);
        assert_eq!(entries[1].tokens, vec!["b"]);
        assert_eq!(section.len(), 3);
    }

    #[test]
    fn test_absent_keyword() {
        let section = Section::new("s");
        assert!(!section.has("key"));
        assert!(section.get("key").is_empty());
        assert_eq!(
            section.get_arg("key"),
            Err(LookupError::Missing("key".to_string()))
        );
    }

    #[test]
    fn test_get_arg_single() {
        let mut section = Section::new("s");
        section.push(entry("key", &["value"]));
        assert_eq!(section.get_arg("key"), Ok("value"));
    }

    #[test]
    fn test_get_arg_rejects_repeated_keyword() {
        let mut section = Section::new("s");
        section.push(entry("key", &["a"]));
        section.push(entry("key", &["b"]));
        assert_eq!(
            section.get_arg("key"),
            Err(LookupError::EntryCount {
                keyword: "key".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn test_get_arg_rejects_wrong_token_count() {
        let mut section = Section::new("s");
        section.push(entry("bare", &[]));
        section.push(entry("pair", &["a", "b"]));
        assert_eq!(
            section.get_arg("bare"),
            Err(LookupError::TokenCount {
                keyword: "bare".to_string(),
                count: 0,
            })
        );
        assert_eq!(
            section.get_arg("pair"),
            Err(LookupError::TokenCount {
                keyword: "pair".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn test_entries_preserve_file_order() {
        let mut section = Section::new("s");
        section.push(entry("b", &[]));
        section.push(entry("a", &[]));
        section.push(entry("b", &[]));

        let keywords: Vec<&str> = section
            .entries()
            .iter()
            .map(|e| e.keyword.as_str())
            .collect();
        assert_eq!(keywords, vec!["b", "a", "b"]);
    }
}
