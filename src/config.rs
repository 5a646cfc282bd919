//! The section registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::entry::Entry;
use crate::error::LookupError;
use crate::section::Section;

/// Name of the implicit top-level section.
pub const GLOBAL: &str = "global";

/// A parsed configuration: sections in creation order plus a name
/// index.
///
/// The global section always exists and is a singleton. Every other
/// name may be held by multiple section instances, one per `[name]`
/// header encountered: two `[x]` blocks in one file are two distinct,
/// independently queryable sections. A Config is populated by one or
/// more parse passes and is read-only afterwards except through
/// [`merge`](Self::merge).
#[derive(Debug, Clone)]
pub struct Config {
    sections: Vec<Section>,
    by_name: HashMap<String, Vec<usize>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// An empty configuration with the global section pre-seeded.
    pub fn new() -> Self {
        let mut config = Self {
            sections: Vec::new(),
            by_name: HashMap::new(),
        };
        config.add_section(GLOBAL);
        config
    }

    /// Open a section under `name` and return its registry slot.
    ///
    /// The empty name aliases the global section. `global` reuses the
    /// existing singleton; any other name gets a fresh instance, so
    /// repeated `[name]` headers accumulate distinct sections.
    pub(crate) fn add_section(&mut self, name: &str) -> usize {
        let name = if name.is_empty() { GLOBAL } else { name };
        if name == GLOBAL {
            if let Some(slots) = self.by_name.get(GLOBAL) {
                return slots[0];
            }
        }
        let slot = self.sections.len();
        self.sections.push(Section::new(name));
        self.by_name.entry(name.to_string()).or_default().push(slot);
        slot
    }

    pub(crate) fn section_at_mut(&mut self, slot: usize) -> &mut Section {
        &mut self.sections[slot]
    }

    /// The global section.
    pub fn global(&self) -> &Section {
        &self.sections[0]
    }

    /// True if the global section has at least one entry for
    /// `keyword`.
    pub fn has(&self, keyword: &str) -> bool {
        self.global().has(keyword)
    }

    /// Global-section entries for `keyword`, in file order.
    pub fn get(&self, keyword: &str) -> &[Arc<Entry>] {
        self.global().get(keyword)
    }

    /// Single-token lookup in the global section.
    pub fn get_arg(&self, keyword: &str) -> Result<&str, LookupError> {
        self.global().get_arg(keyword)
    }

    /// The given keywords that have no entry in the global section,
    /// in input order.
    pub fn missing(&self, keywords: &[&str]) -> Vec<String> {
        keywords
            .iter()
            .copied()
            .filter(|keyword| !self.has(keyword))
            .map(str::to_string)
            .collect()
    }

    /// The first section registered under `name`, if any. The empty
    /// name aliases the global section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        let name = if name.is_empty() { GLOBAL } else { name };
        let slot = *self.by_name.get(name)?.first()?;
        Some(&self.sections[slot])
    }

    /// All sections registered under `name`, in creation order.
    pub fn sections(&self, name: &str) -> Vec<&Section> {
        let name = if name.is_empty() { GLOBAL } else { name };
        match self.by_name.get(name) {
            Some(slots) => slots.iter().map(|&slot| &self.sections[slot]).collect(),
            None => Vec::new(),
        }
    }

    /// All sections in creation order, the global section first.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Replay every section of `other` into this configuration.
    ///
    /// `other`'s global entries append to this global section. Every
    /// named section instance of `other` is appended as its own new
    /// instance here; same-named instances are never collapsed.
    /// Entries are shared, keeping their original source names and
    /// line numbers.
    pub fn merge(&mut self, other: &Config) {
        for section in other.iter() {
            let slot = self.add_section(section.name());
            for entry in section.entries() {
                self.sections[slot].push(Arc::clone(entry));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(keyword: &str, lineno: usize) -> Arc<Entry> {
        Arc::new(Entry {
            keyword: keyword.to_string(),
            source: "test".to_string(),
            lineno,
            line: keyword.to_string(),
            args: String::new(),
            tokens: Vec::new(),
        })
    }

    #[test]
    fn test_new_seeds_empty_global() {
        let config = Config::new();
        assert_eq!(config.global().name(), GLOBAL);
        assert!(config.global().is_empty());
        assert_eq!(config.sections(GLOBAL).len(), 1);
    }

    #[test]
    fn test_global_is_singleton() {
        let mut config = Config::new();
        let first = config.add_section(GLOBAL);
        let second = config.add_section(GLOBAL);
        assert_eq!(first, second);
        // The empty name aliases global.
        assert_eq!(config.add_section(""), first);
    }

    #[test]
    fn test_repeated_names_accumulate_instances() {
        let mut config = Config::new();
        let a = config.add_section("x");
        let b = config.add_section("x");
        assert_ne!(a, b);

        config.section_at_mut(a).push(entry("k1", 1));
        config.section_at_mut(b).push(entry("k2", 2));

        let instances = config.sections("x");
        assert_eq!(instances.len(), 2);
        assert!(instances[0].has("k1"));
        assert!(!instances[0].has("k2"));
        assert!(instances[1].has("k2"));
    }

    #[test]
    fn test_section_returns_first_instance() {
        let mut config = Config::new();
        let a = config.add_section("x");
        config.add_section("x");
        config.section_at_mut(a).push(entry("k1", 1));

        assert!(config.section("x").unwrap().has("k1"));
        assert!(config.section("absent").is_none());
    }

    #[test]
    fn test_missing_preserves_input_order() {
        let mut config = Config::new();
        config.section_at_mut(0).push(entry("key1", 1));

        let missing = config.missing(&["key2", "key1", "key5"]);
        assert_eq!(missing, vec!["key2", "key5"]);
    }

    #[test]
    fn test_merge_globals_combine() {
        let mut target = Config::new();
        target.section_at_mut(0).push(entry("a", 1));

        let mut source = Config::new();
        source.section_at_mut(0).push(entry("b", 1));

        target.merge(&source);
        assert_eq!(target.global().len(), 2);
        assert_eq!(target.sections(GLOBAL).len(), 1);
    }

    #[test]
    fn test_merge_appends_named_instances() {
        let mut target = Config::new();
        let t = target.add_section("x");
        target.section_at_mut(t).push(entry("a", 1));

        let mut source = Config::new();
        let s1 = source.add_section("x");
        let s2 = source.add_section("x");
        source.section_at_mut(s1).push(entry("b", 1));
        source.section_at_mut(s2).push(entry("c", 2));

        target.merge(&source);
        let instances = target.sections("x");
        assert_eq!(instances.len(), 3);
        assert!(instances[0].has("a"));
        assert!(instances[1].has("b"));
        assert!(instances[2].has("c"));
    }

    #[test]
    fn test_merge_shares_entries() {
        let mut source = Config::new();
        source.section_at_mut(0).push(entry("key", 7));

        let mut target = Config::new();
        target.merge(&source);

        let merged = &target.get("key")[0];
        assert!(Arc::ptr_eq(merged, &source.get("key")[0]));
        assert_eq!(merged.lineno, 7);
        assert_eq!(merged.source, "test");
    }
}
