//! Line classification and parse entry points.
//!
//! A [`Parser`] drives one pass over a named source: comment and blank
//! lines are skipped, `[name]` headers open new sections, and every
//! other line is split into keyword + tokens and appended to the
//! current section. The delimiter set is per-parser state, so two
//! parsers with different delimiters never interfere.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use crate::config::{Config, GLOBAL};
use crate::delimiters::Delimiters;
use crate::entry::Entry;
use crate::error::ParseError;

/// Source name attached to entries parsed from in-memory strings.
pub const INTERNAL_SOURCE: &str = "internal";

/// A configured parser: the delimiter set plus the parse entry
/// points.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    delimiters: Delimiters,
}

impl Parser {
    /// A parser with the default delimiters (`=` and `,`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the delimiter set with the unique characters of
    /// `chars`. Whitespace always splits and need not be listed.
    pub fn with_delimiters(mut self, chars: &str) -> Self {
        self.delimiters = Delimiters::new(chars);
        self
    }

    /// Parse an in-memory string into a fresh configuration. Entries
    /// carry the synthetic source name [`INTERNAL_SOURCE`].
    pub fn parse_str(&self, text: &str) -> Result<Config, ParseError> {
        let mut config = Config::new();
        self.parse_reader_into(&mut config, INTERNAL_SOURCE, text.as_bytes())?;
        Ok(config)
    }

    /// Parse one file into a fresh configuration.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Config, ParseError> {
        let mut config = Config::new();
        self.parse_file_into(&mut config, path)?;
        Ok(config)
    }

    /// Parse each path in order into one shared configuration.
    ///
    /// With `optional` set, per-file failures are skipped and parsing
    /// continues; the configuration reflects the files that
    /// succeeded. Otherwise the first failure stops the pass and is
    /// returned alongside the partial configuration, which keeps
    /// everything appended up to that point.
    pub fn parse_files<P: AsRef<Path>>(
        &self,
        optional: bool,
        paths: &[P],
    ) -> (Config, Option<ParseError>) {
        let mut config = Config::new();
        for path in paths {
            if let Err(err) = self.parse_file_into(&mut config, path) {
                if !optional {
                    return (config, Some(err));
                }
            }
        }
        (config, None)
    }

    /// Parse one more file into an existing configuration.
    pub fn parse_file_into(
        &self,
        config: &mut Config,
        path: impl AsRef<Path>,
    ) -> Result<(), ParseError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ParseError::Open {
            path: path.display().to_string(),
            source,
        })?;
        self.parse_reader_into(config, &path.display().to_string(), BufReader::new(file))
    }

    /// Drive one pass over `reader`, appending into `config` under
    /// the given source name.
    ///
    /// Line numbers are 1-based and count every input line, including
    /// the skipped ones. A read failure aborts the pass; entries
    /// already appended stay in `config`.
    pub fn parse_reader_into<R: BufRead>(
        &self,
        config: &mut Config,
        source: &str,
        reader: R,
    ) -> Result<(), ParseError> {
        let mut current = config.add_section(GLOBAL);
        let mut lineno = 0;
        for read in reader.lines() {
            lineno += 1;
            let raw = read.map_err(|err| ParseError::Read {
                source_name: source.to_string(),
                lineno,
                source: err,
            })?;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(name) = section_header(line) {
                current = config.add_section(name);
                continue;
            }
            let fields = self.delimiters.split(line);
            if fields.is_empty() {
                // Nothing but delimiters on the line.
                continue;
            }
            let tokens: Vec<String> = fields[1..].iter().map(|t| (*t).to_string()).collect();
            let entry = Entry {
                keyword: fields[0].to_string(),
                source: source.to_string(),
                lineno,
                line: line.to_string(),
                args: tokens.join(","),
                tokens,
            };
            config.section_at_mut(current).push(Arc::new(entry));
        }
        Ok(())
    }
}

/// The section name of a `[name]` header line, or None.
///
/// The interior text is taken as-is, untrimmed. A bare `[]` is too
/// short to be a header and falls through to keyword splitting.
fn section_header(line: &str) -> Option<&str> {
    if line.len() > 2 && line.starts_with('[') && line.ends_with(']') {
        Some(&line[1..line.len() - 1])
    } else {
        None
    }
}

/// Parse one file with the default delimiters.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Config, ParseError> {
    Parser::new().parse_file(path)
}

/// Parse an in-memory string with the default delimiters.
pub fn parse_str(text: &str) -> Result<Config, ParseError> {
    Parser::new().parse_str(text)
}

/// Parse several files into one configuration with the default
/// delimiters.
pub fn parse_files<P: AsRef<Path>>(optional: bool, paths: &[P]) -> (Config, Option<ParseError>) {
    Parser::new().parse_files(optional, paths)
}
