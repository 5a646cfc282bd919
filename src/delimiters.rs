//! Token delimiter configuration.
//!
//! Tokens within a line are separated by whitespace plus a small set
//! of extra characters, `=` and `,` by default. The set is carried by
//! each [`Parser`](crate::Parser) rather than being process-global, so
//! two parsers with different delimiters can run side by side.

/// The set of non-whitespace characters that separate tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    chars: Vec<char>,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("=,")
    }
}

impl Delimiters {
    /// Build a delimiter set from the unique characters of `chars`.
    ///
    /// An empty string yields whitespace-only splitting. Whitespace
    /// always splits and does not need to be listed.
    pub fn new(chars: &str) -> Self {
        let mut set = Vec::new();
        for c in chars.chars() {
            if !set.contains(&c) {
                set.push(c);
            }
        }
        Self { chars: set }
    }

    /// True if `c` separates tokens.
    pub fn is_delimiter(&self, c: char) -> bool {
        c.is_whitespace() || self.chars.contains(&c)
    }

    /// Split a trimmed line into fields, discarding the empty fields
    /// produced by adjacent delimiters.
    ///
    /// A line that is entirely delimiters and whitespace yields no
    /// fields.
    pub fn split<'l>(&self, line: &'l str) -> Vec<&'l str> {
        line.split(|c: char| self.is_delimiter(c))
            .filter(|field| !field.is_empty())
            .collect()
    }
}
