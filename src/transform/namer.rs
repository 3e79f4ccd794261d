//! Collision-free naming of sibling entries
//!
//! A base name keeps its bare form the first time it appears in a sibling
//! list. Later repeats, and base names reserved by the generic vocabulary,
//! get `<separator><token>` appended. Everything from the first separator on
//! is dropped again when the name is turned back into a tag.

use crate::core::namespace::{is_namespace_record_name, names};
use std::collections::HashSet;

/// Per-invocation source of disambiguation tokens
///
/// Tokens are a plain counter so that output is reproducible.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    next: u64,
}

impl TokenGenerator {
    /// Create a generator starting at 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Take the next token
    pub fn next_token(&mut self) -> u64 {
        let token = self.next;
        self.next += 1;
        token
    }

    /// Number of tokens handed out so far
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether element content may not use a base name as-is
pub fn is_reserved(base: &str) -> bool {
    base == names::VALUE || base == names::NIL_REASON || is_namespace_record_name(base)
}

/// Append a disambiguation token to a base name
pub fn with_suffix(base: &str, separator: char, token: u64) -> String {
    format!("{}{}{}", base, separator, token)
}

/// Recover a base name by truncating at the first separator
pub fn strip_suffix(name: &str, separator: char) -> &str {
    match name.find(separator) {
        Some(pos) => &name[..pos],
        None => name,
    }
}

/// Names already taken in one sibling list
#[derive(Debug, Clone)]
pub struct SiblingNames {
    separator: char,
    used: HashSet<String>,
}

impl SiblingNames {
    /// Create an empty sibling list
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            used: HashSet::new(),
        }
    }

    /// Mark a name as taken without disambiguating it
    ///
    /// Used for `@` attribute entries and the `value` entry, which are unique
    /// by construction.
    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    /// Check whether a name is taken
    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Pick a name for the next sibling with the given base name
    ///
    /// Only the bare base is checked against the reserved names. A suffixed
    /// candidate that still reads as a `namespace_<N>` record (e.g. base
    /// `namespace` under `_`) gets a second suffix, which no longer matches.
    pub fn assign(&mut self, base: &str, tokens: &mut TokenGenerator) -> String {
        if !is_reserved(base) && !self.used.contains(base) {
            self.used.insert(base.to_string());
            return base.to_string();
        }
        loop {
            let mut name = with_suffix(base, self.separator, tokens.next_token());
            if is_namespace_record_name(&name) {
                name = with_suffix(&name, self.separator, tokens.next_token());
            }
            if self.used.insert(name.clone()) {
                return name;
            }
        }
    }

    /// Disambiguate a whole list of base names
    ///
    /// Applying this to its own output changes nothing.
    pub fn disambiguate(
        names: &[String],
        separator: char,
        tokens: &mut TokenGenerator,
    ) -> Vec<String> {
        let mut siblings = Self::new(separator);
        names
            .iter()
            .map(|name| siblings.assign(name, tokens))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_first_occurrence_is_bare() {
        let mut tokens = TokenGenerator::new();
        let out = SiblingNames::disambiguate(&strings(&["b", "c", "b", "b"]), '_', &mut tokens);
        assert_eq!(out, strings(&["b", "c", "b_1", "b_2"]));
        assert_eq!(tokens.issued(), 2);
    }

    #[test]
    fn test_reserved_names_always_suffixed() {
        let mut tokens = TokenGenerator::new();
        let out = SiblingNames::disambiguate(
            &strings(&["value", "nilReason", "namespace_0"]),
            '_',
            &mut tokens,
        );
        assert_eq!(out, strings(&["value_1", "nilReason_2", "namespace_0_3"]));
    }

    #[test]
    fn test_idempotent() {
        let mut tokens = TokenGenerator::new();
        let once = SiblingNames::disambiguate(
            &strings(&["a", "a", "value", "b", "a"]),
            '_',
            &mut tokens,
        );
        let twice = SiblingNames::disambiguate(&once, '_', &mut tokens);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unique_even_against_lookalike_names() {
        let mut tokens = TokenGenerator::new();
        let out = SiblingNames::disambiguate(&strings(&["b", "b_1", "b"]), '_', &mut tokens);
        let unique: HashSet<_> = out.iter().collect();
        assert_eq!(unique.len(), out.len());
    }

    #[test]
    fn test_suffix_never_forms_namespace_record() {
        let mut tokens = TokenGenerator::new();
        let out = SiblingNames::disambiguate(
            &strings(&["namespace", "namespace", "namespace"]),
            '_',
            &mut tokens,
        );
        assert_eq!(out, strings(&["namespace", "namespace_1_2", "namespace_3_4"]));
        assert!(out.iter().all(|n| !is_namespace_record_name(n)));
        assert!(out.iter().all(|n| strip_suffix(n, '_') == "namespace"));

        let again = SiblingNames::disambiguate(&out, '_', &mut tokens);
        assert_eq!(again, out);
    }

    #[test]
    fn test_reserve_blocks_name() {
        let mut tokens = TokenGenerator::new();
        let mut siblings = SiblingNames::new('#');
        siblings.reserve("@x");
        assert!(siblings.contains("@x"));
        assert_eq!(siblings.assign("@x", &mut tokens), "@x#1");
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_suffix("b_17", '_'), "b");
        assert_eq!(strip_suffix("b", '_'), "b");
        assert_eq!(strip_suffix("gmd:CI_Date#4", '#'), "gmd:CI_Date");
        // A separator inside the original tag is indistinguishable from a suffix.
        assert_eq!(strip_suffix("gmd:CI_Date", '_'), "gmd:CI");
    }
}
