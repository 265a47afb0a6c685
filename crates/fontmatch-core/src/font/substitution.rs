//! Family name substitutions

use std::collections::BTreeMap;

use crate::constants::DEFAULT_SUBSTITUTIONS;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Substitution {
    /// Family as most recently inserted, for listing
    family: String,
    replacement: String,
}

/// Case-insensitive map from a family name to the family used in its place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: BTreeMap<String, Substitution>,
}

impl SubstitutionTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with the usual platform aliases
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.extend(DEFAULT_SUBSTITUTIONS.iter().copied());
        table
    }

    /// Replacement for `family`, or `family` itself when there is none
    pub fn substitute(&self, family: &str) -> String {
        match self.entries.get(&family.to_ascii_lowercase()) {
            Some(entry) => entry.replacement.clone(),
            None => family.to_string(),
        }
    }

    pub fn insert(&mut self, family: &str, replacement: &str) {
        self.entries.insert(
            family.to_ascii_lowercase(),
            Substitution {
                family: family.to_string(),
                replacement: replacement.to_string(),
            },
        );
    }

    /// Returns whether an entry was removed
    pub fn remove(&mut self, family: &str) -> bool {
        self.entries.remove(&family.to_ascii_lowercase()).is_some()
    }

    /// Families that have a substitution, sorted case-insensitively
    pub fn list(&self) -> Vec<String> {
        self.entries.values().map(|entry| entry.family.clone()).collect()
    }

    /// `(family, replacement)` pairs in listing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|entry| (entry.family.as_str(), entry.replacement.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F: AsRef<str>, R: AsRef<str>> Extend<(F, R)> for SubstitutionTable {
    fn extend<I: IntoIterator<Item = (F, R)>>(&mut self, iter: I) {
        for (family, replacement) in iter {
            self.insert(family.as_ref(), replacement.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_ignores_case() {
        let mut table = SubstitutionTable::new();
        table.insert("NewYork", "London");
        assert_eq!(table.substitute("NEWYORK"), "London");
        assert_eq!(table.substitute("newyork"), "London");
        assert_eq!(table.substitute("NewYork"), "London");
    }

    #[test]
    fn test_missing_family_returned_unchanged() {
        let table = SubstitutionTable::new();
        assert_eq!(table.substitute("Nairobi"), "Nairobi");
        assert!(table.is_empty());
    }

    #[test]
    fn test_remove_any_case() {
        let mut table = SubstitutionTable::new();
        table.insert("NewYork", "London");
        assert!(table.remove("NEWYORK"));
        assert_eq!(table.substitute("newyork"), "newyork");
        assert!(!table.remove("newyork"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut table = SubstitutionTable::new();
        table.insert("Geneva", "helvetica");
        table.insert("GENEVA", "lucida");
        assert_eq!(table.len(), 1);
        assert_eq!(table.substitute("geneva"), "lucida");
        assert_eq!(table.list(), vec!["GENEVA".to_string()]);
    }

    #[test]
    fn test_only_ascii_letters_fold() {
        let mut table = SubstitutionTable::new();
        table.insert("Ärial", "helvetica");
        assert_eq!(table.substitute("äRIAL"), "äRIAL");
        assert_eq!(table.substitute("ÄRIAL"), "helvetica");
    }

    #[test]
    fn test_list_sorted_case_insensitively() {
        let mut table = SubstitutionTable::new();
        table.insert("zapf", "times");
        table.insert("Avant Garde", "helvetica");
        table.insert("bookman", "times");
        assert_eq!(table.list(), vec!["Avant Garde", "bookman", "zapf"]);
    }

    #[test]
    fn test_defaults() {
        let table = SubstitutionTable::with_defaults();
        assert_eq!(table.substitute("Arial"), "helvetica");
        assert_eq!(table.substitute("Times New Roman"), "times");
        assert_eq!(table.substitute("courier new"), "courier");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_extend_from_owned_pairs() {
        let mut table = SubstitutionTable::new();
        table.extend(vec![("New York".to_string(), "times".to_string())]);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("New York", "times")]);
    }
}
