//! # Coverage Table
//!
//! Static description of where we deliver.
//!
//! ## Contents
//! - City/region fragments: lowercase, matched as substrings of the normalized input.
//!   `sf` is the exception and only matches as a whole word, otherwise it would fire inside
//!   words like `sfo` or `transfer`.
//! - Postal prefixes: first three digits of a ZIP code, matched anywhere in the input.
//!
//! ## Rules
//! - Built once, never mutated afterwards
//! - No empty entries
//! - No duplicate fragments once lowercased
use std::{collections::BTreeSet, sync::LazyLock};

use thiserror::Error;

/// Fragment that is matched on word boundaries instead of as a substring.
pub const WORD_FRAGMENT: &str = "sf";

const BAY_AREA_CITIES: &[&str] = &[
    "san francisco",
    "sf",
    "bay area",
    "oakland",
    "berkeley",
    "alameda",
    "emeryville",
    "richmond",
    "walnut creek",
    "hayward",
    "fremont",
    "san leandro",
    "daly city",
    "south san francisco",
    "san mateo",
    "burlingame",
    "redwood city",
    "menlo park",
    "palo alto",
    "mountain view",
    "sunnyvale",
    "santa clara",
    "san jose",
    "cupertino",
    "marin",
    "sausalito",
    "mill valley",
    "san rafael",
    "novato",
    "petaluma",
    "sonoma",
    "santa rosa",
    "napa",
];

const BAY_AREA_PREFIXES: &[&str] = &[
    "940", "941", "943", "944", "945", "946", "947", "948", "949", "950", "951", "954",
];

static BAY_AREA: LazyLock<CoverageTable> = LazyLock::new(|| CoverageTable {
    city_fragments: BAY_AREA_CITIES.iter().map(|c| c.to_string()).collect(),
    postal_prefixes: BAY_AREA_PREFIXES.iter().map(|p| p.to_string()).collect(),
});

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoverageError {
    #[error("Coverage entry is empty")]
    EmptyEntry,

    #[error("Duplicate city fragment: {0}")]
    DuplicateFragment(String),

    #[error("Postal prefix must be three digits: {0:?}")]
    InvalidPrefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageTable {
    city_fragments: Vec<String>,
    postal_prefixes: Vec<String>,
}

impl CoverageTable {
    pub fn new<C, P>(city_fragments: C, postal_prefixes: P) -> Result<Self, CoverageError>
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut fragments = Vec::new();

        for fragment in city_fragments {
            let fragment = fragment.as_ref().trim().to_ascii_lowercase();

            if fragment.is_empty() {
                return Err(CoverageError::EmptyEntry);
            }

            if !seen.insert(fragment.clone()) {
                return Err(CoverageError::DuplicateFragment(fragment));
            }

            fragments.push(fragment);
        }

        let mut prefixes = Vec::new();

        for prefix in postal_prefixes {
            let prefix = prefix.as_ref().trim();

            if prefix.is_empty() {
                return Err(CoverageError::EmptyEntry);
            }

            if prefix.len() != 3 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CoverageError::InvalidPrefix(prefix.to_string()));
            }

            if !prefixes.iter().any(|p| p == prefix) {
                prefixes.push(prefix.to_string());
            }
        }

        Ok(Self {
            city_fragments: fragments,
            postal_prefixes: prefixes,
        })
    }

    /// The San Francisco Bay Area service area we ship with.
    pub fn bay_area() -> &'static CoverageTable {
        &BAY_AREA
    }

    pub fn city_fragments(&self) -> &[String] {
        &self.city_fragments
    }

    pub fn postal_prefixes(&self) -> &[String] {
        &self.postal_prefixes
    }
}

#[cfg(test)]
mod tests {
    use super::{CoverageError, CoverageTable};

    #[test]
    fn test_bay_area_is_valid() {
        let table = CoverageTable::bay_area();
        let rebuilt =
            CoverageTable::new(table.city_fragments(), table.postal_prefixes()).unwrap();

        assert_eq!(&rebuilt, table);
        assert!(table.city_fragments().iter().any(|c| c == "sf"));
    }

    #[test]
    fn test_lowercases_fragments() {
        let table = CoverageTable::new(["  Oakland "], ["946"]).unwrap();
        assert_eq!(table.city_fragments(), ["oakland"]);
    }

    #[test]
    fn test_rejects_duplicates_after_lowercasing() {
        assert_eq!(
            CoverageTable::new(["Napa", "napa"], ["945"]),
            Err(CoverageError::DuplicateFragment("napa".to_string()))
        );
    }

    #[test]
    fn test_rejects_empty_entries() {
        assert_eq!(
            CoverageTable::new(["   "], ["945"]),
            Err(CoverageError::EmptyEntry)
        );
        assert_eq!(
            CoverageTable::new(["napa"], [""]),
            Err(CoverageError::EmptyEntry)
        );
    }

    #[test]
    fn test_rejects_bad_prefixes() {
        assert_eq!(
            CoverageTable::new(["napa"], ["94a"]),
            Err(CoverageError::InvalidPrefix("94a".to_string()))
        );
        assert_eq!(
            CoverageTable::new(["napa"], ["9410"]),
            Err(CoverageError::InvalidPrefix("9410".to_string()))
        );
    }
}
