use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::table::{CoverageTable, WORD_FRAGMENT};

// Word edges are ASCII only: `é` next to `sf` still counts as a boundary.
static WORD_SF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z_])sf(?:$|[^0-9A-Za-z_])").expect("static pattern")
});

static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z_])([0-9]{5})(?:$|[^0-9A-Za-z_])").expect("static pattern")
});

/// How postal prefixes are compared against the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Prefix may appear anywhere in the input. A street number like `941 Main St` counts.
    #[default]
    Substring,
    /// Only the first standalone 5-digit run is treated as the postal code.
    LeadingPostal,
}

/// Trims and lowercases raw input. Coverage data is ASCII so no locale folding is needed.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    table: &'a CoverageTable,
    mode: MatchMode,
}

impl<'a> Matcher<'a> {
    pub fn new(table: &'a CoverageTable) -> Self {
        Self {
            table,
            mode: MatchMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn table(&self) -> &'a CoverageTable {
        self.table
    }

    /// Expects input that already went through [`normalize`].
    pub fn is_covered(&self, normalized: &str) -> bool {
        self.prefix_hit(normalized) || self.city_hit(normalized)
    }

    fn prefix_hit(&self, s: &str) -> bool {
        let prefixes = self.table.postal_prefixes();

        match self.mode {
            MatchMode::Substring => prefixes.iter().any(|p| s.contains(p.as_str())),
            MatchMode::LeadingPostal => POSTAL_CODE
                .captures(s)
                .and_then(|caps| caps.get(1))
                .is_some_and(|code| prefixes.iter().any(|p| code.as_str().starts_with(p.as_str()))),
        }
    }

    fn city_hit(&self, s: &str) -> bool {
        self.table.city_fragments().iter().any(|c| {
            if c == WORD_FRAGMENT {
                WORD_SF.is_match(s)
            } else {
                s.contains(c.as_str())
            }
        })
    }
}

/// Default-mode check against `table`.
pub fn is_covered(table: &CoverageTable, normalized: &str) -> bool {
    Matcher::new(table).is_covered(normalized)
}
