//! # Catalog
//!
//! Static content bundled into the binary: weekly menus, reviews, suppliers and page copy.
//!
//! ## Files
//! - `data/menus.json`: one entry per week, keyed by the Monday it starts on
//! - `data/reviews.json`: homepage testimonials, separate from the moderated submissions
//! - `data/suppliers.json`: farms and producers shown on the about page
//! - `data/pages.json`: headline/paragraph copy per site variant and marketing page
//!
//! ## Notes
//! - Loaded once at startup. Nothing here is written back.
//! - Menus are validated on load so the weekly navigation never has to deal with
//!   a week that starts on a Wednesday.
use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

pub mod content;
pub mod nav;
pub mod seo;
pub mod variant;
pub mod weeks;

use content::{PageCopy, Review, Supplier, WeeklyMenu};
use variant::SiteVariant;
use weeks::{MenuWeek, week_start};

const MENUS: &str = include_str!("../data/menus.json");
const REVIEWS: &str = include_str!("../data/reviews.json");
const SUPPLIERS: &str = include_str!("../data/suppliers.json");
const PAGES: &str = include_str!("../data/pages.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed {file}: {source}")]
    Malformed {
        file: &'static str,
        source: serde_json::Error,
    },

    #[error("Menu week {0} does not start on a Monday")]
    NotMonday(NaiveDate),

    #[error("Menu week {0} listed twice")]
    DuplicateWeek(NaiveDate),

    #[error("Menu week {0} has no dishes")]
    EmptyWeek(NaiveDate),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub menus: Vec<WeeklyMenu>,
    pub reviews: Vec<Review>,
    pub suppliers: Vec<Supplier>,
    pub pages: Vec<PageCopy>,
}

impl Catalog {
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(MENUS, REVIEWS, SUPPLIERS, PAGES)
    }

    pub fn from_json(
        menus: &str,
        reviews: &str,
        suppliers: &str,
        pages: &str,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            menus: parse("menus.json", menus)?,
            reviews: parse("reviews.json", reviews)?,
            suppliers: parse("suppliers.json", suppliers)?,
            pages: parse("pages.json", pages)?,
        };

        catalog.menus.sort_by_key(|menu| menu.week_of);
        validate_menus(&catalog.menus)?;

        Ok(catalog)
    }

    pub fn menu_for(&self, date: NaiveDate) -> Option<&WeeklyMenu> {
        let start = week_start(date);
        self.menus.iter().find(|menu| menu.week_of == start)
    }

    pub fn weeks(&self) -> Vec<MenuWeek> {
        self.menus
            .iter()
            .map(|menu| MenuWeek::containing(menu.week_of))
            .collect()
    }

    /// Closest published weeks before and after the week containing `date`.
    pub fn adjacent_weeks(&self, date: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let start = week_start(date);

        let previous = self
            .menus
            .iter()
            .rev()
            .map(|menu| menu.week_of)
            .find(|week| *week < start);

        let next = self
            .menus
            .iter()
            .map(|menu| menu.week_of)
            .find(|week| *week > start);

        (previous, next)
    }

    pub fn page(&self, variant: SiteVariant, key: &str) -> Option<&PageCopy> {
        self.pages
            .iter()
            .find(|copy| copy.variant == variant && copy.page == key)
    }
}

fn parse<T: serde::de::DeserializeOwned>(file: &'static str, raw: &str) -> Result<T, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Malformed { file, source })
}

fn validate_menus(menus: &[WeeklyMenu]) -> Result<(), CatalogError> {
    for (index, menu) in menus.iter().enumerate() {
        if menu.week_of.weekday() != Weekday::Mon {
            return Err(CatalogError::NotMonday(menu.week_of));
        }

        if menu.dishes.is_empty() {
            return Err(CatalogError::EmptyWeek(menu.week_of));
        }

        // sorted, so a duplicate is always the neighbour
        if index > 0 && menus[index - 1].week_of == menu.week_of {
            return Err(CatalogError::DuplicateWeek(menu.week_of));
        }
    }

    Ok(())
}
