use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::variant::SiteVariant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub description: String,
    pub price_cents: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyMenu {
    /// Always a Monday.
    pub week_of: NaiveDate,
    pub dishes: Vec<Dish>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub quote: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub location: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCopy {
    pub variant: SiteVariant,
    pub page: String,
    pub headline: String,
    pub paragraphs: Vec<String>,
}
