use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which flavour of the site is being served. Resolved once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteVariant {
    #[default]
    Delivery,
    Catering,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown site variant {0:?}")]
pub struct UnknownVariant(pub String);

impl SiteVariant {
    pub const ALL: [SiteVariant; 2] = [SiteVariant::Delivery, SiteVariant::Catering];

    /// An explicit setting wins, otherwise the hostname decides.
    pub fn resolve(explicit: Option<&str>, host: Option<&str>) -> Result<Self, UnknownVariant> {
        if let Some(value) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
            return value.parse();
        }

        let is_catering = host.is_some_and(|h| h.to_ascii_lowercase().contains("catering"));

        Ok(if is_catering {
            SiteVariant::Catering
        } else {
            SiteVariant::Delivery
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SiteVariant::Delivery => "delivery",
            SiteVariant::Catering => "catering",
        }
    }

    pub fn brand(self) -> &'static str {
        match self {
            SiteVariant::Delivery => "Hearth Kitchen",
            SiteVariant::Catering => "Hearth Catering",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            SiteVariant::Delivery => "Chef-made dinners delivered weekly across the Bay Area",
            SiteVariant::Catering => "Seasonal menus for private dinners and events",
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            SiteVariant::Delivery => "https://hearthkitchen.co",
            SiteVariant::Catering => "https://catering.hearthkitchen.co",
        }
    }
}

impl FromStr for SiteVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delivery" => Ok(SiteVariant::Delivery),
            "catering" => Ok(SiteVariant::Catering),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for SiteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
