//! # Navigation
//!
//! Every place the command palette (and the header) can send a visitor.
//! Adding a page means adding a variant here, and the compiler points at every table that needs a row.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Home,
    About,
    Chef,
    Menu,
    WeeklyMenu,
    Signup,
    Login,
    Admin,
    Checkout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    House,
    Info,
    ChefHat,
    Utensils,
    Calendar,
    UserPlus,
    LogIn,
    Shield,
    Wallet,
}

/// What the frontend needs to render one palette row.
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub destination: Destination,
    pub label: &'static str,
    pub path: &'static str,
    pub icon: Icon,
    pub requires_auth: bool,
}

impl Destination {
    pub const ALL: [Destination; 9] = [
        Destination::Home,
        Destination::About,
        Destination::Chef,
        Destination::Menu,
        Destination::WeeklyMenu,
        Destination::Signup,
        Destination::Login,
        Destination::Admin,
        Destination::Checkout,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Destination::Home => "/",
            Destination::About => "/about",
            Destination::Chef => "/chef",
            Destination::Menu => "/menu",
            Destination::WeeklyMenu => "/menu/weekly",
            Destination::Signup => "/signup",
            Destination::Login => "/login",
            Destination::Admin => "/admin",
            Destination::Checkout => "/checkout",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Destination::Home => "Home",
            Destination::About => "About Us",
            Destination::Chef => "Meet the Chef",
            Destination::Menu => "Menu",
            Destination::WeeklyMenu => "Weekly Menus",
            Destination::Signup => "Sign Up",
            Destination::Login => "Log In",
            Destination::Admin => "Admin",
            Destination::Checkout => "Checkout",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            Destination::Home => Icon::House,
            Destination::About => Icon::Info,
            Destination::Chef => Icon::ChefHat,
            Destination::Menu => Icon::Utensils,
            Destination::WeeklyMenu => Icon::Calendar,
            Destination::Signup => Icon::UserPlus,
            Destination::Login => Icon::LogIn,
            Destination::Admin => Icon::Shield,
            Destination::Checkout => Icon::Wallet,
        }
    }

    pub fn requires_auth(self) -> bool {
        match self {
            Destination::Admin | Destination::Checkout => true,
            Destination::Home
            | Destination::About
            | Destination::Chef
            | Destination::Menu
            | Destination::WeeklyMenu
            | Destination::Signup
            | Destination::Login => false,
        }
    }

    /// Marketing pages with bundled copy.
    pub fn page_key(self) -> Option<&'static str> {
        match self {
            Destination::Home => Some("home"),
            Destination::About => Some("about"),
            Destination::Chef => Some("chef"),
            Destination::Menu => Some("menu"),
            Destination::WeeklyMenu
            | Destination::Signup
            | Destination::Login
            | Destination::Admin
            | Destination::Checkout => None,
        }
    }

    pub fn from_page_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.page_key() == Some(key))
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        Self::ALL.into_iter().find(|d| d.path() == path)
    }

    pub fn item(self) -> NavItem {
        NavItem {
            destination: self,
            label: self.label(),
            path: self.path(),
            icon: self.icon(),
            requires_auth: self.requires_auth(),
        }
    }
}

/// Command palette filtering. Label prefix matches come first, then anything containing the query.
pub fn palette(query: &str) -> Vec<NavItem> {
    let query = query.trim().to_ascii_lowercase();

    if query.is_empty() {
        return Destination::ALL.into_iter().map(Destination::item).collect();
    }

    let mut prefixed = Vec::new();
    let mut contained = Vec::new();

    for destination in Destination::ALL {
        let label = destination.label().to_ascii_lowercase();

        if label.starts_with(&query) {
            prefixed.push(destination.item());
        } else if label.contains(&query) || destination.path().contains(&query) {
            contained.push(destination.item());
        }
    }

    prefixed.extend(contained);
    prefixed
}
