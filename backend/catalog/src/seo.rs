use serde::Serialize;

use crate::{nav::Destination, variant::SiteVariant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub indexable: bool,
}

pub fn page_meta(variant: SiteVariant, destination: Destination) -> PageMeta {
    let brand = variant.brand();

    let (title, description) = match destination {
        Destination::Home => (brand.to_string(), variant.tagline().to_string()),
        Destination::About => (
            format!("About | {brand}"),
            "Who we are, where we cook and the farms we buy from.".to_string(),
        ),
        Destination::Chef => (
            format!("Meet the Chef | {brand}"),
            "The chef behind every weekly menu.".to_string(),
        ),
        Destination::Menu => (
            format!("Menu | {brand}"),
            "This week's dishes, made from scratch with seasonal ingredients.".to_string(),
        ),
        Destination::WeeklyMenu => (
            format!("Weekly Menus | {brand}"),
            "Browse past and upcoming weekly menus.".to_string(),
        ),
        Destination::Signup => (
            format!("Sign Up | {brand}"),
            "Create an account to start ordering.".to_string(),
        ),
        Destination::Login => (
            format!("Log In | {brand}"),
            "Sign in to manage your orders.".to_string(),
        ),
        Destination::Admin => (format!("Admin | {brand}"), String::new()),
        Destination::Checkout => (
            format!("Checkout | {brand}"),
            "Pay for your order with a crypto wallet.".to_string(),
        ),
    };

    PageMeta {
        title,
        description,
        canonical_url: format!("{}{}", variant.base_url(), destination.path()),
        indexable: !destination.requires_auth(),
    }
}
