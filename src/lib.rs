//! # Hearth Documentation
//!
//! Marketing and ordering site for a small meal-delivery kitchen in the Bay Area.
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
//!
//!
//!
//! # General Infrastructure
//! - Static frontend talks to one JSON backend (`backend/server`)
//! - Auth and the testimonial/order tables live in a hosted backend-as-a-service
//! - Payments never touch our servers: the browser wallet signs and submits, we record the hash
//! - Menus, reviews, suppliers and page copy are bundled into the binary (`backend/catalog`)
//!
//!
//!
//! # Crates
//! - `backend/coverage`: delivery area check
//! - `backend/catalog`: static content, menu weeks, navigation, SEO metadata, site variants
//! - `backend/server`: axum routes
//! - `backend/process`: catalog audit CLI
//! - `backend/tester`: smoke test against a running server
//!
//!
//!
//! # Site Variants
//! One deployment serves one variant, `delivery` or `catering`. Picked once at startup from
//! `SITE_VARIANT`, or from `SITE_HOST` when the variable is unset, then handed to every route
//! through the shared state. Nothing reads the hostname per request.
//!
//!
//!
//! # Notes
//!
//! ## Delivery check
//! The check answers after a fixed delay so the widget feels like it looked something up.
//! There is no geocoding behind it, just the coverage table. See [`user`] for the widget flow.
//!
//! ## 10/17/26
//! - 4 weeks of menus bundled, week of Oct 26 still missing
//! - Run the audit before each deploy
//!
//!
//!
//! # Just
//!
//! Example workflow
//! ```sh
//! just audit
//! just deploy
//! just smoke
//! ```
pub mod user;
