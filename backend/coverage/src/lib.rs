//! # Delivery Coverage
//!
//! Decides whether a free-text address or postal code falls inside the service area.
//!
//! ## Pieces
//! - [`CoverageTable`]: city fragments and 3-digit postal prefixes
//! - [`normalize`]: trim + lowercase
//! - [`Matcher`]: postal prefix hit OR city fragment hit
//! - [`DeliveryCheck`]: the idle/checking/yes/no widget state
//!
//! ## Notes
//! - Postal prefixes match anywhere in the input by default. `941 Main St, Portland` is "covered".
//!   [`MatchMode::LeadingPostal`] tightens this to the first standalone 5-digit run.
//! - [`CheckStatus::Maybe`] exists for the amber "coming soon" styling. Nothing produces it yet.
pub mod check;
pub mod matcher;
pub mod table;

pub use check::{
    CheckResult, CheckStatus, DeliveryCheck, Layout, PendingCheck, SIMULATED_LATENCY, Tone,
};
pub use matcher::{MatchMode, Matcher, is_covered, normalize};
pub use table::{CoverageError, CoverageTable};
