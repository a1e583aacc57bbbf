//! # Delivery Check
//!
//! Drives the "do you deliver to me?" widget.
//!
//! ```text
//! idle --submit--> checking --delay--> yes | no
//! yes | no --input changes--> idle
//! ```
//!
//! - Blank input never leaves `idle`
//! - Submitting while `checking` is refused, so only one check is ever in flight
//! - The delay only simulates a lookup, the classification itself cannot fail
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::matcher::{Matcher, normalize};

pub const SIMULATED_LATENCY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    #[default]
    Idle,
    Checking,
    Yes,
    No,
    /// Styled by the frontend but never produced by the matcher.
    Maybe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Pending,
    Affirmative,
    Negative,
    Amber,
}

impl CheckStatus {
    pub fn message(self) -> &'static str {
        match self {
            CheckStatus::Idle => "",
            CheckStatus::Checking => "Checking your area...",
            CheckStatus::Yes => "Great news! We deliver throughout the Bay Area, including your address.",
            CheckStatus::No => "Sorry, we don't deliver to your area yet.",
            CheckStatus::Maybe => "We're coming to your area soon!",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            CheckStatus::Idle => Tone::Neutral,
            CheckStatus::Checking => Tone::Pending,
            CheckStatus::Yes => Tone::Affirmative,
            CheckStatus::No => Tone::Negative,
            CheckStatus::Maybe => Tone::Amber,
        }
    }

    pub fn is_settled(self) -> bool {
        matches!(self, CheckStatus::Yes | CheckStatus::No | CheckStatus::Maybe)
    }
}

/// Presentation only, does not change classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Compact,
    #[default]
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
}

impl From<CheckStatus> for CheckResult {
    fn from(status: CheckStatus) -> Self {
        Self {
            status,
            message: status.message().to_string(),
        }
    }
}

/// Handed out by [`DeliveryCheck::submit`] and consumed when the delay elapses.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingCheck {
    normalized: String,
}

impl PendingCheck {
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

#[derive(Debug, Default)]
pub struct DeliveryCheck {
    input: String,
    status: CheckStatus,
}

impl DeliveryCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> CheckStatus {
        self.status
    }

    pub fn result(&self) -> CheckResult {
        self.status.into()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        let text = text.into();

        if text != self.input && self.status.is_settled() {
            self.status = CheckStatus::Idle;
        }

        self.input = text;
    }

    pub fn can_submit(&self) -> bool {
        self.status != CheckStatus::Checking && !self.input.trim().is_empty()
    }

    pub fn submit(&mut self) -> Option<PendingCheck> {
        if !self.can_submit() {
            return None;
        }

        self.status = CheckStatus::Checking;

        Some(PendingCheck {
            normalized: normalize(&self.input),
        })
    }

    /// Settles a check started by [`submit`](Self::submit). Outside `checking` the state
    /// is left as is.
    pub fn resolve(&mut self, pending: PendingCheck, matcher: &Matcher<'_>) -> CheckResult {
        if self.status != CheckStatus::Checking {
            return self.result();
        }

        self.status = if matcher.is_covered(&pending.normalized) {
            CheckStatus::Yes
        } else {
            CheckStatus::No
        };

        self.result()
    }
}
