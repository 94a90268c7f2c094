use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What the poller does when a query fails or returns a malformed report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailureAction {
    /// Stop polling without saying anything
    #[default]
    Stall,

    /// Stop polling and log the failure
    Log,

    /// Log the failure and try again after the normal poll interval
    Retry,
}

/// Decision taken for one failed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureResponse {
    Stall,
    Retry,
}

/// Failure handling for a [`ProgressPoller`](super::ProgressPoller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePolicy {
    pub action: FailureAction,

    /// Consecutive failures tolerated under [`FailureAction::Retry`].
    pub max_retries: u32,
}

impl FailurePolicy {
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    #[must_use]
    pub const fn stall() -> Self {
        Self {
            action: FailureAction::Stall,
            max_retries: 0,
        }
    }

    #[must_use]
    pub const fn retry(max_retries: u32) -> Self {
        Self {
            action: FailureAction::Retry,
            max_retries,
        }
    }

    /// Decide how to react after `consecutive_failures` failed queries in a row (counting the current one).
    #[must_use]
    pub const fn respond(&self, consecutive_failures: u32) -> FailureResponse {
        match self.action {
            FailureAction::Retry if consecutive_failures <= self.max_retries => FailureResponse::Retry,
            _ => FailureResponse::Stall,
        }
    }
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::stall()
    }
}
