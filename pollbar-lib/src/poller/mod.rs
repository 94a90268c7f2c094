//! Progress polling for a single server-side task
//!
//! A [`ProgressPoller`] repeatedly asks a [`ProgressSource`] for the task's
//! current [`ProgressReport`] and mirrors it onto a [`DisplaySink`]: the bar
//! fill, a `"{progress}% completed"` label, and finally a success panel once
//! the reported value reaches 100.
//!
//! # Implementation Model
//!
//! The poller is a two-state machine ([`PollState::Polling`] and
//! [`PollState::Done`]). [`ProgressPoller::handle_report`] performs a single
//! transition; [`ProgressPoller::start`] drives it from an async loop of
//! fetch, handle, then sleep for a fixed interval. Exactly one query is ever
//! in flight.
//!
//! Failed or malformed queries are governed by a [`FailurePolicy`]. The
//! default stalls: no further query is issued and the display is left as-is.
//!
//! [`HttpProgressSource`] is the production source: a plain `GET` returning
//! `{"progress": <number>}`.

mod display_sink;
mod failure_policy;
mod http_source;
mod poll_state;
mod progress_poller;
mod progress_report;
mod progress_source;

pub use display_sink::DisplaySink;
pub use failure_policy::{FailureAction, FailurePolicy, FailureResponse};
pub use http_source::HttpProgressSource;
pub use poll_state::PollState;
pub use progress_poller::{DEFAULT_POLL_INTERVAL, PollOutcome, ProgressPoller, Step};
pub use progress_report::{COMPLETE_PERCENT, ProgressReport};
pub use progress_source::ProgressSource;
