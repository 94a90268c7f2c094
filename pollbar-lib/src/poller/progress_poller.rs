use super::{DisplaySink, FailureAction, FailurePolicy, FailureResponse, PollState, ProgressReport, ProgressSource};
use core::time::Duration;

/// Fixed delay between a handled report and the next query.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// What to do after a report has been applied to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Query again once the delay has elapsed.
    Rearm(Duration),

    /// Polling is over.
    Finish,
}

/// How a call to [`ProgressPoller::start`] ended.
#[derive(Debug)]
pub enum PollOutcome {
    /// A complete report was seen and the success panel is showing.
    Completed { queries: u64 },

    /// A query failed and the failure policy chose not to go on.
    ///
    /// The poller is still in [`PollState::Polling`]; the display keeps the last report it was given.
    Stalled { queries: u64, error: ohno::AppError },
}

impl PollOutcome {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Total number of queries issued by the poller.
    #[must_use]
    pub const fn queries(&self) -> u64 {
        match self {
            Self::Completed { queries } | Self::Stalled { queries, .. } => *queries,
        }
    }
}

/// Polls a [`ProgressSource`] and mirrors each report onto a [`DisplaySink`] until the task completes.
///
/// Queries never overlap: the next one is only issued after the previous
/// response was fully handled and the poll interval has elapsed.
#[derive(Debug)]
pub struct ProgressPoller<S> {
    source: S,
    interval: Duration,
    failure_policy: FailurePolicy,
    state: PollState,
    queries: u64,
}

impl<S: ProgressSource> ProgressPoller<S> {
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            interval: DEFAULT_POLL_INTERVAL,
            failure_policy: FailurePolicy::stall(),
            state: PollState::Polling,
            queries: 0,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    #[must_use]
    pub const fn state(&self) -> PollState {
        self.state
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Show the progress container and poll until a complete report arrives or a failure stalls the loop.
    pub async fn start<D: DisplaySink>(&mut self, display: &mut D) -> PollOutcome {
        if self.state == PollState::Done {
            return PollOutcome::Completed { queries: self.queries };
        }

        display.set_container_visible(true);

        let mut consecutive_failures = 0;
        loop {
            self.queries += 1;
            log::debug!("issuing progress query #{}", self.queries);

            let delay = match self.source.fetch().await {
                Ok(report) => {
                    consecutive_failures = 0;
                    match self.handle_report(&report, display) {
                        Step::Rearm(delay) => delay,
                        Step::Finish => {
                            log::info!("task completed after {} progress queries", self.queries);
                            return PollOutcome::Completed { queries: self.queries };
                        }
                    }
                }

                Err(error) => {
                    consecutive_failures += 1;
                    match self.failure_policy.respond(consecutive_failures) {
                        FailureResponse::Retry => {
                            log::warn!(
                                "progress query failed (attempt {consecutive_failures} of {}), retrying in {}ms: {error:#}",
                                self.failure_policy.max_retries,
                                self.interval.as_millis(),
                            );
                            self.interval
                        }
                        FailureResponse::Stall => {
                            self.log_stall(consecutive_failures, &error);
                            return PollOutcome::Stalled {
                                queries: self.queries,
                                error,
                            };
                        }
                    }
                }
            };

            tokio::time::sleep(delay).await;
        }
    }

    /// Apply one report to the display and advance the state machine.
    ///
    /// This is the whole per-report transition; [`start`](Self::start) just
    /// drives it with a fetch and a timer. Once the poller is done, further
    /// reports are ignored.
    pub fn handle_report<D: DisplaySink>(&mut self, report: &ProgressReport, display: &mut D) -> Step {
        if self.state == PollState::Done {
            return Step::Finish;
        }

        log::debug!("progress is at {report}");
        display.set_bar_percent(report.progress);
        display.set_label_text(&report.label());

        if report.is_complete() {
            display.set_success_visible(true);
            display.set_container_visible(false);
            self.state = PollState::Done;
            Step::Finish
        } else {
            Step::Rearm(self.interval)
        }
    }

    fn log_stall(&self, consecutive_failures: u32, error: &ohno::AppError) {
        match self.failure_policy.action {
            FailureAction::Stall => log::debug!("progress query failed, polling stopped: {error:#}"),
            FailureAction::Log => log::warn!("progress query failed, polling stopped: {error:#}"),
            FailureAction::Retry => log::error!("giving up after {consecutive_failures} consecutive failed progress queries: {error:#}"),
        }
    }
}
