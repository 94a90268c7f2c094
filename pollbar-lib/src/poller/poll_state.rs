/// Lifecycle of a [`ProgressPoller`](super::ProgressPoller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Waiting on a query, or on the delay before the next one.
    Polling,

    /// A complete report was seen. Terminal.
    Done,
}
