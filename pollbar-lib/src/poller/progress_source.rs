use super::ProgressReport;
use crate::Result;

/// Somewhere progress reports can be fetched from.
///
/// Each call to [`fetch`](Self::fetch) is one query. The poller never has more
/// than one outstanding.
pub trait ProgressSource {
    fn fetch(&self) -> impl Future<Output = Result<ProgressReport>>;
}
