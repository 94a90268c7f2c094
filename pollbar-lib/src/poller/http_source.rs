//! HTTP progress source
//!
//! Fetches progress reports with a plain `GET` against a single JSON endpoint.

use super::{ProgressReport, ProgressSource};
use crate::Result;
use core::time::Duration;
use ohno::IntoAppError;
use url::Url;

/// Progress source backed by a `GET` request to a fixed URL.
#[derive(Debug, Clone)]
pub struct HttpProgressSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpProgressSource {
    /// Create a source for `url`, failing any single request that takes longer than `request_timeout`.
    pub fn new(url: &str, request_timeout: Duration) -> Result<Self> {
        let url = Url::parse(url).into_app_err_with(|| format!("parsing progress URL '{url}'"))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("pollbar/", env!("CARGO_PKG_VERSION")))
            .timeout(request_timeout)
            .build()?;

        Ok(Self { client, url })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl ProgressSource for HttpProgressSource {
    async fn fetch(&self) -> Result<ProgressReport> {
        log::debug!("GET {}", self.url);

        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .into_app_err_with(|| format!("requesting progress from {}", self.url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ohno::app_err!("progress endpoint {} returned HTTP {status}", self.url));
        }

        let body = resp
            .bytes()
            .await
            .into_app_err_with(|| format!("reading progress response from {}", self.url))?;

        let report = ProgressReport::from_json(&body)?;
        log::trace!("received {report} from {}", self.url);
        Ok(report)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_relative_url() {
        assert!(HttpProgressSource::new("/progress", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_new_keeps_url() {
        let source = HttpProgressSource::new("http://127.0.0.1:5000/progress", Duration::from_secs(1)).unwrap();
        assert_eq!(source.url().as_str(), "http://127.0.0.1:5000/progress");
    }
}
