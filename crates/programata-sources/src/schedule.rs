use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::error::SourceError;

/// The BNT listing site (punycode for its Cyrillic domain).
pub const BASE_URL: &str = "https://www.xn----8sbafg9clhjcp.bg";

/// Relative-day path segment for today. The site serves today's schedule at
/// the bare channel URL, so this segment is never appended.
pub const DATE_PATH_TODAY: &str = "Днес";

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Page-fetch collaborator for the orchestrator. Implemented by
/// [`ScheduleClient`] against the live site and by fixtures in tests.
#[async_trait]
pub trait SchedulePage: Send + Sync {
    /// Fetch the raw schedule HTML for one channel and relative day.
    async fn fetch_day(&self, channel_id: &str, date_path: &str) -> Result<String, SourceError>;
}

/// HTTP client for the listing site.
pub struct ScheduleClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScheduleClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn day_url(&self, channel_id: &str, date_path: &str) -> String {
        if date_path == DATE_PATH_TODAY {
            format!("{}/tv/{}", self.base_url, channel_id)
        } else {
            format!("{}/tv/{}/{}/", self.base_url, channel_id, date_path)
        }
    }
}

#[async_trait]
impl SchedulePage for ScheduleClient {
    async fn fetch_day(&self, channel_id: &str, date_path: &str) -> Result<String, SourceError> {
        let url = self.day_url(channel_id, date_path);
        debug!("Fetching schedule page: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { url, status });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_url_omits_date_segment() {
        let client = ScheduleClient::new("https://example.org", 10).unwrap();
        assert_eq!(
            client.day_url("bnt", DATE_PATH_TODAY),
            "https://example.org/tv/bnt"
        );
    }

    #[test]
    fn test_relative_day_url_appends_segment() {
        let client = ScheduleClient::new("https://example.org", 10).unwrap();
        assert_eq!(
            client.day_url("bnt2", "Вчера"),
            "https://example.org/tv/bnt2/Вчера/"
        );
    }
}
