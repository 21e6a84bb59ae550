use programata_models::WatchInfo;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::SourceError;

const TMDB_API_URL: &str = "https://api.themoviedb.org/3";

/// Best-effort TMDB watch-provider lookups, cached per movie id.
///
/// Every failure path collapses to `None`: enrichment must never block an
/// annotation. The cache is behind a tokio Mutex so a shared client can serve
/// concurrent per-channel fetches; duplicate fetches are idempotent, so
/// last-write-wins is fine.
pub struct WatchProviderClient {
    client: reqwest::Client,
    api_key: String,
    region: String,
    cache: Mutex<HashMap<String, Option<WatchInfo>>>,
}

impl WatchProviderClient {
    pub fn new(api_key: String, region: String) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_key,
            region,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Look up watch providers for a TMDB movie id in the configured region.
    pub async fn watch_info(&self, tmdb_id: &str) -> Option<WatchInfo> {
        {
            let cache = self.cache.lock().await;
            if let Some(cached) = cache.get(tmdb_id) {
                return cached.clone();
            }
        }

        let info = match self.fetch(tmdb_id).await {
            Ok(info) => info,
            Err(e) => {
                debug!("Watch-provider lookup failed for tmdb_id={}: {}", tmdb_id, e);
                None
            }
        };

        self.cache.lock().await.insert(tmdb_id.to_string(), info.clone());
        info
    }

    async fn fetch(&self, tmdb_id: &str) -> Result<Option<WatchInfo>, SourceError> {
        let url = format!("{}/movie/{}/watch/providers", TMDB_API_URL, tmdb_id);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { url, status });
        }

        let payload: Value = response.json().await?;
        let region_info = payload
            .get("results")
            .and_then(|results| results.get(&self.region));

        Ok(region_info.and_then(|info| region_watch_info(&self.region, info)))
    }
}

fn region_watch_info(region: &str, info: &Value) -> Option<WatchInfo> {
    let map = info.as_object()?;
    let link = map
        .get("link")
        .and_then(Value::as_str)
        .map(|s| s.to_string());
    let offers: HashMap<String, Value> = map
        .iter()
        .filter(|(key, _)| key.as_str() != "link")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Some(WatchInfo {
        region: region.to_string(),
        link,
        offers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_region_watch_info_splits_link_and_offers() {
        let info = json!({
            "link": "https://www.themoviedb.org/movie/578/watch?locale=BG",
            "flatrate": [{"provider_name": "HBO Max"}],
            "rent": [{"provider_name": "Apple TV"}],
        });
        let watch = region_watch_info("BG", &info).unwrap();
        assert_eq!(watch.region, "BG");
        assert!(watch.link.as_deref().unwrap().contains("578"));
        assert_eq!(watch.offers.len(), 2);
        assert!(watch.offers.contains_key("flatrate"));
    }

    #[test]
    fn test_region_watch_info_rejects_non_object() {
        assert!(region_watch_info("BG", &Value::Null).is_none());
    }
}
