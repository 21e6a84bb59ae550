//! Drives fetch -> parse -> annotate -> blacklist across all active channels
//! for one target day, assembling the per-day aggregate document.
//!
//! One channel failing to fetch or parse contributes zero programs and is
//! logged; the batch never aborts.

use chrono::{Days, NaiveDate, Utc};
use programata_models::{ActivePrograms, Channel, ChannelList, ChannelPrograms, FetchMetadata};
use programata_sources::SchedulePage;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use crate::annotate::Annotator;
use crate::blacklist::Blacklist;
use crate::parser::parse_programs;
use crate::storage::{Storage, StorageExt};

pub const DATE_PATH_YESTERDAY: &str = "Вчера";
pub const DATE_PATH_TOMORROW: &str = "Утре";

/// Map a relative-day path segment to the calendar date it names.
/// Unknown segments fall back to today.
pub fn resolve_target_date(date_path: &str, today: NaiveDate) -> NaiveDate {
    match date_path {
        DATE_PATH_YESTERDAY => today.checked_sub_days(Days::new(1)).unwrap_or(today),
        DATE_PATH_TOMORROW => today.checked_add_days(Days::new(1)).unwrap_or(today),
        _ => today,
    }
}

/// Active channels from the channels file; empty when the file is missing.
pub fn load_active_channels(storage: &dyn Storage, channels_path: &Path) -> Vec<Channel> {
    let list: ChannelList = match storage.read_json(channels_path) {
        Some(list) => list,
        None => {
            warn!("Channels file unavailable at {:?}", channels_path);
            return Vec::new();
        }
    };
    list.active()
}

pub struct ProgramFetcher {
    source: Box<dyn SchedulePage>,
    annotator: Annotator,
    blacklist: Blacklist,
}

impl ProgramFetcher {
    pub fn new(source: Box<dyn SchedulePage>, annotator: Annotator, blacklist: Blacklist) -> Self {
        Self {
            source,
            annotator,
            blacklist,
        }
    }

    /// Fetch and annotate one channel's day. Failures are logged and yield
    /// an empty program list.
    pub async fn fetch_channel(
        &self,
        channel: &Channel,
        date_path: &str,
        target_date: &str,
    ) -> Vec<programata_models::ProgramEntry> {
        let html = match self.source.fetch_day(&channel.id, date_path).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to fetch {} ({}): {}", channel.name, channel.id, e);
                return Vec::new();
            }
        };

        let mut programs = parse_programs(&html);
        if self.annotator.enabled() {
            for program in &mut programs {
                if let Some(annotation) = self.annotator.annotate(program).await {
                    if self
                        .blacklist
                        .is_excluded(&program.title, &channel.id, target_date, &program.time)
                    {
                        continue;
                    }
                    program.oscar = Some(annotation);
                }
            }
        }
        programs
    }

    /// Run the whole batch for one relative day. `progress` is invoked once
    /// per channel before it is fetched (index, channel).
    pub async fn fetch_all<F>(
        &self,
        channels: &[Channel],
        date_path: &str,
        today: NaiveDate,
        mut progress: F,
    ) -> ActivePrograms
    where
        F: FnMut(usize, &Channel),
    {
        let target_date = resolve_target_date(date_path, today).to_string();
        let mut result = ActivePrograms {
            metadata: FetchMetadata {
                timestamp: Utc::now(),
                date: date_path.to_string(),
                target_date: target_date.clone(),
                total_channels: channels.len(),
                channels_with_programs: 0,
            },
            programs: BTreeMap::new(),
        };

        info!(
            "Fetching programs for {} active channels ({} -> {})",
            channels.len(),
            date_path,
            target_date
        );

        for (idx, channel) in channels.iter().enumerate() {
            progress(idx, channel);
            let programs = self.fetch_channel(channel, date_path, &target_date).await;
            if programs.is_empty() {
                info!("{}: no programs", channel.name);
                continue;
            }
            info!("{}: {} programs", channel.name, programs.len());
            result.metadata.channels_with_programs += 1;
            result.programs.insert(
                channel.id.clone(),
                ChannelPrograms {
                    channel: channel.into(),
                    count: programs.len(),
                    programs,
                },
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use programata_models::{MovieCatalog, OscarsFile};
    use programata_sources::{SourceError, DATE_PATH_TODAY};
    use serde_json::json;
    use std::collections::HashMap;

    /// Canned pages per channel id; unknown channels fail like the network would.
    struct FixturePages {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl SchedulePage for FixturePages {
        async fn fetch_day(
            &self,
            channel_id: &str,
            _date_path: &str,
        ) -> Result<String, SourceError> {
            self.pages.get(channel_id).cloned().ok_or(SourceError::Status {
                url: format!("fixture://{}", channel_id),
                status: reqwest::StatusCode::NOT_FOUND,
            })
        }
    }

    fn channel(id: &str) -> Channel {
        Channel {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: String::new(),
            active: true,
        }
    }

    fn annotator() -> Annotator {
        let movies: MovieCatalog = serde_json::from_value(json!({
            "m1": {"title": "Casablanca", "title_bg": "Касабланка", "year": "1942"},
        }))
        .unwrap();
        let oscars: OscarsFile = serde_json::from_value(json!({
            "1943": {"Best Picture": {"winner": {"id": "m1"}, "nominees": [{"id": "m1"}]}}
        }))
        .unwrap();
        Annotator::new(crate::index::OscarIndex::build(movies, &oscars), None)
    }

    fn movie_row() -> String {
        "<tr><td>20:00</td><td><a href=\"/predavane/k\">\
         <strong>Касабланка</strong>, 1942, драма</a></td></tr>"
            .to_string()
    }

    #[test]
    fn test_resolve_target_date() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        assert_eq!(
            resolve_target_date(DATE_PATH_YESTERDAY, today).to_string(),
            "2026-08-25"
        );
        assert_eq!(resolve_target_date(DATE_PATH_TODAY, today), today);
        assert_eq!(
            resolve_target_date(DATE_PATH_TOMORROW, today).to_string(),
            "2026-08-27"
        );
        assert_eq!(resolve_target_date("нещо друго", today), today);
    }

    #[tokio::test]
    async fn test_batch_survives_failing_channel() {
        let fetcher = ProgramFetcher::new(
            Box::new(FixturePages {
                pages: HashMap::from([("bnt".to_string(), movie_row())]),
            }),
            annotator(),
            Blacklist::default(),
        );
        let channels = vec![channel("bnt"), channel("broken")];
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();

        let result = fetcher
            .fetch_all(&channels, DATE_PATH_TODAY, today, |_, _| {})
            .await;

        assert_eq!(result.metadata.total_channels, 2);
        assert_eq!(result.metadata.channels_with_programs, 1);
        assert!(result.programs.contains_key("bnt"));
        assert!(!result.programs.contains_key("broken"));
    }

    #[tokio::test]
    async fn test_programs_are_annotated() {
        let fetcher = ProgramFetcher::new(
            Box::new(FixturePages {
                pages: HashMap::from([("bnt".to_string(), movie_row())]),
            }),
            annotator(),
            Blacklist::default(),
        );
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let result = fetcher
            .fetch_all(&[channel("bnt")], DATE_PATH_TODAY, today, |_, _| {})
            .await;

        let bnt = &result.programs["bnt"];
        assert_eq!(bnt.count, 1);
        let oscar = bnt.programs[0].oscar.as_ref().unwrap();
        assert_eq!(oscar.winner, 1);
    }

    #[tokio::test]
    async fn test_blacklisted_program_not_annotated() {
        let mut blacklist = Blacklist::default();
        blacklist.add(programata_models::ExclusionEntry {
            title: "Касабланка".to_string(),
            scope: programata_models::ExclusionScope::All,
            channel_id: None,
            date: None,
            time: None,
            description: None,
        });
        let fetcher = ProgramFetcher::new(
            Box::new(FixturePages {
                pages: HashMap::from([("bnt".to_string(), movie_row())]),
            }),
            annotator(),
            blacklist,
        );
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let result = fetcher
            .fetch_all(&[channel("bnt")], DATE_PATH_TODAY, today, |_, _| {})
            .await;

        // The program is still listed, just without the annotation.
        let bnt = &result.programs["bnt"];
        assert_eq!(bnt.count, 1);
        assert!(bnt.programs[0].oscar.is_none());
    }

    #[tokio::test]
    async fn test_disabled_annotator_still_fetches() {
        let fetcher = ProgramFetcher::new(
            Box::new(FixturePages {
                pages: HashMap::from([("bnt".to_string(), movie_row())]),
            }),
            Annotator::disabled(),
            Blacklist::default(),
        );
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let result = fetcher
            .fetch_all(&[channel("bnt")], DATE_PATH_TODAY, today, |_, _| {})
            .await;

        let bnt = &result.programs["bnt"];
        assert_eq!(bnt.count, 1);
        assert!(bnt.programs[0].oscar.is_none());
    }

    #[test]
    fn test_load_active_channels_missing_file_is_empty() {
        let storage = crate::storage::LocalStorage;
        assert!(load_active_channels(&storage, Path::new("/nonexistent/channels.json")).is_empty());
    }
}
