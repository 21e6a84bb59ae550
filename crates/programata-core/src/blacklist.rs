//! User-managed exclusion list, applied as a post-filter after annotation.
//!
//! Entries match on normalized title plus the fields their scope demands, so
//! a one-off suppression ("this airing only") coexists with channel-wide and
//! global ones. The list is append-only; duplicates are collapsed on add.

use anyhow::Result;
use programata_models::{BlacklistDoc, ExclusionEntry, ExclusionScope};
use std::path::Path;
use tracing::info;

use crate::normalize::normalize_title;
use crate::storage::{Storage, StorageExt};

#[derive(Debug, Default)]
pub struct Blacklist {
    entries: Vec<ExclusionEntry>,
}

impl Blacklist {
    pub fn new(entries: Vec<ExclusionEntry>) -> Self {
        Self { entries }
    }

    /// Load from storage; a missing or corrupt document is an empty list.
    pub fn load(storage: &dyn Storage, path: &Path) -> Self {
        let doc: BlacklistDoc = storage.read_json(path).unwrap_or_default();
        if !doc.excluded.is_empty() {
            info!("Loaded {} exclusion entries", doc.excluded.len());
        }
        Self::new(doc.excluded)
    }

    pub fn save(&self, storage: &dyn Storage, path: &Path) -> Result<()> {
        let doc = BlacklistDoc {
            excluded: self.entries.clone(),
        };
        storage.write_json(path, &doc)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[ExclusionEntry] {
        &self.entries
    }

    /// Whether an airing of `title` on `channel_id` at `date`/`time` is
    /// suppressed by any entry.
    pub fn is_excluded(&self, title: &str, channel_id: &str, date: &str, time: &str) -> bool {
        let key = normalize_title(title);
        if key.is_empty() {
            return false;
        }
        self.entries.iter().any(|entry| {
            if normalize_title(&entry.title) != key {
                return false;
            }
            match entry.scope {
                ExclusionScope::All => true,
                ExclusionScope::Channel => entry.channel_id.as_deref() == Some(channel_id),
                ExclusionScope::Broadcast => {
                    entry.channel_id.as_deref() == Some(channel_id)
                        && entry.date.as_deref() == Some(date)
                        && entry.time.as_deref() == Some(time)
                }
            }
        })
    }

    /// Append an entry unless an equivalent one (same normalized title,
    /// scope, and scope fields) already exists. Returns whether it was added.
    pub fn add(&mut self, entry: ExclusionEntry) -> bool {
        let duplicate = self.entries.iter().any(|existing| {
            existing.scope == entry.scope
                && normalize_title(&existing.title) == normalize_title(&entry.title)
                && existing.channel_id == entry.channel_id
                && existing.date == entry.date
                && existing.time == entry.time
        });
        if duplicate {
            return false;
        }
        self.entries.push(entry);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, scope: ExclusionScope) -> ExclusionEntry {
        ExclusionEntry {
            title: title.to_string(),
            scope,
            channel_id: None,
            date: None,
            time: None,
            description: None,
        }
    }

    #[test]
    fn test_all_scope_matches_everywhere() {
        let list = Blacklist::new(vec![entry("Челюсти", ExclusionScope::All)]);
        assert!(list.is_excluded("Челюсти", "bnt", "2026-08-26", "20:00"));
        assert!(list.is_excluded("челюсти!", "bnt2", "2026-01-01", "09:00"));
        assert!(!list.is_excluded("Касабланка", "bnt", "2026-08-26", "20:00"));
    }

    #[test]
    fn test_channel_scope_requires_channel() {
        let mut excl = entry("Челюсти", ExclusionScope::Channel);
        excl.channel_id = Some("bnt".to_string());
        let list = Blacklist::new(vec![excl]);
        assert!(list.is_excluded("Челюсти", "bnt", "2026-08-26", "20:00"));
        assert!(!list.is_excluded("Челюсти", "bnt2", "2026-08-26", "20:00"));
    }

    #[test]
    fn test_broadcast_scope_requires_exact_airing() {
        let mut excl = entry("Челюсти", ExclusionScope::Broadcast);
        excl.channel_id = Some("bnt".to_string());
        excl.date = Some("2026-08-26".to_string());
        excl.time = Some("20:00".to_string());
        let list = Blacklist::new(vec![excl]);
        assert!(list.is_excluded("Челюсти", "bnt", "2026-08-26", "20:00"));
        assert!(!list.is_excluded("Челюсти", "bnt", "2026-08-26", "22:00"));
        assert!(!list.is_excluded("Челюсти", "bnt", "2026-08-27", "20:00"));
    }

    #[test]
    fn test_add_collapses_duplicates() {
        let mut list = Blacklist::default();
        assert!(list.add(entry("Челюсти", ExclusionScope::All)));
        assert!(!list.add(entry("челюсти...", ExclusionScope::All)));
        assert!(list.add(entry("Челюсти", ExclusionScope::Channel)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.json");
        let storage = crate::storage::LocalStorage;

        let mut list = Blacklist::default();
        list.add(entry("Челюсти", ExclusionScope::All));
        list.save(&storage, &path).unwrap();

        let back = Blacklist::load(&storage, &path);
        assert_eq!(back.len(), 1);
        assert!(back.is_excluded("Челюсти", "bnt", "2026-08-26", "20:00"));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let storage = crate::storage::LocalStorage;
        let list = Blacklist::load(&storage, Path::new("/nonexistent/blacklist.json"));
        assert!(list.is_empty());
    }
}
