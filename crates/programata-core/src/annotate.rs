//! Resolves parsed programs against the award index and produces annotations.

use programata_models::{OscarAnnotation, ProgramEntry};
use programata_sources::WatchProviderClient;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::index::OscarIndex;
use crate::normalize::{extract_year, normalize_title, strip_episode_suffix};

/// Annotator over an immutable [`OscarIndex`].
///
/// A missing index disables the component: every call returns `None` and
/// schedule fetching proceeds without award enrichment. Lookup misses are the
/// expected steady state for non-movie programs and are silent.
pub struct Annotator {
    index: Option<Arc<OscarIndex>>,
    watch: Option<Arc<WatchProviderClient>>,
}

impl Annotator {
    pub fn new(index: OscarIndex, watch: Option<WatchProviderClient>) -> Self {
        Self {
            index: Some(Arc::new(index)),
            watch: watch.map(Arc::new),
        }
    }

    /// An annotator that never matches, for running without award data.
    pub fn disabled() -> Self {
        warn!("Award annotation disabled; programs will be served without Oscar info");
        Self {
            index: None,
            watch: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.index.is_some()
    }

    /// Attempt to resolve a program to a single catalog movie.
    ///
    /// The year is mandatory: broadcast titles alone are too ambiguous
    /// against a large catalog. Zero or several candidates refuse to match.
    fn find_movie_id(&self, title: &str, text: &str) -> Option<&str> {
        let index = self.index.as_ref()?;
        let base_title = strip_episode_suffix(title);
        let key = normalize_title(&base_title);
        if key.is_empty() {
            return None;
        }
        let year = extract_year(text)?;
        index.resolve(&year, &key)
    }

    /// Build an annotation for the program, or `None` when it does not
    /// resolve to an awarded movie. The input is not modified; the caller
    /// attaches the result.
    pub async fn annotate(&self, program: &ProgramEntry) -> Option<OscarAnnotation> {
        let index = self.index.as_ref()?;

        let text = program.description.as_deref().unwrap_or(&program.full);
        let movie_id = self.find_movie_id(&program.title, text)?;
        let tally = index.tally(movie_id)?;
        let movie = index.movie(movie_id)?;
        debug!(
            "Matched '{}' ({}) -> movie {}",
            program.title, program.time, movie_id
        );

        let tmdb_id = movie.tmdb_id.clone();
        let watch = match (&self.watch, &tmdb_id) {
            (Some(client), Some(id)) => client.watch_info(id).await,
            _ => None,
        };

        Some(OscarAnnotation {
            winner: tally.winner.len(),
            nominee: tally.nominee.len(),
            winner_categories: tally.winner.iter().cloned().collect(),
            nominee_categories: tally.nominee.iter().cloned().collect(),
            title_en: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            overview: movie.overview.clone(),
            tmdb_id,
            watch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use programata_models::{MovieCatalog, OscarsFile};
    use serde_json::json;

    fn fixture_annotator() -> Annotator {
        let movies: MovieCatalog = serde_json::from_value(json!({
            "m1": {"title": "Casablanca", "title_bg": "Касабланка", "year": "1942",
                   "poster_path": "/c.jpg", "overview": "Рик и Илза в Казабланка."},
            "m2": {"title": "Jaws", "title_bg": "Челюсти", "year": "1975"},
            "m3": {"title": "Heat", "year": "1995"},
            "m4": {"title": "Heat!", "year": "1995"},
        }))
        .unwrap();
        let oscars: OscarsFile = serde_json::from_value(json!({
            "1943": {
                "Best Picture": {"winner": {"id": "m1"}, "nominees": [{"id": "m1"}]},
            },
            "1976": {
                "Best Sound": {"winner": null, "nominees": [{"id": "m2"}]}
            }
        }))
        .unwrap();
        Annotator::new(OscarIndex::build(movies, &oscars), None)
    }

    fn program(title: &str, description: Option<&str>) -> ProgramEntry {
        ProgramEntry::new(
            "20:00".to_string(),
            title.to_string(),
            description.map(|d| d.to_string()),
        )
    }

    #[tokio::test]
    async fn test_annotates_unique_title_year() {
        let annotator = fixture_annotator();
        let entry = program("Касабланка", Some("1942, драма"));
        let annotation = annotator.annotate(&entry).await.unwrap();
        assert_eq!(annotation.winner, 1);
        assert_eq!(annotation.nominee, 1);
        assert!(annotation.winner + annotation.nominee > 0);
        assert_eq!(annotation.winner_categories, vec!["Best Picture"]);
        assert_eq!(annotation.title_en.as_deref(), Some("Casablanca"));
        assert_eq!(annotation.poster_path.as_deref(), Some("/c.jpg"));
        assert!(annotation.watch.is_none());
    }

    #[tokio::test]
    async fn test_nominee_only_movie_counts() {
        let annotator = fixture_annotator();
        let entry = program("Челюсти", Some("трилър, 1975"));
        let annotation = annotator.annotate(&entry).await.unwrap();
        assert_eq!(annotation.winner, 0);
        assert_eq!(annotation.nominee, 1);
    }

    #[tokio::test]
    async fn test_no_year_never_matches() {
        let annotator = fixture_annotator();
        let entry = program("Касабланка", Some("класика с Хъмфри Богарт"));
        assert!(annotator.annotate(&entry).await.is_none());
    }

    #[tokio::test]
    async fn test_ambiguous_title_year_never_matches() {
        let annotator = fixture_annotator();
        let entry = program("Heat", Some("1995, екшън"));
        assert!(annotator.annotate(&entry).await.is_none());
    }

    #[tokio::test]
    async fn test_year_from_full_when_no_description() {
        let annotator = fixture_annotator();
        let mut entry = program("Касабланка", None);
        entry.full = "Касабланка 1942".to_string();
        assert!(annotator.annotate(&entry).await.is_some());
    }

    #[tokio::test]
    async fn test_episode_suffix_stripped_before_match() {
        let annotator = fixture_annotator();
        let entry = program("Касабланка, сезон 1", Some("1942, драма"));
        assert!(annotator.annotate(&entry).await.is_some());
    }

    #[tokio::test]
    async fn test_unawarded_movie_yields_no_annotation() {
        let movies: MovieCatalog = serde_json::from_value(json!({
            "m9": {"title": "Obscure", "year": "2001"},
        }))
        .unwrap();
        let oscars: OscarsFile = serde_json::from_value(json!({})).unwrap();
        let annotator = Annotator::new(OscarIndex::build(movies, &oscars), None);
        let entry = program("Obscure", Some("2001"));
        assert!(annotator.annotate(&entry).await.is_none());
    }

    #[tokio::test]
    async fn test_disabled_annotator_is_a_noop() {
        let annotator = Annotator::disabled();
        assert!(!annotator.enabled());
        let entry = program("Касабланка", Some("1942"));
        assert!(annotator.annotate(&entry).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_title_never_matches() {
        let annotator = fixture_annotator();
        let entry = program("...", Some("1942"));
        assert!(annotator.annotate(&entry).await.is_none());
    }
}
