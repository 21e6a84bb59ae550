//! Immutable lookup structures over the movie catalog and award records.
//!
//! Built wholesale from the two data files; a reload constructs a fresh
//! instance and the holder swaps it, so concurrent readers never observe a
//! half-built index.

use programata_models::{MovieCatalog, MovieEntry, OscarsFile};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use crate::normalize::normalize_title;
use crate::storage::{Storage, StorageExt};

/// Per-movie award standing. Winning a category implies being nominated in
/// it, so `nominee` is always a superset of `winner`. BTreeSet keeps the
/// category lists sorted for output.
#[derive(Debug, Clone, Default)]
pub struct AwardTally {
    pub winner: BTreeSet<String>,
    pub nominee: BTreeSet<String>,
}

/// Key into the disambiguated index: (year, normalized title).
type YearTitleKey = (String, String);

pub struct OscarIndex {
    movies: MovieCatalog,
    title_index: HashMap<String, HashSet<String>>,
    title_year_index: HashMap<YearTitleKey, HashSet<String>>,
    tallies: HashMap<String, AwardTally>,
}

impl OscarIndex {
    /// Build the index from already-parsed data. Pure: identical inputs give
    /// an identical index.
    pub fn build(movies: MovieCatalog, oscars: &OscarsFile) -> Self {
        let mut title_index: HashMap<String, HashSet<String>> = HashMap::new();
        let mut title_year_index: HashMap<YearTitleKey, HashSet<String>> = HashMap::new();

        for (movie_id, movie) in &movies {
            let year = movie.year.clone().unwrap_or_default();
            for title in [movie.title.as_ref(), movie.title_bg.as_ref()]
                .into_iter()
                .flatten()
            {
                let key = normalize_title(title);
                if key.is_empty() {
                    continue;
                }
                title_index
                    .entry(key.clone())
                    .or_default()
                    .insert(movie_id.clone());
                if !year.is_empty() {
                    title_year_index
                        .entry((year.clone(), key))
                        .or_default()
                        .insert(movie_id.clone());
                }
            }
        }

        let mut tallies: HashMap<String, AwardTally> = HashMap::new();
        for categories in oscars.values() {
            for (category, record) in categories {
                if let Some(id) = record
                    .winner
                    .as_ref()
                    .and_then(|w| w.id.as_ref())
                    .filter(|id| !id.is_empty())
                {
                    let tally = tallies.entry(id.clone()).or_default();
                    tally.winner.insert(category.clone());
                    tally.nominee.insert(category.clone());
                }
                for nominee in record.nominees.iter().flatten() {
                    if let Some(id) = nominee.id.as_ref().filter(|id| !id.is_empty()) {
                        tallies
                            .entry(id.clone())
                            .or_default()
                            .nominee
                            .insert(category.clone());
                    }
                }
            }
        }

        Self {
            movies,
            title_index,
            title_year_index,
            tallies,
        }
    }

    /// Read the two data files and build. `None` when either file is missing
    /// or unreadable; the caller runs without award annotation in that case.
    pub fn load(storage: &dyn Storage, movies_path: &Path, oscars_path: &Path) -> Option<Self> {
        let movies: MovieCatalog = match storage.read_json(movies_path) {
            Some(movies) => movies,
            None => {
                warn!("Movie catalog unavailable at {:?}", movies_path);
                return None;
            }
        };
        let oscars: OscarsFile = match storage.read_json(oscars_path) {
            Some(oscars) => oscars,
            None => {
                warn!("Awards data unavailable at {:?}", oscars_path);
                return None;
            }
        };
        let index = Self::build(movies, &oscars);
        info!(
            "Award index ready: {} movies, {} titles, {} awarded",
            index.movies.len(),
            index.title_index.len(),
            index.tallies.len()
        );
        Some(index)
    }

    pub fn movie(&self, movie_id: &str) -> Option<&MovieEntry> {
        self.movies.get(movie_id)
    }

    pub fn tally(&self, movie_id: &str) -> Option<&AwardTally> {
        self.tallies.get(movie_id)
    }

    /// All movie ids sharing a normalized title, year unknown.
    pub fn ids_for_title(&self, key: &str) -> Option<&HashSet<String>> {
        self.title_index.get(key)
    }

    /// Candidate ids for a (year, normalized title) pair.
    pub fn candidates(&self, year: &str, key: &str) -> Option<&HashSet<String>> {
        self.title_year_index
            .get(&(year.to_string(), key.to_string()))
    }

    /// Resolve a (year, key) pair to a movie id only when exactly one
    /// candidate exists. Zero or several candidates both refuse to match.
    pub fn resolve(&self, year: &str, key: &str) -> Option<&str> {
        let ids = self.candidates(year, key)?;
        if ids.len() == 1 {
            ids.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
