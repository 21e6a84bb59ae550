use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// The movies catalog file: movie id -> entry.
pub type MovieCatalog = HashMap<String, MovieEntry>;

/// One catalog movie. Titles are indexed in both languages when present;
/// `year` and `tmdb_id` appear as either strings or numbers in the source
/// data, so both are coerced to strings on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_bg: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub tmdb_id: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        Raw::Str(s) => s.trim().to_string(),
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => (n as i64).to_string(),
    }))
}
