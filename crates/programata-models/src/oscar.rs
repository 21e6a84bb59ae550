use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The awards file: edition id -> category name -> record.
pub type OscarsFile = HashMap<String, HashMap<String, CategoryRecord>>;

/// A single category within one award edition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub winner: Option<NomineeRef>,
    #[serde(default)]
    pub nominees: Option<Vec<NomineeRef>>,
}

/// Reference to a catalog movie inside an award record. Extra fields in the
/// source data (names, film titles) are ignored; only the id links back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NomineeRef {
    #[serde(default)]
    pub id: Option<String>,
}

/// Award metadata attached to a matched program.
///
/// Field names mirror the serving payload: `winner`/`nominee` are counts,
/// the category lists are sorted, `title_en` is the original-language title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OscarAnnotation {
    pub winner: usize,
    pub nominee: usize,
    pub winner_categories: Vec<String>,
    pub nominee_categories: Vec<String>,
    pub title_en: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub tmdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<WatchInfo>,
}

/// Regional watch-provider info from TMDB, passed through mostly as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchInfo {
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(flatten)]
    pub offers: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_record_tolerates_null_nominees() {
        let record: CategoryRecord =
            serde_json::from_str(r#"{"winner": {"id": "m1"}, "nominees": null}"#).unwrap();
        assert_eq!(record.winner.unwrap().id.as_deref(), Some("m1"));
        assert!(record.nominees.is_none());
    }

    #[test]
    fn test_nominee_ref_ignores_extra_fields() {
        let nominee: NomineeRef =
            serde_json::from_str(r#"{"id": "m2", "film": "Casablanca"}"#).unwrap();
        assert_eq!(nominee.id.as_deref(), Some("m2"));
    }

    #[test]
    fn test_watch_info_flattens_offer_lists() {
        let json = r#"{"region": "BG", "link": "https://example.org/w", "flatrate": [{"provider_name": "HBO Max"}]}"#;
        let watch: WatchInfo = serde_json::from_str(json).unwrap();
        assert_eq!(watch.region, "BG");
        assert!(watch.offers.contains_key("flatrate"));
        let back = serde_json::to_value(&watch).unwrap();
        assert!(back.get("flatrate").is_some());
    }
}
