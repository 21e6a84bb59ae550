use serde::{Deserialize, Serialize};

use crate::oscar::OscarAnnotation;

/// One row of a channel's daily schedule as extracted from the listing page.
///
/// `full` is derived at construction (title plus description) and is what the
/// annotator falls back to when the description alone carries no year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramEntry {
    pub time: String,
    pub title: String,
    pub description: Option<String>,
    pub full: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oscar: Option<OscarAnnotation>,
}

impl ProgramEntry {
    pub fn new(time: String, title: String, description: Option<String>) -> Self {
        let full = match &description {
            Some(desc) => format!("{} {}", title, desc),
            None => title.clone(),
        };
        Self {
            time,
            title,
            description,
            full,
            oscar: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_concatenates_title_and_description() {
        let entry = ProgramEntry::new(
            "20:00".to_string(),
            "Касабланка".to_string(),
            Some("1942, драма".to_string()),
        );
        assert_eq!(entry.full, "Касабланка 1942, драма");
    }

    #[test]
    fn test_full_without_description_is_title() {
        let entry = ProgramEntry::new("09:30".to_string(), "Новини".to_string(), None);
        assert_eq!(entry.full, "Новини");
    }

    #[test]
    fn test_oscar_field_omitted_when_absent() {
        let entry = ProgramEntry::new("09:30".to_string(), "Новини".to_string(), None);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("oscar"));
    }
}
