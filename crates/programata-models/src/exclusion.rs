use serde::{Deserialize, Serialize};

/// How wide an exclusion reaches.
///
/// `Broadcast` suppresses one specific airing (channel + date + time),
/// `Channel` every airing on one channel, `All` every airing anywhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionScope {
    Broadcast,
    Channel,
    All,
}

/// A user-managed blacklist entry that suppresses annotations for matching
/// programs. Matching is by normalized title plus the scope-specific fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExclusionEntry {
    pub title: String,
    pub scope: ExclusionScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The persisted blacklist document: `{ "excluded": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlacklistDoc {
    #[serde(default)]
    pub excluded: Vec<ExclusionEntry>,
}
