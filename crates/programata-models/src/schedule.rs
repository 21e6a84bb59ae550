use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::channel::ChannelMeta;
use crate::program::ProgramEntry;

/// One channel's fetched day: identity, ordered programs, count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelPrograms {
    pub channel: ChannelMeta,
    pub programs: Vec<ProgramEntry>,
    pub count: usize,
}

/// Batch-level metadata for one fetch pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchMetadata {
    pub timestamp: DateTime<Utc>,
    /// The relative-day label the listing site was asked for ("Днес", "Вчера", ...).
    pub date: String,
    /// Resolved ISO date (YYYY-MM-DD) the label maps to.
    pub target_date: String,
    pub total_channels: usize,
    pub channels_with_programs: usize,
}

/// The per-day aggregate document saved under `programs/YYYY-MM-DD.json`.
/// BTreeMap keeps channel ordering stable across writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivePrograms {
    pub metadata: FetchMetadata,
    pub programs: BTreeMap<String, ChannelPrograms>,
}
