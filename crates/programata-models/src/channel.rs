use serde::{Deserialize, Serialize};

/// A broadcaster channel as stored in the channels file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub active: bool,
}

/// The persisted channels document: `{ "channels": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelList {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl ChannelList {
    pub fn active(&self) -> Vec<Channel> {
        self.channels.iter().filter(|c| c.active).cloned().collect()
    }
}

/// Channel identity attached to a day's fetched programs (no `active` flag).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelMeta {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl From<&Channel> for ChannelMeta {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.clone(),
            name: channel.name.clone(),
            icon: channel.icon.clone(),
        }
    }
}
