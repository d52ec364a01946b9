use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_channel: bool,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_archived: bool,
    pub purpose: Option<ChannelPurpose>,
}

impl Channel {
    pub fn purpose_text(&self) -> &str {
        self.purpose.as_ref().map(|p| p.value.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChannelPurpose {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ChannelsListResponse {
    pub channels: Vec<Channel>,
}
