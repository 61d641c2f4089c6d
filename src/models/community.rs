use serde::{Deserialize, Serialize};

use super::entity::Coordinates;

/// 社群（聊天群组）：带位置的命名群组，列表页用最近一条消息做预览
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatGroup {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub member_count: u32,
    pub is_private: bool,
    #[serde(default)]
    pub last_message: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub pinned: bool,
}

impl ChatGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            coordinates: None,
            member_count: 0,
            is_private: false,
            last_message: String::new(),
            category: String::new(),
            pinned: false,
        }
    }
}
