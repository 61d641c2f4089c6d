use serde::{Deserialize, Serialize};

use super::entity::Coordinates;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyUser {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// 个性签名，参与文本搜索
    #[serde(default)]
    pub status_line: String,
    #[serde(default)]
    pub pinned: bool,
}

impl NearbyUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            coordinates: None,
            avatar_url: None,
            status_line: String::new(),
            pinned: false,
        }
    }
}
