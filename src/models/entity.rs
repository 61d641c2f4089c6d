use serde::{Deserialize, Serialize};

use super::{community::ChatGroup, notice::Notice, user::NearbyUser};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// 地图、社群列表和公告流共享的实体联合类型
/// 三个页面各自持有自己拉取的实体集合，不存在跨页面的共享存储
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocatableEntity {
    User(NearbyUser),
    ChatGroup(ChatGroup),
    Notice(Notice),
}

impl LocatableEntity {
    /// 实体标识，创建后不可变
    pub fn id(&self) -> &str {
        match self {
            Self::User(u) => &u.id,
            Self::ChatGroup(g) => &g.id,
            Self::Notice(n) => &n.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::User(u) => &u.name,
            Self::ChatGroup(g) => &g.name,
            Self::Notice(n) => &n.title,
        }
    }

    /// 位置描述为自由文本（如 "Downtown"），不保证可解析为坐标
    pub fn location(&self) -> &str {
        match self {
            Self::User(u) => &u.location,
            Self::ChatGroup(g) => &g.location,
            Self::Notice(n) => &n.location,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::User(u) => u.coordinates,
            Self::ChatGroup(g) => g.coordinates,
            Self::Notice(_) => None,
        }
    }

    pub fn pinned(&self) -> bool {
        match self {
            Self::User(u) => u.pinned,
            Self::ChatGroup(g) => g.pinned,
            // 紧急公告在列表中置顶展示
            Self::Notice(n) => n.urgent,
        }
    }

    /// 参与文本搜索的字段集合，按实体类型各有不同
    pub fn searchable_fields(&self) -> Vec<&str> {
        match self {
            Self::User(u) => vec![u.name.as_str(), u.status_line.as_str()],
            Self::ChatGroup(g) => vec![
                g.name.as_str(),
                g.last_message.as_str(),
                g.category.as_str(),
            ],
            Self::Notice(n) => vec![
                n.title.as_str(),
                n.description.as_str(),
                n.category.as_str(),
            ],
        }
    }
}

impl From<NearbyUser> for LocatableEntity {
    fn from(user: NearbyUser) -> Self {
        Self::User(user)
    }
}

impl From<ChatGroup> for LocatableEntity {
    fn from(group: ChatGroup) -> Self {
        Self::ChatGroup(group)
    }
}

impl From<Notice> for LocatableEntity {
    fn from(notice: Notice) -> Self {
        Self::Notice(notice)
    }
}
