use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 公告的有效时长标签（与服务端约定一致）
pub const DURATION_LABELS: [&str; 6] = [
    "1 day",
    "3 days",
    "1 week",
    "2 weeks",
    "1 month",
    "Permanent",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub radius: u32, // 公里
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub urgent: bool,
    pub duration: String,
    pub status: NoticeStatus,
    pub created_by: AuthorSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 生命周期状态由服务端维护（到期或删除），客户端只通过重新拉取感知变化
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    Active,
    Expired,
    Removed,
}

impl Default for NoticeStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl NoticeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Removed => "removed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNoticeRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    #[validate(length(min = 1))]
    pub category: String,

    #[validate(length(min = 1))]
    pub location: String,

    #[validate(range(min = 1, max = 100))]
    pub radius: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    pub urgent: bool,

    #[validate(custom = "validate_duration")]
    pub duration: String,
}

/// PATCH 负载：仅序列化被修改的字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoticeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgent: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeStats {
    pub total: u64,
    pub active: u64,
    pub expired: u64,
    pub urgent: u64,
}

fn validate_duration(duration: &str) -> std::result::Result<(), ValidationError> {
    if DURATION_LABELS.contains(&duration) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_duration_label"))
    }
}

/// 根据时长标签推算到期时间，"Permanent" 不设到期
pub fn expiry_from(duration: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let days = match duration {
        "1 day" => 1,
        "3 days" => 3,
        "1 week" => 7,
        "2 weeks" => 14,
        "1 month" => 30,
        _ => return None,
    };
    Some(now + chrono::Duration::days(days))
}
