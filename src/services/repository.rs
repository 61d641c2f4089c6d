use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    models::{
        notice::expiry_from, AuthorSummary, CreateNoticeRequest, Notice, NoticeStatus,
        PaginatedResult, UpdateNoticeRequest,
    },
    services::notices::FALLBACK_CATEGORIES,
};

/// 列表查询的过滤条件；未设置的条件不参与过滤也不出现在查询串里
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeFilters {
    pub category: Option<String>,
    pub location: Option<String>,
    pub radius: Option<u32>,
    pub status: Option<NoticeStatus>,
}

impl NoticeFilters {
    /// "all" 与空字符串等价于未选择分类
    pub fn normalized_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
    }

    pub fn normalized_location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.is_empty())
    }
}

/// 公告数据源。页面在构造时注入具体实现：
/// 线上用 HTTP 网关（NoticeService），测试和演示用内存实现。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoticeRepository: Send + Sync {
    async fn create(&self, request: &CreateNoticeRequest) -> Result<Notice>;

    async fn list(
        &self,
        page: u32,
        limit: u32,
        filters: &NoticeFilters,
    ) -> Result<PaginatedResult<Notice>>;

    async fn get(&self, id: &str) -> Result<Notice>;

    async fn update(&self, id: &str, patch: &UpdateNoticeRequest) -> Result<Notice>;

    async fn delete(&self, id: &str) -> Result<()>;

    async fn categories(&self) -> Vec<String>;
}

/// 内存数据源，按与服务端相同的过滤/分页语义工作
#[derive(Clone)]
pub struct InMemoryNoticeRepository {
    author: AuthorSummary,
    notices: Arc<RwLock<Vec<Notice>>>,
}

impl InMemoryNoticeRepository {
    pub fn new(author: AuthorSummary) -> Self {
        Self {
            author,
            notices: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn seed(&self, notices: Vec<Notice>) {
        let mut store = self.notices.write().await;
        store.extend(notices);
    }
}

#[async_trait]
impl NoticeRepository for InMemoryNoticeRepository {
    async fn create(&self, request: &CreateNoticeRequest) -> Result<Notice> {
        // 与 HTTP 网关一致：发出请求前先做客户端校验
        request.validate()?;

        let now = Utc::now();
        let notice = Notice {
            id: Uuid::new_v4().to_string(),
            title: request.title.clone(),
            description: request.description.clone(),
            category: request.category.clone(),
            location: request.location.clone(),
            radius: request.radius,
            contact: request.contact.clone(),
            urgent: request.urgent,
            duration: request.duration.clone(),
            status: NoticeStatus::Active,
            created_by: self.author.clone(),
            expires_at: expiry_from(&request.duration, now),
            created_at: now,
            updated_at: now,
        };

        let mut store = self.notices.write().await;
        store.push(notice.clone());
        Ok(notice)
    }

    async fn list(
        &self,
        page: u32,
        limit: u32,
        filters: &NoticeFilters,
    ) -> Result<PaginatedResult<Notice>> {
        let store = self.notices.read().await;

        // 半径与服务端的地理范围查询对应，内存实现不做距离计算
        let matching: Vec<Notice> = store
            .iter()
            .filter(|n| {
                filters
                    .normalized_category()
                    .map_or(true, |c| n.category.eq_ignore_ascii_case(c))
            })
            .filter(|n| {
                filters.normalized_location().map_or(true, |l| {
                    n.location.to_lowercase().contains(&l.to_lowercase())
                })
            })
            .filter(|n| filters.status.map_or(true, |s| n.status == s))
            .cloned()
            .collect();

        let limit = limit.max(1) as usize;
        let total = matching.len() as u64;
        let pages = (matching.len().div_ceil(limit)).max(1) as u32;
        let page = page.clamp(1, pages);
        let start = (page as usize - 1) * limit;
        let items: Vec<Notice> = matching.into_iter().skip(start).take(limit).collect();

        debug!(
            "In-memory list: page {}/{} ({} matching)",
            page, pages, total
        );
        Ok(PaginatedResult::new(items, page, pages, total))
    }

    async fn get(&self, id: &str) -> Result<Notice> {
        let store = self.notices.read().await;
        store
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Notice {} not found", id)))
    }

    async fn update(&self, id: &str, patch: &UpdateNoticeRequest) -> Result<Notice> {
        let mut store = self.notices.write().await;
        let notice = store
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Notice {} not found", id)))?;

        if let Some(title) = &patch.title {
            notice.title = title.clone();
        }
        if let Some(description) = &patch.description {
            notice.description = description.clone();
        }
        if let Some(category) = &patch.category {
            notice.category = category.clone();
        }
        if let Some(location) = &patch.location {
            notice.location = location.clone();
        }
        if let Some(radius) = patch.radius {
            notice.radius = radius;
        }
        if let Some(contact) = &patch.contact {
            notice.contact = Some(contact.clone());
        }
        if let Some(urgent) = patch.urgent {
            notice.urgent = urgent;
        }
        if let Some(duration) = &patch.duration {
            notice.duration = duration.clone();
            notice.expires_at = expiry_from(duration, notice.created_at);
        }
        notice.updated_at = Utc::now();

        Ok(notice.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut store = self.notices.write().await;
        let before = store.len();
        store.retain(|n| n.id != id);
        if store.len() == before {
            return Err(AppError::NotFound(format!("Notice {} not found", id)));
        }
        Ok(())
    }

    async fn categories(&self) -> Vec<String> {
        FALLBACK_CATEGORIES.iter().map(|c| c.to_string()).collect()
    }
}
