use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    error::Result,
    filter::LocationFilterState,
    models::{LocatableEntity, Notice, PaginatedResult},
    services::{NoticeFilters, NoticeRepository},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy {
    /// 保持来源顺序
    SourceOrder,
    /// 置顶实体排在前面，未置顶之间保持来源顺序（稳定排序）
    PinnedFirst,
}

/// 用户列表和社群列表的纯投影：过滤 + 排序，无副作用
pub struct EntityFeed;

impl EntityFeed {
    pub fn project(
        entities: &[LocatableEntity],
        filter: &LocationFilterState,
        sort: SortPolicy,
    ) -> Vec<LocatableEntity> {
        let mut projected: Vec<LocatableEntity> = entities
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();

        if sort == SortPolicy::PinnedFirst {
            projected.sort_by_key(|e| !e.pinned());
        }
        projected
    }
}

struct NoticeFeedState {
    page: u32,
    filters: NoticeFilters,
    /// 仅客户端的时长过滤，在服务端分页之后生效
    duration_filter: Option<String>,
    current: PaginatedResult<Notice>,
}

/// 公告流：由远端数据源驱动，页码或过滤条件变化时重新拉取
///
/// 不取消在途请求；用代数计数器实现 last-request-wins，
/// 迟到的旧响应直接丢弃。
#[derive(Clone)]
pub struct NoticeFeed {
    repository: Arc<dyn NoticeRepository>,
    limit: u32,
    state: Arc<RwLock<NoticeFeedState>>,
    generation: Arc<AtomicU64>,
}

impl NoticeFeed {
    pub fn new(repository: Arc<dyn NoticeRepository>, limit: u32) -> Self {
        Self {
            repository,
            limit: limit.max(1),
            state: Arc::new(RwLock::new(NoticeFeedState {
                page: 1,
                filters: NoticeFilters::default(),
                duration_filter: None,
                current: PaginatedResult::empty(),
            })),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 拉取当前页。若期间有更新的请求发出，本次结果作废。
    pub async fn refresh(&self) -> Result<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (page, filters) = {
            let state = self.state.read().await;
            (state.page, state.filters.clone())
        };

        let result = self.repository.list(page, self.limit, &filters).await?;

        // 必须先拿到写锁再核对代数：若在等锁期间有更新的请求完成写入，
        // 锁外的检查会放过本次过期结果，让它覆盖更新的一页
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale notice page (generation {})", generation);
            return Ok(());
        }
        state.current = result;
        Ok(())
    }

    pub async fn set_page(&self, page: u32) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.page = page.max(1);
        }
        self.refresh().await
    }

    /// 切换分类会回到第一页
    pub async fn set_category(&self, category: Option<String>) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.filters.category = category;
            state.page = 1;
        }
        self.refresh().await
    }

    pub async fn set_radius(&self, radius: Option<u32>) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.filters.radius = radius;
            state.page = 1;
        }
        self.refresh().await
    }

    /// 时长过滤只作用于已拉取的一页，不触发请求，也不改动 total_pages。
    /// 因此过滤后页数可能偏大，与现有行为保持一致（见 DESIGN.md）。
    pub async fn set_duration_filter(&self, duration: Option<&str>) {
        let mut state = self.state.write().await;
        state.duration_filter = duration.map(|d| d.to_string());
    }

    /// 当前页经过客户端时长过滤后的可见公告
    pub async fn visible_notices(&self) -> Vec<Notice> {
        let state = self.state.read().await;
        match &state.duration_filter {
            None => state.current.items.clone(),
            Some(duration) => state
                .current
                .items
                .iter()
                .filter(|n| n.duration.eq_ignore_ascii_case(duration))
                .cloned()
                .collect(),
        }
    }

    /// 空态信号，驱动空列表占位 UI
    pub async fn is_empty(&self) -> bool {
        self.visible_notices().await.is_empty()
    }

    pub async fn current_page(&self) -> u32 {
        self.state.read().await.current.current_page
    }

    pub async fn total_pages(&self) -> u32 {
        self.state.read().await.current.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorSummary, ChatGroup, CreateNoticeRequest, NearbyUser};
    use crate::services::repository::MockNoticeRepository;
    use crate::services::InMemoryNoticeRepository;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn entity(name: &str, pinned: bool) -> LocatableEntity {
        let mut user = NearbyUser::new(name, name, "Downtown");
        user.pinned = pinned;
        user.into()
    }

    #[test]
    fn pinned_first_sort_is_stable() {
        let entities = vec![
            entity("A", false),
            entity("B", true),
            entity("C", false),
        ];
        let projected = EntityFeed::project(
            &entities,
            &LocationFilterState::default(),
            SortPolicy::PinnedFirst,
        );
        let names: Vec<&str> = projected.iter().map(|e| e.display_name()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn source_order_keeps_input_order() {
        let entities = vec![
            entity("A", false),
            entity("B", true),
            entity("C", false),
        ];
        let projected = EntityFeed::project(
            &entities,
            &LocationFilterState::default(),
            SortPolicy::SourceOrder,
        );
        let names: Vec<&str> = projected.iter().map(|e| e.display_name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn projection_filters_before_sorting() {
        let mut group = ChatGroup::new("g_1", "Night runners", "Riverside");
        group.pinned = true;
        let entities = vec![entity("A", false), group.into()];

        let mut filter = LocationFilterState::default();
        filter.location_query = "downtown".to_string();
        let projected = EntityFeed::project(&entities, &filter, SortPolicy::PinnedFirst);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].display_name(), "A");
    }

    fn author() -> AuthorSummary {
        AuthorSummary {
            id: "u_demo".to_string(),
            name: "Demo User".to_string(),
            email: "demo@example.com".to_string(),
            avatar: None,
        }
    }

    fn request(title: &str, duration: &str) -> CreateNoticeRequest {
        CreateNoticeRequest {
            title: title.to_string(),
            description: "details".to_string(),
            category: "Events".to_string(),
            location: "Downtown".to_string(),
            radius: 5,
            contact: None,
            urgent: false,
            duration: duration.to_string(),
        }
    }

    #[tokio::test]
    async fn duration_filter_applies_after_fetch_without_touching_pages() {
        let repo = InMemoryNoticeRepository::new(author());
        repo.create(&request("First", "Permanent")).await.unwrap();
        repo.create(&request("Second", "1 day")).await.unwrap();
        repo.create(&request("Third", "Permanent")).await.unwrap();

        let feed = NoticeFeed::new(Arc::new(repo), 10);
        feed.refresh().await.unwrap();

        feed.set_duration_filter(Some("permanent")).await;
        let visible = feed.visible_notices().await;
        let titles: Vec<&str> = visible.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Third"]);

        // 服务端分页元数据不受客户端过滤影响
        assert_eq!(feed.total_pages().await, 1);
        assert!(!feed.is_empty().await);
    }

    #[tokio::test]
    async fn category_change_resets_to_first_page_and_refetches() {
        let mut mock = MockNoticeRepository::new();
        mock.expect_list()
            .withf(|page, _limit, filters| {
                *page == 1 && filters.category.as_deref() == Some("Housing")
            })
            .times(1)
            .returning(|_, _, _| Ok(PaginatedResult::empty()));

        let feed = NoticeFeed::new(Arc::new(mock), 10);
        feed.set_category(Some("Housing".to_string())).await.unwrap();
    }

    /// 固定返回两批结果的数据源：第一次调用慢，第二次快
    struct SlowThenFastRepository {
        calls: AtomicUsize,
        author: AuthorSummary,
    }

    #[async_trait]
    impl NoticeRepository for SlowThenFastRepository {
        async fn create(&self, _request: &CreateNoticeRequest) -> Result<Notice> {
            unimplemented!()
        }

        async fn list(
            &self,
            _page: u32,
            _limit: u32,
            _filters: &NoticeFilters,
        ) -> Result<PaginatedResult<Notice>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay_ms, title) = if call == 0 {
                (100, "stale page")
            } else {
                (5, "fresh page")
            };
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;

            let now = chrono::Utc::now();
            let notice = Notice {
                id: format!("n_{call}"),
                title: title.to_string(),
                description: String::new(),
                category: "Events".to_string(),
                location: "Downtown".to_string(),
                radius: 5,
                contact: None,
                urgent: false,
                duration: "Permanent".to_string(),
                status: crate::models::NoticeStatus::Active,
                created_by: self.author.clone(),
                expires_at: None,
                created_at: now,
                updated_at: now,
            };
            Ok(PaginatedResult::new(vec![notice], 1, 1, 1))
        }

        async fn get(&self, _id: &str) -> Result<Notice> {
            unimplemented!()
        }

        async fn update(&self, _id: &str, _patch: &UpdateNoticeRequest) -> Result<Notice> {
            unimplemented!()
        }

        async fn delete(&self, _id: &str) -> Result<()> {
            unimplemented!()
        }

        async fn categories(&self) -> Vec<String> {
            Vec::new()
        }
    }

    use crate::models::UpdateNoticeRequest;

    #[tokio::test]
    async fn stale_response_does_not_overwrite_newer_page() {
        let repo = Arc::new(SlowThenFastRepository {
            calls: AtomicUsize::new(0),
            author: author(),
        });
        let feed = NoticeFeed::new(repo, 10);

        let slow = {
            let feed = feed.clone();
            tokio::spawn(async move { feed.refresh().await })
        };
        // 让第一个请求先出发，再触发第二个
        tokio::time::sleep(Duration::from_millis(20)).await;
        feed.refresh().await.unwrap();
        slow.await.unwrap().unwrap();

        let visible = feed.visible_notices().await;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "fresh page");
    }
}
