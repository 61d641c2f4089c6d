use std::sync::Arc;
use tracing::info;

use crate::{config::Config, error::Result, services::NoticeService};

/// 应用程序的共享状态
/// 页面按克隆持有，页面之间不存在共享的可变实体存储
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Config,

    /// 公告网关
    pub notice_service: NoticeService,

    /// 会话级只读分类目录：启动时拉取一次，所有页面注入同一份，
    /// 避免每个页面各自维护分类列表
    pub categories: Arc<Vec<String>>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let notice_service = NoticeService::new(&config)?;

        let categories = notice_service.get_categories().await;
        info!("Loaded {} notice categories", categories.len());

        Ok(Self {
            config,
            notice_service,
            categories: Arc::new(categories),
        })
    }

    pub fn page_size(&self) -> u32 {
        self.config.default_page_size
    }

    pub fn is_production(&self) -> bool {
        self.config.is_production()
    }
}
