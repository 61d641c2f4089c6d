use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use validator::Validate;

use crate::{
    config::Config,
    error::{AppError, Result},
    models::{
        CreateNoticeRequest, Notice, NoticeListEnvelope, NoticeStats, PaginatedResult,
        UpdateNoticeRequest,
    },
    services::repository::{NoticeFilters, NoticeRepository},
};

/// 分类获取失败时的本地兜底列表
/// 需要人工与服务端接受的分类保持同步（已知的耦合风险）
pub const FALLBACK_CATEGORIES: [&str; 7] = [
    "Lost & Found",
    "For Sale",
    "Housing",
    "Jobs",
    "Services",
    "Events",
    "Community",
];

/// 公告 REST 网关：把 CRUD 调用翻译成 HTTP 请求
/// 不做重试和退避，失败直接上抛给页面处理
#[derive(Clone)]
pub struct NoticeService {
    base_url: String,
    http_client: Client,
}

/// 列表查询串。严格约定：未设置的过滤条件整个键都不出现
#[derive(Debug, Serialize)]
pub(crate) struct NoticeListQuery<'a> {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct LocationPageQuery {
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    message: String,
}

impl NoticeService {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// 发布公告
    /// POST /notices
    pub async fn create_notice(&self, request: &CreateNoticeRequest) -> Result<Notice> {
        // 必填字段在发起请求之前就拦下来
        request.validate()?;

        debug!("Creating notice: {}", request.title);
        let url = format!("{}/notices", self.base_url);
        let response = self.http_client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "notice").await);
        }
        Ok(response.json::<Notice>().await?)
    }

    /// 分页拉取公告列表
    /// GET /notices?page&limit&category&location&radius&status
    pub async fn list_notices(
        &self,
        page: u32,
        limit: u32,
        filters: &NoticeFilters,
    ) -> Result<PaginatedResult<Notice>> {
        let query = NoticeListQuery {
            page,
            limit,
            category: filters.normalized_category(),
            location: filters.normalized_location(),
            radius: filters.radius,
            status: filters.status.map(|s| s.as_str()),
        };
        debug!("Listing notices with query: {:?}", query);

        let url = format!("{}/notices", self.base_url);
        let response = self.http_client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "notices").await);
        }
        let envelope = response.json::<NoticeListEnvelope>().await?;
        Ok(PaginatedResult::from((envelope, page)))
    }

    /// GET /notices/:id
    pub async fn get_notice(&self, id: &str) -> Result<Notice> {
        let url = format!("{}/notices/{}", self.base_url, id);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "notice").await);
        }
        Ok(response.json::<Notice>().await?)
    }

    /// 局部更新，PATCH 负载只包含被修改的字段
    /// PATCH /notices/:id
    pub async fn update_notice(&self, id: &str, patch: &UpdateNoticeRequest) -> Result<Notice> {
        debug!("Updating notice {}", id);
        let url = format!("{}/notices/{}", self.base_url, id);
        let response = self.http_client.patch(&url).json(patch).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "notice").await);
        }
        Ok(response.json::<Notice>().await?)
    }

    /// DELETE /notices/:id
    pub async fn delete_notice(&self, id: &str) -> Result<()> {
        let url = format!("{}/notices/{}", self.base_url, id);
        let response = self.http_client.delete(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "notice").await);
        }
        Ok(())
    }

    /// 按位置聚合的列表
    /// GET /notices/location/:location?page&limit&radius
    pub async fn list_notices_by_location(
        &self,
        location: &str,
        page: u32,
        limit: u32,
        radius: Option<u32>,
    ) -> Result<PaginatedResult<Notice>> {
        let url = format!(
            "{}/notices/location/{}",
            self.base_url,
            urlencoding::encode(location)
        );
        let query = LocationPageQuery {
            page,
            limit,
            radius,
        };
        let response = self.http_client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "notices").await);
        }
        let envelope = response.json::<NoticeListEnvelope>().await?;
        Ok(PaginatedResult::from((envelope, page)))
    }

    /// GET /notices/stats
    pub async fn get_notice_stats(&self) -> Result<NoticeStats> {
        let url = format!("{}/notices/stats", self.base_url);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "stats").await);
        }
        Ok(response.json::<NoticeStats>().await?)
    }

    /// 获取分类列表；失败时降级到本地兜底，不阻塞发布流程
    /// GET /notices/categories
    pub async fn get_categories(&self) -> Vec<String> {
        let url = format!("{}/notices/categories", self.base_url);
        let fetched = async {
            let response = self.http_client.get(&url).send().await?;
            if !response.status().is_success() {
                return Err(AppError::Network(format!(
                    "category fetch returned {}",
                    response.status()
                )));
            }
            Ok(response.json::<Vec<String>>().await?)
        }
        .await;

        match fetched {
            Ok(categories) if !categories.is_empty() => categories,
            Ok(_) => {
                warn!("Server returned an empty category list, using fallback");
                FALLBACK_CATEGORIES.iter().map(|c| c.to_string()).collect()
            }
            Err(e) => {
                warn!("Failed to fetch categories, using fallback: {}", e);
                FALLBACK_CATEGORIES.iter().map(|c| c.to_string()).collect()
            }
        }
    }

    /// 4xx 带回服务端的校验信息，404 映射为 NotFound，其余一律按网络错误处理
    async fn error_from_response(response: reqwest::Response, resource: &str) -> AppError {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return AppError::NotFound(format!("{} not found", resource));
        }

        let message = response
            .json::<ServerErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());

        if status.is_client_error() {
            AppError::Validation(message)
        } else {
            error!("Server error {} for {}: {}", status, resource, message);
            AppError::Network(message)
        }
    }
}

#[async_trait]
impl NoticeRepository for NoticeService {
    async fn create(&self, request: &CreateNoticeRequest) -> Result<Notice> {
        self.create_notice(request).await
    }

    async fn list(
        &self,
        page: u32,
        limit: u32,
        filters: &NoticeFilters,
    ) -> Result<PaginatedResult<Notice>> {
        self.list_notices(page, limit, filters).await
    }

    async fn get(&self, id: &str) -> Result<Notice> {
        self.get_notice(id).await
    }

    async fn update(&self, id: &str, patch: &UpdateNoticeRequest) -> Result<Notice> {
        self.update_notice(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.delete_notice(id).await
    }

    async fn categories(&self) -> Vec<String> {
        self.get_categories().await
    }
}
