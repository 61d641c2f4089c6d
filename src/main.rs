use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nearhub::{
    config::Config,
    feed::{EntityFeed, NoticeFeed, SortPolicy},
    filter::LocationFilterState,
    map::MapPresenter,
    models::{AuthorSummary, ChatGroup, CreateNoticeRequest, LocatableEntity, NearbyUser},
    services::{InMemoryNoticeRepository, NoticeRepository},
    state::AppState,
};

/// 演示入口：走一遍过滤、投影、公告流和会话级分类目录
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting nearhub demo...");

    // 会话级状态：分类目录在这里拉取一次，后端不可达时降级到兜底列表
    let state = AppState::new(config.clone()).await?;
    info!("Notice categories: {}", state.categories.join(", "));

    // 社群列表：置顶的群组排在前面
    let mut running = ChatGroup::new("g_1", "Morning runners", "Riverside");
    running.member_count = 34;
    running.last_message = "Meet at the bridge at 7".to_string();
    let mut garden = ChatGroup::new("g_2", "Community garden", "Downtown");
    garden.member_count = 120;
    garden.pinned = true;
    garden.last_message = "Tomato seedlings available".to_string();

    let entities: Vec<LocatableEntity> = vec![
        NearbyUser::new("u_1", "Alice", "Downtown").into(),
        NearbyUser::new("u_2", "Bob", "Riverside").into(),
        running.into(),
        garden.into(),
    ];

    let mut filter = LocationFilterState::default();
    filter.location_query = "downtown".to_string();
    let projected = EntityFeed::project(&entities, &filter, SortPolicy::PinnedFirst);
    info!("Entities in scope for \"downtown\":");
    for entity in &projected {
        info!("  {} ({})", entity.display_name(), entity.location());
    }

    // 地图：确定性槽位布局
    let mut presenter = MapPresenter::new(&config);
    presenter.load(&projected).await;
    for (index, marker) in presenter.markers().iter().enumerate() {
        info!(
            "  marker {} -> top {}% left {}%",
            index, marker.top_pct, marker.left_pct
        );
    }

    // 公告流：内存数据源演示发布与分页
    let author = AuthorSummary {
        id: "u_1".to_string(),
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        avatar: None,
    };
    let repository = InMemoryNoticeRepository::new(author);
    repository
        .create(&CreateNoticeRequest {
            title: "Garage sale on Saturday".to_string(),
            description: "Furniture, books and kids toys".to_string(),
            category: "For Sale".to_string(),
            location: "Downtown".to_string(),
            radius: 5,
            contact: Some("alice@example.com".to_string()),
            urgent: false,
            duration: "1 week".to_string(),
        })
        .await?;

    let feed = NoticeFeed::new(Arc::new(repository), config.default_page_size);
    feed.refresh().await?;
    info!(
        "Notice feed: page {}/{}, {} visible",
        feed.current_page().await,
        feed.total_pages().await,
        feed.visible_notices().await.len()
    );

    Ok(())
}
