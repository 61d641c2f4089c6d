//! Nearhub 客户端核心：位置社区应用的页面逻辑层
//!
//! 覆盖三个页面共享的位置过滤模型（地图、社群列表、公告流）、
//! 置顶优先的列表投影、地图槽位布局，以及公告的 REST 网关。
//! 所有远端数据都经由网关访问，本 crate 不拥有任何持久化。

pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod map;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use feed::{EntityFeed, NoticeFeed, SortPolicy};
pub use filter::LocationFilterState;
pub use map::{MapMarker, MapPresenter, SelectionEvent};
pub use state::AppState;
