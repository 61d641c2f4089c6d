pub mod notices;
pub mod repository;

// 重新导出常用类型
pub use notices::NoticeService;
pub use repository::{InMemoryNoticeRepository, NoticeFilters, NoticeRepository};
