pub mod community;
pub mod entity;
pub mod notice;
pub mod response;
pub mod user;

// 重新导出常用类型
pub use community::ChatGroup;
pub use entity::{Coordinates, LocatableEntity};
pub use notice::{
    AuthorSummary, CreateNoticeRequest, Notice, NoticeStats, NoticeStatus, UpdateNoticeRequest,
    DURATION_LABELS,
};
pub use response::{NoticeListEnvelope, PaginatedResult};
pub use user::NearbyUser;
