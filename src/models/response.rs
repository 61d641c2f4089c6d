use serde::{Deserialize, Serialize};

use super::notice::Notice;

/// 列表接口的响应信封：`{ notices, total, pages }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeListEnvelope {
    pub notices: Vec<Notice>,
    pub total: u64,
    pub pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl<T> PaginatedResult<T> {
    /// 构造时维护不变式：两个页码均 >= 1 且 current_page <= total_pages
    pub fn new(items: Vec<T>, current_page: u32, total_pages: u32, total_items: u64) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            items,
            current_page: current_page.clamp(1, total_pages),
            total_pages,
            total_items,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 1, 1, 0)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

impl From<(NoticeListEnvelope, u32)> for PaginatedResult<Notice> {
    fn from((envelope, requested_page): (NoticeListEnvelope, u32)) -> Self {
        Self::new(
            envelope.notices,
            requested_page,
            envelope.pages,
            envelope.total,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_numbers_never_fall_below_one() {
        let result: PaginatedResult<u8> = PaginatedResult::new(vec![], 0, 0, 0);
        assert_eq!(result.current_page, 1);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn current_page_is_capped_at_total_pages() {
        let result: PaginatedResult<u8> = PaginatedResult::new(vec![], 9, 3, 30);
        assert_eq!(result.current_page, 3);
        assert!(result.has_prev());
        assert!(!result.has_next());
    }
}
