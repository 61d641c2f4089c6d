use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::LocatableEntity;

pub const MIN_RADIUS_KM: u32 = 1;
pub const MAX_RADIUS_KM: u32 = 100;
pub const DEFAULT_RADIUS_KM: u32 = 10;

/// 三个页面共用的位置过滤状态
///
/// 半径只作为查询参数透传给服务端，客户端不做真实的球面距离过滤。
/// 这是有意保留的范围限制，见 DESIGN.md。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationFilterState {
    pub search_text: String,
    pub location_query: String,
    radius_km: u32,
}

impl Default for LocationFilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            location_query: String::new(),
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

impl LocationFilterState {
    pub fn radius_km(&self) -> u32 {
        self.radius_km
    }

    /// 半径必须落在 [1,100]，越界时保留原值不动
    pub fn set_radius(&mut self, radius_km: u32) {
        if (MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&radius_km) {
            self.radius_km = radius_km;
        } else {
            debug!("Ignoring out-of-range radius: {}", radius_km);
        }
    }

    /// 来自输入框的原始文本；解析失败同样保留原值
    pub fn set_radius_input(&mut self, raw: &str) {
        match raw.trim().parse::<u32>() {
            Ok(radius) => self.set_radius(radius),
            Err(_) => debug!("Ignoring non-numeric radius input: {:?}", raw),
        }
    }

    /// 组合谓词：搜索词与位置词都按大小写不敏感的连续子串匹配，
    /// 空字符串表示不限制。两条规则取与。
    pub fn matches(&self, entity: &LocatableEntity) -> bool {
        self.matches_text(entity) && self.matches_location(entity)
    }

    fn matches_text(&self, entity: &LocatableEntity) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        entity
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_location(&self, entity: &LocatableEntity) -> bool {
        if self.location_query.is_empty() {
            return true;
        }
        let needle = self.location_query.to_lowercase();
        entity.location().to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatGroup, NearbyUser};
    use proptest::prelude::*;

    fn user(name: &str, location: &str) -> LocatableEntity {
        NearbyUser::new("u_1", name, location).into()
    }

    fn group(name: &str, location: &str, last_message: &str) -> LocatableEntity {
        let mut g = ChatGroup::new("g_1", name, location);
        g.last_message = last_message.to_string();
        g.into()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let state = LocationFilterState::default();
        assert!(state.matches(&user("Alice", "Downtown")));
        assert!(state.matches(&group("Dog owners", "Riverside", "see you there")));
    }

    #[test]
    fn search_text_matches_any_searchable_field() {
        let mut state = LocationFilterState::default();
        state.search_text = "owners".to_string();
        assert!(state.matches(&group("Dog owners", "Riverside", "")));

        // 群组的消息预览也参与匹配
        state.search_text = "see you".to_string();
        assert!(state.matches(&group("Dog owners", "Riverside", "see you there")));

        state.search_text = "cats".to_string();
        assert!(!state.matches(&group("Dog owners", "Riverside", "see you there")));
    }

    #[test]
    fn location_query_and_search_text_are_anded() {
        let mut state = LocationFilterState::default();
        state.search_text = "alice".to_string();
        state.location_query = "downtown".to_string();
        assert!(state.matches(&user("Alice", "Downtown")));

        state.location_query = "riverside".to_string();
        assert!(!state.matches(&user("Alice", "Downtown")));
    }

    #[test]
    fn matching_is_contiguous_substring_only() {
        let mut state = LocationFilterState::default();
        // 非连续的词序不应命中
        state.search_text = "owners dog".to_string();
        assert!(!state.matches(&group("Dog owners", "Riverside", "")));
    }

    #[test]
    fn invalid_radius_inputs_keep_previous_value() {
        let mut state = LocationFilterState::default();
        state.set_radius(25);
        assert_eq!(state.radius_km(), 25);

        state.set_radius(0);
        assert_eq!(state.radius_km(), 25);

        state.set_radius(101);
        assert_eq!(state.radius_km(), 25);

        state.set_radius_input("abc");
        assert_eq!(state.radius_km(), 25);

        state.set_radius_input("42");
        assert_eq!(state.radius_km(), 42);
    }

    proptest! {
        // 匹配结果对针和草堆的大小写变化保持不变
        #[test]
        fn matching_is_case_insensitive(name in "[a-zA-Z ]{1,20}", needle in "[a-zA-Z]{1,5}") {
            let mut lower = LocationFilterState::default();
            lower.search_text = needle.to_lowercase();
            let mut upper = LocationFilterState::default();
            upper.search_text = needle.to_uppercase();

            let entity = user(&name, "Downtown");
            let entity_upper = user(&name.to_uppercase(), "Downtown");

            prop_assert_eq!(lower.matches(&entity), upper.matches(&entity));
            prop_assert_eq!(lower.matches(&entity), lower.matches(&entity_upper));
        }
    }
}
