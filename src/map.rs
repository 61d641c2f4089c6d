use std::time::Duration;
use tracing::debug;

use crate::{config::Config, models::LocatableEntity};

/// 地图上的相对布局槽位（top/left 百分比），按下标循环复用
/// 这是确定性的伪布局，不做真实投影；换成真实投影时对外接口不变
const MARKER_SLOTS: [(f32, f32); 6] = [
    (22.0, 18.0),
    (35.0, 62.0),
    (48.0, 30.0),
    (60.0, 70.0),
    (72.0, 24.0),
    (30.0, 45.0),
];

#[derive(Debug, Clone)]
pub struct MapMarker {
    pub entity: LocatableEntity,
    pub top_pct: f32,
    pub left_pct: f32,
}

/// 点击标记时抛给父页面的选中事件，由父页面打开详情面板
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    pub entity: LocatableEntity,
}

pub struct MapPresenter {
    markers: Vec<MapMarker>,
    loading: bool,
    loading_delay: Duration,
}

impl MapPresenter {
    pub fn new(config: &Config) -> Self {
        Self {
            markers: Vec::new(),
            loading: false,
            loading_delay: Duration::from_millis(config.map_loading_delay_ms),
        }
    }

    /// 把过滤后的实体集合映射到槽位：`index mod slot_count`
    pub fn project(entities: &[LocatableEntity]) -> Vec<MapMarker> {
        entities
            .iter()
            .enumerate()
            .map(|(index, entity)| {
                let (top_pct, left_pct) = MARKER_SLOTS[index % MARKER_SLOTS.len()];
                MapMarker {
                    entity: entity.clone(),
                    top_pct,
                    left_pct,
                }
            })
            .collect()
    }

    /// 模拟固定时长的加载态，然后完成投影
    pub async fn load(&mut self, entities: &[LocatableEntity]) {
        self.loading = true;
        tokio::time::sleep(self.loading_delay).await;
        self.markers = Self::project(entities);
        self.loading = false;
        debug!("Map loaded with {} markers", self.markers.len());
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 选中一个标记；越界下标返回 None
    pub fn select(&self, marker_index: usize) -> Option<SelectionEvent> {
        self.markers.get(marker_index).map(|marker| SelectionEvent {
            entity: marker.entity.clone(),
        })
    }
}
