// ==========================================
// 混合办公排座系统 - 座位领域模型
// ==========================================

use serde::{Deserialize, Serialize};

/// 座位
///
/// 楼层为开放整数（现有办公区只有 1/2 层）；坐标用于邻近/聚集类启发式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub seat_id: String,
    pub floor: i32,
    pub zone: String,
    pub is_window: bool,
    pub is_accessible: bool,
    pub x: f64,
    pub y: f64,
}

impl Seat {
    pub fn new(seat_id: &str, floor: i32, zone: &str) -> Self {
        Self {
            seat_id: seat_id.to_string(),
            floor,
            zone: zone.to_string(),
            is_window: false,
            is_accessible: false,
            x: 0.0,
            y: 0.0,
        }
    }
}
