// ==========================================
// 混合办公排座系统 - 日容量模型
// ==========================================
// 红线: 当日到岗人数不得超过日容量
// 用途: AttendanceSelector 的容量门控
// ==========================================

use crate::domain::types::Weekday;
use serde::{Deserialize, Serialize};

// ==========================================
// DailyCapacity - 日容量配置
// ==========================================
// JSON: {"seats": 40} 或 {"percent": 75.0}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyCapacity {
    Seats(u32),   // 绝对座位数
    Percent(f64), // 楼层容量总和的百分比 (0-100)
}

impl DailyCapacity {
    /// 解析为当日座位数
    ///
    /// # 参数
    /// - `total_capacity`: 楼层容量总和
    pub fn resolve(&self, total_capacity: u32) -> u32 {
        match *self {
            DailyCapacity::Seats(seats) => seats,
            DailyCapacity::Percent(pct) => {
                let pct = pct.clamp(0.0, 100.0);
                (pct / 100.0 * total_capacity as f64).floor() as u32
            }
        }
    }
}

// ==========================================
// DayCapacityPool - 单日容量池
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCapacityPool {
    pub day: Weekday,
    pub limit: u32,    // 当日容量
    pub admitted: u32, // 已接纳人数
}

impl DayCapacityPool {
    pub fn new(day: Weekday, limit: u32) -> Self {
        Self {
            day,
            limit,
            admitted: 0,
        }
    }
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
// 用途: 出勤选择的容量检查接口
pub trait CapacityConstraint {
    /// 检查是否还能接纳一人
    fn can_admit(&self) -> bool;

    /// 检查是否已满
    fn is_full(&self) -> bool;

    /// 剩余容量
    fn remaining(&self) -> u32;

    /// 占用比例 (0.0 - 1.0)
    fn utilization(&self) -> f64;
}

impl CapacityConstraint for DayCapacityPool {
    fn can_admit(&self) -> bool {
        self.admitted < self.limit
    }

    fn is_full(&self) -> bool {
        self.admitted >= self.limit
    }

    fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.admitted)
    }

    fn utilization(&self) -> f64 {
        if self.limit == 0 {
            return 0.0;
        }
        self.admitted as f64 / self.limit as f64
    }
}
