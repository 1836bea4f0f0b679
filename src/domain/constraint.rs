// ==========================================
// 混合办公排座系统 - 约束领域模型
// ==========================================
// 职责: 全局约束 / 团队约束 / 员工约束 / 座位锁定
// 红线: 员工约束存在时覆盖员工主数据上的宽松偏好
// ==========================================

use crate::domain::types::{LockType, Weekday};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// GlobalConstraints - 全局约束（单例）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConstraints {
    // ===== 客户现场比例 =====
    pub min_client_site_ratio: f64,
    pub max_client_site_ratio: f64,

    // ===== 到岗节奏 =====
    pub max_consecutive_office_days: u32,

    // ===== 楼层容量 =====
    pub floor_capacities: BTreeMap<i32, u32>, // 楼层 -> 座位容量

    // ===== 团队拆分 =====
    pub allow_team_splitting: bool, // 允许团队跨楼层
}

impl GlobalConstraints {
    /// 全部楼层容量之和（默认日容量）
    pub fn total_floor_capacity(&self) -> u32 {
        self.floor_capacities.values().sum()
    }

    pub fn floor_capacity(&self, floor: i32) -> Option<u32> {
        self.floor_capacities.get(&floor).copied()
    }
}

impl Default for GlobalConstraints {
    /// 数据存储中没有全局约束时使用的默认值
    fn default() -> Self {
        let mut floor_capacities = BTreeMap::new();
        floor_capacities.insert(1, 48);
        floor_capacities.insert(2, 50);

        Self {
            min_client_site_ratio: 0.4,
            max_client_site_ratio: 0.6,
            max_consecutive_office_days: 3,
            floor_capacities,
            allow_team_splitting: false,
        }
    }
}

// ==========================================
// TeamConstraint - 团队约束（按团队名）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamConstraint {
    pub team_name: String,
    pub prefer_same_floor: bool,
    pub prefer_adjacent_seats: bool,
    pub preferred_days: Vec<Weekday>,
    pub min_copresence_ratio: f64,         // 团队同日到岗最低比例 (0-1)
    pub max_members_per_day: Option<u32>,  // 每日到岗人数上限
}

impl TeamConstraint {
    pub fn new(team_name: &str) -> Self {
        Self {
            team_name: team_name.to_string(),
            prefer_same_floor: false,
            prefer_adjacent_seats: false,
            preferred_days: Vec::new(),
            min_copresence_ratio: 0.0,
            max_members_per_day: None,
        }
    }
}

// ==========================================
// EmployeeConstraint - 员工约束（按员工）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeConstraint {
    pub employee_id: String,
    pub preferred_days: Vec<Weekday>,
    pub avoid_days: Vec<Weekday>,
    pub max_weekly_office_days: Option<u32>,
    pub needs_accessible_seat: bool,
    pub preferred_floor: Option<i32>,
    pub preferred_zone: Option<String>,
}

impl EmployeeConstraint {
    pub fn new(employee_id: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            preferred_days: Vec::new(),
            avoid_days: Vec::new(),
            max_weekly_office_days: None,
            needs_accessible_seat: false,
            preferred_floor: None,
            preferred_zone: None,
        }
    }

    pub fn avoids(&self, day: Weekday) -> bool {
        self.avoid_days.contains(&day)
    }
}

// ==========================================
// SeatLock - 座位锁定
// ==========================================
// 红线: 锁定优先于一切评分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatLock {
    pub seat_id: String,
    pub employee_id: String,
    pub lock_type: LockType,
    pub start_date: NaiveDate, // 含
    pub end_date: NaiveDate,   // 含
}

impl SeatLock {
    /// 判断锁定是否覆盖指定日期（首尾均含）
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
