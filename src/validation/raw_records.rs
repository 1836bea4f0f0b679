// ==========================================
// 混合办公排座系统 - 原始记录（未校验）
// ==========================================
// 职责: 承载数据存储行 / JSON 的松散形态
// 红线: 原始记录只在边界出现，引擎内部不可见
// ==========================================
// 约定:
// - 全部字段为 Option；缺失值在映射阶段补默认或报错
// - 工作日列表为逗号分隔代码 ("Mon,Wed")
// - 日期为 ISO 字符串 (YYYY-MM-DD)
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEmployee {
    pub employee_id: Option<String>,
    pub full_name: Option<String>,
    pub department: Option<String>,
    pub team: Option<String>,
    pub priority_level: Option<f64>,
    pub preferred_work_mode: Option<String>,
    pub needs_accessible: Option<bool>,
    pub prefer_window: Option<bool>,
    pub preferred_zone: Option<String>,
    pub preferred_floor: Option<i32>,
    pub preferred_days: Option<String>,
    pub client_site_ratio: Option<f64>,
    pub onsite_ratio: Option<f64>,
    pub availability_ratio: Option<f64>,
    pub project_count: Option<f64>,
    pub commute_minutes: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSeat {
    pub seat_id: Option<String>,
    pub floor: Option<i32>,
    pub zone: Option<String>,
    pub is_window: Option<bool>,
    pub is_accessible: Option<bool>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGlobalConstraints {
    pub min_client_site_ratio: Option<f64>,
    pub max_client_site_ratio: Option<f64>,
    pub max_consecutive_office_days: Option<i64>,
    pub allow_team_splitting: Option<bool>,
    pub floor_capacities_json: Option<String>, // {"1": 48, "2": 50}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTeamConstraint {
    pub team_name: Option<String>,
    pub prefer_same_floor: Option<bool>,
    pub prefer_adjacent_seats: Option<bool>,
    pub preferred_days: Option<String>,
    pub min_copresence_ratio: Option<f64>,
    pub max_members_per_day: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEmployeeConstraint {
    pub employee_id: Option<String>,
    pub preferred_days: Option<String>,
    pub avoid_days: Option<String>,
    pub max_weekly_office_days: Option<i64>,
    pub needs_accessible_seat: Option<bool>,
    pub preferred_floor: Option<i32>,
    pub preferred_zone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSeatLock {
    pub seat_id: Option<String>,
    pub employee_id: Option<String>,
    pub lock_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAttendanceRecord {
    pub employee_id: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
}

/// 一次排班所需的全部原始记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnapshot {
    pub employees: Vec<RawEmployee>,
    pub seats: Vec<RawSeat>,
    pub global_constraints: Option<RawGlobalConstraints>,
    pub team_constraints: Vec<RawTeamConstraint>,
    pub employee_constraints: Vec<RawEmployeeConstraint>,
    pub seat_locks: Vec<RawSeatLock>,
    pub attendance_history: Vec<RawAttendanceRecord>,
}
