// ==========================================
// 混合办公排座系统 - 排班结果模型
// ==========================================
// 职责: DayPlan / WeekSchedule / Violation / ScheduleMetrics
// 红线: 运行结束后结果不可变；周排班重算为整体替换
// ==========================================
// 确定性: 所有映射使用 BTreeMap，序列化顺序稳定
// ==========================================

use crate::domain::types::{Severity, Weekday};
use crate::engine::strategy::SolverMode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// ViolationCode - 违规代码（机器可读）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    DayCapacityReached,        // 当日容量已满
    DeptCapExceeded,           // 部门日上限
    TeamCapExceeded,           // 团队日上限
    TeamCopresenceLow,         // 团队同日到岗比例不足
    ConsecutiveLimitReached,   // 连续到岗上限
    WeeklyLimitReached,        // 周到岗上限
    NoEligibleSeat,            // 无可用座位
    AccessibleSeatUnavailable, // 无障碍座位不足
    AccessibilityRelaxed,      // 宽松模式下的无障碍错配
    LockConflict,              // 锁定座位不可用
    FloorCapacityOverflow,     // 楼层容量溢出
    TeamFloorSplit,            // 团队跨楼层
    DoubleBooking,             // 重复占座（构造上不应出现）
}

impl ViolationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationCode::DayCapacityReached => "DAY_CAPACITY_REACHED",
            ViolationCode::DeptCapExceeded => "DEPT_CAP_EXCEEDED",
            ViolationCode::TeamCapExceeded => "TEAM_CAP_EXCEEDED",
            ViolationCode::TeamCopresenceLow => "TEAM_COPRESENCE_LOW",
            ViolationCode::ConsecutiveLimitReached => "CONSECUTIVE_LIMIT_REACHED",
            ViolationCode::WeeklyLimitReached => "WEEKLY_LIMIT_REACHED",
            ViolationCode::NoEligibleSeat => "NO_ELIGIBLE_SEAT",
            ViolationCode::AccessibleSeatUnavailable => "ACCESSIBLE_SEAT_UNAVAILABLE",
            ViolationCode::AccessibilityRelaxed => "ACCESSIBILITY_RELAXED",
            ViolationCode::LockConflict => "LOCK_CONFLICT",
            ViolationCode::FloorCapacityOverflow => "FLOOR_CAPACITY_OVERFLOW",
            ViolationCode::TeamFloorSplit => "TEAM_FLOOR_SPLIT",
            ViolationCode::DoubleBooking => "DOUBLE_BOOKING",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Violation - 约束违规
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub day: Weekday,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub message: String,
    pub severity: Severity,
    pub code: ViolationCode,
}

// ==========================================
// DayPlan - 单日排班
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: Weekday,
    pub date: NaiveDate,
    pub capacity: u32, // 当日容量（已解析为座位数）

    // ===== 出勤 =====
    pub attendees: Vec<String>,                    // 到岗员工（按出勤得分降序）
    pub attendance_scores: BTreeMap<String, f64>,  // 员工 -> 出勤得分
    pub client_site: Vec<String>,                  // 客户现场（单独类别，不算未分配）
    pub excluded: BTreeMap<String, Vec<String>>,   // 被排除员工 -> 原因标签

    // ===== 座位 =====
    pub seat_assignments: BTreeMap<String, String>,      // 员工 -> 座位
    pub assignment_scores: BTreeMap<String, f64>,        // 员工 -> 座位得分（锁定不计分）
    pub assignment_reasons: BTreeMap<String, Vec<String>>, // 员工 -> 得分原因标签
    pub locked: Vec<String>,     // 通过锁定落座的员工
    pub unassigned: Vec<String>, // 到岗但无座位的员工
    pub unused_seats: Vec<String>,
}

impl DayPlan {
    pub fn seat_of(&self, employee_id: &str) -> Option<&str> {
        self.seat_assignments.get(employee_id).map(String::as_str)
    }

    pub fn attends(&self, employee_id: &str) -> bool {
        self.attendees.iter().any(|id| id == employee_id)
    }
}

// ==========================================
// ScheduleMetrics - 汇总指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    pub client_site_ratio: f64,                // 1 - 到岗人日 / (总人数 × 5)
    pub floor_utilization: BTreeMap<i32, f64>, // 楼层 -> 已分配座位 / (楼层容量 × 5)
    pub total_assignments: usize,
    pub daily_counts: BTreeMap<Weekday, usize>,
    pub solver_used: SolverMode,
}

// ==========================================
// WeekSchedule - 周排班（聚合根）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub week_start: NaiveDate,
    pub days: Vec<DayPlan>,
    pub violations: Vec<Violation>,
    pub metrics: ScheduleMetrics,
}

impl WeekSchedule {
    pub fn day(&self, day: Weekday) -> Option<&DayPlan> {
        self.days.iter().find(|plan| plan.day == day)
    }

    pub fn violations_for(&self, day: Weekday) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.day == day)
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == Severity::Error)
    }
}
