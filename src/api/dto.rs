// ==========================================
// 混合办公排座系统 - API 请求/响应结构
// ==========================================
// 约定: JSON 字段 camelCase；日期 ISO；工作日代码 Mon..Fri
// ==========================================

use crate::domain::capacity::DailyCapacity;
use crate::domain::schedule::{Violation, ViolationCode, WeekSchedule};
use crate::domain::types::{Severity, Weekday};
use crate::engine::strategy::SolverMode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ScheduleRequest - 周排班请求
// ==========================================
// 未给出的字段使用配置存储中的默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub week_start: NaiveDate,
    #[serde(default)]
    pub enforce_constraints: Option<bool>,
    #[serde(default)]
    pub override_ratios: Option<bool>,
    #[serde(default)]
    pub daily_capacities: Option<BTreeMap<Weekday, DailyCapacity>>,
    #[serde(default)]
    pub department_capacity_pct: Option<f64>,
    #[serde(default)]
    pub weights: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub solver_mode: Option<SolverMode>,
}

impl ScheduleRequest {
    /// 仅指定周一、其余取默认
    pub fn for_week(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            enforce_constraints: None,
            override_ratios: None,
            daily_capacities: None,
            department_capacity_pct: None,
            weights: None,
            solver_mode: None,
        }
    }
}

// ==========================================
// ScheduleResponse - 周排班响应
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub week_start: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<String>, // 预览时为空
    pub daily_schedules: BTreeMap<Weekday, Vec<String>>,
    pub seat_assignments: BTreeMap<Weekday, BTreeMap<String, String>>,
    pub assignment_scores: BTreeMap<Weekday, BTreeMap<String, f64>>,
    pub assignment_reasons: BTreeMap<Weekday, BTreeMap<String, Vec<String>>>,
    pub client_site: BTreeMap<Weekday, Vec<String>>,
    pub unassigned: BTreeMap<Weekday, Vec<String>>,
    pub violations: Vec<ViolationDto>,
    pub metrics: MetricsDto,
    pub meta: MetaDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationDto {
    pub day: Weekday,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub message: String,
    pub severity: Severity,
    pub code: ViolationCode,
}

impl From<&Violation> for ViolationDto {
    fn from(v: &Violation) -> Self {
        Self {
            day: v.day,
            employee_id: v.employee_id.clone(),
            message: v.message.clone(),
            severity: v.severity,
            code: v.code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDto {
    pub client_site_ratio: f64,
    pub floor_utilization: BTreeMap<i32, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDto {
    pub total_assignments: usize,
    pub daily_counts: BTreeMap<Weekday, usize>,
    pub solver_used: SolverMode,
}

impl ScheduleResponse {
    /// 由引擎结果构建响应
    ///
    /// # 参数
    /// - `schedule`: 周排班
    /// - `schedule_id`: 落库后的排班ID（预览传 None）
    pub fn from_schedule(schedule: &WeekSchedule, schedule_id: Option<String>) -> Self {
        let mut response = Self {
            week_start: schedule.week_start,
            schedule_id,
            daily_schedules: BTreeMap::new(),
            seat_assignments: BTreeMap::new(),
            assignment_scores: BTreeMap::new(),
            assignment_reasons: BTreeMap::new(),
            client_site: BTreeMap::new(),
            unassigned: BTreeMap::new(),
            violations: schedule.violations.iter().map(ViolationDto::from).collect(),
            metrics: MetricsDto {
                client_site_ratio: schedule.metrics.client_site_ratio,
                floor_utilization: schedule.metrics.floor_utilization.clone(),
            },
            meta: MetaDto {
                total_assignments: schedule.metrics.total_assignments,
                daily_counts: schedule.metrics.daily_counts.clone(),
                solver_used: schedule.metrics.solver_used,
            },
        };

        for plan in &schedule.days {
            response.daily_schedules.insert(plan.day, plan.attendees.clone());
            response
                .seat_assignments
                .insert(plan.day, plan.seat_assignments.clone());
            response
                .assignment_scores
                .insert(plan.day, plan.assignment_scores.clone());
            response
                .assignment_reasons
                .insert(plan.day, plan.assignment_reasons.clone());
            response.client_site.insert(plan.day, plan.client_site.clone());
            response.unassigned.insert(plan.day, plan.unassigned.clone());
        }

        response
    }
}
