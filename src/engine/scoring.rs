// ==========================================
// 混合办公排座系统 - 评分引擎
// ==========================================
// 职责: 出勤评分 (dayFitness) + 座位评分 (seatFitness)
// 红线: 纯函数，不做 I/O；所有加减分项必须输出原因标签
// ==========================================
// 出勤评分:
//   onsite_ratio × onsite_base + availability_ratio × availability_base
//   + preferred_day + team_preferred_day + priority_level × priority
//   + max_consecutive_penalty + weekly_limit_penalty + avoid_day
// 座位评分:
//   硬过滤: 需要无障碍 + 非无障碍座位 -> Ineligible（宽松模式改为大额惩罚）
//   window + accessible + zone + floor + project_penalty + onsite_ratio + cohesion
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::seat::Seat;
use crate::domain::types::Weekday;
use crate::engine::context::SchedulingContext;
use crate::engine::running_state::RunningState;
use std::collections::BTreeMap;

/// 原因标签
pub mod tags {
    // ===== 出勤 =====
    pub const ONSITE_BASE: &str = "onsite_base";
    pub const AVAILABILITY: &str = "availability";
    pub const PRIORITY: &str = "priority";
    pub const PREFERRED_DAY: &str = "preferred_day";
    pub const TEAM_PREFERRED_DAY: &str = "team_preferred_day";
    pub const AVOID_DAY: &str = "avoid_day";
    pub const MAX_CONSECUTIVE_EXCEEDED: &str = "max_consecutive_exceeded";
    pub const WEEKLY_LIMIT_REACHED: &str = "weekly_limit_reached";

    // ===== 座位 =====
    pub const WINDOW_MATCH: &str = "window_match";
    pub const ACCESSIBLE_MATCH: &str = "accessible_match";
    pub const ACCESSIBILITY_MISMATCH: &str = "accessibility_mismatch";
    pub const ZONE_MATCH: &str = "zone_match";
    pub const FLOOR_MATCH: &str = "floor_match";
    pub const PROJECT_PENALTY: &str = "project_penalty";
    pub const ONSITE_RATIO: &str = "onsite_ratio";
    pub const TEAM_ZONE_COHESION: &str = "team_zone_cohesion";

    // ===== 出勤排除（非评分项） =====
    pub const DAY_CAPACITY_REACHED: &str = "day_capacity_reached";
    pub const DEPT_CAP_EXCEEDED: &str = "dept_cap_exceeded";
    pub const TEAM_CAP_EXCEEDED: &str = "team_cap_exceeded";
}

// ==========================================
// ScoreBreakdown - 得分明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub terms: BTreeMap<&'static str, f64>, // 标签 -> 贡献值
    reasons: Vec<&'static str>,             // 需要对外解释的标签（按加入顺序）
}

impl ScoreBreakdown {
    /// 基础项: 计入总分与明细，不作为原因标签
    fn add_base(&mut self, tag: &'static str, value: f64) {
        self.total += value;
        *self.terms.entry(tag).or_insert(0.0) += value;
    }

    /// 原因项: 计入总分与明细，并作为原因标签输出
    fn add_reason(&mut self, tag: &'static str, value: f64) {
        self.add_base(tag, value);
        if !self.reasons.contains(&tag) {
            self.reasons.push(tag);
        }
    }

    pub fn has(&self, tag: &str) -> bool {
        self.reasons.iter().any(|t| *t == tag)
    }

    pub fn reasons(&self) -> Vec<String> {
        self.reasons.iter().map(|t| t.to_string()).collect()
    }
}

// ==========================================
// SeatFitness - 座位评分结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum SeatFitness {
    Eligible(ScoreBreakdown),
    Ineligible,
}

impl SeatFitness {
    pub fn score(&self) -> Option<f64> {
        match self {
            SeatFitness::Eligible(b) => Some(b.total),
            SeatFitness::Ineligible => None,
        }
    }
}

// ==========================================
// TeamZoneCounts - 当日团队在各区域已落座人数
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamZoneCounts {
    counts: BTreeMap<(String, String), u32>,
}

impl TeamZoneCounts {
    pub fn count(&self, team: &str, zone: &str) -> u32 {
        self.counts
            .get(&(team.to_string(), zone.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn record(&mut self, team: Option<&str>, zone: &str) {
        if let Some(team) = team {
            *self
                .counts
                .entry((team.to_string(), zone.to_string()))
                .or_insert(0) += 1;
        }
    }
}

// ==========================================
// ScoringEngine - 评分引擎
// ==========================================
pub struct ScoringEngine<'a> {
    ctx: &'a SchedulingContext<'a>,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(ctx: &'a SchedulingContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &'a SchedulingContext<'a> {
        self.ctx
    }

    /// 出勤评分
    ///
    /// # 参数
    /// - `employee`: 员工
    /// - `day`: 工作日
    /// - `state`: 截至前一天的滚动状态
    pub fn day_fitness(
        &self,
        employee: &Employee,
        day: Weekday,
        state: &RunningState,
    ) -> ScoreBreakdown {
        let w = self.ctx.weights();
        let mut breakdown = ScoreBreakdown::default();

        breakdown.add_base(tags::ONSITE_BASE, employee.onsite_ratio * w.onsite_base);
        breakdown.add_base(
            tags::AVAILABILITY,
            employee.availability_ratio * w.availability_base,
        );

        if self.ctx.prefers_day(employee, day) {
            breakdown.add_reason(tags::PREFERRED_DAY, w.preferred_day);
        }
        if self.ctx.team_prefers_day(employee, day) {
            breakdown.add_reason(tags::TEAM_PREFERRED_DAY, w.team_preferred_day);
        }

        breakdown.add_base(tags::PRIORITY, employee.priority_level * w.priority);

        if self.consecutive_limit_reached(employee, state) {
            breakdown.add_reason(tags::MAX_CONSECUTIVE_EXCEEDED, w.max_consecutive_penalty);
        }
        if self.weekly_limit_reached(employee, state) {
            breakdown.add_reason(tags::WEEKLY_LIMIT_REACHED, w.weekly_limit_penalty);
        }
        if self.ctx.avoids_day(employee, day) {
            breakdown.add_reason(tags::AVOID_DAY, w.avoid_day);
        }

        breakdown
    }

    pub fn consecutive_limit_reached(&self, employee: &Employee, state: &RunningState) -> bool {
        state.consecutive(&employee.employee_id) >= self.ctx.global().max_consecutive_office_days
    }

    pub fn weekly_limit_reached(&self, employee: &Employee, state: &RunningState) -> bool {
        self.ctx
            .max_weekly_days(employee)
            .map(|limit| state.weekly(&employee.employee_id) >= limit)
            .unwrap_or(false)
    }

    /// 座位评分
    ///
    /// # 参数
    /// - `employee`: 员工
    /// - `seat`: 候选座位
    /// - `zone_counts`: 当日团队-区域已落座人数
    ///
    /// # 返回
    /// - Eligible: 得分明细
    /// - Ineligible: 违反无障碍硬约束（仅强制模式）
    pub fn seat_fitness(
        &self,
        employee: &Employee,
        seat: &Seat,
        zone_counts: &TeamZoneCounts,
    ) -> SeatFitness {
        let w = self.ctx.weights();
        let mut breakdown = ScoreBreakdown::default();

        if self.ctx.needs_accessible(employee) {
            if seat.is_accessible {
                breakdown.add_reason(tags::ACCESSIBLE_MATCH, w.w_accessible);
            } else if self.ctx.enforce() {
                return SeatFitness::Ineligible;
            } else {
                breakdown.add_reason(tags::ACCESSIBILITY_MISMATCH, w.w_accessibility_mismatch);
            }
        }

        if employee.prefer_window && seat.is_window {
            breakdown.add_reason(tags::WINDOW_MATCH, w.w_window);
        }
        if self.ctx.preferred_zone(employee) == Some(seat.zone.as_str()) {
            breakdown.add_reason(tags::ZONE_MATCH, w.w_zone);
        }
        if self.ctx.preferred_floor(employee) == Some(seat.floor) {
            breakdown.add_reason(tags::FLOOR_MATCH, w.w_floor);
        }

        breakdown.add_base(
            tags::PROJECT_PENALTY,
            employee.project_count * w.w_project_penalty,
        );
        breakdown.add_base(tags::ONSITE_RATIO, employee.onsite_ratio * w.w_onsite_ratio);

        if let Some(team) = employee.team.as_deref() {
            let teammates = zone_counts.count(team, &seat.zone);
            if teammates > 0 {
                breakdown.add_reason(
                    tags::TEAM_ZONE_COHESION,
                    f64::from(teammates) * w.w_zone_cohesion,
                );
            }
        }

        SeatFitness::Eligible(breakdown)
    }
}
