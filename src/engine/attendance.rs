// ==========================================
// 混合办公排座系统 - 出勤选择引擎
// ==========================================
// 红线: 日容量优先于出勤得分；工作日按 Mon..Fri 各访问一次
// ==========================================
// 职责: 单日到岗人员选择
// 输入: 出勤池（排除客户现场）+ 前一天滚动状态
// 输出: 到岗名单 + 排除原因 + 违规 + 新滚动状态
// ==========================================
// 流程:
// 1) 对出勤池逐人计算 dayFitness
// 2) 得分降序、员工ID升序排序
// 3) 依次尝试接纳: 连续/周上限(强制模式) -> 日容量 -> 部门上限 -> 团队上限
// 4) 团队同日到岗比例检查
// 5) 推进滚动状态
// ==========================================

use crate::domain::capacity::{CapacityConstraint, DayCapacityPool};
use crate::domain::employee::Employee;
use crate::domain::schedule::{Violation, ViolationCode};
use crate::domain::types::Weekday;
use crate::engine::running_state::RunningState;
use crate::engine::scoring::{tags, ScoreBreakdown, ScoringEngine};
use crate::engine::violations::ViolationCollector;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

/// 单日出勤选择结果
#[derive(Debug, Clone)]
pub struct DaySelection {
    pub day: Weekday,
    pub capacity: u32,
    pub attendees: Vec<String>, // 接纳顺序（得分降序）
    pub breakdowns: BTreeMap<String, ScoreBreakdown>, // 到岗员工 -> 出勤得分明细
    pub excluded: BTreeMap<String, Vec<String>>, // 未接纳员工 -> 原因标签
    pub violations: Vec<Violation>,
    pub next_state: RunningState,
}

impl DaySelection {
    pub fn scores(&self) -> BTreeMap<String, f64> {
        self.breakdowns
            .iter()
            .map(|(id, b)| (id.clone(), b.total))
            .collect()
    }
}

// ==========================================
// AttendanceSelector - 出勤选择引擎
// ==========================================
pub struct AttendanceSelector<'a> {
    scorer: &'a ScoringEngine<'a>,
}

impl<'a> AttendanceSelector<'a> {
    pub fn new(scorer: &'a ScoringEngine<'a>) -> Self {
        Self { scorer }
    }

    /// 选择单日到岗人员
    ///
    /// # 参数
    /// - `day`: 工作日
    /// - `client_site`: 当日客户现场员工（不进入出勤池）
    /// - `state`: 截至前一天的滚动状态
    #[instrument(skip(self, client_site, state), fields(day = %day, client_site = client_site.len()))]
    pub fn select_day(
        &self,
        day: Weekday,
        client_site: &[String],
        state: &RunningState,
    ) -> DaySelection {
        let ctx = self.scorer.context();
        let enforce = ctx.enforce();
        let capacity = ctx.day_capacity(day);
        let mut pool = DayCapacityPool::new(day, capacity);
        let mut collector = ViolationCollector::new();

        // ==========================================
        // 1-2. 评分 + 排序
        // ==========================================
        let routed: BTreeSet<&str> = client_site.iter().map(String::as_str).collect();
        let mut candidates: Vec<(&Employee, ScoreBreakdown)> = ctx
            .employees()
            .filter(|e| !routed.contains(e.employee_id.as_str()))
            .map(|e| (e, self.scorer.day_fitness(e, day, state)))
            .collect();

        candidates.sort_by(|(ea, a), (eb, b)| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| ea.employee_id.cmp(&eb.employee_id))
        });

        debug!(candidates = candidates.len(), capacity = capacity, "出勤池评分完成");

        // ==========================================
        // 3. 依次接纳
        // ==========================================
        let mut attendees = Vec::new();
        let mut breakdowns = BTreeMap::new();
        let mut excluded: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut dept_admitted: BTreeMap<&str, u32> = BTreeMap::new();
        let mut team_admitted: BTreeMap<&str, u32> = BTreeMap::new();

        for (employee, breakdown) in candidates {
            let id = employee.employee_id.as_str();
            let consecutive_hit = self.scorer.consecutive_limit_reached(employee, state);
            let weekly_hit = self.scorer.weekly_limit_reached(employee, state);

            // 3.1 连续/周上限（强制模式下直接排除）
            if enforce && (consecutive_hit || weekly_hit) {
                let reasons = excluded.entry(id.to_string()).or_default();
                if consecutive_hit {
                    reasons.push(tags::MAX_CONSECUTIVE_EXCEEDED.to_string());
                    collector.warning(
                        day,
                        Some(id),
                        ViolationCode::ConsecutiveLimitReached,
                        format!(
                            "{} 已连续到岗 {} 天，达到上限 {}，当日排除",
                            employee.display_name(),
                            state.consecutive(id),
                            ctx.global().max_consecutive_office_days
                        ),
                    );
                }
                if weekly_hit {
                    reasons.push(tags::WEEKLY_LIMIT_REACHED.to_string());
                    collector.warning(
                        day,
                        Some(id),
                        ViolationCode::WeeklyLimitReached,
                        format!(
                            "{} 本周已到岗 {} 天，达到周上限，当日排除",
                            employee.display_name(),
                            state.weekly(id)
                        ),
                    );
                }
                continue;
            }

            // 3.2 日容量（任何模式下都不可突破）
            if !pool.can_admit() {
                excluded
                    .entry(id.to_string())
                    .or_default()
                    .push(tags::DAY_CAPACITY_REACHED.to_string());
                collector.warning(
                    day,
                    Some(id),
                    ViolationCode::DayCapacityReached,
                    format!(
                        "当日容量 {} 已满，{} 未被选中",
                        pool.limit,
                        employee.display_name()
                    ),
                );
                continue;
            }

            // 3.3 部门上限
            let department = employee.department.as_str();
            let dept_cap = ctx.department_cap(department);
            if dept_admitted.get(department).copied().unwrap_or(0) >= dept_cap {
                collector.warning(
                    day,
                    Some(id),
                    ViolationCode::DeptCapExceeded,
                    format!(
                        "部门 {} 当日上限 {} 已满，{}{}",
                        department,
                        dept_cap,
                        employee.display_name(),
                        if enforce { " 未被选中" } else { " 仍被接纳（宽松模式）" }
                    ),
                );
                if enforce {
                    excluded
                        .entry(id.to_string())
                        .or_default()
                        .push(tags::DEPT_CAP_EXCEEDED.to_string());
                    continue;
                }
            }

            // 3.4 团队上限
            if let Some(team) = employee.team.as_deref() {
                let team_cap = ctx
                    .team_constraint(team)
                    .and_then(|t| t.max_members_per_day);
                if let Some(team_cap) = team_cap {
                    if team_admitted.get(team).copied().unwrap_or(0) >= team_cap {
                        collector.warning(
                            day,
                            Some(id),
                            ViolationCode::TeamCapExceeded,
                            format!(
                                "团队 {} 当日上限 {} 已满，{}{}",
                                team,
                                team_cap,
                                employee.display_name(),
                                if enforce { " 未被选中" } else { " 仍被接纳（宽松模式）" }
                            ),
                        );
                        if enforce {
                            excluded
                                .entry(id.to_string())
                                .or_default()
                                .push(tags::TEAM_CAP_EXCEEDED.to_string());
                            continue;
                        }
                    }
                }
            }

            // 宽松模式: 超限员工仅被降权，接纳时给出警告
            if consecutive_hit {
                collector.warning(
                    day,
                    Some(id),
                    ViolationCode::ConsecutiveLimitReached,
                    format!(
                        "{} 超出连续到岗上限仍被接纳（宽松模式）",
                        employee.display_name()
                    ),
                );
            }
            if weekly_hit {
                collector.warning(
                    day,
                    Some(id),
                    ViolationCode::WeeklyLimitReached,
                    format!("{} 超出周到岗上限仍被接纳（宽松模式）", employee.display_name()),
                );
            }

            // 3.5 接纳
            pool.admitted += 1;
            *dept_admitted.entry(department).or_insert(0) += 1;
            if let Some(team) = employee.team.as_deref() {
                *team_admitted.entry(team).or_insert(0) += 1;
            }
            attendees.push(id.to_string());
            breakdowns.insert(id.to_string(), breakdown);
        }

        // ==========================================
        // 4. 团队同日到岗比例
        // ==========================================
        for team in ctx.team_constraints() {
            if team.min_copresence_ratio <= 0.0 {
                continue;
            }
            let admitted = team_admitted
                .get(team.team_name.as_str())
                .copied()
                .unwrap_or(0);
            let headcount = ctx.team_headcount(&team.team_name);
            if admitted == 0 || headcount == 0 {
                continue;
            }
            let ratio = f64::from(admitted) / headcount as f64;
            if ratio < team.min_copresence_ratio {
                collector.warning(
                    day,
                    None,
                    ViolationCode::TeamCopresenceLow,
                    format!(
                        "团队 {} 当日到岗 {}/{} ({:.2})，低于同日到岗比例 {:.2}",
                        team.team_name, admitted, headcount, ratio, team.min_copresence_ratio
                    ),
                );
            }
        }

        // ==========================================
        // 5. 推进滚动状态
        // ==========================================
        let next_state = state.advance(&attendees, client_site);

        debug!(
            admitted = attendees.len(),
            excluded = excluded.len(),
            remaining = pool.remaining(),
            full = pool.is_full(),
            utilization = pool.utilization(),
            "出勤选择完成"
        );

        DaySelection {
            day,
            capacity,
            attendees,
            breakdowns,
            excluded,
            violations: collector.into_vec(),
            next_state,
        }
    }
}
