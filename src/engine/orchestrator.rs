// ==========================================
// 混合办公排座系统 - 周排班编排器
// ==========================================
// 用途: 协调客户现场预分配 / 出勤选择 / 座位匹配的执行顺序
// 红线: 工作日严格按 Mon..Fri 顺序处理，滚动状态逐日传递
// 红线: 引擎内无 I/O；结果由调用方整体替换落库
// ==========================================

use crate::domain::schedule::{DayPlan, ScheduleMetrics, WeekSchedule};
use crate::domain::snapshot::ScheduleSnapshot;
use crate::domain::types::{Severity, Weekday};
use crate::engine::attendance::{AttendanceSelector, DaySelection};
use crate::engine::client_site::ClientSiteAllocator;
use crate::engine::context::{SchedulingContext, SchedulingOptions};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::running_state::RunningState;
use crate::engine::scoring::ScoringEngine;
use crate::engine::seat_matcher::{DaySeating, SeatMatcher};
use crate::engine::solver::solver_for;
use crate::engine::strategy::SolverMode;
use crate::engine::violations::ViolationCollector;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

// ==========================================
// ScheduleAssembler - 周排班编排器
// ==========================================
#[derive(Debug, Default)]
pub struct ScheduleAssembler;

impl ScheduleAssembler {
    pub fn new() -> Self {
        Self
    }

    /// 生成一周排班
    ///
    /// # 参数
    /// - `snapshot`: 已校验的输入快照
    /// - `week_start`: 目标周的周一
    /// - `options`: 运行选项（权重已合并）
    ///
    /// # 返回
    /// - Ok(WeekSchedule): 五个 DayPlan + 全部违规 + 指标
    /// - Err(EngineError): 致命输入错误（空名单/空座位/非周一）
    #[instrument(skip(self, snapshot, options), fields(
        week_start = %week_start,
        employees = snapshot.employees.len(),
        seats = snapshot.seats.len(),
        solver = %options.solver_mode,
        enforce = options.enforce_constraints
    ))]
    pub fn generate(
        &self,
        snapshot: &ScheduleSnapshot,
        week_start: NaiveDate,
        options: &SchedulingOptions,
    ) -> EngineResult<WeekSchedule> {
        // ==========================================
        // 步骤0: 致命输入检查
        // ==========================================
        if snapshot.employees.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        if snapshot.seats.is_empty() {
            return Err(EngineError::EmptySeatInventory);
        }
        if week_start.weekday() != chrono::Weekday::Mon {
            return Err(EngineError::WeekStartNotMonday(week_start));
        }

        info!("开始生成周排班");

        let ctx = SchedulingContext::new(snapshot, week_start, options);
        let scorer = ScoringEngine::new(&ctx);
        let selector = AttendanceSelector::new(&scorer);
        let solver = solver_for(options.solver_mode);
        let matcher = SeatMatcher::new(&scorer, solver.as_ref());
        let allocator = ClientSiteAllocator::new(&ctx);

        // ==========================================
        // 步骤1: 以历史出勤为种子初始化滚动状态
        // ==========================================
        debug!("步骤1: 初始化滚动状态");

        let mut state = RunningState::seeded(
            ctx.employees(),
            &snapshot.attendance_history,
            week_start,
            options.history_lookback_days,
        );

        // ==========================================
        // 步骤2: 逐日 客户现场 -> 出勤选择 -> 座位匹配
        // ==========================================
        let mut collector = ViolationCollector::new();
        let mut days = Vec::with_capacity(Weekday::ALL.len());

        for day in Weekday::ALL {
            let date = day.date_in_week(week_start);
            debug!(day = %day, date = %date, "步骤2: 处理工作日");

            let client_site = allocator.allocate_day(day, &state);
            let selection = selector.select_day(day, &client_site, &state);
            let seating = matcher.match_day(day, date, &selection.attendees);

            info!(
                day = %day,
                client_site = client_site.len(),
                attendees = selection.attendees.len(),
                seated = seating.seat_assignments.len(),
                unassigned = seating.unassigned.len(),
                "工作日排班完成"
            );

            state = selection.next_state.clone();
            collector.extend(selection.violations.clone());
            collector.extend(seating.violations.clone());
            days.push(Self::assemble_day(day, date, client_site, selection, seating));
        }

        // ==========================================
        // 步骤3: 指标汇总
        // ==========================================
        debug!("步骤3: 计算指标");

        let metrics = Self::compute_metrics(&ctx, &days, solver.mode());

        info!(
            total_assignments = metrics.total_assignments,
            client_site_ratio = metrics.client_site_ratio,
            warnings = collector.count(Severity::Warning),
            errors = collector.count(Severity::Error),
            "周排班生成完成"
        );

        Ok(WeekSchedule {
            week_start,
            days,
            violations: collector.into_vec(),
            metrics,
        })
    }

    /// 合并出勤结果与座位结果为 DayPlan
    ///
    /// 原因标签 = 出勤原因 + 座位原因；锁定落座的员工不记录得分与原因
    fn assemble_day(
        day: Weekday,
        date: NaiveDate,
        client_site: Vec<String>,
        selection: DaySelection,
        seating: DaySeating,
    ) -> DayPlan {
        let mut assignment_reasons = BTreeMap::new();
        for (employee_id, seat_breakdown) in &seating.seat_breakdowns {
            let mut reasons = selection
                .breakdowns
                .get(employee_id)
                .map(|b| b.reasons())
                .unwrap_or_default();
            reasons.extend(seat_breakdown.reasons());
            assignment_reasons.insert(employee_id.clone(), reasons);
        }

        DayPlan {
            day,
            date,
            capacity: selection.capacity,
            attendance_scores: selection.scores(),
            attendees: selection.attendees,
            client_site,
            excluded: selection.excluded,
            seat_assignments: seating.seat_assignments,
            assignment_scores: seating.scores,
            assignment_reasons,
            locked: seating.locked,
            unassigned: seating.unassigned,
            unused_seats: seating.unused_seats,
        }
    }

    /// 计算汇总指标
    ///
    /// - client_site_ratio = 1 - 到岗人日 / (总人数 × 5)
    /// - floor_utilization = 楼层已分配座位 / (楼层容量 × 5)
    fn compute_metrics(
        ctx: &SchedulingContext<'_>,
        days: &[DayPlan],
        solver_used: SolverMode,
    ) -> ScheduleMetrics {
        let possible = (ctx.headcount() * Weekday::ALL.len()) as f64;
        let onsite: usize = days.iter().map(|d| d.attendees.len()).sum();
        let client_site_ratio = if possible > 0.0 {
            1.0 - onsite as f64 / possible
        } else {
            0.0
        };

        let mut assigned_per_floor: BTreeMap<i32, usize> = BTreeMap::new();
        for plan in days {
            for seat_id in plan.seat_assignments.values() {
                if let Some(seat) = ctx.seat(seat_id) {
                    *assigned_per_floor.entry(seat.floor).or_insert(0) += 1;
                }
            }
        }

        let floor_utilization = ctx
            .floors()
            .into_iter()
            .map(|floor| {
                let capacity = f64::from(ctx.floor_capacity(floor)) * Weekday::ALL.len() as f64;
                let assigned = assigned_per_floor.get(&floor).copied().unwrap_or(0) as f64;
                let utilization = if capacity > 0.0 { assigned / capacity } else { 0.0 };
                (floor, utilization)
            })
            .collect();

        ScheduleMetrics {
            client_site_ratio,
            floor_utilization,
            total_assignments: days.iter().map(|d| d.seat_assignments.len()).sum(),
            daily_counts: days.iter().map(|d| (d.day, d.attendees.len())).collect(),
            solver_used,
        }
    }
}
