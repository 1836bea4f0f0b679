// ==========================================
// 混合办公排座系统 - 座位匹配引擎
// ==========================================
// 红线: 锁定优先于一切评分；一座一人、一人一座
// 红线: 需要无障碍的员工绝不落在非无障碍座位（强制模式）
// ==========================================
// 流程:
// 1) 锁定座位: 到岗员工的生效锁定直接落座，不计分
// 2) 求解器: 其余到岗员工按出勤顺序在剩余座位上分配
// 3) 未分配: 逐人输出 error
// 4) 事后检查: 楼层容量溢出 / 团队跨楼层 / 重复占座
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::schedule::{Violation, ViolationCode};
use crate::domain::seat::Seat;
use crate::domain::types::Weekday;
use crate::engine::scoring::{tags, ScoreBreakdown, ScoringEngine, TeamZoneCounts};
use crate::engine::solver::SeatSolver;
use crate::engine::violations::ViolationCollector;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

/// 单日座位匹配结果
#[derive(Debug, Clone, Default)]
pub struct DaySeating {
    pub seat_assignments: BTreeMap<String, String>, // 员工 -> 座位
    pub scores: BTreeMap<String, f64>,              // 员工 -> 座位得分（锁定不计）
    pub seat_breakdowns: BTreeMap<String, ScoreBreakdown>,
    pub locked: Vec<String>,
    pub unassigned: Vec<String>,
    pub unused_seats: Vec<String>,
    pub violations: Vec<Violation>,
}

// ==========================================
// SeatMatcher - 座位匹配引擎
// ==========================================
pub struct SeatMatcher<'a> {
    scorer: &'a ScoringEngine<'a>,
    solver: &'a dyn SeatSolver,
}

impl<'a> SeatMatcher<'a> {
    pub fn new(scorer: &'a ScoringEngine<'a>, solver: &'a dyn SeatSolver) -> Self {
        Self { scorer, solver }
    }

    /// 单日座位匹配
    ///
    /// # 参数
    /// - `day`: 工作日
    /// - `date`: 当日日期（锁定生效判断）
    /// - `attendees`: 到岗员工ID（出勤顺序）
    #[instrument(skip(self, attendees), fields(day = %day, attendees = attendees.len(), solver = %self.solver.mode()))]
    pub fn match_day(&self, day: Weekday, date: NaiveDate, attendees: &[String]) -> DaySeating {
        let ctx = self.scorer.context();
        let mut collector = ViolationCollector::new();
        let mut seating = DaySeating::default();
        let mut taken: BTreeSet<&str> = BTreeSet::new();
        let mut zone_counts = TeamZoneCounts::default();
        let mut remaining: Vec<&Employee> = Vec::new();

        // ==========================================
        // 1. 锁定座位
        // ==========================================
        for id in attendees {
            let Some(employee) = ctx.employee(id) else {
                continue;
            };
            let Some(lock) = ctx.active_lock(id, date) else {
                remaining.push(employee);
                continue;
            };

            match ctx.seat(&lock.seat_id) {
                None => {
                    collector.error(
                        day,
                        Some(id),
                        ViolationCode::LockConflict,
                        format!(
                            "{} 的锁定座位 {} 不存在，改为常规分配",
                            employee.display_name(),
                            lock.seat_id
                        ),
                    );
                    remaining.push(employee);
                }
                Some(seat) if taken.contains(seat.seat_id.as_str()) => {
                    collector.error(
                        day,
                        Some(id),
                        ViolationCode::LockConflict,
                        format!(
                            "{} 的锁定座位 {} 已被占用，改为常规分配",
                            employee.display_name(),
                            seat.seat_id
                        ),
                    );
                    remaining.push(employee);
                }
                Some(seat)
                    if ctx.enforce() && ctx.needs_accessible(employee) && !seat.is_accessible =>
                {
                    collector.error(
                        day,
                        Some(id),
                        ViolationCode::LockConflict,
                        format!(
                            "{} 需要无障碍座位，锁定座位 {} 不满足，改为常规分配",
                            employee.display_name(),
                            seat.seat_id
                        ),
                    );
                    remaining.push(employee);
                }
                Some(seat) => {
                    // 宽松模式下锁定到非无障碍座位: 照常落座，但不静默
                    if ctx.needs_accessible(employee) && !seat.is_accessible {
                        collector.warning(
                            day,
                            Some(id),
                            ViolationCode::AccessibilityRelaxed,
                            format!(
                                "{} 需要无障碍座位，宽松模式下锁定座位 {} 非无障碍",
                                employee.display_name(),
                                seat.seat_id
                            ),
                        );
                    }
                    taken.insert(seat.seat_id.as_str());
                    zone_counts.record(employee.team.as_deref(), &seat.zone);
                    seating
                        .seat_assignments
                        .insert(id.clone(), seat.seat_id.clone());
                    seating.locked.push(id.clone());
                }
            }
        }

        seating.locked.sort();
        debug!(locked = seating.locked.len(), "锁定座位处理完成");

        // ==========================================
        // 2. 求解器分配
        // ==========================================
        let available: Vec<&Seat> = ctx
            .seats()
            .filter(|s| !taken.contains(s.seat_id.as_str()))
            .collect();
        let outcome = self
            .solver
            .assign(&remaining, &available, self.scorer, zone_counts);

        let mut double_booked = Vec::new();
        for assignment in outcome.assignments {
            if let Some(seat) = ctx.seat(&assignment.seat_id) {
                if !taken.insert(seat.seat_id.as_str()) {
                    double_booked.push(seat.seat_id.clone());
                }
            }
            if assignment.score.has(tags::ACCESSIBILITY_MISMATCH) {
                let name = ctx
                    .employee(&assignment.employee_id)
                    .map(|e| e.display_name())
                    .unwrap_or(assignment.employee_id.as_str());
                collector.warning(
                    day,
                    Some(&assignment.employee_id),
                    ViolationCode::AccessibilityRelaxed,
                    format!(
                        "{} 需要无障碍座位，宽松模式下分配到非无障碍座位 {}",
                        name, assignment.seat_id
                    ),
                );
            }
            seating
                .scores
                .insert(assignment.employee_id.clone(), assignment.score.total);
            seating
                .seat_assignments
                .insert(assignment.employee_id.clone(), assignment.seat_id);
            seating
                .seat_breakdowns
                .insert(assignment.employee_id, assignment.score);
        }

        // ==========================================
        // 3. 未分配
        // ==========================================
        for id in outcome.unassigned {
            let needs_accessible = ctx
                .employee(&id)
                .map(|e| ctx.needs_accessible(e))
                .unwrap_or(false);
            let name = ctx
                .employee(&id)
                .map(|e| e.display_name().to_string())
                .unwrap_or_else(|| id.clone());
            if needs_accessible && ctx.enforce() {
                collector.error(
                    day,
                    Some(&id),
                    ViolationCode::AccessibleSeatUnavailable,
                    format!("{} 需要无障碍座位，当日无可用无障碍座位", name),
                );
            } else {
                collector.error(
                    day,
                    Some(&id),
                    ViolationCode::NoEligibleSeat,
                    format!("{} 当日无可用座位", name),
                );
            }
            seating.unassigned.push(id);
        }

        // ==========================================
        // 4. 事后检查
        // ==========================================
        self.check_double_booking(day, &seating, double_booked, &mut collector);
        self.check_floor_capacity(day, &seating, &mut collector);
        self.check_team_floor_split(day, &seating, &mut collector);

        seating.unused_seats = ctx
            .seats()
            .filter(|s| !taken.contains(s.seat_id.as_str()))
            .map(|s| s.seat_id.clone())
            .collect();

        debug!(
            assigned = seating.seat_assignments.len(),
            unassigned = seating.unassigned.len(),
            unused = seating.unused_seats.len(),
            "座位匹配完成"
        );

        seating.violations = collector.into_vec();
        seating
    }

    /// 重复占座断言（构造上不可能出现；出现即为缺陷）
    fn check_double_booking(
        &self,
        day: Weekday,
        seating: &DaySeating,
        double_booked: Vec<String>,
        collector: &mut ViolationCollector,
    ) {
        let mut seen = BTreeSet::new();
        let mut duplicates: BTreeSet<String> = double_booked.into_iter().collect();
        for seat_id in seating.seat_assignments.values() {
            if !seen.insert(seat_id.as_str()) {
                duplicates.insert(seat_id.clone());
            }
        }
        debug_assert!(duplicates.is_empty(), "重复占座: {:?}", duplicates);
        for seat_id in duplicates {
            collector.error(
                day,
                None,
                ViolationCode::DoubleBooking,
                format!("座位 {} 当日被重复分配", seat_id),
            );
        }
    }

    /// 楼层容量溢出检查
    fn check_floor_capacity(
        &self,
        day: Weekday,
        seating: &DaySeating,
        collector: &mut ViolationCollector,
    ) {
        let ctx = self.scorer.context();
        let mut per_floor: BTreeMap<i32, u32> = BTreeMap::new();
        for seat_id in seating.seat_assignments.values() {
            if let Some(seat) = ctx.seat(seat_id) {
                *per_floor.entry(seat.floor).or_insert(0) += 1;
            }
        }
        for (floor, assigned) in per_floor {
            let capacity = ctx.floor_capacity(floor);
            if assigned > capacity {
                collector.error(
                    day,
                    None,
                    ViolationCode::FloorCapacityOverflow,
                    format!("{} 层当日分配 {} 人，超过楼层容量 {}", floor, assigned, capacity),
                );
            }
        }
    }

    /// 团队跨楼层检查（允许团队拆分时跳过）
    fn check_team_floor_split(
        &self,
        day: Weekday,
        seating: &DaySeating,
        collector: &mut ViolationCollector,
    ) {
        let ctx = self.scorer.context();
        if ctx.global().allow_team_splitting {
            return;
        }

        for team in ctx.team_constraints() {
            if !team.prefer_same_floor {
                continue;
            }
            let mut seated = 0;
            let mut floors = BTreeSet::new();
            for (employee_id, seat_id) in &seating.seat_assignments {
                let in_team = ctx
                    .employee(employee_id)
                    .and_then(|e| e.team.as_deref())
                    .map(|t| t == team.team_name)
                    .unwrap_or(false);
                if !in_team {
                    continue;
                }
                if let Some(seat) = ctx.seat(seat_id) {
                    seated += 1;
                    floors.insert(seat.floor);
                }
            }
            if seated > 1 && floors.len() > 1 {
                let floors: Vec<String> = floors.iter().map(|f| f.to_string()).collect();
                collector.warning(
                    day,
                    None,
                    ViolationCode::TeamFloorSplit,
                    format!(
                        "团队 {} 当日分散在 {} 层",
                        team.team_name,
                        floors.join("/")
                    ),
                );
            }
        }
    }
}
