// ==========================================
// 混合办公排座系统 - 排班上下文
// ==========================================
// 职责: 运行期只读查找表（员工/座位/约束/人数统计）+ 运行选项
// 红线: 构建后不可变；所有遍历按ID有序，保证结果确定
// ==========================================

use crate::config::ScoringWeights;
use crate::domain::capacity::DailyCapacity;
use crate::domain::constraint::{EmployeeConstraint, GlobalConstraints, SeatLock, TeamConstraint};
use crate::domain::employee::Employee;
use crate::domain::seat::Seat;
use crate::domain::snapshot::ScheduleSnapshot;
use crate::domain::types::Weekday;
use crate::engine::strategy::SolverMode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 默认部门日到岗比例
pub const DEFAULT_DEPARTMENT_CAPACITY_PCT: f64 = 0.6;

/// 默认历史回溯天数（连续到岗种子）
pub const DEFAULT_HISTORY_LOOKBACK_DAYS: u32 = 14;

// ==========================================
// SchedulingOptions - 运行选项
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingOptions {
    pub enforce_constraints: bool, // false: 硬约束降级为警告（座位池与日容量仍然约束）
    pub override_ratios: bool,     // true: 跳过客户现场预分配
    pub daily_capacities: BTreeMap<Weekday, DailyCapacity>,
    pub department_capacity_pct: f64,
    pub solver_mode: SolverMode,
    pub history_lookback_days: u32,
    pub weights: ScoringWeights, // 已与覆写合并
}

impl Default for SchedulingOptions {
    fn default() -> Self {
        Self {
            enforce_constraints: true,
            override_ratios: false,
            daily_capacities: BTreeMap::new(),
            department_capacity_pct: DEFAULT_DEPARTMENT_CAPACITY_PCT,
            solver_mode: SolverMode::default(),
            history_lookback_days: DEFAULT_HISTORY_LOOKBACK_DAYS,
            weights: ScoringWeights::default(),
        }
    }
}

// ==========================================
// SchedulingContext - 排班上下文
// ==========================================
pub struct SchedulingContext<'a> {
    pub snapshot: &'a ScheduleSnapshot,
    pub options: &'a SchedulingOptions,
    pub week_start: NaiveDate,

    employees: BTreeMap<&'a str, &'a Employee>,
    seats: BTreeMap<&'a str, &'a Seat>,
    employee_constraints: BTreeMap<&'a str, &'a EmployeeConstraint>,
    team_constraints: BTreeMap<&'a str, &'a TeamConstraint>,
    department_headcount: BTreeMap<&'a str, usize>,
    team_headcount: BTreeMap<&'a str, usize>,
}

impl<'a> SchedulingContext<'a> {
    /// 构建上下文
    ///
    /// # 参数
    /// - `snapshot`: 已校验的输入快照
    /// - `week_start`: 目标周的周一
    /// - `options`: 运行选项
    pub fn new(
        snapshot: &'a ScheduleSnapshot,
        week_start: NaiveDate,
        options: &'a SchedulingOptions,
    ) -> Self {
        let employees: BTreeMap<&str, &Employee> = snapshot
            .employees
            .iter()
            .map(|e| (e.employee_id.as_str(), e))
            .collect();

        let mut department_headcount: BTreeMap<&str, usize> = BTreeMap::new();
        let mut team_headcount: BTreeMap<&str, usize> = BTreeMap::new();
        for employee in employees.values() {
            *department_headcount
                .entry(employee.department.as_str())
                .or_insert(0) += 1;
            if let Some(team) = employee.team.as_deref() {
                *team_headcount.entry(team).or_insert(0) += 1;
            }
        }

        Self {
            snapshot,
            options,
            week_start,
            employees,
            seats: snapshot
                .seats
                .iter()
                .map(|s| (s.seat_id.as_str(), s))
                .collect(),
            employee_constraints: snapshot
                .employee_constraints
                .iter()
                .map(|c| (c.employee_id.as_str(), c))
                .collect(),
            team_constraints: snapshot
                .team_constraints
                .iter()
                .map(|t| (t.team_name.as_str(), t))
                .collect(),
            department_headcount,
            team_headcount,
        }
    }

    // ==========================================
    // 基础查找
    // ==========================================

    pub fn weights(&self) -> &ScoringWeights {
        &self.options.weights
    }

    pub fn global(&self) -> &'a GlobalConstraints {
        &self.snapshot.global_constraints
    }

    pub fn enforce(&self) -> bool {
        self.options.enforce_constraints
    }

    pub fn headcount(&self) -> usize {
        self.employees.len()
    }

    /// 全部员工（按ID升序）
    pub fn employees(&self) -> impl Iterator<Item = &'a Employee> + '_ {
        self.employees.values().copied()
    }

    pub fn employee(&self, employee_id: &str) -> Option<&'a Employee> {
        self.employees.get(employee_id).copied()
    }

    /// 全部座位（按ID升序）
    pub fn seats(&self) -> impl Iterator<Item = &'a Seat> + '_ {
        self.seats.values().copied()
    }

    pub fn seat(&self, seat_id: &str) -> Option<&'a Seat> {
        self.seats.get(seat_id).copied()
    }

    pub fn constraint_for(&self, employee_id: &str) -> Option<&'a EmployeeConstraint> {
        self.employee_constraints.get(employee_id).copied()
    }

    pub fn team_constraint(&self, team_name: &str) -> Option<&'a TeamConstraint> {
        self.team_constraints.get(team_name).copied()
    }

    /// 全部团队约束（按团队名升序）
    pub fn team_constraints(&self) -> impl Iterator<Item = &'a TeamConstraint> + '_ {
        self.team_constraints.values().copied()
    }

    pub fn team_constraint_for(&self, employee: &Employee) -> Option<&'a TeamConstraint> {
        employee
            .team
            .as_deref()
            .and_then(|team| self.team_constraint(team))
    }

    // ==========================================
    // 偏好合并（员工约束覆盖员工主数据）
    // ==========================================

    /// 是否需要无障碍座位（员工标记或员工约束任一为真）
    pub fn needs_accessible(&self, employee: &Employee) -> bool {
        employee.needs_accessible
            || self
                .constraint_for(&employee.employee_id)
                .map(|c| c.needs_accessible_seat)
                .unwrap_or(false)
    }

    pub fn prefers_day(&self, employee: &Employee, day: Weekday) -> bool {
        employee.prefers_day(day)
            || self
                .constraint_for(&employee.employee_id)
                .map(|c| c.preferred_days.contains(&day))
                .unwrap_or(false)
    }

    pub fn avoids_day(&self, employee: &Employee, day: Weekday) -> bool {
        self.constraint_for(&employee.employee_id)
            .map(|c| c.avoids(day))
            .unwrap_or(false)
    }

    pub fn team_prefers_day(&self, employee: &Employee, day: Weekday) -> bool {
        self.team_constraint_for(employee)
            .map(|t| t.preferred_days.contains(&day))
            .unwrap_or(false)
    }

    pub fn preferred_zone<'e>(&'e self, employee: &'e Employee) -> Option<&'e str> {
        self.constraint_for(&employee.employee_id)
            .and_then(|c| c.preferred_zone.as_deref())
            .or(employee.preferred_zone.as_deref())
    }

    pub fn preferred_floor(&self, employee: &Employee) -> Option<i32> {
        self.constraint_for(&employee.employee_id)
            .and_then(|c| c.preferred_floor)
            .or(employee.preferred_floor)
    }

    pub fn max_weekly_days(&self, employee: &Employee) -> Option<u32> {
        self.constraint_for(&employee.employee_id)
            .and_then(|c| c.max_weekly_office_days)
    }

    // ==========================================
    // 容量
    // ==========================================

    /// 默认日容量: 楼层容量总和；未配置楼层容量时退化为座位总数
    pub fn total_capacity(&self) -> u32 {
        let configured = self.global().total_floor_capacity();
        if configured > 0 {
            configured
        } else {
            self.seats.len() as u32
        }
    }

    /// 指定工作日的日容量
    pub fn day_capacity(&self, day: Weekday) -> u32 {
        let total = self.total_capacity();
        self.options
            .daily_capacities
            .get(&day)
            .map(|cap| cap.resolve(total))
            .unwrap_or(total)
    }

    /// 楼层容量: 配置值；未配置时为该楼层座位数
    pub fn floor_capacity(&self, floor: i32) -> u32 {
        self.global()
            .floor_capacity(floor)
            .unwrap_or_else(|| self.seats().filter(|s| s.floor == floor).count() as u32)
    }

    /// 参与统计的全部楼层（配置楼层 ∪ 座位楼层，升序）
    pub fn floors(&self) -> Vec<i32> {
        let mut floors: Vec<i32> = self
            .global()
            .floor_capacities
            .keys()
            .copied()
            .chain(self.seats().map(|s| s.floor))
            .collect();
        floors.sort_unstable();
        floors.dedup();
        floors
    }

    pub fn department_headcount(&self, department: &str) -> usize {
        self.department_headcount
            .get(department)
            .copied()
            .unwrap_or(0)
    }

    pub fn team_headcount(&self, team: &str) -> usize {
        self.team_headcount.get(team).copied().unwrap_or(0)
    }

    /// 部门日上限
    ///
    /// 规则: floor(pct × 部门人数)；单人部门在 pct < 1 时上限为 0
    pub fn department_cap(&self, department: &str) -> u32 {
        let pct = self.options.department_capacity_pct;
        if pct <= 0.0 {
            return 0;
        }
        let headcount = self.department_headcount(department);
        (pct.min(1.0) * headcount as f64).floor() as u32
    }

    // ==========================================
    // 座位锁定
    // ==========================================

    /// 员工在指定日期生效的锁定（多条时取开始日期最早、座位ID最小者）
    pub fn active_lock(&self, employee_id: &str, date: NaiveDate) -> Option<&'a SeatLock> {
        self.snapshot
            .seat_locks
            .iter()
            .filter(|lock| lock.employee_id == employee_id && lock.covers(date))
            .min_by(|a, b| {
                a.start_date
                    .cmp(&b.start_date)
                    .then_with(|| a.seat_id.cmp(&b.seat_id))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::LockType;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn snapshot() -> ScheduleSnapshot {
        let mut e1 = Employee::new("E1", "ENG");
        e1.preferred_zone = Some("A".to_string());
        e1.preferred_floor = Some(1);
        let e2 = Employee::new("E2", "ENG");
        let e3 = Employee::new("E3", "OPS");

        let mut c1 = EmployeeConstraint::new("E1");
        c1.preferred_zone = Some("B".to_string());
        c1.needs_accessible_seat = true;
        c1.avoid_days = vec![Weekday::Fri];

        let mut snapshot = ScheduleSnapshot::new(
            vec![e3, e1, e2],
            vec![Seat::new("S2", 2, "B"), Seat::new("S1", 1, "A")],
        );
        snapshot.employee_constraints.push(c1);
        snapshot
    }

    #[test]
    fn test_constraint_overrides_employee_preferences() {
        let snapshot = snapshot();
        let options = SchedulingOptions::default();
        let ctx = SchedulingContext::new(&snapshot, monday(), &options);

        let e1 = ctx.employee("E1").unwrap();
        assert_eq!(ctx.preferred_zone(e1), Some("B"));
        assert_eq!(ctx.preferred_floor(e1), Some(1));
        assert!(ctx.needs_accessible(e1));
        assert!(ctx.avoids_day(e1, Weekday::Fri));
        assert!(!ctx.avoids_day(e1, Weekday::Mon));
    }

    #[test]
    fn test_iteration_is_sorted_by_id() {
        let snapshot = snapshot();
        let options = SchedulingOptions::default();
        let ctx = SchedulingContext::new(&snapshot, monday(), &options);

        let ids: Vec<&str> = ctx.employees().map(|e| e.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2", "E3"]);
        let seats: Vec<&str> = ctx.seats().map(|s| s.seat_id.as_str()).collect();
        assert_eq!(seats, vec!["S1", "S2"]);
    }

    #[test]
    fn test_capacities() {
        let snapshot = snapshot();
        let mut options = SchedulingOptions::default();
        options
            .daily_capacities
            .insert(Weekday::Tue, DailyCapacity::Percent(50.0));
        let ctx = SchedulingContext::new(&snapshot, monday(), &options);

        assert_eq!(ctx.day_capacity(Weekday::Mon), 98);
        assert_eq!(ctx.day_capacity(Weekday::Tue), 49);
        assert_eq!(ctx.floor_capacity(1), 48);
        assert_eq!(ctx.floor_capacity(7), 0);
        assert_eq!(ctx.floors(), vec![1, 2]);

        // 0.6 × 2 = 1.2 -> 1；0.6 × 1 = 0.6 -> 0
        assert_eq!(ctx.department_cap("ENG"), 1);
        assert_eq!(ctx.department_cap("OPS"), 0);
        assert_eq!(ctx.department_cap("UNKNOWN"), 0);
    }

    #[test]
    fn test_active_lock_lookup() {
        let mut snapshot = snapshot();
        snapshot.seat_locks.push(SeatLock {
            seat_id: "S2".to_string(),
            employee_id: "E2".to_string(),
            lock_type: LockType::Temporary,
            start_date: monday(),
            end_date: monday(),
        });
        let options = SchedulingOptions::default();
        let ctx = SchedulingContext::new(&snapshot, monday(), &options);

        assert!(ctx.active_lock("E2", monday()).is_some());
        assert!(ctx
            .active_lock("E2", Weekday::Tue.date_in_week(monday()))
            .is_none());
        assert!(ctx.active_lock("E1", monday()).is_none());
    }
}
