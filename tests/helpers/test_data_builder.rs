// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use office_seat_planner::domain::{
    EmployeeConstraint, GlobalConstraints, LockType, SeatLock, TeamConstraint,
};
use office_seat_planner::engine::SchedulingOptions;
use office_seat_planner::{Employee, ScheduleSnapshot, Seat, Weekday};
use std::collections::BTreeMap;

/// 测试周的周一
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

/// 测试周的周五
pub fn friday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 6).unwrap()
}

/// 场景测试常用选项: 不做客户现场预分配、部门上限不参与
pub fn scenario_options() -> SchedulingOptions {
    SchedulingOptions {
        override_ratios: true,
        department_capacity_pct: 1.0,
        ..SchedulingOptions::default()
    }
}

// ==========================================
// Employee 构建器
// ==========================================

pub struct EmployeeBuilder {
    employee: Employee,
}

impl EmployeeBuilder {
    pub fn new(employee_id: &str) -> Self {
        Self {
            employee: Employee::new(employee_id, "ENG"),
        }
    }

    pub fn department(mut self, department: &str) -> Self {
        self.employee.department = department.to_string();
        self
    }

    pub fn team(mut self, team: &str) -> Self {
        self.employee.team = Some(team.to_string());
        self
    }

    pub fn priority(mut self, priority: f64) -> Self {
        self.employee.priority_level = priority;
        self
    }

    pub fn onsite(mut self, ratio: f64) -> Self {
        self.employee.onsite_ratio = ratio;
        self
    }

    pub fn client_site(mut self, ratio: f64) -> Self {
        self.employee.client_site_ratio = ratio;
        self
    }

    pub fn accessible(mut self) -> Self {
        self.employee.needs_accessible = true;
        self
    }

    pub fn window(mut self) -> Self {
        self.employee.prefer_window = true;
        self
    }

    pub fn floor(mut self, floor: i32) -> Self {
        self.employee.preferred_floor = Some(floor);
        self
    }

    pub fn zone(mut self, zone: &str) -> Self {
        self.employee.preferred_zone = Some(zone.to_string());
        self
    }

    pub fn days(mut self, days: &[Weekday]) -> Self {
        self.employee.preferred_days = days.to_vec();
        self
    }

    pub fn build(self) -> Employee {
        self.employee
    }
}

// ==========================================
// Seat 构建器
// ==========================================

pub struct SeatBuilder {
    seat: Seat,
}

impl SeatBuilder {
    pub fn new(seat_id: &str, floor: i32, zone: &str) -> Self {
        Self {
            seat: Seat::new(seat_id, floor, zone),
        }
    }

    pub fn accessible(mut self) -> Self {
        self.seat.is_accessible = true;
        self
    }

    pub fn window(mut self) -> Self {
        self.seat.is_window = true;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.seat.x = x;
        self.seat.y = y;
        self
    }

    pub fn build(self) -> Seat {
        self.seat
    }
}

// ==========================================
// ScheduleSnapshot 构建器
// ==========================================

pub struct SnapshotBuilder {
    snapshot: ScheduleSnapshot,
}

impl SnapshotBuilder {
    /// 空快照；全局约束: 连续上限 5、客户现场比例 0、楼层容量按座位推算
    pub fn new() -> Self {
        let mut snapshot = ScheduleSnapshot::default();
        snapshot.global_constraints = GlobalConstraints {
            min_client_site_ratio: 0.0,
            max_client_site_ratio: 0.0,
            max_consecutive_office_days: 5,
            floor_capacities: BTreeMap::new(),
            allow_team_splitting: false,
        };
        Self { snapshot }
    }

    pub fn employee(mut self, employee: Employee) -> Self {
        self.snapshot.employees.push(employee);
        self
    }

    pub fn seat(mut self, seat: Seat) -> Self {
        self.snapshot.seats.push(seat);
        self
    }

    pub fn floor_capacity(mut self, floor: i32, capacity: u32) -> Self {
        self.snapshot
            .global_constraints
            .floor_capacities
            .insert(floor, capacity);
        self
    }

    pub fn max_consecutive(mut self, days: u32) -> Self {
        self.snapshot.global_constraints.max_consecutive_office_days = days;
        self
    }

    pub fn client_site_ratio(mut self, min: f64, max: f64) -> Self {
        self.snapshot.global_constraints.min_client_site_ratio = min;
        self.snapshot.global_constraints.max_client_site_ratio = max;
        self
    }

    pub fn team(mut self, team: TeamConstraint) -> Self {
        self.snapshot.team_constraints.push(team);
        self
    }

    pub fn constraint(mut self, constraint: EmployeeConstraint) -> Self {
        self.snapshot.employee_constraints.push(constraint);
        self
    }

    /// 整周生效的长期锁定
    pub fn lock_week(mut self, employee_id: &str, seat_id: &str) -> Self {
        self.snapshot.seat_locks.push(SeatLock {
            seat_id: seat_id.to_string(),
            employee_id: employee_id.to_string(),
            lock_type: LockType::Permanent,
            start_date: monday(),
            end_date: friday(),
        });
        self
    }

    pub fn build(self) -> ScheduleSnapshot {
        self.snapshot
    }
}

/// 中等规模的混合快照（用于性质测试）
///
/// 24 名员工、3 个部门、3 个团队；14 个座位分布在两层，其中 3 个无障碍座位；
/// 包含员工约束、团队约束与一条锁定
pub fn mixed_snapshot() -> ScheduleSnapshot {
    let departments = ["ENG", "OPS", "SALES"];
    let teams = ["Alpha", "Beta", "Gamma"];
    let mut builder = SnapshotBuilder::new()
        .max_consecutive(3)
        .client_site_ratio(0.1, 0.25)
        .floor_capacity(1, 8)
        .floor_capacity(2, 6);

    for i in 0..24u32 {
        let id = format!("E{:02}", i + 1);
        let mut employee = EmployeeBuilder::new(&id)
            .department(departments[(i % 3) as usize])
            .team(teams[(i % 3) as usize])
            .priority(f64::from(i % 5))
            .onsite(f64::from(i % 10) / 10.0)
            .client_site(if i % 6 == 0 { 0.4 } else { 0.0 });
        if i % 7 == 0 {
            employee = employee.accessible();
        }
        if i % 4 == 0 {
            employee = employee.window();
        }
        if i % 5 == 0 {
            employee = employee.days(&[Weekday::Tue, Weekday::Thu]);
        }
        builder = builder.employee(employee.build());
    }

    for i in 0..8u32 {
        let mut seat = SeatBuilder::new(&format!("F1-{:02}", i + 1), 1, if i < 4 { "A" } else { "B" })
            .at(f64::from(i), 0.0);
        if i < 2 {
            seat = seat.accessible();
        }
        if i % 3 == 0 {
            seat = seat.window();
        }
        builder = builder.seat(seat.build());
    }
    for i in 0..6u32 {
        let mut seat = SeatBuilder::new(&format!("F2-{:02}", i + 1), 2, "C").at(f64::from(i), 1.0);
        if i == 0 {
            seat = seat.accessible();
        }
        builder = builder.seat(seat.build());
    }

    let mut alpha = TeamConstraint::new("Alpha");
    alpha.prefer_same_floor = true;
    alpha.preferred_days = vec![Weekday::Wed];
    let mut beta = TeamConstraint::new("Beta");
    beta.max_members_per_day = Some(4);
    beta.min_copresence_ratio = 0.5;

    let mut weekly = EmployeeConstraint::new("E02");
    weekly.max_weekly_office_days = Some(2);
    let mut avoid = EmployeeConstraint::new("E03");
    avoid.avoid_days = vec![Weekday::Mon, Weekday::Fri];
    let mut needs = EmployeeConstraint::new("E05");
    needs.needs_accessible_seat = true;

    builder
        .team(alpha)
        .team(beta)
        .constraint(weekly)
        .constraint(avoid)
        .constraint(needs)
        .lock_week("E10", "F2-06")
        .build()
}
