// ==========================================
// 周排班场景测试
// ==========================================
// 测试目标: 无障碍优先 / 周上限 / 部门上限 / 锁定座位 / 团队跨楼层
// ==========================================

mod helpers;

use helpers::test_data_builder::{
    monday, scenario_options, EmployeeBuilder, SeatBuilder, SnapshotBuilder,
};
use office_seat_planner::domain::{EmployeeConstraint, Severity, TeamConstraint};
use office_seat_planner::engine::scoring::tags;
use office_seat_planner::{ScheduleAssembler, SolverMode, ViolationCode, Weekday};

// ==========================================
// 场景1: 无障碍员工 + 容量 2
// ==========================================

#[test]
fn test_accessible_employee_seated_and_capacity_loser_warned() {
    // dayFitness: E1 = 20+30+30 = 80, E2 = 36+30+10 = 76, E3 = 8+30+10 = 48
    let snapshot = SnapshotBuilder::new()
        .employee(EmployeeBuilder::new("E1").accessible().priority(3.0).build())
        .employee(EmployeeBuilder::new("E2").onsite(0.9).build())
        .employee(EmployeeBuilder::new("E3").onsite(0.2).build())
        .seat(SeatBuilder::new("S1", 1, "A").accessible().build())
        .seat(SeatBuilder::new("S2", 1, "A").build())
        .floor_capacity(1, 2)
        .build();

    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &scenario_options())
        .unwrap();

    assert_eq!(schedule.days.len(), 5);
    for plan in &schedule.days {
        assert_eq!(plan.capacity, 2);
        assert_eq!(plan.attendees, vec!["E1".to_string(), "E2".to_string()]);
        assert_eq!(plan.seat_of("E1"), Some("S1"));
        assert_eq!(plan.seat_of("E2"), Some("S2"));
        assert!(!plan.attends("E3"));
        assert!(plan.unassigned.is_empty());
        assert_eq!(
            plan.excluded.get("E3"),
            Some(&vec![tags::DAY_CAPACITY_REACHED.to_string()])
        );
        assert!(plan.assignment_reasons["E1"].contains(&tags::ACCESSIBLE_MATCH.to_string()));
    }

    // 容量是限制因素: 只有 warning，没有 error
    assert!(!schedule.has_errors());
    let capacity_warnings: Vec<_> = schedule
        .violations
        .iter()
        .filter(|v| v.code == ViolationCode::DayCapacityReached)
        .collect();
    assert_eq!(capacity_warnings.len(), 5);
    assert!(capacity_warnings
        .iter()
        .all(|v| v.employee_id.as_deref() == Some("E3") && v.severity == Severity::Warning));
}

#[test]
fn test_accessible_seat_shortage_is_an_error_not_a_mismatch() {
    let snapshot = SnapshotBuilder::new()
        .employee(EmployeeBuilder::new("E1").accessible().priority(3.0).build())
        .employee(EmployeeBuilder::new("E2").accessible().build())
        .seat(SeatBuilder::new("S1", 1, "A").accessible().build())
        .seat(SeatBuilder::new("S2", 1, "A").build())
        .build();

    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &scenario_options())
        .unwrap();

    let mon = schedule.day(Weekday::Mon).unwrap();
    assert_eq!(mon.seat_of("E1"), Some("S1"));
    assert_eq!(mon.seat_of("E2"), None);
    assert_eq!(mon.unassigned, vec!["E2".to_string()]);
    assert_eq!(mon.unused_seats, vec!["S2".to_string()]);

    let errors: Vec<_> = schedule
        .violations_for(Weekday::Mon)
        .filter(|v| v.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ViolationCode::AccessibleSeatUnavailable);
    assert_eq!(errors[0].employee_id.as_deref(), Some("E2"));
}

#[test]
fn test_relaxed_mode_places_accessible_employee_with_warning() {
    let snapshot = SnapshotBuilder::new()
        .employee(EmployeeBuilder::new("E1").accessible().priority(3.0).build())
        .employee(EmployeeBuilder::new("E2").accessible().build())
        .seat(SeatBuilder::new("S1", 1, "A").accessible().build())
        .seat(SeatBuilder::new("S2", 1, "A").build())
        .build();
    let mut options = scenario_options();
    options.enforce_constraints = false;

    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &options)
        .unwrap();

    let mon = schedule.day(Weekday::Mon).unwrap();
    assert_eq!(mon.seat_of("E1"), Some("S1"));
    assert_eq!(mon.seat_of("E2"), Some("S2"));
    assert!(mon.assignment_reasons["E2"].contains(&tags::ACCESSIBILITY_MISMATCH.to_string()));
    assert!(schedule
        .violations_for(Weekday::Mon)
        .any(|v| v.code == ViolationCode::AccessibilityRelaxed
            && v.employee_id.as_deref() == Some("E2")
            && v.severity == Severity::Warning));
}

// ==========================================
// 场景2: 周到岗上限 2
// ==========================================

#[test]
fn test_weekly_limit_caps_top_ranked_employee() {
    let mut limit = EmployeeConstraint::new("E1");
    limit.max_weekly_office_days = Some(2);

    let snapshot = SnapshotBuilder::new()
        .employee(EmployeeBuilder::new("E1").onsite(1.0).priority(5.0).build())
        .employee(EmployeeBuilder::new("E2").build())
        .employee(EmployeeBuilder::new("E3").build())
        .seat(SeatBuilder::new("S1", 1, "A").build())
        .seat(SeatBuilder::new("S2", 1, "A").build())
        .seat(SeatBuilder::new("S3", 1, "A").build())
        .constraint(limit)
        .build();

    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &scenario_options())
        .unwrap();

    let attended: Vec<Weekday> = schedule
        .days
        .iter()
        .filter(|plan| plan.attends("E1"))
        .map(|plan| plan.day)
        .collect();
    assert_eq!(attended, vec![Weekday::Mon, Weekday::Tue]);

    // 前两天排名第一
    assert_eq!(schedule.day(Weekday::Mon).unwrap().attendees[0], "E1");

    for day in [Weekday::Wed, Weekday::Thu, Weekday::Fri] {
        let plan = schedule.day(day).unwrap();
        assert_eq!(
            plan.excluded.get("E1"),
            Some(&vec![tags::WEEKLY_LIMIT_REACHED.to_string()])
        );
        assert!(schedule.violations_for(day).any(|v| {
            v.code == ViolationCode::WeeklyLimitReached && v.employee_id.as_deref() == Some("E1")
        }));
    }
}

#[test]
fn test_weekly_limit_is_only_a_penalty_when_relaxed() {
    let mut limit = EmployeeConstraint::new("E1");
    limit.max_weekly_office_days = Some(2);

    let snapshot = SnapshotBuilder::new()
        .employee(EmployeeBuilder::new("E1").onsite(1.0).priority(5.0).build())
        .seat(SeatBuilder::new("S1", 1, "A").build())
        .constraint(limit)
        .build();
    let mut options = scenario_options();
    options.enforce_constraints = false;

    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &options)
        .unwrap();

    // 无竞争者: 降权后仍被接纳，每个超限日给出 warning
    assert!(schedule.days.iter().all(|plan| plan.attends("E1")));
    let wed = schedule.day(Weekday::Wed).unwrap();
    assert_eq!(wed.attendance_scores["E1"], 120.0 - 150.0);
    let weekly_warnings = schedule
        .violations
        .iter()
        .filter(|v| v.code == ViolationCode::WeeklyLimitReached)
        .count();
    assert_eq!(weekly_warnings, 3);
}

// ==========================================
// 场景2b: 部门日上限 floor(pct × 部门人数)
// ==========================================

#[test]
fn test_department_cap_floors_to_zero_for_single_member_department() {
    // ENG 1 人: floor(0.6 × 1) = 0；OPS 3 人: floor(0.6 × 3) = 1
    let snapshot = SnapshotBuilder::new()
        .employee(EmployeeBuilder::new("E1").department("ENG").priority(5.0).build())
        .employee(EmployeeBuilder::new("O1").department("OPS").priority(3.0).build())
        .employee(EmployeeBuilder::new("O2").department("OPS").build())
        .employee(EmployeeBuilder::new("O3").department("OPS").build())
        .seat(SeatBuilder::new("S1", 1, "A").build())
        .seat(SeatBuilder::new("S2", 1, "A").build())
        .seat(SeatBuilder::new("S3", 1, "A").build())
        .seat(SeatBuilder::new("S4", 1, "A").build())
        .build();
    let mut options = scenario_options();
    options.department_capacity_pct = 0.6;

    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &options)
        .unwrap();

    for plan in &schedule.days {
        assert_eq!(plan.attendees, vec!["O1".to_string()], "{}", plan.day);
        assert!(!plan.attends("E1"));
        assert!(plan.excluded["E1"].contains(&tags::DEPT_CAP_EXCEEDED.to_string()));
        assert!(plan.excluded["O2"].contains(&tags::DEPT_CAP_EXCEEDED.to_string()));
        assert!(schedule.violations_for(plan.day).any(|v| {
            v.code == ViolationCode::DeptCapExceeded && v.employee_id.as_deref() == Some("E1")
        }));
    }
}

// ==========================================
// 场景3: 整周锁定 E5 -> S7
// ==========================================

#[test]
fn test_locked_seat_bypasses_scoring_all_week() {
    let mut builder = SnapshotBuilder::new();
    builder = builder.employee(EmployeeBuilder::new("E1").window().onsite(0.9).build());
    for id in ["E2", "E3", "E4", "E5"] {
        builder = builder.employee(EmployeeBuilder::new(id).build());
    }
    for id in ["S1", "S2", "S3", "S4", "S5", "S6"] {
        builder = builder.seat(SeatBuilder::new(id, 1, "A").build());
    }
    // S7 是唯一靠窗座位，E1 偏好靠窗
    let snapshot = builder
        .seat(SeatBuilder::new("S7", 1, "A").window().build())
        .lock_week("E5", "S7")
        .build();

    for solver in [SolverMode::Greedy, SolverMode::Optimal] {
        let mut options = scenario_options();
        options.solver_mode = solver;
        let schedule = ScheduleAssembler::new()
            .generate(&snapshot, monday(), &options)
            .unwrap();

        for plan in &schedule.days {
            assert_eq!(plan.seat_of("E5"), Some("S7"), "{} {}", solver, plan.day);
            assert_eq!(plan.locked, vec!["E5".to_string()]);
            assert!(!plan.assignment_scores.contains_key("E5"));
            assert!(!plan.assignment_reasons.contains_key("E5"));
            assert!(plan
                .seat_assignments
                .iter()
                .all(|(employee, seat)| employee == "E5" || seat != "S7"));
            assert_ne!(plan.seat_of("E1"), Some("S7"));
        }
        assert!(!schedule.has_errors());
    }
}

#[test]
fn test_lock_on_unknown_seat_falls_back_to_matching() {
    let snapshot = SnapshotBuilder::new()
        .employee(EmployeeBuilder::new("E5").build())
        .seat(SeatBuilder::new("S1", 1, "A").build())
        .lock_week("E5", "S99")
        .build();

    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &scenario_options())
        .unwrap();

    let mon = schedule.day(Weekday::Mon).unwrap();
    assert_eq!(mon.seat_of("E5"), Some("S1"));
    assert!(mon.locked.is_empty());
    assert!(mon.assignment_scores.contains_key("E5"));
    assert!(schedule.violations_for(Weekday::Mon).any(|v| {
        v.code == ViolationCode::LockConflict && v.severity == Severity::Error
    }));
}

#[test]
fn test_relaxed_lock_on_inaccessible_seat_is_honoured_with_warning() {
    let snapshot = SnapshotBuilder::new()
        .employee(EmployeeBuilder::new("E1").accessible().build())
        .seat(SeatBuilder::new("S1", 1, "A").build())
        .seat(SeatBuilder::new("S2", 1, "A").accessible().build())
        .lock_week("E1", "S1")
        .build();
    let mut options = scenario_options();
    options.enforce_constraints = false;

    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &options)
        .unwrap();

    for plan in &schedule.days {
        assert_eq!(plan.seat_of("E1"), Some("S1"));
        assert_eq!(plan.locked, vec!["E1".to_string()]);
        let relaxed: Vec<_> = schedule
            .violations_for(plan.day)
            .filter(|v| v.code == ViolationCode::AccessibilityRelaxed)
            .collect();
        assert_eq!(relaxed.len(), 1, "{}", plan.day);
        assert_eq!(relaxed[0].employee_id.as_deref(), Some("E1"));
        assert_eq!(relaxed[0].severity, Severity::Warning);
    }
    assert!(!schedule.has_errors());
}

// ==========================================
// 场景4: 团队同楼层偏好 + 楼层座位不足
// ==========================================

#[test]
fn test_team_split_across_floors_warns_once_per_day() {
    let mut team = TeamConstraint::new("T");
    team.prefer_same_floor = true;

    let mut builder = SnapshotBuilder::new().team(team);
    for id in ["T1", "T2", "T3", "T4"] {
        builder = builder.employee(EmployeeBuilder::new(id).team("T").floor(1).build());
    }
    let snapshot = builder
        .seat(SeatBuilder::new("F1-1", 1, "A").build())
        .seat(SeatBuilder::new("F1-2", 1, "A").build())
        .seat(SeatBuilder::new("F1-3", 1, "A").build())
        .seat(SeatBuilder::new("F2-1", 2, "B").build())
        .build();

    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &scenario_options())
        .unwrap();

    for plan in &schedule.days {
        assert_eq!(plan.seat_assignments.len(), 4);
        let on_floor_one = plan
            .seat_assignments
            .values()
            .filter(|seat| seat.starts_with("F1-"))
            .count();
        assert_eq!(on_floor_one, 3);

        let splits: Vec<_> = schedule
            .violations_for(plan.day)
            .filter(|v| v.code == ViolationCode::TeamFloorSplit)
            .collect();
        assert_eq!(splits.len(), 1, "{}", plan.day);
        assert_eq!(splits[0].severity, Severity::Warning);
        assert!(splits[0].message.contains("T"));
        assert!(splits[0].employee_id.is_none());
    }
}

#[test]
fn test_team_split_check_skipped_when_splitting_allowed() {
    let mut team = TeamConstraint::new("T");
    team.prefer_same_floor = true;

    let mut snapshot = SnapshotBuilder::new()
        .team(team)
        .employee(EmployeeBuilder::new("T1").team("T").floor(1).build())
        .employee(EmployeeBuilder::new("T2").team("T").floor(1).build())
        .seat(SeatBuilder::new("F1-1", 1, "A").build())
        .seat(SeatBuilder::new("F2-1", 2, "B").build())
        .build();
    snapshot.global_constraints.allow_team_splitting = true;

    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &scenario_options())
        .unwrap();

    assert!(schedule
        .violations
        .iter()
        .all(|v| v.code != ViolationCode::TeamFloorSplit));
}
