// ==========================================
// Repository 层集成测试
// ==========================================
// 测试目标: 种子写入 → 快照读取与校验 → 引擎 → 整体替换落库 → 重新打开读取
// ==========================================

mod helpers;

use chrono::{Duration, NaiveDate};
use helpers::api_test_helper::seed_snapshot;
use helpers::test_data_builder::{
    mixed_snapshot, monday, scenario_options, EmployeeBuilder, SeatBuilder, SnapshotBuilder,
};
use office_seat_planner::app::AppState;
use office_seat_planner::domain::{AttendanceLocation, AttendanceRecord};
use office_seat_planner::engine::scoring::tags;
use office_seat_planner::engine::SchedulingOptions;
use office_seat_planner::logging;
use office_seat_planner::validation::validate_snapshot;
use office_seat_planner::{ScheduleAssembler, Weekday};
use test_helpers::create_test_db;

fn office(employee_id: &str, date: NaiveDate) -> AttendanceRecord {
    AttendanceRecord {
        employee_id: employee_id.to_string(),
        date,
        location: AttendanceLocation::Office,
    }
}

#[test]
fn test_seeded_snapshot_survives_store_roundtrip() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let state = AppState::new(db_path).expect("Failed to create AppState");

    let snapshot = mixed_snapshot();
    seed_snapshot(&state.snapshot_repo, &snapshot).expect("Failed to seed");

    let raw = state.snapshot_repo.load_raw(monday(), 14).unwrap();
    let loaded = validate_snapshot(&raw).expect("seeded snapshot must validate");

    assert_eq!(loaded.employees.len(), 24);
    assert_eq!(loaded.seats.len(), 14);
    assert_eq!(loaded.global_constraints, snapshot.global_constraints);
    assert_eq!(loaded.seat_locks, snapshot.seat_locks);

    // 经由数据存储读取的快照与内存快照产生相同排班
    let options = SchedulingOptions::default();
    let from_store = ScheduleAssembler::new()
        .generate(&loaded, monday(), &options)
        .unwrap();
    let in_memory = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &options)
        .unwrap();
    assert_eq!(from_store, in_memory);
}

#[test]
fn test_week_persisted_on_disk_and_replaced_in_full() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let snapshot = mixed_snapshot();

    let first_id;
    let second_id;
    let second_schedule;
    {
        let state = AppState::new(db_path.clone()).expect("Failed to create AppState");
        seed_snapshot(&state.snapshot_repo, &snapshot).expect("Failed to seed");

        let first = ScheduleAssembler::new()
            .generate(&snapshot, monday(), &SchedulingOptions::default())
            .unwrap();
        first_id = state.schedule_repo.replace_week(&first, true, None).unwrap();

        let mut relaxed = SchedulingOptions::default();
        relaxed.enforce_constraints = false;
        second_schedule = ScheduleAssembler::new()
            .generate(&snapshot, monday(), &relaxed)
            .unwrap();
        second_id = state
            .schedule_repo
            .replace_week(&second_schedule, false, Some("{\"enforce\":false}"))
            .unwrap();
    }

    // 重新打开同一文件
    let state = AppState::new(db_path).expect("Failed to reopen AppState");
    assert_eq!(state.schedule_repo.list_weeks().unwrap(), vec![monday()]);
    assert_eq!(state.schedule_repo.count_assignments(&first_id).unwrap(), 0);

    let stored = state.schedule_repo.load_week(monday()).unwrap().unwrap();
    assert_eq!(stored.schedule_id, second_id);
    assert!(!stored.enforce_constraints);
    assert_eq!(
        stored.config_snapshot_json.as_deref(),
        Some("{\"enforce\":false}")
    );
    assert_eq!(stored.schedule, second_schedule);
    assert_eq!(
        state.schedule_repo.count_assignments(&second_id).unwrap(),
        second_schedule.metrics.total_assignments
    );
}

#[test]
fn test_history_seeds_monday_consecutive_count() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let state = AppState::new(db_path).expect("Failed to create AppState");

    let snapshot = SnapshotBuilder::new()
        .max_consecutive(3)
        .employee(EmployeeBuilder::new("E1").onsite(1.0).build())
        .employee(EmployeeBuilder::new("E2").build())
        .seat(SeatBuilder::new("S1", 1, "A").build())
        .seat(SeatBuilder::new("S2", 1, "A").build())
        .build();
    seed_snapshot(&state.snapshot_repo, &snapshot).unwrap();

    // 上周三~周五到岗（周末不打断），更早的周二缺勤
    let prior_friday = monday() - Duration::days(3);
    let history = vec![
        office("E1", prior_friday),
        office("E1", prior_friday - Duration::days(1)),
        office("E1", prior_friday - Duration::days(2)),
        office("E2", prior_friday - Duration::days(3)),
        // 目标周内的记录不参与种子
        office("E2", monday()),
    ];
    assert_eq!(state.snapshot_repo.insert_attendance(&history).unwrap(), 5);

    let raw = state.snapshot_repo.load_raw(monday(), 14).unwrap();
    assert_eq!(raw.attendance_history.len(), 4);
    let loaded = validate_snapshot(&raw).unwrap();

    let schedule = ScheduleAssembler::new()
        .generate(&loaded, monday(), &scenario_options())
        .unwrap();

    let mon = schedule.day(Weekday::Mon).unwrap();
    assert!(!mon.attends("E1"));
    assert_eq!(
        mon.excluded.get("E1"),
        Some(&vec![tags::MAX_CONSECUTIVE_EXCEEDED.to_string()])
    );
    assert!(mon.attends("E2"));

    // 周一缺勤后连续计数归零
    assert!(schedule.day(Weekday::Tue).unwrap().attends("E1"));
}

#[test]
fn test_delete_week_removes_schedule() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let state = AppState::new(db_path).expect("Failed to create AppState");

    let snapshot = SnapshotBuilder::new()
        .employee(EmployeeBuilder::new("E1").build())
        .seat(SeatBuilder::new("S1", 1, "A").build())
        .build();
    let schedule = ScheduleAssembler::new()
        .generate(&snapshot, monday(), &scenario_options())
        .unwrap();
    let schedule_id = state.schedule_repo.replace_week(&schedule, true, None).unwrap();
    assert_eq!(state.schedule_repo.count_assignments(&schedule_id).unwrap(), 5);

    assert!(state.schedule_repo.delete_week(monday()).unwrap());
    assert!(!state.schedule_repo.delete_week(monday()).unwrap());
    assert!(state.schedule_repo.load_week(monday()).unwrap().is_none());
    assert_eq!(state.schedule_repo.count_assignments(&schedule_id).unwrap(), 0);
}
