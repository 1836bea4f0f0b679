use super::{ScheduleRepository, SCHEDULE_STATUS_GENERATED};
use crate::domain::constraint::SeatLock;
use crate::domain::employee::Employee;
use crate::domain::seat::Seat;
use crate::domain::snapshot::ScheduleSnapshot;
use crate::domain::types::{LockType, Weekday};
use crate::domain::schedule::WeekSchedule;
use crate::engine::{ScheduleAssembler, SchedulingOptions};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

fn setup_test_db() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    crate::db::configure_sqlite_connection(&conn).unwrap();
    crate::db::init_schema(&conn).unwrap();
    Arc::new(Mutex::new(conn))
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn generate(max_consecutive: u32) -> WeekSchedule {
    let mut snapshot = ScheduleSnapshot::new(
        vec![Employee::new("E1", "ENG"), Employee::new("E2", "ENG")],
        vec![Seat::new("S1", 1, "A"), Seat::new("S2", 1, "A"), Seat::new("S3", 2, "B")],
    );
    snapshot.global_constraints.max_consecutive_office_days = max_consecutive;
    snapshot.seat_locks.push(SeatLock {
        seat_id: "S3".to_string(),
        employee_id: "E2".to_string(),
        lock_type: LockType::Permanent,
        start_date: monday(),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
    });
    let options = SchedulingOptions {
        override_ratios: true,
        department_capacity_pct: 1.0,
        ..SchedulingOptions::default()
    };
    ScheduleAssembler::new()
        .generate(&snapshot, monday(), &options)
        .unwrap()
}

#[test]
fn test_replace_week_roundtrip() {
    let repo = ScheduleRepository::from_connection(setup_test_db());
    let schedule = generate(3);

    let schedule_id = repo.replace_week(&schedule, true, Some("{}")).unwrap();
    let stored = repo.load_week(monday()).unwrap().unwrap();

    assert_eq!(stored.schedule_id, schedule_id);
    assert_eq!(stored.status, SCHEDULE_STATUS_GENERATED);
    assert!(stored.enforce_constraints);
    assert_eq!(stored.config_snapshot_json.as_deref(), Some("{}"));
    assert_eq!(stored.schedule, schedule);

    let monday_plan = stored.schedule.day(Weekday::Mon).unwrap();
    assert_eq!(monday_plan.locked, vec!["E2"]);
    assert!(!monday_plan.assignment_scores.contains_key("E2"));
    assert!(!monday_plan.assignment_reasons.contains_key("E2"));
}

#[test]
fn test_regeneration_replaces_in_full() {
    let repo = ScheduleRepository::from_connection(setup_test_db());

    let first = repo.replace_week(&generate(3), true, None).unwrap();
    let second_schedule = generate(5);
    let second = repo.replace_week(&second_schedule, false, None).unwrap();

    assert_ne!(first, second);
    assert_eq!(repo.list_weeks().unwrap(), vec![monday()]);
    assert_eq!(repo.count_assignments(&first).unwrap(), 0);
    assert_eq!(
        repo.count_assignments(&second).unwrap(),
        second_schedule.metrics.total_assignments
    );

    let stored = repo.load_week(monday()).unwrap().unwrap();
    assert_eq!(stored.schedule, second_schedule);
    assert!(!stored.enforce_constraints);
}

#[test]
fn test_missing_week_and_delete() {
    let repo = ScheduleRepository::from_connection(setup_test_db());
    assert!(repo.load_week(monday()).unwrap().is_none());
    assert!(!repo.delete_week(monday()).unwrap());

    repo.replace_week(&generate(3), true, None).unwrap();
    assert!(repo.delete_week(monday()).unwrap());
    assert!(repo.list_weeks().unwrap().is_empty());
}
