// ==========================================
// 混合办公排座系统 - 演示库重置与种子写入
// ==========================================
// 用法: reset_and_seed_demo_db [db_path] [employee_count]
// 说明: 已存在的库先备份为 <db_path>.bak.<时间戳> 再删除
// 数据: 员工/座位/全局约束/团队约束/员工约束/锁定/近两周出勤/默认配置
// ==========================================

use chrono::{Datelike, Duration, Local, NaiveDate};
use std::error::Error;
use std::fs;
use std::path::Path;

use office_seat_planner::app::{get_default_db_path, AppState};
use office_seat_planner::config::config_keys;
use office_seat_planner::domain::{
    AttendanceLocation, AttendanceRecord, EmployeeConstraint, GlobalConstraints, LockType,
    SeatLock, TeamConstraint, WorkMode,
};
use office_seat_planner::repository::SnapshotRepository;
use office_seat_planner::{logging, Employee, Seat, Weekday};

const DEFAULT_EMPLOYEE_COUNT: usize = 120;
const DEPARTMENTS: [&str; 4] = ["ENG", "PRODUCT", "SALES", "OPS"];
const TEAMS: [&str; 6] = ["Atlas", "Borealis", "Comet", "Delta", "Ember", "Fjord"];
const ZONES_PER_FLOOR: [&str; 3] = ["A", "B", "C"];

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    let employee_count = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_EMPLOYEE_COUNT)
        .max(10);

    backup_and_reset_db(&db_path)?;

    let state = AppState::new(db_path.clone())?;
    let week_start = upcoming_monday(Local::now().date_naive());

    seed_config(&state)?;
    seed_demo_snapshot(&state.snapshot_repo, employee_count, week_start)?;

    eprintln!("Seeded {} (target week {})", db_path, week_start);
    print_quick_counts(&state.snapshot_repo)?;
    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

/// 与命令行入口的默认目标周一致（今天是周一则取今天）
fn upcoming_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(i64::from(days_ahead))
}

/// 默认配置（与 ConfigManager 的默认值一致，显式写出便于查看与修改）
fn seed_config(state: &AppState) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = &state.config_manager;
    config.set_global_config_value(config_keys::DEPARTMENT_CAPACITY_PCT, "0.6")?;
    config.set_global_config_value(config_keys::DEFAULT_SOLVER_MODE, "greedy")?;
    config.set_global_config_value(config_keys::ENFORCE_CONSTRAINTS, "true")?;
    config.set_global_config_value(config_keys::HISTORY_LOOKBACK_DAYS, "14")?;
    Ok(())
}

fn seed_demo_snapshot(
    repo: &SnapshotRepository,
    employee_count: usize,
    week_start: NaiveDate,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let global = GlobalConstraints::default();

    // 座位: 每层按楼层容量铺满，三个区域轮转；每层前两个座位为无障碍座位
    let mut seat_ids = Vec::new();
    for (&floor, &capacity) in &global.floor_capacities {
        for idx in 0..capacity {
            let zone = ZONES_PER_FLOOR[idx as usize % ZONES_PER_FLOOR.len()];
            let mut seat = Seat::new(&format!("F{}-{:03}", floor, idx + 1), floor, zone);
            seat.is_window = idx % 8 == 0 || idx % 8 == 7;
            seat.is_accessible = idx < 2;
            seat.x = f64::from(idx % 10);
            seat.y = f64::from(idx / 10);
            repo.upsert_seat(&seat)?;
            seat_ids.push(seat.seat_id);
        }
    }
    repo.save_global_constraints(&global)?;

    // 员工
    for i in 0..employee_count {
        repo.upsert_employee(&demo_employee(i))?;
    }

    // 团队约束
    for (idx, name) in TEAMS.iter().enumerate() {
        let mut team = TeamConstraint::new(name);
        team.prefer_same_floor = idx % 2 == 0;
        team.prefer_adjacent_seats = idx % 3 == 0;
        team.preferred_days = vec![Weekday::ALL[idx % 5], Weekday::ALL[(idx + 2) % 5]];
        team.min_copresence_ratio = if idx < 3 { 0.3 } else { 0.0 };
        team.max_members_per_day = if idx == 5 { Some(8) } else { None };
        repo.upsert_team_constraint(&team)?;
    }

    // 员工约束: 每 9 人一条
    for i in (0..employee_count).step_by(9) {
        let mut constraint = EmployeeConstraint::new(&employee_id(i));
        constraint.avoid_days = vec![Weekday::ALL[(i / 9) % 5]];
        constraint.max_weekly_office_days = Some(if i % 2 == 0 { 3 } else { 2 });
        constraint.needs_accessible_seat = i % 27 == 0;
        repo.upsert_employee_constraint(&constraint)?;
    }

    // 锁定: 前三名员工各锁定一个 2 层座位（整周）
    let friday = week_start + Duration::days(4);
    for (i, seat_id) in seat_ids.iter().rev().take(3).enumerate() {
        repo.insert_seat_lock(&SeatLock {
            seat_id: seat_id.clone(),
            employee_id: employee_id(i),
            lock_type: if i == 0 {
                LockType::Permanent
            } else {
                LockType::Temporary
            },
            start_date: week_start,
            end_date: friday,
        })?;
    }

    // 近两周出勤（仅工作日）
    let mut history = Vec::new();
    for back in 1..=14 {
        let date = week_start - Duration::days(back);
        if date.weekday().number_from_monday() > 5 {
            continue;
        }
        for i in 0..employee_count {
            let location = match (i + back as usize) % 5 {
                0 | 1 | 2 => AttendanceLocation::Office,
                3 => AttendanceLocation::Remote,
                _ => AttendanceLocation::ClientSite,
            };
            history.push(AttendanceRecord {
                employee_id: employee_id(i),
                date,
                location,
            });
        }
    }
    repo.insert_attendance(&history)?;

    Ok(())
}

fn employee_id(i: usize) -> String {
    format!("EMP{:04}", i + 1)
}

fn demo_employee(i: usize) -> Employee {
    let mut employee = Employee::new(&employee_id(i), DEPARTMENTS[i % DEPARTMENTS.len()]);
    employee.full_name = format!("Employee {}", i + 1);
    employee.team = Some(TEAMS[i % TEAMS.len()].to_string());
    employee.priority_level = (i % 5) as f64;
    employee.preferred_work_mode = match i % 6 {
        0 => WorkMode::Office,
        5 => WorkMode::Remote,
        _ => WorkMode::Hybrid,
    };
    employee.needs_accessible = i % 31 == 0;
    employee.prefer_window = i % 4 == 0;
    employee.preferred_zone = Some(ZONES_PER_FLOOR[i % ZONES_PER_FLOOR.len()].to_string());
    employee.preferred_floor = Some(if i % 2 == 0 { 1 } else { 2 });
    employee.preferred_days = vec![Weekday::ALL[i % 5], Weekday::ALL[(i + 3) % 5]];
    employee.client_site_ratio = if i % 7 == 0 { 0.4 } else { 0.1 };
    employee.onsite_ratio = (i % 10) as f64 / 10.0;
    employee.availability_ratio = if i % 11 == 0 { 0.6 } else { 1.0 };
    employee.project_count = (1 + i % 4) as f64;
    employee.commute_minutes = (15 + (i * 7) % 60) as f64;
    employee
}

fn print_quick_counts(repo: &SnapshotRepository) -> Result<(), Box<dyn Error + Send + Sync>> {
    eprintln!("Row counts:");
    eprintln!("  {:<22} {}", "employees", repo.list_employees()?.len());
    eprintln!("  {:<22} {}", "seats", repo.list_seats()?.len());
    eprintln!("  {:<22} {}", "team_constraints", repo.list_team_constraints()?.len());
    eprintln!(
        "  {:<22} {}",
        "employee_constraints",
        repo.list_employee_constraints()?.len()
    );
    eprintln!("  {:<22} {}", "seat_locks", repo.list_seat_locks()?.len());
    Ok(())
}
