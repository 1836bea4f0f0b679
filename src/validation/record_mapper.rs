// ==========================================
// 混合办公排座系统 - 原始记录映射器
// ==========================================
// 职责: 原始记录 → 强类型实体 + 类型转换
// 红线: 主键缺失 / 代码无法解析 / 日期非法 一律记为问题，不静默丢弃
// ==========================================
// 缺失值默认（与数据存储的历史口径一致）:
// - priority_level 0, availability_ratio 0.5, onsite_ratio 0.3
// - client_site_ratio 0, project_count 0, commute_minutes 0
// - department 缺失归入 "UNASSIGNED"
// ==========================================

use crate::domain::attendance::AttendanceRecord;
use crate::domain::constraint::{EmployeeConstraint, GlobalConstraints, SeatLock, TeamConstraint};
use crate::domain::employee::Employee;
use crate::domain::seat::Seat;
use crate::domain::snapshot::ScheduleSnapshot;
use crate::domain::types::{AttendanceLocation, LockType, WorkMode, Weekday};
use crate::validation::error::ValidationIssue;
use crate::validation::raw_records::{
    RawAttendanceRecord, RawEmployee, RawEmployeeConstraint, RawGlobalConstraints, RawSeat,
    RawSeatLock, RawSnapshot, RawTeamConstraint,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const DEFAULT_DEPARTMENT: &str = "UNASSIGNED";
const DEFAULT_PRIORITY: f64 = 0.0;
const DEFAULT_AVAILABILITY_RATIO: f64 = 0.5;
const DEFAULT_ONSITE_RATIO: f64 = 0.3;

#[derive(Debug, Default)]
pub struct RecordMapper {
    issues: Vec<ValidationIssue>,
}

impl RecordMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// 映射整份原始快照
    ///
    /// # 返回
    /// (映射后的快照, 映射阶段发现的问题)；问题非空时快照不可交给引擎
    pub fn map_snapshot(mut self, raw: &RawSnapshot) -> (ScheduleSnapshot, Vec<ValidationIssue>) {
        let employees = raw
            .employees
            .iter()
            .filter_map(|r| self.map_employee(r))
            .collect();
        let seats = raw.seats.iter().filter_map(|r| self.map_seat(r)).collect();
        let global_constraints = raw
            .global_constraints
            .as_ref()
            .map(|r| self.map_global(r))
            .unwrap_or_default();
        let team_constraints = raw
            .team_constraints
            .iter()
            .filter_map(|r| self.map_team_constraint(r))
            .collect();
        let employee_constraints = raw
            .employee_constraints
            .iter()
            .filter_map(|r| self.map_employee_constraint(r))
            .collect();
        let seat_locks = raw
            .seat_locks
            .iter()
            .filter_map(|r| self.map_seat_lock(r))
            .collect();
        let attendance_history = raw
            .attendance_history
            .iter()
            .filter_map(|r| self.map_attendance(r))
            .collect();

        let snapshot = ScheduleSnapshot {
            employees,
            seats,
            global_constraints,
            team_constraints,
            employee_constraints,
            seat_locks,
            attendance_history,
        };
        (snapshot, self.issues)
    }

    // ==========================================
    // 单实体映射
    // ==========================================

    pub fn map_employee(&mut self, raw: &RawEmployee) -> Option<Employee> {
        let employee_id = self.require_id("employee", "employee_id", raw.employee_id.as_deref())?;
        let id = Some(employee_id.as_str());

        let preferred_work_mode = match raw.preferred_work_mode.as_deref() {
            None => WorkMode::default(),
            Some(value) => match value.parse::<WorkMode>() {
                Ok(mode) => mode,
                Err(message) => {
                    self.issue("employee", id, "preferred_work_mode", message);
                    WorkMode::default()
                }
            },
        };
        let preferred_days = self.parse_days("employee", id, "preferred_days", &raw.preferred_days);

        Some(Employee {
            full_name: non_empty(raw.full_name.as_deref()).unwrap_or_else(|| employee_id.clone()),
            department: non_empty(raw.department.as_deref())
                .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
            team: non_empty(raw.team.as_deref()),
            priority_level: raw.priority_level.unwrap_or(DEFAULT_PRIORITY),
            preferred_work_mode,
            needs_accessible: raw.needs_accessible.unwrap_or(false),
            prefer_window: raw.prefer_window.unwrap_or(false),
            preferred_zone: non_empty(raw.preferred_zone.as_deref()),
            preferred_floor: raw.preferred_floor,
            preferred_days,
            client_site_ratio: raw.client_site_ratio.unwrap_or(0.0),
            onsite_ratio: raw.onsite_ratio.unwrap_or(DEFAULT_ONSITE_RATIO),
            availability_ratio: raw.availability_ratio.unwrap_or(DEFAULT_AVAILABILITY_RATIO),
            project_count: raw.project_count.unwrap_or(0.0),
            commute_minutes: raw.commute_minutes.unwrap_or(0.0),
            employee_id,
        })
    }

    pub fn map_seat(&mut self, raw: &RawSeat) -> Option<Seat> {
        let seat_id = self.require_id("seat", "seat_id", raw.seat_id.as_deref())?;
        let Some(floor) = raw.floor else {
            self.issue("seat", Some(&seat_id), "floor", "楼层缺失".to_string());
            return None;
        };

        Some(Seat {
            floor,
            zone: non_empty(raw.zone.as_deref()).unwrap_or_default(),
            is_window: raw.is_window.unwrap_or(false),
            is_accessible: raw.is_accessible.unwrap_or(false),
            x: raw.x.unwrap_or(0.0),
            y: raw.y.unwrap_or(0.0),
            seat_id,
        })
    }

    pub fn map_global(&mut self, raw: &RawGlobalConstraints) -> GlobalConstraints {
        let defaults = GlobalConstraints::default();

        let max_consecutive_office_days = match raw.max_consecutive_office_days {
            None => defaults.max_consecutive_office_days,
            Some(v) if v >= 0 => v as u32,
            Some(v) => {
                self.issue(
                    "global_constraints",
                    None,
                    "max_consecutive_office_days",
                    format!("连续到岗上限不能为负数: {}", v),
                );
                defaults.max_consecutive_office_days
            }
        };

        let floor_capacities = match raw.floor_capacities_json.as_deref() {
            None => defaults.floor_capacities.clone(),
            Some(json) => match serde_json::from_str::<BTreeMap<i32, u32>>(json) {
                Ok(map) => map,
                Err(e) => {
                    self.issue(
                        "global_constraints",
                        None,
                        "floor_capacities_json",
                        format!("楼层容量解析失败: {}", e),
                    );
                    defaults.floor_capacities.clone()
                }
            },
        };

        GlobalConstraints {
            min_client_site_ratio: raw
                .min_client_site_ratio
                .unwrap_or(defaults.min_client_site_ratio),
            max_client_site_ratio: raw
                .max_client_site_ratio
                .unwrap_or(defaults.max_client_site_ratio),
            max_consecutive_office_days,
            floor_capacities,
            allow_team_splitting: raw
                .allow_team_splitting
                .unwrap_or(defaults.allow_team_splitting),
        }
    }

    pub fn map_team_constraint(&mut self, raw: &RawTeamConstraint) -> Option<TeamConstraint> {
        let team_name = self.require_id("team_constraint", "team_name", raw.team_name.as_deref())?;
        let id = Some(team_name.as_str());
        let preferred_days = self.parse_days("team_constraint", id, "preferred_days", &raw.preferred_days);
        let max_members_per_day =
            self.non_negative_u32("team_constraint", id, "max_members_per_day", raw.max_members_per_day);

        Some(TeamConstraint {
            prefer_same_floor: raw.prefer_same_floor.unwrap_or(false),
            prefer_adjacent_seats: raw.prefer_adjacent_seats.unwrap_or(false),
            preferred_days,
            min_copresence_ratio: raw.min_copresence_ratio.unwrap_or(0.0),
            max_members_per_day,
            team_name,
        })
    }

    pub fn map_employee_constraint(
        &mut self,
        raw: &RawEmployeeConstraint,
    ) -> Option<EmployeeConstraint> {
        let employee_id =
            self.require_id("employee_constraint", "employee_id", raw.employee_id.as_deref())?;
        let id = Some(employee_id.as_str());
        let preferred_days =
            self.parse_days("employee_constraint", id, "preferred_days", &raw.preferred_days);
        let avoid_days = self.parse_days("employee_constraint", id, "avoid_days", &raw.avoid_days);
        let max_weekly_office_days = self.non_negative_u32(
            "employee_constraint",
            id,
            "max_weekly_office_days",
            raw.max_weekly_office_days,
        );

        Some(EmployeeConstraint {
            preferred_days,
            avoid_days,
            max_weekly_office_days,
            needs_accessible_seat: raw.needs_accessible_seat.unwrap_or(false),
            preferred_floor: raw.preferred_floor,
            preferred_zone: non_empty(raw.preferred_zone.as_deref()),
            employee_id,
        })
    }

    pub fn map_seat_lock(&mut self, raw: &RawSeatLock) -> Option<SeatLock> {
        let seat_id = self.require_id("seat_lock", "seat_id", raw.seat_id.as_deref())?;
        let employee_id = self.require_id("seat_lock", "employee_id", raw.employee_id.as_deref())?;
        let id = Some(seat_id.as_str());

        let lock_type = match raw.lock_type.as_deref() {
            None => LockType::Permanent,
            Some(value) => match value.parse::<LockType>() {
                Ok(t) => t,
                Err(message) => {
                    self.issue("seat_lock", id, "lock_type", message);
                    return None;
                }
            },
        };
        let start_date = self.parse_date("seat_lock", id, "start_date", raw.start_date.as_deref())?;
        let end_date = self.parse_date("seat_lock", id, "end_date", raw.end_date.as_deref())?;

        Some(SeatLock {
            seat_id,
            employee_id,
            lock_type,
            start_date,
            end_date,
        })
    }

    pub fn map_attendance(&mut self, raw: &RawAttendanceRecord) -> Option<AttendanceRecord> {
        let employee_id =
            self.require_id("attendance", "employee_id", raw.employee_id.as_deref())?;
        let id = Some(employee_id.as_str());
        let date = self.parse_date("attendance", id, "date", raw.date.as_deref())?;
        let location = match raw.location.as_deref().map(str::parse::<AttendanceLocation>) {
            Some(Ok(location)) => location,
            Some(Err(message)) => {
                self.issue("attendance", id, "location", message);
                return None;
            }
            None => {
                self.issue("attendance", id, "location", "出勤地点缺失".to_string());
                return None;
            }
        };

        Some(AttendanceRecord {
            employee_id,
            date,
            location,
        })
    }

    // ==========================================
    // 辅助
    // ==========================================

    fn issue(&mut self, entity: &str, record_id: Option<&str>, field: &str, message: String) {
        self.issues
            .push(ValidationIssue::new(entity, record_id, field, message));
    }

    fn require_id(&mut self, entity: &str, field: &str, value: Option<&str>) -> Option<String> {
        match non_empty(value) {
            Some(id) => Some(id),
            None => {
                self.issue(entity, None, field, "主键缺失".to_string());
                None
            }
        }
    }

    fn parse_days(
        &mut self,
        entity: &str,
        record_id: Option<&str>,
        field: &str,
        value: &Option<String>,
    ) -> Vec<Weekday> {
        let Some(value) = value else {
            return Vec::new();
        };
        let mut days = Vec::new();
        for code in value.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            match code.parse::<Weekday>() {
                Ok(day) if !days.contains(&day) => days.push(day),
                Ok(_) => {}
                Err(message) => self.issue(entity, record_id, field, message),
            }
        }
        days.sort();
        days
    }

    fn parse_date(
        &mut self,
        entity: &str,
        record_id: Option<&str>,
        field: &str,
        value: Option<&str>,
    ) -> Option<NaiveDate> {
        let Some(value) = value.map(str::trim) else {
            self.issue(entity, record_id, field, "日期缺失".to_string());
            return None;
        };
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.issue(
                    entity,
                    record_id,
                    field,
                    format!("日期格式错误: 期望 YYYY-MM-DD，实际 {}", value),
                );
                None
            }
        }
    }

    fn non_negative_u32(
        &mut self,
        entity: &str,
        record_id: Option<&str>,
        field: &str,
        value: Option<i64>,
    ) -> Option<u32> {
        match value {
            None => None,
            Some(v) if (0..=i64::from(u32::MAX)).contains(&v) => Some(v as u32),
            Some(v) => {
                self.issue(entity, record_id, field, format!("数值超出范围: {}", v));
                None
            }
        }
    }
}

/// 去空白后非空则返回
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 工作日列表 → 逗号分隔代码（写回数据存储时使用）
pub fn join_days(days: &[Weekday]) -> String {
    days.iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
