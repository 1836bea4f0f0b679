use super::core::{SnapshotRepository, GLOBAL_CONSTRAINTS_ROW_ID};
use crate::repository::error::RepositoryResult;
use crate::validation::raw_records::{
    RawAttendanceRecord, RawEmployee, RawEmployeeConstraint, RawGlobalConstraints, RawSeat,
    RawSeatLock, RawSnapshot, RawTeamConstraint,
};
use chrono::{Duration, NaiveDate};
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};
use tracing::debug;

impl SnapshotRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 读取一次排班所需的全部原始记录
    ///
    /// # 参数
    /// - `week_start`: 目标周周一
    /// - `lookback_days`: 历史出勤回看天数（只读取 week_start 之前的窗口）
    ///
    /// # 返回
    /// - `Ok(RawSnapshot)`: 按主键排序的原始行
    pub fn load_raw(&self, week_start: NaiveDate, lookback_days: u32) -> RepositoryResult<RawSnapshot> {
        let snapshot = RawSnapshot {
            employees: self.list_employees()?,
            seats: self.list_seats()?,
            global_constraints: self.find_global_constraints()?,
            team_constraints: self.list_team_constraints()?,
            employee_constraints: self.list_employee_constraints()?,
            seat_locks: self.list_seat_locks()?,
            attendance_history: self.list_attendance_before(week_start, lookback_days)?,
        };

        debug!(
            employees = snapshot.employees.len(),
            seats = snapshot.seats.len(),
            locks = snapshot.seat_locks.len(),
            history = snapshot.attendance_history.len(),
            "原始快照读取完成"
        );

        Ok(snapshot)
    }

    pub fn list_employees(&self) -> RepositoryResult<Vec<RawEmployee>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT employee_id, full_name, department, team, priority_level,
                   preferred_work_mode, needs_accessible, prefer_window, preferred_zone,
                   preferred_floor, preferred_days, client_site_ratio, onsite_ratio,
                   availability_ratio, project_count, commute_minutes
            FROM employees
            ORDER BY employee_id
            "#,
        )?;

        let rows = stmt
            .query_map([], map_employee_row)?
            .collect::<SqliteResult<Vec<RawEmployee>>>()?;

        Ok(rows)
    }

    pub fn list_seats(&self) -> RepositoryResult<Vec<RawSeat>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT seat_id, floor, zone, is_window, is_accessible, x, y
            FROM seats
            ORDER BY seat_id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RawSeat {
                    seat_id: row.get(0)?,
                    floor: row.get(1)?,
                    zone: row.get(2)?,
                    is_window: row.get(3)?,
                    is_accessible: row.get(4)?,
                    x: row.get(5)?,
                    y: row.get(6)?,
                })
            })?
            .collect::<SqliteResult<Vec<RawSeat>>>()?;

        Ok(rows)
    }

    /// 全局约束（未配置时为 None，映射阶段取默认值）
    pub fn find_global_constraints(&self) -> RepositoryResult<Option<RawGlobalConstraints>> {
        let conn = self.get_conn()?;

        let global = conn
            .query_row(
                r#"
                SELECT min_client_site_ratio, max_client_site_ratio,
                       max_consecutive_office_days, allow_team_splitting, floor_capacities_json
                FROM global_constraints
                WHERE id = ?1
                "#,
                params![GLOBAL_CONSTRAINTS_ROW_ID],
                |row| {
                    Ok(RawGlobalConstraints {
                        min_client_site_ratio: row.get(0)?,
                        max_client_site_ratio: row.get(1)?,
                        max_consecutive_office_days: row.get(2)?,
                        allow_team_splitting: row.get(3)?,
                        floor_capacities_json: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(global)
    }

    pub fn list_team_constraints(&self) -> RepositoryResult<Vec<RawTeamConstraint>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT team_name, prefer_same_floor, prefer_adjacent_seats, preferred_days,
                   min_copresence_ratio, max_members_per_day
            FROM team_constraints
            ORDER BY team_name
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RawTeamConstraint {
                    team_name: row.get(0)?,
                    prefer_same_floor: row.get(1)?,
                    prefer_adjacent_seats: row.get(2)?,
                    preferred_days: row.get(3)?,
                    min_copresence_ratio: row.get(4)?,
                    max_members_per_day: row.get(5)?,
                })
            })?
            .collect::<SqliteResult<Vec<RawTeamConstraint>>>()?;

        Ok(rows)
    }

    pub fn list_employee_constraints(&self) -> RepositoryResult<Vec<RawEmployeeConstraint>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT employee_id, preferred_days, avoid_days, max_weekly_office_days,
                   needs_accessible_seat, preferred_floor, preferred_zone
            FROM employee_constraints
            ORDER BY employee_id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RawEmployeeConstraint {
                    employee_id: row.get(0)?,
                    preferred_days: row.get(1)?,
                    avoid_days: row.get(2)?,
                    max_weekly_office_days: row.get(3)?,
                    needs_accessible_seat: row.get(4)?,
                    preferred_floor: row.get(5)?,
                    preferred_zone: row.get(6)?,
                })
            })?
            .collect::<SqliteResult<Vec<RawEmployeeConstraint>>>()?;

        Ok(rows)
    }

    pub fn list_seat_locks(&self) -> RepositoryResult<Vec<RawSeatLock>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT seat_id, employee_id, lock_type, start_date, end_date
            FROM seat_locks
            ORDER BY employee_id, start_date, seat_id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RawSeatLock {
                    seat_id: row.get(0)?,
                    employee_id: row.get(1)?,
                    lock_type: row.get(2)?,
                    start_date: row.get(3)?,
                    end_date: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<RawSeatLock>>>()?;

        Ok(rows)
    }

    /// 读取 [week_start - lookback_days, week_start) 窗口内的历史出勤
    pub fn list_attendance_before(
        &self,
        week_start: NaiveDate,
        lookback_days: u32,
    ) -> RepositoryResult<Vec<RawAttendanceRecord>> {
        let conn = self.get_conn()?;
        let from = week_start - Duration::days(i64::from(lookback_days));

        let mut stmt = conn.prepare(
            r#"
            SELECT employee_id, date, location
            FROM employee_attendance
            WHERE date >= ?1 AND date < ?2
            ORDER BY employee_id, date
            "#,
        )?;

        let rows = stmt
            .query_map(
                params![
                    from.format("%Y-%m-%d").to_string(),
                    week_start.format("%Y-%m-%d").to_string(),
                ],
                |row| {
                    Ok(RawAttendanceRecord {
                        employee_id: row.get(0)?,
                        date: row.get(1)?,
                        location: row.get(2)?,
                    })
                },
            )?
            .collect::<SqliteResult<Vec<RawAttendanceRecord>>>()?;

        Ok(rows)
    }

    pub fn count_employees(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn map_employee_row(row: &Row) -> SqliteResult<RawEmployee> {
    Ok(RawEmployee {
        employee_id: row.get(0)?,
        full_name: row.get(1)?,
        department: row.get(2)?,
        team: row.get(3)?,
        priority_level: row.get(4)?,
        preferred_work_mode: row.get(5)?,
        needs_accessible: row.get(6)?,
        prefer_window: row.get(7)?,
        preferred_zone: row.get(8)?,
        preferred_floor: row.get(9)?,
        preferred_days: row.get(10)?,
        client_site_ratio: row.get(11)?,
        onsite_ratio: row.get(12)?,
        availability_ratio: row.get(13)?,
        project_count: row.get(14)?,
        commute_minutes: row.get(15)?,
    })
}
