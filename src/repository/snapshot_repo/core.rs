use crate::domain::attendance::AttendanceRecord;
use crate::domain::constraint::{EmployeeConstraint, GlobalConstraints, SeatLock, TeamConstraint};
use crate::domain::employee::Employee;
use crate::domain::seat::Seat;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::validation::record_mapper::join_days;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// global_constraints 表只保存一行
pub(super) const GLOBAL_CONSTRAINTS_ROW_ID: i64 = 1;

// ==========================================
// SnapshotRepository - 输入快照仓储
// ==========================================
pub struct SnapshotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SnapshotRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    pub(super) fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作（种子数据 / 外部同步）
    // ==========================================

    /// 插入或更新员工
    pub fn upsert_employee(&self, employee: &Employee) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO employees (
                employee_id, full_name, department, team, priority_level,
                preferred_work_mode, needs_accessible, prefer_window, preferred_zone,
                preferred_floor, preferred_days, client_site_ratio, onsite_ratio,
                availability_ratio, project_count, commute_minutes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                employee.employee_id,
                employee.full_name,
                employee.department,
                employee.team,
                employee.priority_level,
                employee.preferred_work_mode.to_string(),
                employee.needs_accessible,
                employee.prefer_window,
                employee.preferred_zone,
                employee.preferred_floor,
                join_days(&employee.preferred_days),
                employee.client_site_ratio,
                employee.onsite_ratio,
                employee.availability_ratio,
                employee.project_count,
                employee.commute_minutes,
            ],
        )?;

        Ok(())
    }

    /// 插入或更新座位
    pub fn upsert_seat(&self, seat: &Seat) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO seats (seat_id, floor, zone, is_window, is_accessible, x, y)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                seat.seat_id,
                seat.floor,
                seat.zone,
                seat.is_window,
                seat.is_accessible,
                seat.x,
                seat.y,
            ],
        )?;

        Ok(())
    }

    /// 保存全局约束（单行覆盖）
    pub fn save_global_constraints(&self, global: &GlobalConstraints) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let floor_capacities_json = serde_json::to_string(&global.floor_capacities)?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO global_constraints (
                id, min_client_site_ratio, max_client_site_ratio,
                max_consecutive_office_days, allow_team_splitting, floor_capacities_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                GLOBAL_CONSTRAINTS_ROW_ID,
                global.min_client_site_ratio,
                global.max_client_site_ratio,
                global.max_consecutive_office_days,
                global.allow_team_splitting,
                floor_capacities_json,
            ],
        )?;

        Ok(())
    }

    /// 插入或更新团队约束
    pub fn upsert_team_constraint(&self, team: &TeamConstraint) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO team_constraints (
                team_name, prefer_same_floor, prefer_adjacent_seats, preferred_days,
                min_copresence_ratio, max_members_per_day
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                team.team_name,
                team.prefer_same_floor,
                team.prefer_adjacent_seats,
                join_days(&team.preferred_days),
                team.min_copresence_ratio,
                team.max_members_per_day,
            ],
        )?;

        Ok(())
    }

    /// 插入或更新员工约束
    pub fn upsert_employee_constraint(
        &self,
        constraint: &EmployeeConstraint,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO employee_constraints (
                employee_id, preferred_days, avoid_days, max_weekly_office_days,
                needs_accessible_seat, preferred_floor, preferred_zone
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                constraint.employee_id,
                join_days(&constraint.preferred_days),
                join_days(&constraint.avoid_days),
                constraint.max_weekly_office_days,
                constraint.needs_accessible_seat,
                constraint.preferred_floor,
                constraint.preferred_zone,
            ],
        )?;

        Ok(())
    }

    /// 插入座位锁定
    pub fn insert_seat_lock(&self, lock: &SeatLock) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO seat_locks (seat_id, employee_id, lock_type, start_date, end_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                lock.seat_id,
                lock.employee_id,
                lock.lock_type.to_string(),
                lock.start_date.format("%Y-%m-%d").to_string(),
                lock.end_date.format("%Y-%m-%d").to_string(),
            ],
        )?;

        Ok(())
    }

    /// 批量插入历史出勤记录
    ///
    /// # 返回
    /// - `Ok(count)`: 写入条数
    pub fn insert_attendance(&self, records: &[AttendanceRecord]) -> RepositoryResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        for record in records {
            tx.execute(
                "INSERT INTO employee_attendance (employee_id, date, location) VALUES (?1, ?2, ?3)",
                params![
                    record.employee_id,
                    record.date.format("%Y-%m-%d").to_string(),
                    record.location.to_string(),
                ],
            )?;
        }

        tx.commit()?;
        Ok(records.len())
    }
}
