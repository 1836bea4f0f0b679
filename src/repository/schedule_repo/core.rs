use crate::domain::schedule::{DayPlan, Violation, WeekSchedule};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, Transaction};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

pub const SCHEDULE_STATUS_GENERATED: &str = "GENERATED";

/// 已落库的周排班（含持久化元数据）
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSchedule {
    pub schedule_id: String,
    pub status: String,
    pub generated_at: NaiveDateTime,
    pub enforce_constraints: bool,
    pub config_snapshot_json: Option<String>,
    pub schedule: WeekSchedule,
}

// ==========================================
// ScheduleRepository - 周排班结果仓储
// ==========================================
pub struct ScheduleRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ScheduleRepository {
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
    // 写入操作
    // ==========================================

    /// 整体替换一周的排班结果
    ///
    /// # 参数
    /// - `schedule`: 引擎输出
    /// - `enforce_constraints`: 本次运行是否强制约束（随结果保存）
    /// - `config_snapshot_json`: 运行时配置快照（可选）
    ///
    /// # 返回
    /// - `Ok(schedule_id)`: 新写入的排班ID (UUID v4)
    ///
    /// # 红线
    /// - 必须在单个事务中完成：要么旧结果全部保留，要么新结果全部可见
    pub fn replace_week(
        &self,
        schedule: &WeekSchedule,
        enforce_constraints: bool,
        config_snapshot_json: Option<&str>,
    ) -> RepositoryResult<String> {
        let schedule_id = Uuid::new_v4().to_string();
        let week_start = schedule.week_start.format("%Y-%m-%d").to_string();
        let generated_at = Utc::now()
            .naive_utc()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let metrics_json = serde_json::to_string(&schedule.metrics)?;

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        // 1. 删除旧结果（schedule_days / assignments 级联删除）
        let removed = tx.execute(
            "DELETE FROM schedules WHERE week_start = ?1",
            params![week_start],
        )?;

        // 2. 写入排班头
        tx.execute(
            r#"
            INSERT INTO schedules (
                schedule_id, week_start, status, generated_at, solver_used,
                enforce_constraints, metrics_json, config_snapshot_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                schedule_id,
                week_start,
                SCHEDULE_STATUS_GENERATED,
                generated_at,
                schedule.metrics.solver_used.as_str(),
                enforce_constraints,
                metrics_json,
                config_snapshot_json,
            ],
        )?;

        // 3. 逐日写入
        let mut assignment_rows = 0;
        for plan in &schedule.days {
            let day_violations: Vec<&Violation> = schedule.violations_for(plan.day).collect();
            assignment_rows += insert_day(&tx, &schedule_id, plan, &day_violations)?;
        }

        tx.commit()?;

        info!(
            schedule_id = %schedule_id,
            week_start = %week_start,
            replaced = removed > 0,
            assignments = assignment_rows,
            "周排班已整体替换"
        );

        Ok(schedule_id)
    }

    /// 删除一周的排班结果
    ///
    /// # 返回
    /// - `Ok(true)`: 已删除
    /// - `Ok(false)`: 该周不存在
    pub fn delete_week(&self, week_start: chrono::NaiveDate) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let count = conn.execute(
            "DELETE FROM schedules WHERE week_start = ?1",
            params![week_start.format("%Y-%m-%d").to_string()],
        )?;
        Ok(count > 0)
    }
}

/// 写入单日行与座位分配行
fn insert_day(
    tx: &Transaction<'_>,
    schedule_id: &str,
    plan: &DayPlan,
    violations: &[&Violation],
) -> RepositoryResult<usize> {
    tx.execute(
        r#"
        INSERT INTO schedule_days (
            schedule_id, day_name, plan_date, capacity, attendees_json,
            attendance_scores_json, client_site_json, unassigned_json,
            excluded_json, unused_seats_json, violations_json
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            schedule_id,
            plan.day.as_str(),
            plan.date.format("%Y-%m-%d").to_string(),
            plan.capacity,
            serde_json::to_string(&plan.attendees)?,
            serde_json::to_string(&plan.attendance_scores)?,
            serde_json::to_string(&plan.client_site)?,
            serde_json::to_string(&plan.unassigned)?,
            serde_json::to_string(&plan.excluded)?,
            serde_json::to_string(&plan.unused_seats)?,
            serde_json::to_string(violations)?,
        ],
    )?;
    let schedule_day_id = tx.last_insert_rowid();

    for (employee_id, seat_id) in &plan.seat_assignments {
        let locked = plan.locked.contains(employee_id);
        let reasons = plan
            .assignment_reasons
            .get(employee_id)
            .cloned()
            .unwrap_or_default();

        tx.execute(
            r#"
            INSERT INTO assignments (
                schedule_day_id, employee_id, seat_id, score, reasons_json, locked
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                schedule_day_id,
                employee_id,
                seat_id,
                plan.assignment_scores.get(employee_id).copied(),
                serde_json::to_string(&reasons)?,
                locked,
            ],
        )?;
    }

    debug!(
        day = %plan.day,
        assignments = plan.seat_assignments.len(),
        "单日排班已写入"
    );

    Ok(plan.seat_assignments.len())
}
