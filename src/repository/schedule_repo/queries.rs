use super::core::{ScheduleRepository, StoredSchedule};
use crate::domain::schedule::{DayPlan, ScheduleMetrics, Violation, WeekSchedule};
use crate::domain::types::Weekday;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// schedules 表头行
struct HeaderRow {
    schedule_id: String,
    status: String,
    generated_at: String,
    enforce_constraints: bool,
    metrics_json: String,
    config_snapshot_json: Option<String>,
}

/// schedule_days 行（JSON 列未解析）
struct DayRow {
    schedule_day_id: i64,
    day_name: String,
    plan_date: String,
    capacity: u32,
    attendees_json: String,
    attendance_scores_json: String,
    client_site_json: String,
    unassigned_json: String,
    excluded_json: String,
    unused_seats_json: String,
    violations_json: String,
}

impl ScheduleRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 按周一日期读取已落库的周排班
    ///
    /// # 返回
    /// - `Ok(Some(StoredSchedule))`: 找到
    /// - `Ok(None)`: 该周尚未生成
    pub fn load_week(&self, week_start: NaiveDate) -> RepositoryResult<Option<StoredSchedule>> {
        let conn = self.get_conn()?;

        let header = conn
            .query_row(
                r#"
                SELECT schedule_id, status, generated_at, enforce_constraints,
                       metrics_json, config_snapshot_json
                FROM schedules
                WHERE week_start = ?1
                "#,
                params![week_start.format("%Y-%m-%d").to_string()],
                |row| {
                    Ok(HeaderRow {
                        schedule_id: row.get(0)?,
                        status: row.get(1)?,
                        generated_at: row.get(2)?,
                        enforce_constraints: row.get(3)?,
                        metrics_json: row.get(4)?,
                        config_snapshot_json: row.get(5)?,
                    })
                },
            )
            .optional()?;

        let Some(header) = header else {
            return Ok(None);
        };

        let metrics: ScheduleMetrics = parse_json("metrics_json", &header.metrics_json)?;
        let generated_at = NaiveDateTime::parse_from_str(&header.generated_at, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| field_error("generated_at", e.to_string()))?;

        let mut days = Vec::new();
        let mut violations = Vec::new();
        for row in load_day_rows(&conn, &header.schedule_id)? {
            let day_violations: Vec<Violation> = parse_json("violations_json", &row.violations_json)?;
            violations.extend(day_violations);
            days.push(build_day_plan(&conn, row)?);
        }

        Ok(Some(StoredSchedule {
            schedule_id: header.schedule_id,
            status: header.status,
            generated_at,
            enforce_constraints: header.enforce_constraints,
            config_snapshot_json: header.config_snapshot_json,
            schedule: WeekSchedule {
                week_start,
                days,
                violations,
                metrics,
            },
        }))
    }

    /// 已生成排班的周一列表（升序）
    pub fn list_weeks(&self) -> RepositoryResult<Vec<NaiveDate>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare("SELECT week_start FROM schedules ORDER BY week_start")?;
        let raw = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<String>>>()?;

        raw.iter()
            .map(|s| parse_date("week_start", s))
            .collect()
    }

    /// 某排班的座位分配行数
    pub fn count_assignments(&self, schedule_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let count: i64 = conn.query_row(
            r#"
            SELECT COUNT(*)
            FROM assignments a
            INNER JOIN schedule_days d ON a.schedule_day_id = d.schedule_day_id
            WHERE d.schedule_id = ?1
            "#,
            params![schedule_id],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }
}

fn load_day_rows(conn: &Connection, schedule_id: &str) -> RepositoryResult<Vec<DayRow>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT schedule_day_id, day_name, plan_date, capacity, attendees_json,
               attendance_scores_json, client_site_json, unassigned_json,
               excluded_json, unused_seats_json, violations_json
        FROM schedule_days
        WHERE schedule_id = ?1
        ORDER BY plan_date
        "#,
    )?;

    let rows = stmt
        .query_map(params![schedule_id], |row| {
            Ok(DayRow {
                schedule_day_id: row.get(0)?,
                day_name: row.get(1)?,
                plan_date: row.get(2)?,
                capacity: row.get(3)?,
                attendees_json: row.get(4)?,
                attendance_scores_json: row.get(5)?,
                client_site_json: row.get(6)?,
                unassigned_json: row.get(7)?,
                excluded_json: row.get(8)?,
                unused_seats_json: row.get(9)?,
                violations_json: row.get(10)?,
            })
        })?
        .collect::<SqliteResult<Vec<DayRow>>>()?;

    Ok(rows)
}

/// 由 schedule_days 行与 assignments 行重建 DayPlan
fn build_day_plan(conn: &Connection, row: DayRow) -> RepositoryResult<DayPlan> {
    let day = row
        .day_name
        .parse::<Weekday>()
        .map_err(|message| field_error("day_name", message))?;

    let mut stmt = conn.prepare(
        r#"
        SELECT employee_id, seat_id, score, reasons_json, locked
        FROM assignments
        WHERE schedule_day_id = ?1
        ORDER BY employee_id
        "#,
    )?;
    let assignment_rows = stmt
        .query_map(params![row.schedule_day_id], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, Option<f64>>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, bool>(4)?,
            ))
        })?
        .collect::<SqliteResult<Vec<_>>>()?;

    let mut seat_assignments = BTreeMap::new();
    let mut assignment_scores = BTreeMap::new();
    let mut assignment_reasons = BTreeMap::new();
    let mut locked = Vec::new();
    for (employee_id, seat_id, score, reasons_json, is_locked) in assignment_rows {
        if is_locked {
            locked.push(employee_id.clone());
        } else {
            let reasons: Vec<String> = parse_json("reasons_json", &reasons_json)?;
            assignment_reasons.insert(employee_id.clone(), reasons);
        }
        if let Some(score) = score {
            assignment_scores.insert(employee_id.clone(), score);
        }
        seat_assignments.insert(employee_id, seat_id);
    }

    Ok(DayPlan {
        day,
        date: parse_date("plan_date", &row.plan_date)?,
        capacity: row.capacity,
        attendees: parse_json("attendees_json", &row.attendees_json)?,
        attendance_scores: parse_json("attendance_scores_json", &row.attendance_scores_json)?,
        client_site: parse_json("client_site_json", &row.client_site_json)?,
        excluded: parse_json("excluded_json", &row.excluded_json)?,
        seat_assignments,
        assignment_scores,
        assignment_reasons,
        locked,
        unassigned: parse_json("unassigned_json", &row.unassigned_json)?,
        unused_seats: parse_json("unused_seats_json", &row.unused_seats_json)?,
    })
}

fn parse_json<T: DeserializeOwned>(field: &str, value: &str) -> RepositoryResult<T> {
    serde_json::from_str(value).map_err(|e| field_error(field, e.to_string()))
}

fn parse_date(field: &str, value: &str) -> RepositoryResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| field_error(field, e.to_string()))
}

fn field_error(field: &str, message: String) -> RepositoryError {
    RepositoryError::FieldValueError {
        field: field.to_string(),
        message,
    }
}
