// ==========================================
// 混合办公排座系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键级联删除依赖 foreign_keys）
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 提供建库脚本（快照表 + 排班结果表 + config_kv）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// 建库（幂等）
///
/// 说明：
/// - assignments 上的两个 UNIQUE 约束在存储层兜底“同日一座一人 / 同日一人一座”
/// - schedule_days / assignments 随 schedules 级联删除，周排班重算时整体替换
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS employees (
            employee_id TEXT PRIMARY KEY,
            full_name TEXT,
            department TEXT,
            team TEXT,
            priority_level REAL,
            preferred_work_mode TEXT,
            needs_accessible INTEGER,
            prefer_window INTEGER,
            preferred_zone TEXT,
            preferred_floor INTEGER,
            preferred_days TEXT,
            client_site_ratio REAL,
            onsite_ratio REAL,
            availability_ratio REAL,
            project_count REAL,
            commute_minutes REAL
        );

        CREATE TABLE IF NOT EXISTS seats (
            seat_id TEXT PRIMARY KEY,
            floor INTEGER,
            zone TEXT,
            is_window INTEGER,
            is_accessible INTEGER,
            x REAL,
            y REAL
        );

        CREATE TABLE IF NOT EXISTS global_constraints (
            id INTEGER PRIMARY KEY,
            min_client_site_ratio REAL,
            max_client_site_ratio REAL,
            max_consecutive_office_days INTEGER,
            allow_team_splitting INTEGER,
            floor_capacities_json TEXT
        );

        CREATE TABLE IF NOT EXISTS team_constraints (
            team_name TEXT PRIMARY KEY,
            prefer_same_floor INTEGER,
            prefer_adjacent_seats INTEGER,
            preferred_days TEXT,
            min_copresence_ratio REAL,
            max_members_per_day INTEGER
        );

        CREATE TABLE IF NOT EXISTS employee_constraints (
            employee_id TEXT PRIMARY KEY,
            preferred_days TEXT,
            avoid_days TEXT,
            max_weekly_office_days INTEGER,
            needs_accessible_seat INTEGER,
            preferred_floor INTEGER,
            preferred_zone TEXT
        );

        CREATE TABLE IF NOT EXISTS seat_locks (
            seat_id TEXT NOT NULL,
            employee_id TEXT NOT NULL,
            lock_type TEXT,
            start_date TEXT,
            end_date TEXT
        );

        CREATE TABLE IF NOT EXISTS employee_attendance (
            employee_id TEXT NOT NULL,
            date TEXT NOT NULL,
            location TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS schedules (
            schedule_id TEXT PRIMARY KEY,
            week_start TEXT NOT NULL UNIQUE,
            status TEXT NOT NULL,
            generated_at TEXT NOT NULL,
            solver_used TEXT NOT NULL,
            enforce_constraints INTEGER NOT NULL,
            metrics_json TEXT NOT NULL,
            config_snapshot_json TEXT
        );

        CREATE TABLE IF NOT EXISTS schedule_days (
            schedule_day_id INTEGER PRIMARY KEY AUTOINCREMENT,
            schedule_id TEXT NOT NULL REFERENCES schedules(schedule_id) ON DELETE CASCADE,
            day_name TEXT NOT NULL,
            plan_date TEXT NOT NULL,
            capacity INTEGER NOT NULL,
            attendees_json TEXT NOT NULL,
            attendance_scores_json TEXT NOT NULL,
            client_site_json TEXT NOT NULL,
            unassigned_json TEXT NOT NULL,
            excluded_json TEXT NOT NULL,
            unused_seats_json TEXT NOT NULL,
            violations_json TEXT NOT NULL,
            UNIQUE (schedule_id, day_name)
        );

        CREATE TABLE IF NOT EXISTS assignments (
            schedule_day_id INTEGER NOT NULL REFERENCES schedule_days(schedule_day_id) ON DELETE CASCADE,
            employee_id TEXT NOT NULL,
            seat_id TEXT NOT NULL,
            score REAL,
            reasons_json TEXT NOT NULL,
            locked INTEGER NOT NULL DEFAULT 0,
            UNIQUE (schedule_day_id, seat_id),
            UNIQUE (schedule_day_id, employee_id)
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();

        assert_eq!(read_schema_version(&conn).unwrap(), None);
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
    }
}
