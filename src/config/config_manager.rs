// ==========================================
// 混合办公排座系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::scheduler_config_trait::{ConfigResult, SchedulerConfigReader};
use crate::db::open_sqlite_connection;
use crate::engine::strategy::SolverMode;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        self.get_config_value(key)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 写入（覆盖）global scope 的配置值
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON格式，键有序）
    ///
    /// # 用途
    /// - 在排班结果中记录生成时的配置，便于复现
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&config_map)?)
    }
}

// ==========================================
// SchedulerConfigReader Trait 实现
// ==========================================
#[async_trait]
impl SchedulerConfigReader for ConfigManager {
    async fn get_department_capacity_pct(&self) -> ConfigResult<f64> {
        let value = self.get_config_or_default(config_keys::DEPARTMENT_CAPACITY_PCT, "0.6")?;
        let pct = value.trim().parse::<f64>().unwrap_or(0.6);
        if !(0.0..=1.0).contains(&pct) {
            tracing::warn!(
                config_key = config_keys::DEPARTMENT_CAPACITY_PCT,
                raw_value = %value,
                "部门容量比例越界，使用默认值 0.6"
            );
            return Ok(0.6);
        }
        Ok(pct)
    }

    async fn get_default_solver_mode(&self) -> ConfigResult<SolverMode> {
        let value = self.get_config_or_default(config_keys::DEFAULT_SOLVER_MODE, "greedy")?;
        Ok(value.parse::<SolverMode>().unwrap_or_default())
    }

    async fn get_enforce_constraints_default(&self) -> ConfigResult<bool> {
        let value = self.get_config_or_default(config_keys::ENFORCE_CONSTRAINTS, "true")?;
        match value.trim().to_lowercase().as_str() {
            "false" | "0" | "no" => Ok(false),
            _ => Ok(true),
        }
    }

    async fn get_weight_overrides(&self) -> ConfigResult<BTreeMap<String, f64>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' AND key LIKE 'weights/%' ORDER BY key",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut overrides = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            let name = key.trim_start_matches(config_keys::WEIGHT_PREFIX).to_string();
            match value.trim().parse::<f64>() {
                Ok(v) => {
                    overrides.insert(name, v);
                }
                Err(_) => {
                    tracing::warn!(config_key = %key, raw_value = %value, "权重配置格式错误，已忽略");
                }
            }
        }
        Ok(overrides)
    }

    async fn get_history_lookback_days(&self) -> ConfigResult<u32> {
        let value = self.get_config_or_default(config_keys::HISTORY_LOOKBACK_DAYS, "14")?;
        Ok(value.trim().parse::<u32>().unwrap_or(14))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 容量
    pub const DEPARTMENT_CAPACITY_PCT: &str = "department_capacity_pct";

    // 求解
    pub const DEFAULT_SOLVER_MODE: &str = "default_solver_mode";
    pub const ENFORCE_CONSTRAINTS: &str = "enforce_constraints";

    // 权重覆写: weights/<name>
    pub const WEIGHT_PREFIX: &str = "weights/";

    // 历史出勤
    pub const HISTORY_LOOKBACK_DAYS: &str = "history_lookback_days";
}
