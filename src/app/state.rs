// ==========================================
// 混合办公排座系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享连接与API实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::ScheduleApi;
use crate::config::config_manager::ConfigManager;
use crate::config::SchedulerConfigReader;
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::{ScheduleRepository, SnapshotRepository};

/// 环境变量: 显式指定数据库路径
pub const DB_PATH_ENV: &str = "OFFICE_SEAT_PLANNER_DB_PATH";

const DB_FILE_NAME: &str = "office_seat_planner.db";

/// 应用状态
///
/// 所有仓储与配置管理器共享同一个连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 周排班API
    pub schedule_api: Arc<ScheduleApi>,

    /// 配置管理器（读写 config_kv）
    pub config_manager: Arc<ConfigManager>,

    /// 输入快照仓储（种子数据写入）
    pub snapshot_repo: Arc<SnapshotRepository>,

    /// 周排班结果仓储
    pub schedule_repo: Arc<ScheduleRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（":memory:" 为内存库）
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例（schema 已就绪）
    /// - Err(String): 初始化错误
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("建库失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let snapshot_repo = Arc::new(SnapshotRepository::from_connection(conn.clone()));
        let schedule_repo = Arc::new(ScheduleRepository::from_connection(conn));

        let config_reader: Arc<dyn SchedulerConfigReader> = config_manager.clone();
        let schedule_api = Arc::new(ScheduleApi::new(
            snapshot_repo.clone(),
            schedule_repo.clone(),
            config_reader,
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            schedule_api,
            config_manager,
            snapshot_repo,
            schedule_repo,
        })
    }
}

/// 默认数据库路径
///
/// 优先级: 环境变量 OFFICE_SEAT_PLANNER_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(format!("./{}", DB_FILE_NAME));

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("office-seat-planner");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DB_FILE_NAME);
        }
    }

    path.to_string_lossy().to_string()
}
