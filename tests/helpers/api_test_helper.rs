// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 临时数据库 + AppState 装配 + 快照种子写入
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::error::Error;
use std::sync::Arc;
use tempfile::NamedTempFile;

use office_seat_planner::api::ScheduleApi;
use office_seat_planner::app::AppState;
use office_seat_planner::config::SchedulerConfigReader;
use office_seat_planner::repository::SnapshotRepository;
use office_seat_planner::ScheduleSnapshot;

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 数据库为磁盘临时文件，AppState 的全部组件共享同一连接
pub struct ApiTestEnv {
    pub db_path: String,
    pub state: AppState,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建空库测试环境
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let (temp_file, db_path) = test_helpers::create_test_db()?;
        let state = AppState::new(db_path.clone())?;
        Ok(Self {
            db_path,
            state,
            _temp_file: temp_file,
        })
    }

    /// 创建测试环境并写入快照
    pub fn with_snapshot(snapshot: &ScheduleSnapshot) -> Result<Self, Box<dyn Error>> {
        let env = Self::new()?;
        seed_snapshot(&env.state.snapshot_repo, snapshot)?;
        Ok(env)
    }

    /// 使用自定义配置读取器构建 ScheduleApi（共享本环境的仓储）
    pub fn api_with_config(&self, config: Arc<dyn SchedulerConfigReader>) -> ScheduleApi {
        ScheduleApi::new(
            self.state.snapshot_repo.clone(),
            self.state.schedule_repo.clone(),
            config,
        )
    }
}

/// 将快照写入数据存储
pub fn seed_snapshot(
    repo: &SnapshotRepository,
    snapshot: &ScheduleSnapshot,
) -> Result<(), Box<dyn Error>> {
    for employee in &snapshot.employees {
        repo.upsert_employee(employee)?;
    }
    for seat in &snapshot.seats {
        repo.upsert_seat(seat)?;
    }
    repo.save_global_constraints(&snapshot.global_constraints)?;
    for team in &snapshot.team_constraints {
        repo.upsert_team_constraint(team)?;
    }
    for constraint in &snapshot.employee_constraints {
        repo.upsert_employee_constraint(constraint)?;
    }
    for lock in &snapshot.seat_locks {
        repo.insert_seat_lock(lock)?;
    }
    repo.insert_attendance(&snapshot.attendance_history)?;
    Ok(())
}
