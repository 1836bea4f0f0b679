// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use office_seat_planner::config::{ConfigResult, SchedulerConfigReader};
use office_seat_planner::engine::SolverMode;
use std::collections::BTreeMap;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub department_capacity_pct: f64,
    pub solver_mode: SolverMode,
    pub enforce_constraints: bool,
    pub weight_overrides: BTreeMap<String, f64>,
    pub history_lookback_days: u32,
}

impl MockConfig {
    /// 创建默认配置（与 ConfigManager 的默认值一致）
    pub fn default() -> Self {
        Self {
            department_capacity_pct: 0.6,
            solver_mode: SolverMode::Greedy,
            enforce_constraints: true,
            weight_overrides: BTreeMap::new(),
            history_lookback_days: 14,
        }
    }

    /// 部门上限不参与的配置（场景测试常用）
    pub fn without_department_cap() -> Self {
        let mut config = Self::default();
        config.department_capacity_pct = 1.0;
        config
    }

    /// 指定求解器
    pub fn with_solver(solver_mode: SolverMode) -> Self {
        let mut config = Self::without_department_cap();
        config.solver_mode = solver_mode;
        config
    }

    /// 追加权重覆写
    pub fn with_weight(mut self, name: &str, value: f64) -> Self {
        self.weight_overrides.insert(name.to_string(), value);
        self
    }
}

#[async_trait]
impl SchedulerConfigReader for MockConfig {
    async fn get_department_capacity_pct(&self) -> ConfigResult<f64> {
        Ok(self.department_capacity_pct)
    }

    async fn get_default_solver_mode(&self) -> ConfigResult<SolverMode> {
        Ok(self.solver_mode)
    }

    async fn get_enforce_constraints_default(&self) -> ConfigResult<bool> {
        Ok(self.enforce_constraints)
    }

    async fn get_weight_overrides(&self) -> ConfigResult<BTreeMap<String, f64>> {
        Ok(self.weight_overrides.clone())
    }

    async fn get_history_lookback_days(&self) -> ConfigResult<u32> {
        Ok(self.history_lookback_days)
    }
}
