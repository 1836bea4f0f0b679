// ==========================================
// 混合办公排座系统 - 排班配置读取 Trait
// ==========================================
// 职责: 定义排班服务所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::engine::strategy::SolverMode;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::error::Error;

/// 配置读取结果
pub type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// SchedulerConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
// 说明: 请求中显式给出的字段优先于此处的默认值
#[async_trait]
pub trait SchedulerConfigReader: Send + Sync {
    /// 获取部门日容量比例
    ///
    /// # 默认值
    /// - 0.6
    async fn get_department_capacity_pct(&self) -> ConfigResult<f64>;

    /// 获取默认求解器模式
    ///
    /// # 默认值
    /// - greedy
    async fn get_default_solver_mode(&self) -> ConfigResult<SolverMode>;

    /// 获取默认是否强制约束
    ///
    /// # 默认值
    /// - true
    async fn get_enforce_constraints_default(&self) -> ConfigResult<bool>;

    /// 获取权重覆写（config_kv 中 `weights/<name>` 形式的键）
    ///
    /// # 返回
    /// - 名称 -> 值；未配置时为空
    async fn get_weight_overrides(&self) -> ConfigResult<BTreeMap<String, f64>>;

    /// 获取历史出勤回看天数（推导连续到岗种子）
    ///
    /// # 默认值
    /// - 14
    async fn get_history_lookback_days(&self) -> ConfigResult<u32>;
}
