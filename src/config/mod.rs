// ==========================================
// 混合办公排座系统 - 配置层
// ==========================================
// 职责: 系统配置管理 + 评分权重
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod scheduler_config_trait;
pub mod weights;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager};
pub use scheduler_config_trait::{ConfigResult, SchedulerConfigReader};
pub use weights::{ScoringWeights, WeightOverrideError};
