// ==========================================
// 混合办公排座系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换各层错误为可读的错误消息
// ==========================================

use crate::config::weights::WeightOverrideError;
use crate::engine::error::EngineError;
use crate::repository::error::RepositoryError;
use crate::validation::error::{ValidationError, ValidationIssue};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 快照校验失败（带逐条问题）
    #[error("数据验证失败: {message}")]
    ValidationError {
        message: String,
        issues: Vec<ValidationIssue>,
    },

    /// 致命输入（空名单 / 空座位 / 非周一）
    #[error("排班输入不可用: {0}")]
    FatalInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    /// 落库时违反存储层唯一/外键约束（一座一人 / 一人一座兜底）
    #[error("排班落库冲突: {0}")]
    StorageConflict(String),

    #[error("配置读取失败: {0}")]
    ConfigError(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("连接锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::ForeignKeyViolation(msg) => ApiError::StorageConflict(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DatabaseError(format!("存储列{}取值非法: {}", field, message))
            }
            RepositoryError::SerializationError(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::FatalInput(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::ValidationError {
            message: err.to_string(),
            issues: err.issues().to_vec(),
        }
    }
}

impl From<WeightOverrideError> for ApiError {
    fn from(err: WeightOverrideError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
