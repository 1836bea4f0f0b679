// ==========================================
// 混合办公排座系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("共享连接锁获取失败: {0}")]
    LockError(String),

    #[error("SQL 执行失败: {0}")]
    DatabaseQueryError(String),

    /// assignments 表的同日一座一人 / 一人一座约束，或主键冲突
    #[error("唯一约束冲突: {0}")]
    UniqueConstraintViolation(String),

    /// 排班日/分配行引用了不存在的排班
    #[error("外键约束冲突: {0}")]
    ForeignKeyViolation(String),

    // ===== 存储列解析错误 =====
    #[error("存储列取值非法 (column={field}): {message}")]
    FieldValueError { field: String, message: String },

    #[error("JSON 列序列化失败: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "row".to_string(),
                id: "-".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
