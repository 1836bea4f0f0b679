// ==========================================
// 混合办公排座系统 - 边界校验错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 单条校验问题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub entity: String,            // 实体类型 (employee/seat/...)
    pub record_id: Option<String>, // 记录ID（如可解析）
    pub field: String,             // 问题字段
    pub message: String,           // 问题描述
}

impl ValidationIssue {
    pub fn new(entity: &str, record_id: Option<&str>, field: &str, message: String) -> Self {
        Self {
            entity: entity.to_string(),
            record_id: record_id.map(str::to_string),
            field: field.to_string(),
            message,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}].{}: {}",
            self.entity,
            self.record_id.as_deref().unwrap_or("?"),
            self.field,
            self.message
        )
    }
}

/// 边界校验错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("输入数据校验失败 ({} 项): {}", .0.len(), summarize(.0))]
    InvalidRecords(Vec<ValidationIssue>),
}

impl ValidationError {
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ValidationError::InvalidRecords(issues) => issues,
        }
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    let mut parts: Vec<String> = issues.iter().take(3).map(|i| i.to_string()).collect();
    if issues.len() > 3 {
        parts.push("...".to_string());
    }
    parts.join("; ")
}

pub type ValidationResult<T> = Result<T, ValidationError>;
