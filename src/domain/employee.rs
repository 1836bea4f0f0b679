// ==========================================
// 混合办公排座系统 - 员工领域模型
// ==========================================
// 职责: 员工主数据（单次排班运行内只读）
// 红线: 进入引擎前必须经过边界校验（见 validation 模块）
// ==========================================

use crate::domain::types::{WorkMode, Weekday};
use serde::{Deserialize, Serialize};

// ==========================================
// Employee - 员工
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    // ===== 主键 =====
    pub employee_id: String, // 员工ID（不透明字符串）

    // ===== 组织归属 =====
    pub full_name: String,
    pub department: String,   // 部门（部门日容量上限按此分组）
    pub team: Option<String>, // 团队（团队约束/同区聚集按此分组）
    pub priority_level: f64,  // 优先级

    // ===== 偏好 =====
    pub preferred_work_mode: WorkMode,
    pub needs_accessible: bool, // 需要无障碍座位（硬约束）
    pub prefer_window: bool,
    pub preferred_zone: Option<String>,
    pub preferred_floor: Option<i32>,
    pub preferred_days: Vec<Weekday>,

    // ===== 比例与负载 =====
    pub client_site_ratio: f64,  // 目标客户现场比例 (0-1)
    pub onsite_ratio: f64,       // 历史到岗偏好强度 (0-1)
    pub availability_ratio: f64, // 可用比例 (0-1)
    pub project_count: f64,      // 项目数（负载代理）
    pub commute_minutes: f64,
}

impl Employee {
    /// 以默认偏好构造员工（用于测试与快照装配）
    pub fn new(employee_id: &str, department: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            full_name: employee_id.to_string(),
            department: department.to_string(),
            team: None,
            priority_level: 1.0,
            preferred_work_mode: WorkMode::Hybrid,
            needs_accessible: false,
            prefer_window: false,
            preferred_zone: None,
            preferred_floor: None,
            preferred_days: Vec::new(),
            client_site_ratio: 0.0,
            onsite_ratio: 0.5,
            availability_ratio: 1.0,
            project_count: 1.0,
            commute_minutes: 30.0,
        }
    }

    pub fn prefers_day(&self, day: Weekday) -> bool {
        self.preferred_days.contains(&day)
    }

    /// 显示名称（为空时回退到员工ID）
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.employee_id
        } else {
            &self.full_name
        }
    }
}
