// ==========================================
// 混合办公排座系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 周出勤与座位分配（批处理，单次运行）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 边界校验层 - 原始记录 → 已校验快照
pub mod validation;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 排班规则
pub mod engine;

// 配置层 - 系统配置与权重
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建库）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    DayPlan, Employee, Seat, ScheduleSnapshot, Violation, ViolationCode, WeekSchedule, Weekday,
};

// 引擎
pub use engine::{ScheduleAssembler, SchedulingOptions, SolverMode};

// API
pub use api::{ScheduleApi, ScheduleRequest, ScheduleResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "混合办公排座系统";
