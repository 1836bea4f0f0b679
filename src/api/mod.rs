// ==========================================
// 混合办公排座系统 - API 层
// ==========================================
// 职责: 提供排班服务接口，供命令行入口调用
// ==========================================

pub mod dto;
pub mod error;
pub mod schedule_api;
pub mod validator;

// 重导出核心类型
pub use dto::{MetaDto, MetricsDto, ScheduleRequest, ScheduleResponse, ViolationDto};
pub use error::{ApiError, ApiResult};
pub use schedule_api::ScheduleApi;
pub use validator::validate_schedule_request;
