// ==========================================
// 混合办公排座系统 - 周排班结果数据仓储
// ==========================================
// 职责: schedules / schedule_days / assignments 三表读写
// 红线: 周排班重算为整体替换（单事务删除旧结果 + 写入新结果）
// 红线: Repository 不含业务逻辑
// ==========================================

mod core;
mod queries;

#[cfg(test)]
mod tests;

pub use core::{ScheduleRepository, StoredSchedule, SCHEDULE_STATUS_GENERATED};
