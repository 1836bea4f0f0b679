// ==========================================
// 混合办公排座系统 - 输入快照数据仓储
// ==========================================
// 职责: 读取员工/座位/约束/锁定/历史出勤的原始行；写入种子数据
// 红线: Repository 不含业务逻辑，读出的是未校验的原始记录
// ==========================================

mod core;
mod queries;


pub use core::SnapshotRepository;
