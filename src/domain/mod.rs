// ==========================================
// 混合办公排座系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod attendance;
pub mod capacity;
pub mod constraint;
pub mod employee;
pub mod schedule;
pub mod seat;
pub mod snapshot;
pub mod types;

// 重导出核心类型
pub use attendance::AttendanceRecord;
pub use capacity::{CapacityConstraint, DailyCapacity, DayCapacityPool};
pub use constraint::{EmployeeConstraint, GlobalConstraints, SeatLock, TeamConstraint};
pub use employee::Employee;
pub use schedule::{DayPlan, ScheduleMetrics, Violation, ViolationCode, WeekSchedule};
pub use seat::Seat;
pub use snapshot::ScheduleSnapshot;
pub use types::{AttendanceLocation, LockType, Severity, WorkMode, Weekday};
