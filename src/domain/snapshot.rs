// ==========================================
// 混合办公排座系统 - 数据快照
// ==========================================
// 职责: 单次排班运行的只读输入
// 红线: 引擎不回写快照；结果由调用方负责持久化
// ==========================================

use crate::domain::attendance::AttendanceRecord;
use crate::domain::constraint::{EmployeeConstraint, GlobalConstraints, SeatLock, TeamConstraint};
use crate::domain::employee::Employee;
use crate::domain::seat::Seat;
use serde::{Deserialize, Serialize};

/// 排班输入快照（已通过边界校验的强类型实体）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub employees: Vec<Employee>,
    pub seats: Vec<Seat>,
    pub global_constraints: GlobalConstraints,
    #[serde(default)]
    pub team_constraints: Vec<TeamConstraint>,
    #[serde(default)]
    pub employee_constraints: Vec<EmployeeConstraint>,
    #[serde(default)]
    pub seat_locks: Vec<SeatLock>,
    #[serde(default)]
    pub attendance_history: Vec<AttendanceRecord>,
}

impl ScheduleSnapshot {
    pub fn new(employees: Vec<Employee>, seats: Vec<Seat>) -> Self {
        Self {
            employees,
            seats,
            ..Default::default()
        }
    }

    pub fn headcount(&self) -> usize {
        self.employees.len()
    }
}
