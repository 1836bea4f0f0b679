// ==========================================
// 混合办公排座系统 - 边界校验层
// ==========================================
// 职责: 原始记录 → 已校验快照
// 流程: RecordMapper（类型转换）→ SnapshotValidator（跨记录检查）
// 红线: 任一问题即拒绝整份快照，引擎只接收已校验数据
// ==========================================

pub mod error;
pub mod raw_records;
pub mod record_mapper;
pub mod snapshot_validator;

pub use error::{ValidationError, ValidationIssue, ValidationResult};
pub use raw_records::{
    RawAttendanceRecord, RawEmployee, RawEmployeeConstraint, RawGlobalConstraints, RawSeat,
    RawSeatLock, RawSnapshot, RawTeamConstraint,
};
pub use record_mapper::{join_days, RecordMapper};
pub use snapshot_validator::SnapshotValidator;

use crate::domain::snapshot::ScheduleSnapshot;
use tracing::{debug, warn};

/// 校验原始快照并转换为引擎输入
///
/// # 返回
/// - Ok(ScheduleSnapshot): 全部记录通过
/// - Err(ValidationError::InvalidRecords): 汇总全部问题
pub fn validate_snapshot(raw: &RawSnapshot) -> ValidationResult<ScheduleSnapshot> {
    let (snapshot, mut issues) = RecordMapper::new().map_snapshot(raw);
    issues.extend(SnapshotValidator::new().validate(&snapshot));

    if issues.is_empty() {
        debug!(
            employees = snapshot.employees.len(),
            seats = snapshot.seats.len(),
            "快照校验通过"
        );
        Ok(snapshot)
    } else {
        warn!(issues = issues.len(), "快照校验失败");
        Err(ValidationError::InvalidRecords(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_snapshot_roundtrip() {
        let raw = RawSnapshot {
            employees: vec![RawEmployee {
                employee_id: Some("E1".to_string()),
                department: Some("ENG".to_string()),
                ..RawEmployee::default()
            }],
            seats: vec![RawSeat {
                seat_id: Some("S1".to_string()),
                floor: Some(1),
                zone: Some("A".to_string()),
                ..RawSeat::default()
            }],
            ..RawSnapshot::default()
        };
        let snapshot = validate_snapshot(&raw).unwrap();
        assert_eq!(snapshot.employees[0].department, "ENG");
        assert_eq!(snapshot.seats[0].zone, "A");
    }

    #[test]
    fn test_validate_snapshot_rejects_duplicates() {
        let employee = RawEmployee {
            employee_id: Some("E1".to_string()),
            ..RawEmployee::default()
        };
        let raw = RawSnapshot {
            employees: vec![employee.clone(), employee],
            ..RawSnapshot::default()
        };
        let err = validate_snapshot(&raw).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert!(err.to_string().contains("主键重复"));
    }
}
