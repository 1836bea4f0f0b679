// ==========================================
// 混合办公排座系统 - 快照一致性校验
// ==========================================
// 职责: 映射后的快照进入引擎前的跨记录检查
// 检查项:
// - 员工/座位/团队约束/员工约束 主键唯一
// - 比例字段有限且位于 [0, 1]
// - 全局最小客户现场比例 <= 最大比例
// - 座位锁定 end_date >= start_date
// ==========================================
// 说明: 锁定到未知座位不在此拒绝，运行期以 LOCK_CONFLICT 违规呈现
// ==========================================

use crate::domain::snapshot::ScheduleSnapshot;
use crate::validation::error::ValidationIssue;
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct SnapshotValidator {
    issues: Vec<ValidationIssue>,
}

impl SnapshotValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(mut self, snapshot: &ScheduleSnapshot) -> Vec<ValidationIssue> {
        self.check_unique(
            "employee",
            "employee_id",
            snapshot.employees.iter().map(|e| e.employee_id.as_str()),
        );
        self.check_unique(
            "seat",
            "seat_id",
            snapshot.seats.iter().map(|s| s.seat_id.as_str()),
        );
        self.check_unique(
            "team_constraint",
            "team_name",
            snapshot.team_constraints.iter().map(|t| t.team_name.as_str()),
        );
        self.check_unique(
            "employee_constraint",
            "employee_id",
            snapshot
                .employee_constraints
                .iter()
                .map(|c| c.employee_id.as_str()),
        );

        for employee in &snapshot.employees {
            let id = Some(employee.employee_id.as_str());
            self.check_ratio("employee", id, "client_site_ratio", employee.client_site_ratio);
            self.check_ratio("employee", id, "onsite_ratio", employee.onsite_ratio);
            self.check_ratio("employee", id, "availability_ratio", employee.availability_ratio);
            self.check_finite("employee", id, "priority_level", employee.priority_level);
            self.check_finite("employee", id, "project_count", employee.project_count);
            self.check_finite("employee", id, "commute_minutes", employee.commute_minutes);
        }

        let global = &snapshot.global_constraints;
        self.check_ratio("global_constraints", None, "min_client_site_ratio", global.min_client_site_ratio);
        self.check_ratio("global_constraints", None, "max_client_site_ratio", global.max_client_site_ratio);
        if global.min_client_site_ratio > global.max_client_site_ratio {
            self.issues.push(ValidationIssue::new(
                "global_constraints",
                None,
                "min_client_site_ratio",
                format!(
                    "最小客户现场比例 {} 大于最大比例 {}",
                    global.min_client_site_ratio, global.max_client_site_ratio
                ),
            ));
        }

        for team in &snapshot.team_constraints {
            self.check_ratio(
                "team_constraint",
                Some(&team.team_name),
                "min_copresence_ratio",
                team.min_copresence_ratio,
            );
        }

        for lock in &snapshot.seat_locks {
            if lock.end_date < lock.start_date {
                self.issues.push(ValidationIssue::new(
                    "seat_lock",
                    Some(&lock.seat_id),
                    "end_date",
                    format!("结束日期 {} 早于开始日期 {}", lock.end_date, lock.start_date),
                ));
            }
        }

        self.issues
    }

    fn check_unique<'a>(
        &mut self,
        entity: &str,
        field: &str,
        ids: impl Iterator<Item = &'a str>,
    ) {
        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        for id in ids {
            if !seen.insert(id) && reported.insert(id) {
                self.issues.push(ValidationIssue::new(
                    entity,
                    Some(id),
                    field,
                    "主键重复".to_string(),
                ));
            }
        }
    }

    fn check_ratio(&mut self, entity: &str, record_id: Option<&str>, field: &str, value: f64) {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            self.issues.push(ValidationIssue::new(
                entity,
                record_id,
                field,
                format!("比例必须位于 [0, 1]，实际 {}", value),
            ));
        }
    }

    fn check_finite(&mut self, entity: &str, record_id: Option<&str>, field: &str, value: f64) {
        if !value.is_finite() {
            self.issues.push(ValidationIssue::new(
                entity,
                record_id,
                field,
                format!("数值必须为有限数，实际 {}", value),
            ));
        }
    }
}
