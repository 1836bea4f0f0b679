// ==========================================
// 混合办公排座系统 - 违规收集器
// ==========================================
// 职责: 按发生顺序累积结构化警告/错误
// 红线: 软违规不阻断流程；所有违规都必须返回给调用方
// ==========================================

use crate::domain::schedule::{Violation, ViolationCode};
use crate::domain::types::{Severity, Weekday};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct ViolationCollector {
    violations: Vec<Violation>,
}

impl ViolationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条违规
    pub fn push(
        &mut self,
        day: Weekday,
        employee_id: Option<&str>,
        code: ViolationCode,
        severity: Severity,
        message: String,
    ) {
        match severity {
            Severity::Error => warn!(
                day = %day,
                employee_id = employee_id.unwrap_or("-"),
                code = %code,
                "{}",
                message
            ),
            Severity::Warning => debug!(
                day = %day,
                employee_id = employee_id.unwrap_or("-"),
                code = %code,
                "{}",
                message
            ),
        }

        self.violations.push(Violation {
            day,
            employee_id: employee_id.map(str::to_string),
            message,
            severity,
            code,
        });
    }

    pub fn warning(
        &mut self,
        day: Weekday,
        employee_id: Option<&str>,
        code: ViolationCode,
        message: String,
    ) {
        self.push(day, employee_id, code, Severity::Warning, message);
    }

    pub fn error(
        &mut self,
        day: Weekday,
        employee_id: Option<&str>,
        code: ViolationCode,
        message: String,
    ) {
        self.push(day, employee_id, code, Severity::Error, message);
    }

    /// 合并另一批违规（保持原有顺序）
    pub fn extend(&mut self, violations: Vec<Violation>) {
        self.violations.extend(violations);
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order_with_counts() {
        let mut collector = ViolationCollector::new();
        collector.warning(
            Weekday::Mon,
            Some("E1"),
            ViolationCode::DeptCapExceeded,
            "部门上限".to_string(),
        );
        collector.error(
            Weekday::Tue,
            None,
            ViolationCode::FloorCapacityOverflow,
            "楼层溢出".to_string(),
        );

        assert_eq!(collector.len(), 2);
        assert_eq!(collector.count(Severity::Error), 1);
        let violations = collector.into_vec();
        assert_eq!(violations[0].employee_id.as_deref(), Some("E1"));
        assert_eq!(violations[1].day, Weekday::Tue);
        assert_eq!(violations[1].employee_id, None);
    }
}
