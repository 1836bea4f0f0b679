// ==========================================
// 混合办公排座系统 - 客户现场预分配
// ==========================================
// 职责: 在出勤选择之前，把部分员工-日划到客户现场
// 规则:
// 1) 每日目标 = floor(max_client_site_ratio × 总人数)
// 2) 排序键: client_site_ratio + 0.1 × priority_level 降序，员工ID升序
// 3) 回避当日者跳过；偏好当日者，或本周客户现场天数 < round(ratio × 5) 者划入
// 4) 达到当日目标即停止
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::types::Weekday;
use crate::engine::context::SchedulingContext;
use crate::engine::running_state::RunningState;
use std::cmp::Ordering;
use tracing::debug;

pub struct ClientSiteAllocator<'a> {
    ctx: &'a SchedulingContext<'a>,
    ranking: Vec<&'a Employee>,
}

impl<'a> ClientSiteAllocator<'a> {
    pub fn new(ctx: &'a SchedulingContext<'a>) -> Self {
        let mut ranking: Vec<&Employee> = ctx.employees().collect();
        ranking.sort_by(|a, b| {
            let ka = a.client_site_ratio + 0.1 * a.priority_level;
            let kb = b.client_site_ratio + 0.1 * b.priority_level;
            kb.partial_cmp(&ka)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        Self { ctx, ranking }
    }

    /// 每日客户现场目标人数
    pub fn daily_target(&self) -> usize {
        let ratio = self.ctx.global().max_client_site_ratio.clamp(0.0, 1.0);
        (ratio * self.ctx.headcount() as f64).floor() as usize
    }

    /// 分配单日客户现场员工
    ///
    /// # 参数
    /// - `day`: 工作日
    /// - `state`: 截至前一天的滚动状态（提供本周已分配客户现场天数）
    ///
    /// # 返回
    /// 当日客户现场员工ID（按排序键顺序）
    pub fn allocate_day(&self, day: Weekday, state: &RunningState) -> Vec<String> {
        if self.ctx.options.override_ratios {
            return Vec::new();
        }

        let target = self.daily_target();
        let mut routed = Vec::new();

        for employee in &self.ranking {
            if routed.len() >= target {
                break;
            }
            if self.ctx.avoids_day(employee, day) {
                continue;
            }

            let quota = (employee.client_site_ratio.clamp(0.0, 1.0) * 5.0).round() as u32;
            let under_quota = state.client_site(&employee.employee_id) < quota;

            if self.ctx.prefers_day(employee, day) || under_quota {
                routed.push(employee.employee_id.clone());
            }
        }

        debug!(
            day = %day,
            target = target,
            routed = routed.len(),
            "客户现场预分配完成"
        );
        routed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constraint::EmployeeConstraint;
    use crate::domain::seat::Seat;
    use crate::domain::snapshot::ScheduleSnapshot;
    use crate::engine::context::SchedulingOptions;
    use chrono::NaiveDate;

    fn snapshot() -> ScheduleSnapshot {
        let mut e1 = Employee::new("E1", "SALES");
        e1.client_site_ratio = 0.4; // 配额 2 天
        let mut e2 = Employee::new("E2", "SALES");
        e2.client_site_ratio = 0.2; // 配额 1 天
        let e3 = Employee::new("E3", "ENG");
        let e4 = Employee::new("E4", "ENG");

        let mut c1 = EmployeeConstraint::new("E1");
        c1.avoid_days = vec![Weekday::Wed];

        let mut snapshot =
            ScheduleSnapshot::new(vec![e1, e2, e3, e4], vec![Seat::new("S1", 1, "A")]);
        snapshot.global_constraints.max_client_site_ratio = 0.5;
        snapshot.employee_constraints.push(c1);
        snapshot
    }

    #[test]
    fn test_quota_driven_allocation_across_week() {
        let snapshot = snapshot();
        let options = SchedulingOptions::default();
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let ctx = SchedulingContext::new(&snapshot, monday, &options);
        let allocator = ClientSiteAllocator::new(&ctx);

        assert_eq!(allocator.daily_target(), 2);

        let mut state = RunningState::default();
        let mut routed_by_day = Vec::new();
        for day in Weekday::ALL {
            let routed = allocator.allocate_day(day, &state);
            state = state.advance(&[], &routed);
            routed_by_day.push(routed);
        }

        assert_eq!(routed_by_day[0], vec!["E1", "E2"]);
        assert_eq!(routed_by_day[1], vec!["E1"]);
        assert!(routed_by_day[2].is_empty());
        assert_eq!(state.client_site("E1"), 2);
        assert_eq!(state.client_site("E2"), 1);
        assert_eq!(state.client_site("E3"), 0);
    }

    #[test]
    fn test_override_ratios_skips_allocation() {
        let snapshot = snapshot();
        let options = SchedulingOptions {
            override_ratios: true,
            ..SchedulingOptions::default()
        };
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let ctx = SchedulingContext::new(&snapshot, monday, &options);
        let allocator = ClientSiteAllocator::new(&ctx);

        assert!(allocator
            .allocate_day(Weekday::Mon, &RunningState::default())
            .is_empty());
    }
}
