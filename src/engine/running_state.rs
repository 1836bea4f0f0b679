// ==========================================
// 混合办公排座系统 - 周内滚动状态
// ==========================================
// 职责: 连续到岗天数 / 本周到岗天数 / 客户现场天数
// 红线: 每天接收前一天的状态并返回新状态，不原地修改
// ==========================================
// 更新规则:
// - 当日到岗: consecutive = prior + 1, weekly += 1
// - 当日未到岗（含客户现场）: consecutive = 0
// ==========================================

use crate::domain::attendance::AttendanceRecord;
use crate::domain::employee::Employee;
use crate::domain::types::AttendanceLocation;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningState {
    consecutive_days: BTreeMap<String, u32>,
    weekly_days: BTreeMap<String, u32>,
    client_site_days: BTreeMap<String, u32>,
}

impl RunningState {
    /// 以历史出勤记录为种子构建周一之前的状态
    ///
    /// 从 week_start 前一天向前回溯至多 `lookback_days` 个日历日：
    /// 周末既不计数也不打断；工作日有 office 记录则计数，否则停止。
    ///
    /// # 参数
    /// - `employees`: 员工列表
    /// - `history`: 历史出勤记录
    /// - `week_start`: 目标周的周一
    /// - `lookback_days`: 回溯上限
    pub fn seeded<'e>(
        employees: impl IntoIterator<Item = &'e Employee>,
        history: &[AttendanceRecord],
        week_start: NaiveDate,
        lookback_days: u32,
    ) -> Self {
        let office_days: BTreeSet<(&str, NaiveDate)> = history
            .iter()
            .filter(|r| r.location == AttendanceLocation::Office && r.date < week_start)
            .map(|r| (r.employee_id.as_str(), r.date))
            .collect();

        let mut state = RunningState::default();
        for employee in employees {
            let id = employee.employee_id.as_str();
            let mut streak = 0;
            for back in 1..=i64::from(lookback_days) {
                let date = week_start - Duration::days(back);
                if date.weekday().number_from_monday() > 5 {
                    continue;
                }
                if office_days.contains(&(id, date)) {
                    streak += 1;
                } else {
                    break;
                }
            }
            if streak > 0 {
                state.consecutive_days.insert(id.to_string(), streak);
            }
        }
        state
    }

    pub fn consecutive(&self, employee_id: &str) -> u32 {
        self.consecutive_days.get(employee_id).copied().unwrap_or(0)
    }

    pub fn weekly(&self, employee_id: &str) -> u32 {
        self.weekly_days.get(employee_id).copied().unwrap_or(0)
    }

    pub fn client_site(&self, employee_id: &str) -> u32 {
        self.client_site_days.get(employee_id).copied().unwrap_or(0)
    }

    /// 推进一天，返回新状态
    ///
    /// # 参数
    /// - `admitted`: 当日到岗员工
    /// - `client_site`: 当日客户现场员工
    pub fn advance(&self, admitted: &[String], client_site: &[String]) -> RunningState {
        let admitted_set: BTreeSet<&str> = admitted.iter().map(String::as_str).collect();

        let mut consecutive_days = BTreeMap::new();
        for id in &admitted_set {
            consecutive_days.insert(id.to_string(), self.consecutive(id) + 1);
        }

        let mut weekly_days = self.weekly_days.clone();
        for id in &admitted_set {
            *weekly_days.entry(id.to_string()).or_insert(0) += 1;
        }

        let mut client_site_days = self.client_site_days.clone();
        for id in client_site {
            *client_site_days.entry(id.clone()).or_insert(0) += 1;
        }

        RunningState {
            consecutive_days,
            weekly_days,
            client_site_days,
        }
    }
}
