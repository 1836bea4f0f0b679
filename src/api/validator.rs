// ==========================================
// 混合办公排座系统 - 请求校验器
// ==========================================
// 职责: 排班请求进入引擎前的参数检查
// 检查项: 周一日期 / 部门比例 [0,1] / 日容量百分比 [0,100] / 权重有限
// ==========================================

use crate::api::dto::ScheduleRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::capacity::DailyCapacity;
use chrono::Datelike;

/// 校验排班请求
///
/// # 返回
/// - Ok(()): 校验通过
/// - Err(ApiError::InvalidInput): 第一处不合法的字段
pub fn validate_schedule_request(request: &ScheduleRequest) -> ApiResult<()> {
    if request.week_start.weekday() != chrono::Weekday::Mon {
        return Err(ApiError::InvalidInput(format!(
            "weekStart 必须为周一: {}",
            request.week_start
        )));
    }

    if let Some(pct) = request.department_capacity_pct {
        if !pct.is_finite() || !(0.0..=1.0).contains(&pct) {
            return Err(ApiError::InvalidInput(format!(
                "departmentCapacityPct 必须位于 [0, 1]: {}",
                pct
            )));
        }
    }

    if let Some(capacities) = &request.daily_capacities {
        for (day, capacity) in capacities {
            if let DailyCapacity::Percent(p) = capacity {
                if !p.is_finite() || !(0.0..=100.0).contains(p) {
                    return Err(ApiError::InvalidInput(format!(
                        "dailyCapacities[{}] 百分比必须位于 [0, 100]: {}",
                        day, p
                    )));
                }
            }
        }
    }

    if let Some(weights) = &request.weights {
        if let Some((name, value)) = weights.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ApiError::InvalidInput(format!(
                "weights.{} 必须为有限数: {}",
                name, value
            )));
        }
    }

    Ok(())
}
