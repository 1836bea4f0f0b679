// ==========================================
// 混合办公排座系统 - 引擎层错误类型
// ==========================================
// 仅用于致命输入错误：出现即中止，不产生任何 DayPlan
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("员工名单为空，无法生成排班")]
    EmptyRoster,

    #[error("座位清单为空，无法生成排班")]
    EmptySeatInventory,

    #[error("周起始日必须为周一: {0}")]
    WeekStartNotMonday(NaiveDate),
}

pub type EngineResult<T> = Result<T, EngineError>;
