// ==========================================
// 混合办公排座系统 - 座位求解器
// ==========================================
// 红线: 同一天一座一人、一人一座
// 红线: 无障碍硬约束由评分引擎的 Ineligible 保证
// ==========================================
// 职责: 为锁定之外的到岗员工分配座位
// 输入: 到岗员工（出勤顺序）+ 可用座位（座位ID升序）+ 评分引擎
// 输出: 员工 -> 座位（含得分明细）+ 未分配员工
// ==========================================
// 策略:
// - GreedySolver: 逐人取最高分可用座位（同分取座位ID最小）
// - HungarianSolver: 静态得分矩阵上的最小代价二分匹配
// ==========================================

mod greedy;
mod hungarian;


pub use greedy::GreedySolver;
pub use hungarian::HungarianSolver;

use crate::domain::employee::Employee;
use crate::domain::seat::Seat;
use crate::engine::scoring::{ScoreBreakdown, ScoringEngine, TeamZoneCounts};
use crate::engine::strategy::SolverMode;

/// 单个座位分配
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedAssignment {
    pub employee_id: String,
    pub seat_id: String,
    pub score: ScoreBreakdown,
}

/// 求解结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverOutcome {
    pub assignments: Vec<SolvedAssignment>, // 按到岗顺序
    pub unassigned: Vec<String>,            // 按到岗顺序
}

// ==========================================
// Trait: SeatSolver
// ==========================================
pub trait SeatSolver {
    /// 实际使用的求解模式
    fn mode(&self) -> SolverMode;

    /// 分配座位
    ///
    /// # 参数
    /// - `attendees`: 待分配员工（出勤顺序）
    /// - `seats`: 可用座位（已剔除锁定座位）
    /// - `scorer`: 评分引擎
    /// - `zone_counts`: 已落座（锁定）员工形成的团队-区域计数
    fn assign(
        &self,
        attendees: &[&Employee],
        seats: &[&Seat],
        scorer: &ScoringEngine<'_>,
        zone_counts: TeamZoneCounts,
    ) -> SolverOutcome;
}

/// 按模式构造求解器
pub fn solver_for(mode: SolverMode) -> Box<dyn SeatSolver> {
    match mode {
        SolverMode::Greedy => Box::new(GreedySolver::new()),
        SolverMode::Optimal => Box::new(HungarianSolver::new()),
    }
}
