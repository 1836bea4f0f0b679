// ==========================================
// 混合办公排座系统 - 引擎层
// ==========================================
// 职责: 实现排班规则引擎，不拼 SQL、不做 I/O
// 红线: 所有加减分与排除必须输出原因标签或违规
// ==========================================
// 组件（由叶到根）:
// - scoring: ScoringEngine（出勤评分 / 座位评分）
// - attendance: AttendanceSelector（单日到岗选择）
// - seat_matcher + solver: SeatMatcher / SeatSolver（座位匹配）
// - violations: ViolationCollector（违规累积）
// - orchestrator: ScheduleAssembler（逐日编排 + 指标）
// ==========================================

pub mod attendance;
pub mod client_site;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod running_state;
pub mod scoring;
pub mod seat_matcher;
pub mod solver;
pub mod strategy;
pub mod violations;

// 重导出核心引擎
pub use attendance::{AttendanceSelector, DaySelection};
pub use client_site::ClientSiteAllocator;
pub use context::{SchedulingContext, SchedulingOptions};
pub use error::{EngineError, EngineResult};
pub use orchestrator::ScheduleAssembler;
pub use running_state::RunningState;
pub use scoring::{ScoreBreakdown, SeatFitness, ScoringEngine, TeamZoneCounts};
pub use seat_matcher::{DaySeating, SeatMatcher};
pub use solver::{solver_for, GreedySolver, HungarianSolver, SeatSolver, SolverOutcome};
pub use strategy::SolverMode;
pub use violations::ViolationCollector;
