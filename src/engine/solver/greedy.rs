use super::{SeatSolver, SolvedAssignment, SolverOutcome};
use crate::domain::employee::Employee;
use crate::domain::seat::Seat;
use crate::engine::scoring::{ScoreBreakdown, SeatFitness, ScoringEngine, TeamZoneCounts};
use crate::engine::strategy::SolverMode;

// ==========================================
// GreedySolver - 贪心座位分配
// ==========================================
// 复杂度: O(到岗人数 × 座位数)
// 团队-区域计数随每次落座更新，影响后续员工的聚集加分
#[derive(Debug, Default)]
pub struct GreedySolver;

impl GreedySolver {
    pub fn new() -> Self {
        Self
    }
}

impl SeatSolver for GreedySolver {
    fn mode(&self) -> SolverMode {
        SolverMode::Greedy
    }

    fn assign(
        &self,
        attendees: &[&Employee],
        seats: &[&Seat],
        scorer: &ScoringEngine<'_>,
        mut zone_counts: TeamZoneCounts,
    ) -> SolverOutcome {
        let mut available: Vec<&Seat> = seats.to_vec();
        available.sort_by(|a, b| a.seat_id.cmp(&b.seat_id));

        let mut outcome = SolverOutcome::default();

        for employee in attendees {
            // 座位按ID升序遍历，仅在严格更高分时替换 => 同分取ID最小
            let mut best: Option<(usize, ScoreBreakdown)> = None;
            for (idx, seat) in available.iter().enumerate() {
                if let SeatFitness::Eligible(breakdown) =
                    scorer.seat_fitness(employee, seat, &zone_counts)
                {
                    let better = match &best {
                        Some((_, current)) => breakdown.total > current.total,
                        None => true,
                    };
                    if better {
                        best = Some((idx, breakdown));
                    }
                }
            }

            match best {
                Some((idx, score)) => {
                    let seat = available.remove(idx);
                    zone_counts.record(employee.team.as_deref(), &seat.zone);
                    outcome.assignments.push(SolvedAssignment {
                        employee_id: employee.employee_id.clone(),
                        seat_id: seat.seat_id.clone(),
                        score,
                    });
                }
                None => outcome.unassigned.push(employee.employee_id.clone()),
            }
        }

        outcome
    }
}
