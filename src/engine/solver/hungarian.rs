use super::{SeatSolver, SolvedAssignment, SolverOutcome};
use crate::domain::employee::Employee;
use crate::domain::seat::Seat;
use crate::engine::scoring::{ScoreBreakdown, SeatFitness, ScoringEngine, TeamZoneCounts};
use crate::engine::strategy::SolverMode;

/// 不可行配对代价（远大于任何得分量级）
const INELIGIBLE_COST: f64 = 1.0e9;

// ==========================================
// HungarianSolver - 最优匹配（Kuhn-Munkres）
// ==========================================
// 代价 = -座位得分；不可行配对与虚拟列代价为 INELIGIBLE_COST
// 得分矩阵为静态矩阵: 团队聚集项依赖落座顺序，不进入矩阵
// 复杂度: O(n² × m)
#[derive(Debug, Default)]
pub struct HungarianSolver;

impl HungarianSolver {
    pub fn new() -> Self {
        Self
    }
}

impl SeatSolver for HungarianSolver {
    fn mode(&self) -> SolverMode {
        SolverMode::Optimal
    }

    fn assign(
        &self,
        attendees: &[&Employee],
        seats: &[&Seat],
        scorer: &ScoringEngine<'_>,
        _zone_counts: TeamZoneCounts,
    ) -> SolverOutcome {
        if attendees.is_empty() {
            return SolverOutcome::default();
        }

        let mut seats: Vec<&Seat> = seats.to_vec();
        seats.sort_by(|a, b| a.seat_id.cmp(&b.seat_id));

        // 静态矩阵（空计数 => 无聚集项）
        let static_counts = TeamZoneCounts::default();
        let fitness: Vec<Vec<Option<ScoreBreakdown>>> = attendees
            .iter()
            .map(|employee| {
                seats
                    .iter()
                    .map(|seat| match scorer.seat_fitness(employee, seat, &static_counts) {
                        SeatFitness::Eligible(b) => Some(b),
                        SeatFitness::Ineligible => None,
                    })
                    .collect()
            })
            .collect();

        // 列数补齐到不少于行数（虚拟列 = 未分配）
        let rows = attendees.len();
        let cols = seats.len().max(rows);
        let cost: Vec<Vec<f64>> = fitness
            .iter()
            .map(|row| {
                (0..cols)
                    .map(|j| match row.get(j) {
                        Some(Some(b)) => -b.total,
                        _ => INELIGIBLE_COST,
                    })
                    .collect()
            })
            .collect();

        let matched = min_cost_assignment(&cost);

        let mut outcome = SolverOutcome::default();
        for (i, employee) in attendees.iter().enumerate() {
            let pair = matched[i].and_then(|j| {
                fitness[i]
                    .get(j)
                    .and_then(|cell| cell.clone())
                    .map(|score| (seats[j], score))
            });
            match pair {
                Some((seat, score)) => outcome.assignments.push(SolvedAssignment {
                    employee_id: employee.employee_id.clone(),
                    seat_id: seat.seat_id.clone(),
                    score,
                }),
                None => outcome.unassigned.push(employee.employee_id.clone()),
            }
        }
        outcome
    }
}

/// 矩形代价矩阵上的最小代价指派（行数 ≤ 列数）
///
/// 势函数版 Hungarian 算法，逐行扩展增广路。
///
/// # 返回
/// 每行匹配的列下标
pub(crate) fn min_cost_assignment(cost: &[Vec<f64>]) -> Vec<Option<usize>> {
    let n = cost.len();
    if n == 0 {
        return Vec::new();
    }
    let m = cost[0].len();
    if m < n {
        return vec![None; n];
    }

    // 1-based；p[j] = 匹配到第 j 列的行（0 表示空）
    let mut u = vec![0.0_f64; n + 1];
    let mut v = vec![0.0_f64; m + 1];
    let mut p = vec![0_usize; m + 1];
    let mut way = vec![0_usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0_usize;
        let mut minv = vec![f64::INFINITY; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0_usize;

            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let cur = cost[i0 - 1][j - 1] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut matched = vec![None; n];
    for j in 1..=m {
        if p[j] > 0 {
            matched[p[j] - 1] = Some(j - 1);
        }
    }
    matched
}
