// ==========================================
// 混合办公排座系统 - 座位求解策略定义
// ==========================================
// 用途：
// - 请求层选择座位求解器（贪心 / 最优匹配）；
// - 结果中回报实际使用的求解器，保证结果可解释、可复现。

use serde::{Deserialize, Serialize};

/// 座位求解模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverMode {
    Greedy,
    Optimal,
}

impl SolverMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverMode::Greedy => "greedy",
            SolverMode::Optimal => "optimal",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            SolverMode::Greedy => "贪心分配",
            SolverMode::Optimal => "最优匹配",
        }
    }
}

impl Default for SolverMode {
    fn default() -> Self {
        SolverMode::Greedy
    }
}

impl std::fmt::Display for SolverMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SolverMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(SolverMode::Greedy),
            "optimal" | "hungarian" => Ok(SolverMode::Optimal),
            other => Err(format!("未知求解模式: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solver_mode() {
        assert_eq!("greedy".parse::<SolverMode>().unwrap(), SolverMode::Greedy);
        assert_eq!(" Hungarian ".parse::<SolverMode>().unwrap(), SolverMode::Optimal);
        assert!("random".parse::<SolverMode>().is_err());
        assert_eq!(SolverMode::default(), SolverMode::Greedy);
    }
}
