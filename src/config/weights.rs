// ==========================================
// 混合办公排座系统 - 评分权重配置
// ==========================================
// 职责: 出勤评分与座位评分的全部权重（具名字段 + 默认值）
// 红线: 运行开始时与调用方覆写合并一次，之后不再修改
// ==========================================
// 符号约定: 惩罚项权重为负数，评分时直接相加
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// 权重覆写错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightOverrideError {
    #[error("未知权重名称: {0}")]
    UnknownWeight(String),

    #[error("权重值非法 (name={name}): {value}")]
    NonFinite { name: String, value: f64 },
}

/// 评分权重
///
/// 出勤评分（dayFitness）:
/// - `onsite_base` 40.0: 到岗偏好强度 × 权重
/// - `availability_base` 30.0: 可用比例 × 权重
/// - `preferred_day` 50.0: 当日为个人偏好日
/// - `team_preferred_day` 20.0: 当日为团队偏好日
/// - `priority` 10.0: 优先级 × 权重
/// - `avoid_day` -100.0: 当日为回避日
/// - `max_consecutive_penalty` -200.0: 已达连续到岗上限
/// - `weekly_limit_penalty` -150.0: 已达周到岗上限
///
/// 座位评分（seatFitness）:
/// - `w_onsite_ratio` 2.0, `w_project_penalty` -0.05, `w_window` 1.0,
///   `w_accessible` 1.5, `w_zone` 0.5, `w_floor` 0.4, `w_zone_cohesion` 0.75
/// - `w_accessibility_mismatch` -1000.0: 仅在宽松模式（不强制约束）下使用
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    // ===== 出勤评分 =====
    pub onsite_base: f64,
    pub availability_base: f64,
    pub preferred_day: f64,
    pub team_preferred_day: f64,
    pub priority: f64,
    pub avoid_day: f64,
    pub max_consecutive_penalty: f64,
    pub weekly_limit_penalty: f64,

    // ===== 座位评分 =====
    pub w_onsite_ratio: f64,
    pub w_project_penalty: f64,
    pub w_window: f64,
    pub w_accessible: f64,
    pub w_zone: f64,
    pub w_floor: f64,
    pub w_zone_cohesion: f64,
    pub w_accessibility_mismatch: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            onsite_base: 40.0,
            availability_base: 30.0,
            preferred_day: 50.0,
            team_preferred_day: 20.0,
            priority: 10.0,
            avoid_day: -100.0,
            max_consecutive_penalty: -200.0,
            weekly_limit_penalty: -150.0,

            w_onsite_ratio: 2.0,
            w_project_penalty: -0.05,
            w_window: 1.0,
            w_accessible: 1.5,
            w_zone: 0.5,
            w_floor: 0.4,
            w_zone_cohesion: 0.75,
            w_accessibility_mismatch: -1000.0,
        }
    }
}

impl ScoringWeights {
    /// 全部权重名称（与序列化字段名一致）
    pub const NAMES: [&'static str; 16] = [
        "onsite_base",
        "availability_base",
        "preferred_day",
        "team_preferred_day",
        "priority",
        "avoid_day",
        "max_consecutive_penalty",
        "weekly_limit_penalty",
        "w_onsite_ratio",
        "w_project_penalty",
        "w_window",
        "w_accessible",
        "w_zone",
        "w_floor",
        "w_zone_cohesion",
        "w_accessibility_mismatch",
    ];

    fn slot_mut(&mut self, name: &str) -> Option<&mut f64> {
        let slot = match name {
            "onsite_base" => &mut self.onsite_base,
            "availability_base" => &mut self.availability_base,
            "preferred_day" => &mut self.preferred_day,
            "team_preferred_day" => &mut self.team_preferred_day,
            "priority" => &mut self.priority,
            "avoid_day" => &mut self.avoid_day,
            "max_consecutive_penalty" => &mut self.max_consecutive_penalty,
            "weekly_limit_penalty" => &mut self.weekly_limit_penalty,
            "w_onsite_ratio" => &mut self.w_onsite_ratio,
            "w_project_penalty" => &mut self.w_project_penalty,
            "w_window" => &mut self.w_window,
            "w_accessible" => &mut self.w_accessible,
            "w_zone" => &mut self.w_zone,
            "w_floor" => &mut self.w_floor,
            "w_zone_cohesion" => &mut self.w_zone_cohesion,
            "w_accessibility_mismatch" => &mut self.w_accessibility_mismatch,
            _ => return None,
        };
        Some(slot)
    }

    /// 按名称读取权重
    pub fn get(&self, name: &str) -> Option<f64> {
        let mut copy = *self;
        copy.slot_mut(name).map(|v| *v)
    }

    /// 合并调用方覆写（只覆盖给出的子集）
    ///
    /// # 返回
    /// - Ok(ScoringWeights): 合并后的新权重
    /// - Err: 出现未知名称或非有限值
    pub fn merged_with(
        &self,
        overrides: &BTreeMap<String, f64>,
    ) -> Result<ScoringWeights, WeightOverrideError> {
        let mut merged = *self;
        for (name, value) in overrides {
            if !value.is_finite() {
                return Err(WeightOverrideError::NonFinite {
                    name: name.clone(),
                    value: *value,
                });
            }
            let slot = merged
                .slot_mut(name.trim())
                .ok_or_else(|| WeightOverrideError::UnknownWeight(name.clone()))?;
            *slot = *value;
        }
        Ok(merged)
    }

    /// 以名称 -> 值的形式导出（用于配置快照）
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        Self::NAMES
            .iter()
            .filter_map(|name| self.get(name).map(|v| (name.to_string(), v)))
            .collect()
    }
}
