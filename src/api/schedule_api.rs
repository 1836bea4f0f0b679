// ==========================================
// 混合办公排座系统 - 周排班 API
// ==========================================
// 职责: 请求校验 → 选项解析 → 快照读取与校验 → 引擎 → 整体替换落库
// 红线: 引擎为纯计算；读写数据存储只发生在本层
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::api::dto::{ScheduleRequest, ScheduleResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_schedule_request;
use crate::config::scheduler_config_trait::SchedulerConfigReader;
use crate::config::ScoringWeights;
use crate::domain::schedule::WeekSchedule;
use crate::engine::{ScheduleAssembler, SchedulingOptions};
use crate::repository::{ScheduleRepository, SnapshotRepository};
use crate::validation::validate_snapshot;

// ==========================================
// ScheduleApi - 周排班 API
// ==========================================
pub struct ScheduleApi {
    snapshot_repo: Arc<SnapshotRepository>,
    schedule_repo: Arc<ScheduleRepository>,
    config: Arc<dyn SchedulerConfigReader>,
    assembler: ScheduleAssembler,
}

impl ScheduleApi {
    pub fn new(
        snapshot_repo: Arc<SnapshotRepository>,
        schedule_repo: Arc<ScheduleRepository>,
        config: Arc<dyn SchedulerConfigReader>,
    ) -> Self {
        Self {
            snapshot_repo,
            schedule_repo,
            config,
            assembler: ScheduleAssembler::new(),
        }
    }

    /// 生成并落库一周排班（整体替换该周旧结果）
    ///
    /// # 返回
    /// - Ok(ScheduleResponse): 含 scheduleId
    /// - Err(ApiError): 参数/快照校验失败、致命输入或数据库错误
    #[instrument(skip(self, request), fields(week_start = %request.week_start))]
    pub async fn generate_week(&self, request: &ScheduleRequest) -> ApiResult<ScheduleResponse> {
        let (schedule, options) = self.compute(request).await?;

        let options_json = serde_json::to_string(&options)
            .map_err(|e| ApiError::InternalError(format!("运行选项序列化失败: {}", e)))?;
        let schedule_id =
            self.schedule_repo
                .replace_week(&schedule, options.enforce_constraints, Some(&options_json))?;

        info!(schedule_id = %schedule_id, "周排班已生成并落库");
        Ok(ScheduleResponse::from_schedule(&schedule, Some(schedule_id)))
    }

    /// 预览一周排班（不落库）
    #[instrument(skip(self, request), fields(week_start = %request.week_start))]
    pub async fn preview_week(&self, request: &ScheduleRequest) -> ApiResult<ScheduleResponse> {
        let (schedule, _) = self.compute(request).await?;
        Ok(ScheduleResponse::from_schedule(&schedule, None))
    }

    /// 读取已落库的周排班
    pub fn get_week(&self, week_start: NaiveDate) -> ApiResult<ScheduleResponse> {
        let stored = self
            .schedule_repo
            .load_week(week_start)?
            .ok_or_else(|| ApiError::NotFound(format!("周排班(week_start={})不存在", week_start)))?;

        Ok(ScheduleResponse::from_schedule(
            &stored.schedule,
            Some(stored.schedule_id),
        ))
    }

    /// 请求字段 + 配置默认值 → 运行选项
    ///
    /// 请求中显式给出的字段优先；权重先合并配置覆写，再合并请求覆写
    pub async fn resolve_options(&self, request: &ScheduleRequest) -> ApiResult<SchedulingOptions> {
        let enforce_constraints = match request.enforce_constraints {
            Some(v) => v,
            None => self
                .config
                .get_enforce_constraints_default()
                .await
                .map_err(config_error)?,
        };
        let department_capacity_pct = match request.department_capacity_pct {
            Some(v) => v,
            None => self
                .config
                .get_department_capacity_pct()
                .await
                .map_err(config_error)?,
        };
        let solver_mode = match request.solver_mode {
            Some(v) => v,
            None => self
                .config
                .get_default_solver_mode()
                .await
                .map_err(config_error)?,
        };
        let history_lookback_days = self
            .config
            .get_history_lookback_days()
            .await
            .map_err(config_error)?;

        let config_overrides = self.config.get_weight_overrides().await.map_err(config_error)?;
        let mut weights = ScoringWeights::default().merged_with(&config_overrides)?;
        if let Some(request_overrides) = &request.weights {
            weights = weights.merged_with(request_overrides)?;
        }

        Ok(SchedulingOptions {
            enforce_constraints,
            override_ratios: request.override_ratios.unwrap_or(false),
            daily_capacities: request.daily_capacities.clone().unwrap_or_default(),
            department_capacity_pct,
            solver_mode,
            history_lookback_days,
            weights,
        })
    }

    async fn compute(
        &self,
        request: &ScheduleRequest,
    ) -> ApiResult<(WeekSchedule, SchedulingOptions)> {
        // 1. 参数校验
        validate_schedule_request(request)?;

        // 2. 运行选项
        let options = self.resolve_options(request).await?;

        // 3. 读取并校验快照
        let raw = self
            .snapshot_repo
            .load_raw(request.week_start, options.history_lookback_days)?;
        let snapshot = validate_snapshot(&raw)?;

        // 4. 引擎计算
        let schedule = self
            .assembler
            .generate(&snapshot, request.week_start, &options)?;

        Ok((schedule, options))
    }
}

fn config_error(err: Box<dyn std::error::Error + Send + Sync>) -> ApiError {
    ApiError::ConfigError(err.to_string())
}
