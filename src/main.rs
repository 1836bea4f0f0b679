// ==========================================
// 混合办公排座系统 - 命令行入口
// ==========================================
// 用法:
//   office-seat-planner [db_path] [week_start] [--no-enforce] [--override-ratios]
//                       [--solver greedy|optimal] [--preview]
// 输出: 排班结果 JSON（stdout）；日志写入 stderr
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Duration, Local, NaiveDate};
use office_seat_planner::api::ScheduleRequest;
use office_seat_planner::app::{get_default_db_path, AppState};
use office_seat_planner::engine::SolverMode;
use office_seat_planner::logging;

/// 命令行参数
#[derive(Debug, Default)]
struct CliArgs {
    db_path: Option<String>,
    week_start: Option<NaiveDate>,
    no_enforce: bool,
    override_ratios: bool,
    solver: Option<SolverMode>,
    preview: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-enforce" => cli.no_enforce = true,
            "--override-ratios" => cli.override_ratios = true,
            "--preview" => cli.preview = true,
            "--solver" => {
                let value = args.next().ok_or_else(|| anyhow!("--solver 缺少取值"))?;
                cli.solver = Some(value.parse::<SolverMode>().map_err(|e| anyhow!(e))?);
            }
            flag if flag.starts_with("--") => bail!("未知参数: {}", flag),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    cli.db_path = positional.next();
    if let Some(raw) = positional.next() {
        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("week_start 格式错误: {}", raw))?;
        cli.week_start = Some(date);
    }
    if let Some(extra) = positional.next() {
        bail!("多余的参数: {}", extra);
    }

    Ok(cli)
}

/// 下一个周一（今天是周一则取今天）
fn upcoming_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(i64::from(days_ahead))
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let cli = parse_args(std::env::args().skip(1))?;

    tracing::info!("==================================================");
    tracing::info!("{} v{}", office_seat_planner::APP_NAME, office_seat_planner::VERSION);
    tracing::info!("==================================================");

    let db_path = cli.db_path.clone().unwrap_or_else(get_default_db_path);
    let week_start = cli
        .week_start
        .unwrap_or_else(|| upcoming_monday(Local::now().date_naive()));
    tracing::info!(db_path = %db_path, week_start = %week_start, "使用数据库");

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    let mut request = ScheduleRequest::for_week(week_start);
    if cli.no_enforce {
        request.enforce_constraints = Some(false);
    }
    if cli.override_ratios {
        request.override_ratios = Some(true);
    }
    request.solver_mode = cli.solver;

    let response = if cli.preview {
        state.schedule_api.preview_week(&request).await
    } else {
        state.schedule_api.generate_week(&request).await
    }
    .context("周排班生成失败")?;

    tracing::info!(
        solver = response.meta.solver_used.title_cn(),
        total_assignments = response.meta.total_assignments,
        violations = response.violations.len(),
        persisted = response.schedule_id.is_some(),
        "周排班完成"
    );

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args_flags_and_positionals() {
        let cli = parse_args(args(&[
            "plan.db",
            "2026-03-02",
            "--no-enforce",
            "--solver",
            "optimal",
        ]))
        .unwrap();
        assert_eq!(cli.db_path.as_deref(), Some("plan.db"));
        assert_eq!(cli.week_start, NaiveDate::from_ymd_opt(2026, 3, 2));
        assert!(cli.no_enforce);
        assert!(!cli.override_ratios);
        assert_eq!(cli.solver, Some(SolverMode::Optimal));
    }

    #[test]
    fn test_parse_args_rejects_unknown() {
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["db", "03/02/2026"])).is_err());
        assert!(parse_args(args(&["--solver"])).is_err());
    }

    #[test]
    fn test_upcoming_monday() {
        let wed = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(upcoming_monday(wed), NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        let mon = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(upcoming_monday(mon), mon);
    }
}
