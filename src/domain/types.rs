// ==========================================
// 混合办公排座系统 - 领域类型定义
// ==========================================
// 职责: 工作日、严重级别、工作模式等枚举
// 红线: 工作日固定为 Mon..Fri，按日历顺序处理
// ==========================================

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 工作日 (Weekday)
// ==========================================
// 顺序: Mon < Tue < Wed < Thu < Fri（派生 Ord 依赖声明顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    /// 一周五个工作日（日历顺序）
    pub const ALL: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
        }
    }

    /// 距周一的偏移天数
    pub fn offset(&self) -> i64 {
        match self {
            Weekday::Mon => 0,
            Weekday::Tue => 1,
            Weekday::Wed => 2,
            Weekday::Thu => 3,
            Weekday::Fri => 4,
        }
    }

    /// 前一个工作日（周一返回 None）
    pub fn previous(&self) -> Option<Weekday> {
        match self {
            Weekday::Mon => None,
            Weekday::Tue => Some(Weekday::Mon),
            Weekday::Wed => Some(Weekday::Tue),
            Weekday::Thu => Some(Weekday::Wed),
            Weekday::Fri => Some(Weekday::Thu),
        }
    }

    /// 计算该工作日在目标周的日历日期
    ///
    /// # 参数
    /// - `week_start`: 目标周的周一
    pub fn date_in_week(&self, week_start: NaiveDate) -> NaiveDate {
        week_start + Duration::days(self.offset())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" => Ok(Weekday::Mon),
            "tue" | "tuesday" => Ok(Weekday::Tue),
            "wed" | "wednesday" => Ok(Weekday::Wed),
            "thu" | "thursday" => Ok(Weekday::Thu),
            "fri" | "friday" => Ok(Weekday::Fri),
            other => Err(format!("未知工作日代码: {}", other)),
        }
    }
}

// ==========================================
// 违规严重级别 (Severity)
// ==========================================
// 顺序: Warning < Error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning, // 软约束: 不阻断流程
    Error,   // 硬约束: 员工未分配或容量溢出
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

// ==========================================
// 工作模式 (Work Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Office, // 偏好到岗
    Hybrid, // 混合办公
    Remote, // 偏好远程
}

impl Default for WorkMode {
    fn default() -> Self {
        WorkMode::Hybrid
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkMode::Office => write!(f, "office"),
            WorkMode::Hybrid => write!(f, "hybrid"),
            WorkMode::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for WorkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "office" | "onsite" => Ok(WorkMode::Office),
            "hybrid" | "" => Ok(WorkMode::Hybrid),
            "remote" => Ok(WorkMode::Remote),
            other => Err(format!("未知工作模式: {}", other)),
        }
    }
}

// ==========================================
// 座位锁定类型 (Lock Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockType {
    Permanent, // 长期固定座位
    Temporary, // 临时预留
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockType::Permanent => write!(f, "permanent"),
            LockType::Temporary => write!(f, "temporary"),
        }
    }
}

impl FromStr for LockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permanent" => Ok(LockType::Permanent),
            "temporary" | "temp" => Ok(LockType::Temporary),
            other => Err(format!("未知锁定类型: {}", other)),
        }
    }
}

// ==========================================
// 出勤地点 (Attendance Location)
// ==========================================
// 用途: 历史出勤记录，推导周一之前的连续到岗天数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceLocation {
    Office,
    Remote,
    ClientSite,
}

impl fmt::Display for AttendanceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceLocation::Office => write!(f, "office"),
            AttendanceLocation::Remote => write!(f, "remote"),
            AttendanceLocation::ClientSite => write!(f, "client_site"),
        }
    }
}

impl FromStr for AttendanceLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "office" | "onsite" => Ok(AttendanceLocation::Office),
            "remote" | "home" => Ok(AttendanceLocation::Remote),
            "client_site" | "client-site" | "client" => Ok(AttendanceLocation::ClientSite),
            other => Err(format!("未知出勤地点: {}", other)),
        }
    }
}
