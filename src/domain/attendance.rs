// ==========================================
// 混合办公排座系统 - 历史出勤记录
// ==========================================
// 用途: 推导目标周之前的连续到岗天数（种子状态）
// ==========================================

use crate::domain::types::AttendanceLocation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: String,
    pub date: NaiveDate,
    pub location: AttendanceLocation,
}
