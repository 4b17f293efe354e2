// ==========================================
// 零售需求分析看板 - 在售率计算
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 展示占位符
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum Availability {
    Rate(f64), // 百分比（0-100）
    NotComputable,
}

impl Availability {
    pub fn rate(&self) -> Option<f64> {
        match self {
            Availability::Rate(r) => Some(*r),
            Availability::NotComputable => None,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Rate(r) => write!(f, "{:.1}%", r),
            Availability::NotComputable => write!(f, "{}", PLACEHOLDER),
        }
    }
}

/// 在售率 = available / total × 100
///
/// total 为 0 或任一输入缺失时不可计算
pub fn compute_availability(total: Option<u64>, available: Option<u64>) -> Availability {
    match (total, available) {
        (Some(total), Some(available)) if total > 0 => {
            Availability::Rate(available as f64 / total as f64 * 100.0)
        }
        _ => Availability::NotComputable,
    }
}
