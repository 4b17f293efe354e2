// ==========================================
// 零售需求分析看板 - 季节系数
// ==========================================
// 系数按乘法组合: 月份系数 × 周末系数
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};

pub const SUMMER_FACTOR: f64 = 1.3; // 6-8 月
pub const DECEMBER_FACTOR: f64 = 1.2;
pub const WEEKEND_FACTOR: f64 = 1.5;

/// 默认季节函数
pub fn default_seasonality(date: NaiveDate) -> f64 {
    let month_factor = match date.month() {
        6..=8 => SUMMER_FACTOR,
        12 => DECEMBER_FACTOR,
        _ => 1.0,
    };

    let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
    if weekend {
        month_factor * WEEKEND_FACTOR
    } else {
        month_factor
    }
}

/// 平季节（所有日期系数为 1,测试与基准场景使用）
pub fn flat_seasonality(_date: NaiveDate) -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_weekday_off_season_is_neutral() {
        // 2025-03-05 周三
        assert_eq!(default_seasonality(d(2025, 3, 5)), 1.0);
    }

    #[test]
    fn test_factors_compose_multiplicatively() {
        // 2025-07-05 周六: 1.3 × 1.5
        assert!((default_seasonality(d(2025, 7, 5)) - 1.95).abs() < 1e-12);
        // 2025-12-06 周六: 1.2 × 1.5
        assert!((default_seasonality(d(2025, 12, 6)) - 1.8).abs() < 1e-12);
        // 2025-12-03 周三
        assert!((default_seasonality(d(2025, 12, 3)) - 1.2).abs() < 1e-12);
        // 2025-03-09 周日
        assert!((default_seasonality(d(2025, 3, 9)) - 1.5).abs() < 1e-12);
    }
}
