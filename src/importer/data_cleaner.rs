// ==========================================
// 零售需求分析看板 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 布尔标志 / 日期 / 数值解析
// 红线: 清洗只返回 Option,不产生 Err（缺陷由调用方记录 DQ）
// ==========================================

use chrono::NaiveDate;

pub struct DataCleaner;

impl DataCleaner {
    /// 去除首尾空白,空串视为缺失
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 解析布尔标志（大小写不敏感）
    ///
    /// 接受: 1/0, true/false, Y/N, yes/no
    pub fn parse_flag(&self, value: &str) -> Option<bool> {
        match value.trim().to_uppercase().as_str() {
            "1" | "TRUE" | "Y" | "YES" => Some(true),
            "0" | "FALSE" | "N" | "NO" => Some(false),
            _ => None,
        }
    }

    /// 解析日期
    ///
    /// 接受 YYYY-MM-DD、YYYYMMDD,以及带时间部分的 ISO 时间戳（取日期前缀）
    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let v = value.trim();
        NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(v, "%Y%m%d"))
            .ok()
            .or_else(|| {
                // 2025-01-06T00:00:00 / 2025-01-06 00:00:00
                v.get(..10)
                    .filter(|_| matches!(v.as_bytes().get(10), Some(b'T') | Some(b' ')))
                    .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            })
    }

    /// 解析有限浮点数（NaN / inf 视为非数值）
    pub fn parse_number(&self, value: &str) -> Option<f64> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    }

    /// 解析整数,允许 "5.0" 这类无小数部分的浮点写法
    pub fn parse_integer(&self, value: &str) -> Option<i64> {
        let v = value.trim();
        v.parse::<i64>().ok().or_else(|| {
            self.parse_number(v)
                .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
                .map(|n| n as i64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  S001 ")), Some("S001".to_string()));
        assert_eq!(cleaner.normalize_null(Some("   ")), None);
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_parse_flag_variants() {
        let cleaner = DataCleaner;
        for truthy in ["1", "true", "TRUE", "Y", "y", "yes", "Yes"] {
            assert_eq!(cleaner.parse_flag(truthy), Some(true), "{}", truthy);
        }
        for falsy in ["0", "false", "False", "N", "n", "no", "NO"] {
            assert_eq!(cleaner.parse_flag(falsy), Some(false), "{}", falsy);
        }
        assert_eq!(cleaner.parse_flag("maybe"), None);
        assert_eq!(cleaner.parse_flag(""), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let cleaner = DataCleaner;
        let expected = NaiveDate::from_ymd_opt(2025, 1, 6);
        assert_eq!(cleaner.parse_date("2025-01-06"), expected);
        assert_eq!(cleaner.parse_date("20250106"), expected);
        assert_eq!(cleaner.parse_date("2025-01-06T00:00:00"), expected);
        assert_eq!(cleaner.parse_date("2025-01-06 12:30:00"), expected);
        assert_eq!(cleaner.parse_date("06/01/2025"), None);
        assert_eq!(cleaner.parse_date("2025-13-40"), None);
    }

    #[test]
    fn test_parse_numbers() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_number(" 10.99 "), Some(10.99));
        assert_eq!(cleaner.parse_number("NaN"), None);
        assert_eq!(cleaner.parse_number("abc"), None);
        assert_eq!(cleaner.parse_integer("-3"), Some(-3));
        assert_eq!(cleaner.parse_integer("7.0"), Some(7));
        assert_eq!(cleaner.parse_integer("7.5"), None);
    }
}
