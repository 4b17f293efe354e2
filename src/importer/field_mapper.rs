// ==========================================
// 零售需求分析看板 - 字段映射器实现
// ==========================================
// 职责: 原始行 → 领域类型 + 类型转换 + 行级默认值
// 默认值: 数值 → 0 / 标签 → "Unknown" / 标志 → false
// 红线: 行级缺陷记入 DqReport,不返回 Err
// ==========================================

use crate::domain::types::UNKNOWN_LABEL;
use crate::domain::{
    CatalogEntry, DqLevel, DqReport, DqViolation, EcommerceSaleRow, ForecastMetricRow,
    ForecastPoint, InventorySnapshot, PosSaleRow, ProductionPlanRow,
};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::file_parser::RawRecord;
use chrono::NaiveDate;

/// 映射结果: 领域行 + 本批次行级数据质量报告
#[derive(Debug, Clone, Default)]
pub struct Mapped<T> {
    pub rows: Vec<T>,
    pub dq: DqReport,
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 逐行映射; `map_row` 返回 None 表示跳过该行
    fn map_rows<T, F>(&self, source: &'static str, records: &[RawRecord], mut map_row: F) -> Mapped<T>
    where
        F: FnMut(&mut RowCursor<'_>) -> Option<T>,
    {
        let mut mapped = Mapped {
            rows: Vec::with_capacity(records.len()),
            dq: DqReport::default(),
        };

        for (idx, row) in records.iter().enumerate() {
            let mut cursor = RowCursor::new(&self.cleaner, row, source, idx + 1);
            if let Some(value) = map_row(&mut cursor) {
                mapped.rows.push(value);
            }
            for violation in cursor.violations {
                mapped.dq.push(violation);
            }
        }
        mapped.dq.summary.total_rows = records.len();

        if !mapped.dq.is_clean() {
            tracing::debug!(
                source,
                rows = mapped.rows.len(),
                warning = mapped.dq.summary.warning,
                info = mapped.dq.summary.info,
                "行级缺陷已按默认值处理"
            );
        }
        mapped
    }

    /// sku_map.csv / dim_product.csv
    pub fn map_catalog(&self, source: &'static str, records: &[RawRecord]) -> Mapped<CatalogEntry> {
        self.map_rows(source, records, |c| {
            let sku = c.required_sku()?;
            Some(CatalogEntry {
                sku,
                product_name: c.label("product_name"),
                category: c.label("category"),
                pack_size: c.label("pack_size"),
                active_flag: c.flag("active_flag"),
            })
        })
    }

    /// pos_sales.csv
    pub fn map_pos(&self, source: &'static str, records: &[RawRecord]) -> Mapped<PosSaleRow> {
        self.map_rows(source, records, |c| {
            let sku = c.required_sku()?;
            let date = c.required_date("date")?;
            Some(PosSaleRow {
                date,
                store_id: c.label("store_id"),
                sku,
                units_sold: c.integer("units_sold"),
                unit_price: c.number("unit_price"),
                promo_flag: c.flag("promo_flag"),
            })
        })
    }

    /// ecommerce_sales.csv
    pub fn map_ecommerce(
        &self,
        source: &'static str,
        records: &[RawRecord],
    ) -> Mapped<EcommerceSaleRow> {
        self.map_rows(source, records, |c| {
            let sku = c.required_sku()?;
            let date = c.required_date("date")?;
            Some(EcommerceSaleRow {
                date,
                sku,
                units_sold: c.integer("units_sold"),
                unit_price: c.number("unit_price"),
                discount: c.number("discount"),
            })
        })
    }

    /// inventory.csv
    pub fn map_inventory(
        &self,
        source: &'static str,
        records: &[RawRecord],
    ) -> Mapped<InventorySnapshot> {
        self.map_rows(source, records, |c| {
            let sku = c.required_sku()?;
            let date = c.required_date("date")?;
            Some(InventorySnapshot {
                date,
                sku,
                on_hand: c.integer("on_hand"),
                on_order: c.integer("on_order"),
                lead_time_days: u32::try_from(c.integer("lead_time_days")).unwrap_or_default(),
            })
        })
    }

    /// forecast_daily.csv（sku 缺失不跳过,记为 "Unknown"）
    pub fn map_forecast(&self, source: &'static str, records: &[RawRecord]) -> Mapped<ForecastPoint> {
        self.map_rows(source, records, |c| {
            Some(ForecastPoint {
                date: c.date("date"),
                channel: c.label("channel"),
                sku: c.label("sku"),
                yhat: c.number("yhat"),
                yhat_lower: c.number("yhat_lower"),
                yhat_upper: c.number("yhat_upper"),
                model_version: c.label("model_version"),
            })
        })
    }

    /// production_plan_weekly.csv
    pub fn map_plan(
        &self,
        source: &'static str,
        records: &[RawRecord],
    ) -> Mapped<ProductionPlanRow> {
        self.map_rows(source, records, |c| {
            let sku = c.required_sku()?;
            Some(ProductionPlanRow {
                week_start: c.date("week_start"),
                sku,
                product_name: c.label("product_name"),
                forecast_units: c.number("forecast_units"),
                safety_stock: c.number("safety_stock"),
                on_hand: c.number("on_hand"),
                suggested_production: c.number("suggested_production"),
                notes: c.text("notes"),
            })
        })
    }

    /// forecast_metrics.csv（mape 缺失保留为 None,由聚合按 0 计入）
    pub fn map_metrics(
        &self,
        source: &'static str,
        records: &[RawRecord],
    ) -> Mapped<ForecastMetricRow> {
        self.map_rows(source, records, |c| {
            Some(ForecastMetricRow {
                channel: c.label("channel"),
                sku: c.label("sku"),
                mape_ml: c.optional_number("mape_ml"),
                mape_baseline: c.optional_number("mape_baseline"),
                best_model: c.label("best_model"),
            })
        })
    }
}

// ==========================================
// RowCursor - 单行读取游标（收集行级缺陷）
// ==========================================
struct RowCursor<'a> {
    cleaner: &'a DataCleaner,
    row: &'a RawRecord,
    source: &'static str,
    row_number: usize,
    sku: Option<String>,
    violations: Vec<DqViolation>,
}

impl<'a> RowCursor<'a> {
    fn new(cleaner: &'a DataCleaner, row: &'a RawRecord, source: &'static str, row_number: usize) -> Self {
        let sku = cleaner.normalize_null(row.get("sku").map(String::as_str));
        Self {
            cleaner,
            row,
            source,
            row_number,
            sku,
            violations: Vec::new(),
        }
    }

    /// 提取字段,支持列名别名
    fn raw(&self, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            "product_name" => &["name"],
            "units_sold" => &["units"],
            "week_start" => &["week"],
            _ => &[],
        };

        std::iter::once(key)
            .chain(aliases.iter().copied())
            .find_map(|alias| self.cleaner.normalize_null(self.row.get(alias).map(String::as_str)))
    }

    fn record(&mut self, level: DqLevel, field: &str, message: String) {
        self.violations.push(DqViolation {
            source: self.source.to_string(),
            row_number: self.row_number,
            sku: self.sku.clone(),
            level,
            field: field.to_string(),
            message,
        });
    }

    /// 缺少 sku 的行跳过
    fn required_sku(&mut self) -> Option<String> {
        if self.sku.is_none() {
            self.record(DqLevel::Info, "sku", "缺少 sku,已跳过该行".to_string());
        }
        self.sku.clone()
    }

    /// 日期无效的销售/库存行无法定位,跳过并记录警告
    fn required_date(&mut self, field: &str) -> Option<NaiveDate> {
        let date = self.date(field);
        if date.is_none() {
            let raw = self.raw(field).unwrap_or_default();
            self.record(
                DqLevel::Warning,
                field,
                format!("日期无效或缺失: '{}',已跳过该行", raw),
            );
        }
        date
    }

    fn date(&self, field: &str) -> Option<NaiveDate> {
        self.raw(field).and_then(|v| self.cleaner.parse_date(&v))
    }

    fn text(&self, field: &str) -> String {
        self.raw(field).unwrap_or_default()
    }

    fn label(&mut self, field: &str) -> String {
        match self.raw(field) {
            Some(v) => v,
            None => {
                self.record(DqLevel::Info, field, format!("缺失,按 {} 处理", UNKNOWN_LABEL));
                UNKNOWN_LABEL.to_string()
            }
        }
    }

    fn number(&mut self, field: &str) -> f64 {
        match self.raw(field) {
            None => {
                self.record(DqLevel::Info, field, "缺失,按 0 处理".to_string());
                0.0
            }
            Some(v) => match self.cleaner.parse_number(&v) {
                Some(n) => n,
                None => {
                    self.record(DqLevel::Info, field, format!("非数值 '{}',按 0 处理", v));
                    0.0
                }
            },
        }
    }

    fn optional_number(&mut self, field: &str) -> Option<f64> {
        let v = self.raw(field)?;
        let parsed = self.cleaner.parse_number(&v);
        if parsed.is_none() {
            self.record(DqLevel::Info, field, format!("非数值 '{}',视为缺失", v));
        }
        parsed
    }

    fn integer(&mut self, field: &str) -> i64 {
        match self.raw(field) {
            None => {
                self.record(DqLevel::Info, field, "缺失,按 0 处理".to_string());
                0
            }
            Some(v) => match self.cleaner.parse_integer(&v) {
                Some(n) => n,
                None => {
                    self.record(DqLevel::Info, field, format!("非整数 '{}',按 0 处理", v));
                    0
                }
            },
        }
    }

    fn flag(&mut self, field: &str) -> bool {
        match self.raw(field) {
            None => {
                self.record(DqLevel::Info, field, "缺失,按 false 处理".to_string());
                false
            }
            Some(v) => match self.cleaner.parse_flag(&v) {
                Some(b) => b,
                None => {
                    self.record(DqLevel::Info, field, format!("无法识别的标志 '{}',按 false 处理", v));
                    false
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_map_catalog_defaults_and_flags() {
        let records = vec![
            record(&[
                ("sku", "BEER_IPA_4PK"),
                ("product_name", "Hoppy IPA 4-Pack"),
                ("category", "Beer"),
                ("pack_size", "4PK"),
                ("active_flag", "Y"),
            ]),
            record(&[("sku", "MYSTERY"), ("category", ""), ("active_flag", "no")]),
            record(&[("product_name", "No Sku")]),
        ];

        let mapped = FieldMapper::new().map_catalog("sku_map", &records);

        assert_eq!(mapped.rows.len(), 2);
        assert!(mapped.rows[0].active_flag);
        assert_eq!(mapped.rows[1].category, UNKNOWN_LABEL);
        assert_eq!(mapped.rows[1].product_name, UNKNOWN_LABEL);
        assert!(!mapped.rows[1].active_flag);
        assert_eq!(mapped.dq.summary.total_rows, 3);
        assert!(mapped
            .dq
            .violations
            .iter()
            .any(|v| v.field == "sku" && v.row_number == 3));
    }

    #[test]
    fn test_map_pos_keeps_negative_units_and_defaults_numbers() {
        let records = vec![
            record(&[
                ("date", "2025-01-06"),
                ("store_id", "S001"),
                ("sku", "BEER_LAGER_6PK"),
                ("units_sold", "-4"),
                ("unit_price", "10.99"),
                ("promo_flag", "0"),
            ]),
            record(&[
                ("date", "2025-01-06"),
                ("store_id", "S002"),
                ("sku", "BEER_LAGER_6PK"),
                ("units_sold", "abc"),
                ("unit_price", ""),
                ("promo_flag", "1"),
            ]),
        ];

        let mapped = FieldMapper::new().map_pos("pos_sales", &records);

        assert_eq!(mapped.rows.len(), 2);
        assert_eq!(mapped.rows[0].units_sold, -4);
        assert_eq!(mapped.rows[1].units_sold, 0);
        assert_eq!(mapped.rows[1].unit_price, 0.0);
        assert!(mapped.rows[1].promo_flag);
        assert_eq!(mapped.dq.summary.info, 2);
        assert_eq!(mapped.dq.summary.warning, 0);
    }

    #[test]
    fn test_map_pos_skips_undated_rows_with_warning() {
        let records = vec![record(&[
            ("date", "not-a-date"),
            ("store_id", "S001"),
            ("sku", "BEER_LAGER_6PK"),
            ("units_sold", "3"),
            ("unit_price", "10.99"),
            ("promo_flag", "0"),
        ])];

        let mapped = FieldMapper::new().map_pos("pos_sales", &records);
        assert!(mapped.rows.is_empty());
        assert_eq!(mapped.dq.summary.warning, 1);
        assert_eq!(mapped.dq.violations[0].sku.as_deref(), Some("BEER_LAGER_6PK"));
    }

    #[test]
    fn test_map_forecast_unknown_sku_kept() {
        let records = vec![record(&[
            ("date", "2025-01-06"),
            ("channel", "pos"),
            ("yhat", "12.5"),
            ("yhat_lower", "10"),
            ("yhat_upper", "15"),
            ("model_version", "v1"),
        ])];

        let mapped = FieldMapper::new().map_forecast("forecast_daily", &records);
        assert_eq!(mapped.rows.len(), 1);
        assert_eq!(mapped.rows[0].sku, UNKNOWN_LABEL);
        assert_eq!(mapped.rows[0].yhat, 12.5);
    }

    #[test]
    fn test_map_metrics_missing_mape_is_none() {
        let records = vec![
            record(&[("channel", "pos"), ("sku", "A"), ("mape_ml", "0.12"), ("best_model", "ml")]),
            record(&[("channel", "pos"), ("sku", "B"), ("mape_ml", "n/a"), ("best_model", "baseline")]),
        ];

        let mapped = FieldMapper::new().map_metrics("forecast_metrics", &records);
        assert_eq!(mapped.rows[0].mape_ml, Some(0.12));
        assert_eq!(mapped.rows[1].mape_ml, None);
        assert_eq!(mapped.rows[0].mape_baseline, None);
        assert_eq!(mapped.dq.summary.info, 1);
    }
}
