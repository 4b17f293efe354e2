// ==========================================
// 零售需求分析看板 - 数据质量校验器实现
// ==========================================
// 职责: 销售数据异常识别（负销量 / 目录外 SKU）
// 红线: 只报告,不剔除、不修正销售行
// ==========================================

use crate::domain::{CatalogEntry, DqLevel, DqReport, DqViolation, EcommerceSaleRow, PosSaleRow};
use std::collections::HashSet;

pub const SOURCE_POS: &str = "pos_sales";
pub const SOURCE_ECOMMERCE: &str = "ecommerce_sales";

pub struct DqValidator {
    known_skus: HashSet<String>,
}

impl DqValidator {
    /// 以目录 SKU 集合为准
    pub fn new(catalog: &[CatalogEntry]) -> Self {
        Self {
            known_skus: catalog.iter().map(|e| e.sku.clone()).collect(),
        }
    }

    /// 校验两个渠道的销售行
    pub fn validate_sales(&self, pos: &[PosSaleRow], ecommerce: &[EcommerceSaleRow]) -> DqReport {
        let mut report = DqReport::default();

        for (idx, row) in pos.iter().enumerate() {
            self.check_row(&mut report, SOURCE_POS, idx + 1, &row.sku, row.units_sold);
        }
        for (idx, row) in ecommerce.iter().enumerate() {
            self.check_row(&mut report, SOURCE_ECOMMERCE, idx + 1, &row.sku, row.units_sold);
        }
        report.summary.total_rows = pos.len() + ecommerce.len();

        if report.summary.warning > 0 {
            tracing::warn!(
                negative_units = report.summary.negative_units,
                unknown_skus = report.summary.unknown_skus,
                "销售数据存在异常行（已保留）"
            );
        }
        report
    }

    fn check_row(
        &self,
        report: &mut DqReport,
        source: &str,
        row_number: usize,
        sku: &str,
        units_sold: i64,
    ) {
        // 负销量（退货异常）
        if units_sold < 0 {
            report.summary.negative_units += 1;
            report.push(DqViolation {
                source: source.to_string(),
                row_number,
                sku: Some(sku.to_string()),
                level: DqLevel::Warning,
                field: "units_sold".to_string(),
                message: format!("销量为负数: {}", units_sold),
            });
        }

        // 目录外 SKU
        if !self.known_skus.contains(sku) {
            report.summary.unknown_skus += 1;
            report.push(DqViolation {
                source: source.to_string(),
                row_number,
                sku: Some(sku.to_string()),
                level: DqLevel::Warning,
                field: "sku".to_string(),
                message: "SKU 不在产品目录中".to_string(),
            });
        }
    }
}
