// ==========================================
// 零售需求分析看板 - 数据质量报告模型
// ==========================================
// 红线: 行级缺陷只记录,不阻断批次,不修改原始数据
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Warning, // 警告（保留该行）
    Info,    // 提示（仅记录）
}

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub source: String,      // 来源产物（如 pos_sales）
    pub row_number: usize,   // 数据行号（从 1 开始,不含表头）
    pub sku: Option<String>,
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize,
    pub negative_units: usize, // 负销量行（退货异常）
    pub unknown_skus: usize,   // 目录外 SKU 行
    pub warning: usize,
    pub info: usize,
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
}

impl DqReport {
    pub fn push(&mut self, violation: DqViolation) {
        match violation.level {
            DqLevel::Warning => self.summary.warning += 1,
            DqLevel::Info => self.summary.info += 1,
        }
        self.violations.push(violation);
    }

    /// 合并另一批次的报告（计数累加）
    pub fn merge(&mut self, other: DqReport) {
        self.summary.total_rows += other.summary.total_rows;
        self.summary.negative_units += other.summary.negative_units;
        self.summary.unknown_skus += other.summary.unknown_skus;
        self.summary.warning += other.summary.warning;
        self.summary.info += other.summary.info;
        self.violations.extend(other.violations);
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
