// ==========================================
// 零售需求分析看板 - 产物目录配置
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 产物目录
///
/// - raw_dir: 生成器输出（sku_map / pos_sales / ecommerce_sales / inventory）
/// - output_dir: 看板读取目录（dim_product / 预测 / 计划 / 报告）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    pub raw_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            output_dir: PathBuf::from("data/outputs"),
        }
    }
}

impl PathsConfig {
    /// 以同一根目录构造（测试与 CLI --data-dir 使用）
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            raw_dir: root.join("raw"),
            output_dir: root.join("outputs"),
        }
    }
}
