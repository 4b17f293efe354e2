// ==========================================
// 零售需求分析看板 - 文档型产物
// ==========================================
// pipeline_report.json / collective_arts_summary.json
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// PipelineReport - 流水线运行报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub status: String,
    pub timestamp: String, // ISO 8601
    pub runtime_seconds: f64,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl PipelineReport {
    pub const STATUS_SUCCESS: &'static str = "success";

    /// 构造成功报告
    pub fn success(started_at: DateTime<Utc>, runtime_seconds: f64, steps: &[&str]) -> Self {
        Self {
            status: Self::STATUS_SUCCESS.to_string(),
            timestamp: started_at.to_rfc3339(),
            runtime_seconds,
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Self::STATUS_SUCCESS
    }
}

// ==========================================
// CollectionSummary - 系列目录汇总
// ==========================================
// 所有字段均可缺失,缺失时展示层使用占位值
// 单个字段类型不符（null / 小数 / 字符串）只降级该字段,不使整份文档不可读
// collection_counts 使用 BTreeMap 保证输出顺序稳定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_products: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub beer_like_total: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub beer_like_available: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub beer_like_sold_out: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count_map")]
    pub collection_counts: Option<BTreeMap<String, u64>>,
    #[serde(default, deserialize_with = "lenient::count_map")]
    pub collection_available_counts: Option<BTreeMap<String, u64>>,
}

// ==========================================
// CollectionCatalogItem - 系列目录条目
// ==========================================
// 对齐: collective_arts_catalog.json（数组）
// 采集端可能写出 null 字段,统一降级为默认值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionCatalogItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub handle: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub product_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub available: bool,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub price_from: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub collections: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
}

// ==========================================
// 宽松字段解析
// ==========================================
// 先读为 serde_json::Value,类型不符时落到字段默认值
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    // 非负整数; 整数值的小数（80.0）与数字字符串也接受
    fn count_of(value: &Value) -> Option<u64> {
        match value {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(scalar_text(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(scalar_text(Value::deserialize(d)?))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
            Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "y"),
            _ => false,
        })
    }

    pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|f| f.is_finite()))
    }

    pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
            _ => Vec::new(),
        })
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        Ok(count_of(&Value::deserialize(d)?))
    }

    /// 对象中无法解析的计数条目被丢弃,非对象整体视为缺失
    pub fn count_map<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<BTreeMap<String, u64>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Object(entries) => Some(
                entries
                    .into_iter()
                    .filter_map(|(key, value)| count_of(&value).map(|count| (key, count)))
                    .collect(),
            ),
            _ => None,
        })
    }
}
