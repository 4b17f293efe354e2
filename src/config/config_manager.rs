// ==========================================
// 零售需求分析看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 扁平 key-value（JSON 对象文件,可选）
// 覆写优先级: 环境变量 > 配置文件 > 代码默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::paths::PathsConfig;
use crate::engine::planner::PlannerConfig;
use crate::generator::config::GeneratorConfig;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 环境变量前缀: key `generator.seed` → `RETAIL_DEMAND_GENERATOR_SEED`
pub const ENV_PREFIX: &str = "RETAIL_DEMAND_";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
    read_env: bool,
}

impl ConfigManager {
    /// 创建仅含默认值的 ConfigManager（读取环境变量覆写）
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            read_env: true,
        }
    }

    /// 从 JSON 配置文件加载
    ///
    /// # 参数
    /// - path: JSON 对象文件路径,值可为字符串/数字/布尔/字符串数组
    ///
    /// # 返回
    /// - Err(FileReadError): 文件不可读
    /// - Err(FileFormatError): 不是 JSON 对象
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let parsed: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| ConfigError::FileFormatError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let object = parsed.as_object().ok_or_else(|| ConfigError::FileFormatError {
            path: path.display().to_string(),
            message: "顶层必须是 JSON 对象".to_string(),
        })?;

        let mut values = HashMap::new();
        for (key, value) in object {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
                serde_json::Value::Null => continue,
                other => other.to_string(),
            };
            values.insert(key.clone(), text);
        }

        tracing::debug!(path = %path.display(), keys = values.len(), "配置文件已加载");

        Ok(Self {
            values,
            read_env: true,
        })
    }

    /// 从键值对构造（不读取环境变量,测试使用）
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            read_env: false,
        }
    }

    /// 读取配置值（环境变量优先）
    fn get_config_value(&self, key: &str) -> Option<String> {
        if self.read_env {
            let env_key = format!(
                "{}{}",
                ENV_PREFIX,
                key.to_uppercase().replace(['.', '-'], "_")
            );
            if let Ok(v) = std::env::var(&env_key) {
                if !v.trim().is_empty() {
                    return Some(v.trim().to_string());
                }
            }
        }
        self.values
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// 读取配置值（公开方法,供 CLI 展示使用）
    pub fn get_global_config_value(&self, key: &str) -> Option<String> {
        self.get_config_value(key)
    }

    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_config_value(key) {
            Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::ConfigValueError {
                key: key.to_string(),
                value: raw.clone(),
                message: e.to_string(),
            }),
            None => Ok(default),
        }
    }

    fn get_date_or_default(&self, key: &str, default: NaiveDate) -> ConfigResult<NaiveDate> {
        match self.get_config_value(key) {
            Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
                ConfigError::ConfigValueError {
                    key: key.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                }
            }),
            None => Ok(default),
        }
    }

    fn get_list_or_default(&self, key: &str, default: Vec<String>) -> Vec<String> {
        match self.get_config_value(key) {
            Some(raw) => {
                let items: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if items.is_empty() {
                    default
                } else {
                    items
                }
            }
            None => default,
        }
    }

    /// 组装生成器配置
    pub fn generator_config(&self) -> ConfigResult<GeneratorConfig> {
        let d = GeneratorConfig::default();

        let mut config = GeneratorConfig {
            seed: self.get_parsed_or_default(config_keys::SEED, d.seed)?,
            history_days: self.get_parsed_or_default(config_keys::HISTORY_DAYS, d.history_days)?,
            end_date: self.get_date_or_default(config_keys::END_DATE, d.end_date)?,
            stores: self.get_list_or_default(config_keys::STORES, d.stores.clone()),
            ..d.clone()
        };

        config.pos.base_demand =
            self.get_parsed_or_default(config_keys::POS_BASE_DEMAND, d.pos.base_demand)?;
        config.pos.negative_units_probability = self.get_parsed_or_default(
            config_keys::POS_NEGATIVE_UNITS_PROBABILITY,
            d.pos.negative_units_probability,
        )?;
        config.pos.promo_probability = self
            .get_parsed_or_default(config_keys::POS_PROMO_PROBABILITY, d.pos.promo_probability)?;
        config.pos.legacy_inclusion_probability = self.get_parsed_or_default(
            config_keys::POS_LEGACY_INCLUSION_PROBABILITY,
            d.pos.legacy_inclusion_probability,
        )?;
        config.pos.duplicate_prefix_rows = self.get_parsed_or_default(
            config_keys::POS_DUPLICATE_PREFIX_ROWS,
            d.pos.duplicate_prefix_rows,
        )?;
        config.ecommerce.inclusion_probability = self.get_parsed_or_default(
            config_keys::ECOMMERCE_INCLUSION_PROBABILITY,
            d.ecommerce.inclusion_probability,
        )?;
        config.ecommerce.discount_probability = self.get_parsed_or_default(
            config_keys::ECOMMERCE_DISCOUNT_PROBABILITY,
            d.ecommerce.discount_probability,
        )?;

        Ok(config)
    }

    /// 组装计划器配置
    pub fn planner_config(&self) -> ConfigResult<PlannerConfig> {
        let d = PlannerConfig::default();
        Ok(PlannerConfig {
            moq: self.get_parsed_or_default(config_keys::PLANNER_MOQ, d.moq)?,
            safety_stock_ratio: self
                .get_parsed_or_default(config_keys::PLANNER_SAFETY_STOCK_RATIO, d.safety_stock_ratio)?,
        })
    }

    /// 组装目录配置
    pub fn paths_config(&self) -> PathsConfig {
        let d = PathsConfig::default();
        PathsConfig {
            raw_dir: self
                .get_config_value(config_keys::RAW_DIR)
                .map(PathBuf::from)
                .unwrap_or(d.raw_dir),
            output_dir: self
                .get_config_value(config_keys::OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or(d.output_dir),
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 生成器
    pub const SEED: &str = "generator.seed";
    pub const HISTORY_DAYS: &str = "generator.history_days";
    pub const END_DATE: &str = "generator.end_date"; // YYYY-MM-DD
    pub const STORES: &str = "generator.stores"; // 逗号分隔

    // POS 异常注入
    pub const POS_BASE_DEMAND: &str = "generator.pos.base_demand";
    pub const POS_NEGATIVE_UNITS_PROBABILITY: &str = "generator.pos.negative_units_probability";
    pub const POS_PROMO_PROBABILITY: &str = "generator.pos.promo_probability";
    pub const POS_LEGACY_INCLUSION_PROBABILITY: &str =
        "generator.pos.legacy_inclusion_probability";
    pub const POS_DUPLICATE_PREFIX_ROWS: &str = "generator.pos.duplicate_prefix_rows";

    // 电商
    pub const ECOMMERCE_INCLUSION_PROBABILITY: &str = "generator.ecommerce.inclusion_probability";
    pub const ECOMMERCE_DISCOUNT_PROBABILITY: &str = "generator.ecommerce.discount_probability";

    // 计划器
    pub const PLANNER_MOQ: &str = "planner.moq";
    pub const PLANNER_SAFETY_STOCK_RATIO: &str = "planner.safety_stock_ratio";

    // 目录
    pub const RAW_DIR: &str = "paths.raw_dir";
    pub const OUTPUT_DIR: &str = "paths.output_dir";
}
