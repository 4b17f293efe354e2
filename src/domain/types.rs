// ==========================================
// 零售需求分析看板 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 啤酒品类标签（品类/包装规格统计的主口径）
pub const CATEGORY_BEER: &str = "Beer";

/// 停产/未知品类标签
pub const CATEGORY_LEGACY: &str = "Legacy";

/// 缺失标签的统一占位值
pub const UNKNOWN_LABEL: &str = "Unknown";

// ==========================================
// 销售渠道 (Channel)
// ==========================================
// 序列化格式: 小写 (与外部文件契约一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Pos,       // 门店 POS
    Ecommerce, // 电商
}

impl Channel {
    /// 宽松解析渠道字段
    ///
    /// 兼容预测文件中的 "Retail"/"Ecommerce" 写法
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pos" | "retail" | "store" => Some(Channel::Pos),
            "ecommerce" | "e-commerce" | "ecom" | "online" => Some(Channel::Ecommerce),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Pos => write!(f, "pos"),
            Channel::Ecommerce => write!(f, "ecommerce"),
        }
    }
}
