// ==========================================
// 零售需求分析看板 - 内置产品表与目录生成
// ==========================================
// generate_catalog 为纯确定性映射,不消耗随机数
// ==========================================

use crate::domain::types::{CATEGORY_BEER, CATEGORY_LEGACY};
use crate::domain::{CatalogEntry, ProductDefinition};

/// 包装规格判定子串
pub const SIX_PACK_TOKEN: &str = "6PK";
pub const SIX_PACK_LABEL: &str = "6PK";
pub const FOUR_PACK_LABEL: &str = "4PK";

/// 停产/未知产品判定子串
pub const LEGACY_SKU_TOKEN: &str = "UNKNOWN";

/// 内置产品定义表
pub fn default_products() -> Vec<ProductDefinition> {
    vec![
        ProductDefinition::new("BEER_LAGER_6PK", "Classic Lager 6-Pack", CATEGORY_BEER, 10.99, 7),
        ProductDefinition::new("BEER_IPA_4PK", "Hoppy IPA 4-Pack", CATEGORY_BEER, 12.99, 14),
        ProductDefinition::new("BEER_STOUT_6PK", "Midnight Stout 6-Pack", CATEGORY_BEER, 11.99, 10),
        ProductDefinition::new("ALE_PALE_6PK", "Sunny Pale Ale 6-Pack", CATEGORY_BEER, 10.49, 7),
        ProductDefinition::new("UNKNOWN_SKU_999", "Discontinued Brew", CATEGORY_LEGACY, 5.00, 30),
    ]
}

/// 是否为停产/未知产品
pub fn is_legacy_sku(sku: &str) -> bool {
    sku.contains(LEGACY_SKU_TOKEN)
}

/// 由 SKU 推导包装规格标签
pub fn pack_size_for(sku: &str) -> &'static str {
    if sku.contains(SIX_PACK_TOKEN) {
        SIX_PACK_LABEL
    } else {
        FOUR_PACK_LABEL
    }
}

/// 由产品定义生成目录条目
pub fn catalog_from_definitions(products: &[ProductDefinition]) -> Vec<CatalogEntry> {
    products
        .iter()
        .map(|p| CatalogEntry {
            sku: p.sku.clone(),
            product_name: p.name.clone(),
            category: p.category.clone(),
            pack_size: pack_size_for(&p.sku).to_string(),
            active_flag: !is_legacy_sku(&p.sku),
        })
        .collect()
}

/// 基于内置产品表生成目录
pub fn generate_catalog() -> Vec<CatalogEntry> {
    catalog_from_definitions(&default_products())
}
