// ==========================================
// 零售需求分析看板 - 合成序列生成器
// ==========================================
// 职责: 由固定产品表 + 季节/噪声模型生成四个关联数据集
//       (产品维表 / POS 销售 / 电商销售 / 库存快照)
// 依赖: 无（叶子组件）
// ==========================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod seasonality;
pub mod series;
pub mod writer;

pub use catalog::{catalog_from_definitions, default_products, generate_catalog, is_legacy_sku};
pub use config::GeneratorConfig;
pub use error::{GeneratorError, GeneratorResult};
pub use seasonality::{default_seasonality, flat_seasonality};
pub use series::{GeneratedDataset, SeriesGenerator};
pub use writer::{ArtifactWriter, GenerationSummary};
