// ==========================================
// 零售需求分析看板 - 配置层
// ==========================================
// 职责: 系统配置管理,支持 "默认值 → 配置文件 → 环境变量" 三级覆写
// 存储: 扁平 key-value JSON 文件（可选）
// ==========================================

pub mod config_manager;
pub mod error;
pub mod paths;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, ENV_PREFIX};
pub use error::{ConfigError, ConfigResult};
pub use paths::PathsConfig;
