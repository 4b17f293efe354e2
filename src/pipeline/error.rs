// ==========================================
// 零售需求分析看板 - 流水线错误类型
// ==========================================

use crate::config::ConfigError;
use crate::generator::GeneratorError;
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 写出失败（目标目录不可写）
    #[error(transparent)]
    Generate(#[from] GeneratorError),

    /// 输入产物不可读
    #[error("读取 {artifact} 失败: {source}")]
    Import {
        artifact: String,
        #[source]
        source: ImportError,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PipelineError {
    pub fn import(artifact: &str, source: ImportError) -> Self {
        PipelineError::Import {
            artifact: artifact.to_string(),
            source,
        }
    }
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;
