// ==========================================
// 零售需求分析看板 - 生成器错误类型
// ==========================================
// 生成器唯一的外部失败模式: 输出目的地不可写（致命）
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("输出目录不可写 ({path}): {message}")]
    DestinationUnwritable { path: String, message: String },

    #[error("生成器配置无效: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GeneratorError {
    pub fn unwritable(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        GeneratorError::DestinationUnwritable {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type GeneratorResult<T> = Result<T, GeneratorError>;
