// ==========================================
// 零售需求分析看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,携带不可读产物的名称
// 说明: 可选产物缺失不是错误（视图降级为空/占位）
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 数据源错误
    // ==========================================
    /// 产物存在但无法读取/解析
    #[error("数据源不可读: {artifact}: {source}")]
    SourceUnreadable {
        artifact: String,
        #[source]
        source: ImportError,
    },

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    pub fn unreadable(artifact: &str, source: ImportError) -> Self {
        ApiError::SourceUnreadable {
            artifact: artifact.to_string(),
            source,
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
