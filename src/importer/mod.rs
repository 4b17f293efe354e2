// ==========================================
// 零售需求分析看板 - 导入层
// ==========================================
// 职责: 读取表格(CSV)与文档(JSON)产物,映射为领域类型
// 错误划分: 源不可读 → ImportError / 行级缺陷 → DqReport
// ==========================================

// 模块声明
pub mod artifact_reader;
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use artifact_reader::{optional, optional_table, ArtifactReader};
pub use data_cleaner::DataCleaner;
pub use dq_validator::DqValidator;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, Mapped};
pub use file_parser::{CsvParser, FileParser, JsonDocumentReader, RawRecord};
