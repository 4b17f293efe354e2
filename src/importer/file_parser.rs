// ==========================================
// 零售需求分析看板 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv, 带表头) / JSON 文档 (.json)
// 资源: 每次解析独占打开文件,返回前即释放
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 原始行: 表头 → 单元格（已 TRIM）
pub type RawRecord = HashMap<String, String>;

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// 解析文件为原始记录
    ///
    /// # 返回
    /// - Ok(Vec<RawRecord>): 每行一个 map（完全空白行已跳过）
    /// - Err: 文件不存在、扩展名不支持、CSV 结构损坏
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

fn ensure_readable(path: &Path, expected_ext: &str) -> ImportResult<()> {
    // 检查文件存在
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    // 检查扩展名
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext != expected_ext {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        ensure_readable(file_path, "csv")?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// JSON 文档读取器
// ==========================================
pub struct JsonDocumentReader;

impl JsonDocumentReader {
    /// 读取并反序列化 JSON 文档
    ///
    /// 结构不可解析即视为源不可读（DocumentParseError）
    pub fn read<T: DeserializeOwned>(&self, file_path: &Path) -> ImportResult<T> {
        ensure_readable(file_path, "json")?;

        let file = File::open(file_path)?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ImportError::DocumentParseError {
                path: file_path.display().to_string(),
                message: e.to_string(),
            }
        })
    }
}
