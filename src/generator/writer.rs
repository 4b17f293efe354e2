// ==========================================
// 零售需求分析看板 - 产物写入器
// ==========================================
// 写入为作用域操作: 打开 → 写入 → flush → 关闭
// 任一步失败即删除半成品文件并返回 DestinationUnwritable
// ==========================================

use crate::domain::TabularArtifact;
use crate::generator::error::{GeneratorError, GeneratorResult};
use crate::generator::series::GeneratedDataset;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// 一次生成的落盘摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub catalog_rows: usize,
    pub pos_rows: usize,
    pub ecommerce_rows: usize,
    pub inventory_rows: usize,
    pub files: Vec<PathBuf>,
}

pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    /// 创建写入器（目录不存在时创建,失败即致命）
    pub fn create(dir: impl Into<PathBuf>) -> GeneratorResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| GeneratorError::unwritable(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 以产物约定文件名写出
    pub fn write<T: TabularArtifact>(&self, rows: &[T]) -> GeneratorResult<PathBuf> {
        self.write_as(T::FILE_NAME, rows)
    }

    /// 以指定文件名写出（表头仍取自产物契约）
    pub fn write_as<T: TabularArtifact>(
        &self,
        file_name: &str,
        rows: &[T],
    ) -> GeneratorResult<PathBuf> {
        let path = self.dir.join(file_name);
        let file = File::create(&path).map_err(|e| GeneratorError::unwritable(&path, e))?;

        if let Err(e) = write_csv_rows(file, rows) {
            let _ = std::fs::remove_file(&path);
            return Err(GeneratorError::unwritable(&path, e));
        }

        tracing::info!(file = %path.display(), rows = rows.len(), "已写出 {}", file_name);
        Ok(path)
    }

    /// 写出 JSON 文档（缩进格式）
    pub fn write_json<T: Serialize>(&self, file_name: &str, document: &T) -> GeneratorResult<PathBuf> {
        let path = self.dir.join(file_name);
        let file = File::create(&path).map_err(|e| GeneratorError::unwritable(&path, e))?;

        let result = (|| -> std::io::Result<()> {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, document)?;
            writer.flush()
        })();

        if let Err(e) = result {
            let _ = std::fs::remove_file(&path);
            return Err(GeneratorError::unwritable(&path, e));
        }

        tracing::info!(file = %path.display(), "已写出 {}", file_name);
        Ok(path)
    }

    /// 写出四个原始数据集
    pub fn write_dataset(&self, dataset: &GeneratedDataset) -> GeneratorResult<GenerationSummary> {
        let files = vec![
            self.write(&dataset.catalog)?,
            self.write(&dataset.pos)?,
            self.write(&dataset.ecommerce)?,
            self.write(&dataset.inventory)?,
        ];

        Ok(GenerationSummary {
            catalog_rows: dataset.catalog.len(),
            pos_rows: dataset.pos.len(),
            ecommerce_rows: dataset.ecommerce.len(),
            inventory_rows: dataset.inventory.len(),
            files,
        })
    }
}

// 空数据集也必须写出表头,因此关闭自动表头、显式写入
fn write_csv_rows<T: TabularArtifact>(file: File, rows: &[T]) -> csv::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogEntry;
    use crate::generator::catalog::generate_catalog;

    // 序列化必然失败的行,用于触发写入中途失败
    struct FailingRow;

    impl Serialize for FailingRow {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("行序列化失败"))
        }
    }

    impl TabularArtifact for FailingRow {
        const FILE_NAME: &'static str = "failing.csv";
        const HEADERS: &'static [&'static str] = &["value"];
    }

    #[test]
    fn test_write_catalog_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::create(dir.path()).unwrap();
        let path = writer.write(&generate_catalog()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("sku,product_name,category,pack_size,active_flag")
        );
        assert_eq!(
            lines.next(),
            Some("BEER_LAGER_6PK,Classic Lager 6-Pack,Beer,6PK,true")
        );
        assert_eq!(content.lines().count(), 6);
    }

    #[test]
    fn test_empty_rows_still_write_header() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::create(dir.path()).unwrap();
        let rows: Vec<CatalogEntry> = Vec::new();
        let path = writer.write(&rows).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.trim(), "sku,product_name,category,pack_size,active_flag");
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::create(dir.path()).unwrap();

        let result = writer.write(&[FailingRow]);
        assert!(matches!(
            result,
            Err(GeneratorError::DestinationUnwritable { .. })
        ));
        assert!(!dir.path().join(FailingRow::FILE_NAME).exists());

        let result = writer.write_json("failing.json", &[FailingRow]);
        assert!(matches!(
            result,
            Err(GeneratorError::DestinationUnwritable { .. })
        ));
        assert!(!dir.path().join("failing.json").exists());
    }

    #[test]
    fn test_unwritable_destination_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = ArtifactWriter::create(blocker.join("raw"));
        assert!(matches!(
            result,
            Err(GeneratorError::DestinationUnwritable { .. })
        ));
    }
}
