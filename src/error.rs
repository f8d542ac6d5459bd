//! 错误类型
//!
//! 所有合并失败都归入 [`MergeError`]，由编排层统一向用户报告。
//! 错误文本直接展示给用户（前缀 `Error: `），所以保持英文原文。

use thiserror::Error;

/// 合并过程中的错误
#[derive(Debug, Error)]
pub enum MergeError {
    /// 文件或语言代码缺失
    #[error("{0}")]
    MissingInput(String),

    /// 文档中没有表格
    #[error("No tables found in document.")]
    NoTablesFound,

    /// 两份文档的表格数量不一致
    #[error("The number of tables in the files does not match! (first: {first}, second: {second})")]
    TableCountMismatch { first: usize, second: usize },

    /// 同一张表的行数不一致
    ///
    /// `table` 为 1 起始的表格序号，单独合并一张表时为 `None`
    #[error("The number of lines in the files does not match! ({}first {first}, second {second})", table_label(.table))]
    LengthMismatch {
        table: Option<usize>,
        first: usize,
        second: usize,
    },

    /// 上一次合并尚未结束
    #[error("A merge is already in progress ({state}).")]
    Busy { state: String },

    /// 文档结构不合法（不是 zip / 缺少 document.xml）
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),
}

impl MergeError {
    /// 文件读写错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        MergeError::Io {
            path: path.into(),
            source,
        }
    }

    /// 缺少输入文件
    pub fn missing_files() -> Self {
        MergeError::MissingInput("You must select both files (.docx).".to_string())
    }

    /// 缺少语言代码
    pub fn missing_languages() -> Self {
        MergeError::MissingInput("You must enter both language codes.".to_string())
    }
}

fn table_label(table: &Option<usize>) -> String {
    table.map(|t| format!("table {}: ", t)).unwrap_or_default()
}

/// 合并结果类型
pub type MergeResult<T> = Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_names_both_lengths() {
        let err = MergeError::LengthMismatch {
            table: Some(2),
            first: 7,
            second: 6,
        };
        assert_eq!(
            err.to_string(),
            "The number of lines in the files does not match! (table 2: first 7, second 6)"
        );
    }

    #[test]
    fn test_length_mismatch_without_table_index() {
        let err = MergeError::LengthMismatch {
            table: None,
            first: 3,
            second: 2,
        };
        assert_eq!(
            err.to_string(),
            "The number of lines in the files does not match! (first 3, second 2)"
        );
    }

    #[test]
    fn test_missing_input_messages() {
        assert_eq!(
            MergeError::missing_files().to_string(),
            "You must select both files (.docx)."
        );
        assert_eq!(
            MergeError::missing_languages().to_string(),
            "You must enter both language codes."
        );
    }
}
