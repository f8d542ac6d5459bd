use serde::Serialize;
use std::path::PathBuf;

/// 行的语义角色
///
/// 每次都从文本重新计算，不随行保存
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// 题干行（以题目标识开头）
    StemRow,
    /// 选项行（`A.` / `B)`）
    OptionRow,
    /// 答案行（以 `ANSWER` 开头）
    AnswerRow,
    /// 空行
    BlankRow,
}

/// 合并后的一行
///
/// - `left`: 题号，仅题干行有值
/// - `middle`: 双语内容
/// - `right`: 预留列，始终为空
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MergedRow {
    pub left: String,
    pub middle: String,
    pub right: String,
}

impl MergedRow {
    pub fn numbered(ordinal: usize, middle: String) -> Self {
        Self {
            left: ordinal.to_string(),
            middle,
            right: String::new(),
        }
    }

    pub fn plain(middle: impl Into<String>) -> Self {
        Self {
            left: String::new(),
            middle: middle.into(),
            right: String::new(),
        }
    }
}

/// 从文档中提取出的一张表
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableData {
    /// 每行第二列的文本
    pub questions: Vec<String>,
    /// 题干行的标识（首个单词），按文档顺序
    pub ids: Vec<String>,
}

/// 一次合并请求
#[derive(Debug, Clone, Default)]
pub struct MergeRequest {
    pub first: Option<PathBuf>,
    pub second: Option<PathBuf>,
    pub lang1: String,
    pub lang2: String,
    pub output: PathBuf,
}

/// 合并成功后的统计
#[derive(Debug, Clone, Serialize)]
pub struct MergeOutcome {
    pub output: PathBuf,
    pub tables: Vec<Vec<MergedRow>>,
}

impl MergeOutcome {
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(Vec::len).sum()
    }

    /// 题干行数量（即带题号的行）
    pub fn question_count(&self) -> usize {
        self.tables
            .iter()
            .flatten()
            .filter(|row| !row.left.is_empty())
            .count()
    }
}
