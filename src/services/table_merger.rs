//! 表格级合并
//!
//! 校验两份文档的表格数量，再逐表调用 [`merge_rows`]。
//! 每张表独立编号，题号在每张表内都从 1 开始。

use tracing::info;

use crate::error::{MergeError, MergeResult};
use crate::models::{MergedRow, TableData};
use crate::services::row_merger::merge_rows;

/// 合并两份文档的所有表格
pub fn merge_tables(
    first: &[TableData],
    second: &[TableData],
    lang1: &str,
    lang2: &str,
) -> MergeResult<Vec<Vec<MergedRow>>> {
    if first.len() != second.len() {
        return Err(MergeError::TableCountMismatch {
            first: first.len(),
            second: second.len(),
        });
    }

    first
        .iter()
        .zip(second)
        .enumerate()
        .map(|(idx, (t1, t2))| -> MergeResult<Vec<MergedRow>> {
            let rows = merge_rows(&t1.questions, &t2.questions, &t1.ids, lang1, lang2)
                .map_err(|e| with_table_index(e, idx + 1))?;
            info!("📋 表格 {}: {} 行, {} 个题目标识", idx + 1, rows.len(), t1.ids.len());
            Ok(rows)
        })
        .collect()
}

fn with_table_index(err: MergeError, table: usize) -> MergeError {
    match err {
        MergeError::LengthMismatch { first, second, .. } => MergeError::LengthMismatch {
            table: Some(table),
            first,
            second,
        },
        other => other,
    }
}
