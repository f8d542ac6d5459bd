//! 行合并 - 业务能力层
//!
//! 把同一张表的两种语言逐行配对，生成双语行。
//! 角色只由第一种语言的行决定，第二种语言的行默认是同一结构行的译文。

use tracing::debug;

use crate::error::{MergeError, MergeResult};
use crate::models::{MergedRow, Role};
use crate::services::classifier::{classify, strip_leading_identifier};
use crate::utils::truncate_text;

/// 渲染 `{mlang tag}text{mlang}`
pub fn mlang(tag: &str, text: &str) -> String {
    format!("{{mlang {}}}{}{{mlang}}", tag, text)
}

/// 合并一张表的两种语言
///
/// # 参数
/// - `seq1` / `seq2`: 两份文档同一张表的行文本
/// - `ids`: 第一份文档的题干标识
/// - `lang1` / `lang2`: 语言代码，原样写入标记
///
/// # 返回
/// 与输入等长的合并行；长度不一致时返回 `LengthMismatch`（不带表格序号，由调用方补上）
pub fn merge_rows(
    seq1: &[String],
    seq2: &[String],
    ids: &[String],
    lang1: &str,
    lang2: &str,
) -> MergeResult<Vec<MergedRow>> {
    if seq1.len() != seq2.len() {
        return Err(MergeError::LengthMismatch {
            table: None,
            first: seq1.len(),
            second: seq2.len(),
        });
    }

    let mut rows = Vec::with_capacity(seq1.len());
    let mut ordinal = 1;
    let mut ids = ids.iter();

    for (t1, t2) in seq1.iter().zip(seq2) {
        let row = match classify(t1) {
            Role::StemRow => {
                let current_id = ids.next().map(String::as_str).unwrap_or("");
                debug!("题目 {}: {}", ordinal, truncate_text(t1, 60));
                let middle = format!(
                    "{}  {}{}",
                    current_id,
                    mlang(lang1, &strip_leading_identifier(t1)),
                    mlang(lang2, &strip_leading_identifier(t2))
                );
                let row = MergedRow::numbered(ordinal, middle);
                ordinal += 1;
                row
            }
            Role::OptionRow => merge_option(t1, t2, lang1, lang2),
            Role::AnswerRow | Role::BlankRow => MergedRow::plain(t1.as_str()),
        };
        rows.push(row);
    }

    debug!("合并完成: {} 行, {} 道题", rows.len(), ordinal - 1);
    Ok(rows)
}

fn merge_option(t1: &str, t2: &str, lang1: &str, lang2: &str) -> MergedRow {
    let prefix = take_chars(t1, 2);
    let val1 = skip_chars(t1, 2).trim();

    // 译文的选项标记可能大小写不同或缺失
    let val2 = if t2.trim().to_uppercase().starts_with(prefix) {
        skip_chars(t2, 2).trim()
    } else {
        t2.trim()
    };

    MergedRow::plain(format!(
        "{} {}{}",
        prefix,
        mlang(lang1, val1),
        mlang(lang2, val2)
    ))
}

fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}
