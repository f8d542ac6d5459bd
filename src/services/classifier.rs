//! 行分类 - 业务能力层
//!
//! 只回答"这一行是什么"，不关心另一种语言的对应行

use regex::Regex;
use std::sync::LazyLock;

use crate::models::Role;

static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]\s*[.)]").unwrap());
static ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^ANSWER").unwrap());
static LEADING_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+\s*").unwrap());

/// 是否为选项行：单个大写字母，可选空白，然后是 `.` 或 `)`
pub fn is_option_row(text: &str) -> bool {
    OPTION_RE.is_match(text.trim())
}

/// 是否为答案行
///
/// 不做 trim：前导空白会让匹配失败
pub fn is_answer_row(text: &str) -> bool {
    ANSWER_RE.is_match(text)
}

/// 判断一行的角色
///
/// 顺序：选项 → 答案 → 空行 → 题干（兜底）
pub fn classify(text: &str) -> Role {
    if is_option_row(text) {
        Role::OptionRow
    } else if is_answer_row(text) {
        Role::AnswerRow
    } else if text.trim().is_empty() {
        Role::BlankRow
    } else {
        Role::StemRow
    }
}

/// 去掉开头的标识及其后的空白
///
/// # 示例
/// ```
/// use quiz_merge::services::classifier::strip_leading_identifier;
/// assert_eq!(strip_leading_identifier("Q1 What is this?"), "What is this?");
/// ```
pub fn strip_leading_identifier(text: &str) -> String {
    LEADING_TOKEN_RE
        .replace(text.trim(), "")
        .trim()
        .to_string()
}

/// 题干行的标识（首个单词）
pub fn leading_identifier(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}
