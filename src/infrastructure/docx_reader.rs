//! docx 读取 - 基础设施层
//!
//! 解压 docx，取出 `word/document.xml`，逐表逐行提取第二列文本。
//! 不关心行的语义，只负责"拿到文本"。

use std::io::{Cursor, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{MergeError, MergeResult};
use crate::models::TableData;
use crate::services::classifier::{is_answer_row, is_option_row, leading_identifier};

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn is_wml(node: &roxmltree::Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(WML_NS)
}

/// 从 docx 字节中读取 `word/document.xml`
pub fn read_document_xml(bytes: &[u8]) -> MergeResult<String> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|_| MergeError::InvalidDocument("file is not a ZIP archive".into()))?;

    let mut entry = zip.by_name("word/document.xml").map_err(|_| {
        MergeError::InvalidDocument("missing word/document.xml (is this a DOCX file?)".into())
    })?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| MergeError::io("word/document.xml", e))?;
    Ok(xml)
}

/// 单元格的纯文本
///
/// `w:br` 转为换行，统一 `\r\n`，去掉首尾空白
pub fn cell_text(cell: roxmltree::Node) -> String {
    let mut text = String::new();
    for node in cell.descendants().skip(1) {
        if is_wml(&node, "br") {
            text.push('\n');
        } else if node.is_text() {
            text.push_str(node.text().unwrap_or(""));
        }
    }
    text.replace("\r\n", "\n").trim().to_string()
}

/// 提取文档中所有表格
///
/// 嵌套表格与外层表格一样按文档顺序出现，只有两列及以上的行会被收录
pub fn extract_tables(xml: &str) -> MergeResult<Vec<TableData>> {
    let doc = roxmltree::Document::parse(xml)?;

    let tables: Vec<TableData> = doc
        .descendants()
        .filter(|n| is_wml(n, "tbl"))
        .map(extract_table)
        .collect();

    if tables.is_empty() {
        return Err(MergeError::NoTablesFound);
    }
    Ok(tables)
}

fn extract_table(tbl: roxmltree::Node) -> TableData {
    let mut table = TableData::default();

    for tr in tbl.descendants().filter(|n| is_wml(n, "tr")) {
        let cells: Vec<_> = tr.descendants().filter(|n| is_wml(n, "tc")).collect();
        if cells.len() < 2 {
            continue;
        }

        let text = cell_text(cells[1]);
        if !is_option_row(&text) && !is_answer_row(&text) && !text.trim().is_empty() {
            table.ids.push(leading_identifier(&text).to_string());
        }
        table.questions.push(text);
    }

    debug!("提取表格: {} 行, {} 个标识", table.questions.len(), table.ids.len());
    table
}

/// 解析整份 docx
pub fn parse_docx(bytes: &[u8]) -> MergeResult<Vec<TableData>> {
    let xml = read_document_xml(bytes)?;
    extract_tables(&xml)
}

/// 读取文件并提取表格
///
/// 解压和 XML 解析放在阻塞线程中执行
pub async fn load_tables(path: &Path) -> MergeResult<Vec<TableData>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| MergeError::io(path.display().to_string(), e))?;

    let tables = tokio::task::spawn_blocking(move || parse_docx(&bytes))
        .await
        .map_err(|e| MergeError::io(path.display().to_string(), std::io::Error::other(e)))??;

    info!("✓ {}: 共 {} 张表格", path.display(), tables.len());
    Ok(tables)
}
