//! docx 生成 - 基础设施层
//!
//! 把合并结果渲染为三列表格（窄 / 宽 / 窄），所有边框为单线，
//! 表格之间插入一个空段落。

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{MergeError, MergeResult};
use crate::models::MergedRow;

/// 列宽（dxa）
const LEFT_WIDTH: u32 = 720;
const MIDDLE_WIDTH: u32 = 6480;
const RIGHT_WIDTH: u32 = 720;
const TABLE_WIDTH: u32 = LEFT_WIDTH + MIDDLE_WIDTH + RIGHT_WIDTH;

fn xml_escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn paragraph(text: &str) -> String {
    let run: Vec<String> = text
        .split('\n')
        .map(|line| format!(r#"<w:t xml:space="preserve">{}</w:t>"#, xml_escape_text(line)))
        .collect();
    format!(
        r#"<w:p><w:pPr><w:spacing w:before="0" w:after="0" w:line="240" w:lineRule="auto"/></w:pPr><w:r>{}</w:r></w:p>"#,
        run.join("<w:br/>")
    )
}

fn cell(text: &str, width: u32) -> String {
    format!(
        r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/></w:tcPr>{}</w:tc>"#,
        width,
        paragraph(text)
    )
}

fn table_borders() -> String {
    let edges = ["top", "left", "bottom", "right", "insideH", "insideV"];
    let inner: String = edges
        .iter()
        .map(|edge| format!(r#"<w:{} w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#, edge))
        .collect();
    format!("<w:tblBorders>{}</w:tblBorders>", inner)
}

fn table_xml(rows: &[MergedRow]) -> String {
    let mut xml = format!(
        r#"<w:tbl><w:tblPr><w:tblW w:w="{}" w:type="dxa"/>{}<w:tblLayout w:type="fixed"/></w:tblPr><w:tblGrid><w:gridCol w:w="{}"/><w:gridCol w:w="{}"/><w:gridCol w:w="{}"/></w:tblGrid>"#,
        TABLE_WIDTH,
        table_borders(),
        LEFT_WIDTH,
        MIDDLE_WIDTH,
        RIGHT_WIDTH
    );

    // Word 不接受没有行的表格
    let empty = [MergedRow::default()];
    let rows = if rows.is_empty() { &empty[..] } else { rows };

    for row in rows {
        xml.push_str("<w:tr>");
        xml.push_str(&cell(&row.left, LEFT_WIDTH));
        xml.push_str(&cell(&row.middle, MIDDLE_WIDTH));
        xml.push_str(&cell(&row.right, RIGHT_WIDTH));
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// 生成 `word/document.xml`
pub fn build_document_xml(tables: &[Vec<MergedRow>]) -> String {
    let mut body = String::new();
    for (idx, rows) in tables.iter().enumerate() {
        body.push_str(&table_xml(rows));
        if idx + 1 < tables.len() {
            body.push_str(r#"<w:p><w:pPr><w:spacing w:after="200"/></w:pPr></w:p>"#);
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <w:body>{}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body>
</w:document>"#,
        body
    )
}

fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#
}

fn rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#
}

fn word_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#
}

fn styles_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
</w:styles>"#
}

/// 把合并结果打包为 docx 字节
pub fn render_docx(tables: &[Vec<MergedRow>]) -> MergeResult<Vec<u8>> {
    let document_xml = build_document_xml(tables);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", content_types_xml()),
        ("_rels/.rels", rels_xml()),
        ("word/document.xml", document_xml.as_str()),
        ("word/_rels/document.xml.rels", word_rels_xml()),
        ("word/styles.xml", styles_xml()),
    ];
    for (name, content) in parts {
        zip.start_file(name, opt)?;
        zip.write_all(content.as_bytes())
            .map_err(|e| MergeError::io(name, e))?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!("docx 打包完成: {} 字节", bytes.len());
    Ok(bytes)
}

/// 写出 docx 文件
///
/// 先写临时文件再重命名，失败时不会留下半成品
pub async fn save_docx(path: &Path, tables: &[Vec<MergedRow>]) -> MergeResult<()> {
    let bytes = render_docx(tables)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| MergeError::io(parent.display().to_string(), e))?;
    }

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, &bytes)
        .await
        .map_err(|e| MergeError::io(tmp.display().to_string(), e))?;

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(MergeError::io(path.display().to_string(), e));
    }

    info!("✓ 已写出 {}", path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
