use quiz_merge::infrastructure::{load_tables, parse_docx, render_docx};
use quiz_merge::models::{MergeRequest, MergedRow};
use quiz_merge::{MergeError, MergeFlow, MergeState};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 用第二列承载文本，生成一份测试用 docx
fn write_quiz(dir: &Path, name: &str, tables: &[Vec<&str>]) -> PathBuf {
    let tables: Vec<Vec<MergedRow>> = tables
        .iter()
        .map(|lines| lines.iter().map(|l| MergedRow::plain(*l)).collect())
        .collect();
    let path = dir.join(name);
    std::fs::write(&path, render_docx(&tables).expect("生成 docx 失败")).unwrap();
    path
}

fn english() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "QID001 What is your favorite animal?",
            "A. Cat",
            "B. Dog",
            "ANSWER: B",
            "",
        ],
        vec!["QID002 Capital of France?", "A) Paris", "B) Rome", "ANSWER: A"],
    ]
}

fn ukrainian() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "QID001 Яка ваша улюблена тварина?",
            "A. Кіт",
            "B. Собака",
            "ВІДПОВІДЬ: B",
            "",
        ],
        vec!["QID002 Столиця Франції?", "a) Париж", "Рим", "ВІДПОВІДЬ: A"],
    ]
}

fn recording_flow() -> (MergeFlow, Arc<Mutex<Vec<String>>>) {
    let statuses = Arc::new(Mutex::new(Vec::new()));
    let sink = statuses.clone();
    let flow = MergeFlow::new(move |state: &MergeState| {
        sink.lock().unwrap().push(state.status_message());
    });
    (flow, statuses)
}

fn request(first: PathBuf, second: PathBuf, output: PathBuf) -> MergeRequest {
    MergeRequest {
        first: Some(first),
        second: Some(second),
        lang1: "en".to_string(),
        lang2: "uk".to_string(),
        output,
    }
}

#[tokio::test]
async fn test_merge_two_documents_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_quiz(dir.path(), "en.docx", &english());
    let second = write_quiz(dir.path(), "uk.docx", &ukrainian());
    let output = dir.path().join("merged_output.docx");

    let (flow, statuses) = recording_flow();
    let outcome = flow
        .run(&request(first, second, output.clone()))
        .await
        .expect("合并应该成功");

    assert_eq!(outcome.tables.len(), 2);
    assert_eq!(outcome.row_count(), 9);
    assert_eq!(outcome.question_count(), 2);

    // 每张表的题号都从 1 开始
    assert_eq!(outcome.tables[0][0].left, "1");
    assert_eq!(outcome.tables[1][0].left, "1");

    assert_eq!(
        outcome.tables[0][0].middle,
        "QID001  {mlang en}What is your favorite animal?{mlang}{mlang uk}Яка ваша улюблена тварина?{mlang}"
    );
    assert_eq!(
        outcome.tables[0][1].middle,
        "A. {mlang en}Cat{mlang}{mlang uk}Кіт{mlang}"
    );
    assert_eq!(outcome.tables[0][3].middle, "ANSWER: B");
    assert_eq!(
        outcome.tables[1][1].middle,
        "A) {mlang en}Paris{mlang}{mlang uk}Париж{mlang}"
    );
    assert_eq!(
        outcome.tables[1][2].middle,
        "B) {mlang en}Rome{mlang}{mlang uk}Рим{mlang}"
    );

    assert_eq!(
        *statuses.lock().unwrap(),
        vec![
            "Reading first document...",
            "Reading second document...",
            "Building merged tables...",
            "Generating .docx...",
            "Done. File downloaded: merged_output.docx",
        ]
    );

    // 输出文件：每张表三列，中间列就是合并后的文本
    let written = parse_docx(&std::fs::read(&output).unwrap()).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[1].questions[1], outcome.tables[1][1].middle);
    assert!(!dir.path().join("merged_output.docx.part").exists());
}

#[tokio::test]
async fn test_table_count_mismatch_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_quiz(dir.path(), "en.docx", &english());
    let second = write_quiz(dir.path(), "uk.docx", &ukrainian()[..1]);
    let output = dir.path().join("merged_output.docx");

    let (flow, statuses) = recording_flow();
    let err = flow
        .run(&request(first, second, output.clone()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MergeError::TableCountMismatch {
            first: 2,
            second: 1
        }
    ));
    assert!(!output.exists());
    assert!(matches!(flow.session().state(), MergeState::Failed(_)));
    assert_eq!(statuses.lock().unwrap().last().unwrap(), "Building merged tables...");
}

#[tokio::test]
async fn test_line_count_mismatch_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_quiz(dir.path(), "en.docx", &[vec!["Q1 One?", "A. a", "ANSWER: A"]]);
    let second = write_quiz(dir.path(), "uk.docx", &[vec!["Q1 Один?", "A. а"]]);
    let output = dir.path().join("merged_output.docx");

    let (flow, _) = recording_flow();
    let err = flow
        .run(&request(first, second, output.clone()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MergeError::LengthMismatch {
            table: Some(1),
            first: 3,
            second: 2
        }
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_document_without_tables() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_quiz(dir.path(), "empty.docx", &[]);
    let second = write_quiz(dir.path(), "uk.docx", &ukrainian());

    let (flow, statuses) = recording_flow();
    let err = flow
        .run(&request(first, second, dir.path().join("out.docx")))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No tables found in document.");
    assert_eq!(*statuses.lock().unwrap(), vec!["Reading first document..."]);
}

#[tokio::test]
async fn test_flow_can_rerun_after_failure() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_quiz(dir.path(), "en.docx", &english());
    let second = write_quiz(dir.path(), "uk.docx", &ukrainian());
    let output = dir.path().join("merged_output.docx");

    let (flow, _) = recording_flow();
    let bad = MergeRequest {
        lang2: String::new(),
        ..request(first.clone(), second.clone(), output.clone())
    };
    assert!(flow.run(&bad).await.is_err());

    flow.run(&request(first, second, output.clone()))
        .await
        .expect("修正输入后应该可以重新合并");
    assert!(output.exists());
}

#[test]
fn test_load_tables_extracts_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_quiz(dir.path(), "en.docx", &english());

    let tables = tokio_test::block_on(load_tables(&path)).unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].ids, vec!["QID001"]);
    assert_eq!(tables[1].ids, vec!["QID002"]);
    assert_eq!(tables[0].questions.len(), 5);
}
