//! 合并流程 - 流程层
//!
//! 核心职责：定义"一次合并"的完整流程
//!
//! 流程顺序：
//! 1. 校验输入（两个文件、两个语言代码）
//! 2. 读取第一份文档 → 读取第二份文档（严格串行）
//! 3. 逐表合并
//! 4. 生成 docx
//!
//! 每一步的错误都用 `?` 向上传递，流程本身不向用户输出任何内容，
//! 只通过 [`StatusSink`] 报告进度。

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{MergeError, MergeResult};
use crate::infrastructure::{load_tables, save_docx};
use crate::models::{MergeOutcome, MergeRequest};
use crate::services::merge_tables;
use crate::workflow::merge_state::{MergeSession, MergeState};

/// 进度接收方
pub trait StatusSink: Send + Sync {
    fn status(&self, state: &MergeState);
}

impl<F> StatusSink for F
where
    F: Fn(&MergeState) + Send + Sync,
{
    fn status(&self, state: &MergeState) {
        self(state)
    }
}

/// 合并流程
///
/// - 不持有文件内容，所有数据都在一次 `run` 内创建和释放
/// - 通过 [`MergeSession`] 拒绝重入
pub struct MergeFlow {
    session: MergeSession,
    sink: Box<dyn StatusSink>,
}

impl MergeFlow {
    pub fn new(sink: impl StatusSink + 'static) -> Self {
        Self::with_session(MergeSession::new(), sink)
    }

    pub fn with_session(session: MergeSession, sink: impl StatusSink + 'static) -> Self {
        Self {
            session,
            sink: Box::new(sink),
        }
    }

    pub fn session(&self) -> &MergeSession {
        &self.session
    }

    /// 执行一次合并
    ///
    /// 失败时不会留下输出文件，会话进入 Failed
    pub async fn run(&self, request: &MergeRequest) -> MergeResult<MergeOutcome> {
        self.session.try_begin()?;

        let result = self.run_stages(request).await;

        let output_name = request
            .output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let state = self.session.finish(&result, &output_name);

        match &result {
            Ok(outcome) => {
                info!(
                    "✅ 合并完成: {} 张表格, {} 行, {} 道题",
                    outcome.tables.len(),
                    outcome.row_count(),
                    outcome.question_count()
                );
                self.sink.status(&state);
            }
            Err(e) => warn!("⚠️ 合并中止 ({}): {}", state, e),
        }
        result
    }

    async fn run_stages(&self, request: &MergeRequest) -> MergeResult<MergeOutcome> {
        let (first, second) = validate_files(request)?;
        let (lang1, lang2) = validate_languages(request)?;

        self.enter(MergeState::Reading1);
        let tables1 = load_tables(first).await?;

        self.enter(MergeState::Reading2);
        let tables2 = load_tables(second).await?;

        self.enter(MergeState::Merging);
        let tables = merge_tables(&tables1, &tables2, lang1, lang2)?;

        self.enter(MergeState::Rendering);
        save_docx(&request.output, &tables).await?;

        Ok(MergeOutcome {
            output: request.output.clone(),
            tables,
        })
    }

    fn enter(&self, state: MergeState) {
        self.session.advance(state.clone());
        info!("{}", state.status_message());
        self.sink.status(&state);
    }
}

fn non_empty(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

fn validate_files(request: &MergeRequest) -> MergeResult<(&Path, &Path)> {
    match (non_empty(&request.first), non_empty(&request.second)) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(MergeError::missing_files()),
    }
}

fn validate_languages(request: &MergeRequest) -> MergeResult<(&str, &str)> {
    let lang1 = request.lang1.trim();
    let lang2 = request.lang2.trim();
    if lang1.is_empty() || lang2.is_empty() {
        return Err(MergeError::missing_languages());
    }
    Ok((lang1, lang2))
}
