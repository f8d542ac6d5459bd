//! 合并状态机
//!
//! 一次合并依次经过 Reading1 → Reading2 → Merging → Rendering → Done，
//! 失败时进入 Failed。只有在 Idle / Done / Failed 时才能开始新的合并。

use std::fmt::Display;
use std::sync::{Arc, Mutex};

use crate::error::{MergeError, MergeResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeState {
    Idle,
    Reading1,
    Reading2,
    Merging,
    Rendering,
    /// 携带输出文件名
    Done(String),
    /// 携带错误信息
    Failed(String),
}

impl MergeState {
    /// 是否允许开始新的合并
    pub fn is_settled(&self) -> bool {
        matches!(self, MergeState::Idle | MergeState::Done(_) | MergeState::Failed(_))
    }

    /// 展示给用户的状态文本
    pub fn status_message(&self) -> String {
        match self {
            MergeState::Idle => String::new(),
            MergeState::Reading1 => "Reading first document...".to_string(),
            MergeState::Reading2 => "Reading second document...".to_string(),
            MergeState::Merging => "Building merged tables...".to_string(),
            MergeState::Rendering => "Generating .docx...".to_string(),
            MergeState::Done(file) => format!("Done. File downloaded: {}", file),
            MergeState::Failed(msg) => format!("Error: {}", msg),
        }
    }
}

impl Display for MergeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MergeState::Idle => "Idle",
            MergeState::Reading1 => "Reading1",
            MergeState::Reading2 => "Reading2",
            MergeState::Merging => "Merging",
            MergeState::Rendering => "Rendering",
            MergeState::Done(_) => "Done",
            MergeState::Failed(_) => "Failed",
        };
        f.write_str(name)
    }
}

/// 合并会话
///
/// 可克隆的共享句柄，用来拒绝重入
#[derive(Debug, Clone)]
pub struct MergeSession {
    state: Arc<Mutex<MergeState>>,
}

impl MergeSession {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MergeState::Idle)),
        }
    }

    pub fn state(&self) -> MergeState {
        self.lock().clone()
    }

    /// 开始一次合并，进行中时返回 `Busy`
    pub fn try_begin(&self) -> MergeResult<()> {
        let mut state = self.lock();
        if !state.is_settled() {
            return Err(MergeError::Busy {
                state: state.to_string(),
            });
        }
        *state = MergeState::Reading1;
        Ok(())
    }

    pub fn advance(&self, next: MergeState) {
        *self.lock() = next;
    }

    /// 根据结果进入 Done 或 Failed
    pub fn finish<T>(&self, result: &MergeResult<T>, output_name: &str) -> MergeState {
        let next = match result {
            Ok(_) => MergeState::Done(output_name.to_string()),
            Err(e) => MergeState::Failed(e.to_string()),
        };
        self.advance(next.clone());
        next
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MergeState> {
        // 状态只是一个枚举值，锁中毒后沿用原值即可
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MergeSession {
    fn default() -> Self {
        Self::new()
    }
}
