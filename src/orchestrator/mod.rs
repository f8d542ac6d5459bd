//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 解析命令行、加载配置、驱动一次合并，并且是唯一向用户输出状态和错误的地方。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (命令行 / 配置 / 报告)
//!     ↓
//! workflow::MergeFlow (一次合并: 读取 → 合并 → 生成)
//!     ↓
//! services (能力层：classify / merge_rows / merge_tables)
//!     ↓
//! infrastructure (基础设施：docx 读写)
//! ```

pub mod app;

pub use app::{App, Cli, Command};
