//! # Quiz Merge
//!
//! 把两份不同语言的 docx 题库合并为一份双语题库
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - `Role` / `MergedRow` / `TableData` 等纯数据
//!
//! ### ② 业务能力层（Services）
//! - `classifier` - 判断一行是题干、选项、答案还是空行
//! - `row_merger` - 单张表两种语言逐行配对
//! - `table_merger` - 校验表格数量，逐表合并
//!
//! ### ③ 基础设施层（Infrastructure）
//! - `docx_reader` - 解压 docx 并提取表格第二列文本
//! - `docx_writer` - 生成三列双语表格并打包
//!
//! ### ④ 流程层（Workflow）
//! - `MergeFlow` - 一次合并：读取 → 读取 → 合并 → 生成
//! - `MergeSession` - 状态机，拒绝重入
//!
//! ### ⑤ 编排层（Orchestration）
//! - `App` - 命令行、配置、状态输出和错误报告
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{MergeError, MergeResult};
pub use models::{MergeOutcome, MergeRequest, MergedRow, Role, TableData};
pub use orchestrator::App;
pub use services::{classify, merge_rows, merge_tables, strip_leading_identifier};
pub use workflow::{MergeFlow, MergeSession, MergeState};
