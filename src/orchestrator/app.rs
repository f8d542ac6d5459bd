use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::MergeError;
use crate::infrastructure::load_tables;
use crate::models::{MergeOutcome, MergeRequest};
use crate::utils::logging;
use crate::workflow::{MergeFlow, MergeState};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "quiz-merge", version, about = "Merge two bilingual quiz .docx files into one")]
pub struct Cli {
    /// TOML 配置文件
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 合并两份文档
    Merge {
        /// 第一种语言的文档（决定行角色和题目标识）
        first: Option<PathBuf>,
        /// 第二种语言的文档
        second: Option<PathBuf>,
        #[arg(long)]
        lang1: Option<String>,
        #[arg(long)]
        lang2: Option<String>,
        /// 输出路径，默认 merged_output.docx
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// 同时把合并结果以 JSON 输出到 stdout
        #[arg(long)]
        json: bool,
    },
    /// 以 JSON 输出文档中提取到的表格
    Inspect { file: PathBuf },
}

/// 应用主结构
///
/// 唯一直接面向用户的一层：状态信息、错误提示都只在这里输出
pub struct App {
    config: Config,
    command: Command,
}

impl App {
    /// 初始化应用
    ///
    /// 配置由调用方先加载好（日志初始化也依赖它）
    pub async fn initialize(config: Config, command: Command) -> Result<Self> {
        if let Some(log_file) = &config.output_log_file {
            logging::init_log_file(log_file)?;
        }

        Ok(Self { config, command })
    }

    /// 运行应用主逻辑
    pub async fn run(self) -> Result<ExitCode> {
        match &self.command {
            Command::Merge {
                first,
                second,
                lang1,
                lang2,
                out,
                json,
            } => {
                let request = MergeRequest {
                    first: first.clone(),
                    second: second.clone(),
                    lang1: lang1.clone().or_else(|| self.config.lang1.clone()).unwrap_or_default(),
                    lang2: lang2.clone().or_else(|| self.config.lang2.clone()).unwrap_or_default(),
                    output: out
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(&self.config.output_file)),
                };
                self.merge(&request, *json).await
            }
            Command::Inspect { file } => self.inspect(file).await,
        }
    }

    async fn merge(&self, request: &MergeRequest, json: bool) -> Result<ExitCode> {
        logging::log_startup(
            &display_path(&request.first),
            &display_path(&request.second),
            &request.lang1,
            &request.lang2,
        );

        let flow = MergeFlow::new(|state: &MergeState| println!("{}", state.status_message()));

        match flow.run(request).await {
            Ok(outcome) => {
                self.report_success(&outcome, json)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                self.report_failure(&e);
                Ok(ExitCode::FAILURE)
            }
        }
    }

    async fn inspect(&self, file: &Path) -> Result<ExitCode> {
        match load_tables(file).await {
            Ok(tables) => {
                let json = serde_json::to_string_pretty(&tables).context("无法序列化表格")?;
                println!("{}", json);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                self.report_failure(&e);
                Ok(ExitCode::FAILURE)
            }
        }
    }

    fn report_success(&self, outcome: &MergeOutcome, json: bool) -> Result<()> {
        let output = outcome.output.display().to_string();
        logging::print_final_stats(
            outcome.tables.len(),
            outcome.row_count(),
            outcome.question_count(),
            &output,
        );

        if json {
            let rendered =
                serde_json::to_string_pretty(&outcome.tables).context("无法序列化合并结果")?;
            println!("{}", rendered);
        }

        if let Some(log_file) = &self.config.output_log_file {
            logging::append_log_line(
                log_file,
                &format!("OK {} ({} 行, {} 道题)", output, outcome.row_count(), outcome.question_count()),
            )?;
        }
        Ok(())
    }

    /// 报告错误：状态行 + stderr 提示 + 日志
    fn report_failure(&self, err: &MergeError) {
        let message = failure_message(err);
        println!("{}", message);
        eprintln!("{}", message);

        match std::error::Error::source(err) {
            Some(cause) => error!("❌ {} (原因: {})", err, cause),
            None => error!("❌ {}", err),
        }

        if let Some(log_file) = &self.config.output_log_file {
            if let Err(e) = logging::append_log_line(log_file, &message) {
                warn!("⚠️ 无法写入日志文件: {}", e);
            }
        }
        info!("请修正输入后重新运行");
    }
}

/// 失败提示与状态机的 `Failed` 状态文本保持一致
fn failure_message(err: &MergeError) -> String {
    MergeState::Failed(err.to_string()).status_message()
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<missing>".to_string())
}
