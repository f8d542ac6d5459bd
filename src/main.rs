use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use quiz_merge::orchestrator::{App, Cli};
use quiz_merge::utils::logging;
use quiz_merge::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 先加载配置，日志级别取决于它
    let config = Config::load(cli.config.as_deref(), cli.verbose).await?;
    logging::init(config.verbose_logging);

    App::initialize(config, cli.command).await?.run().await
}
