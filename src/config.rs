use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// 默认输出文件名
pub const DEFAULT_OUTPUT_FILE: &str = "merged_output.docx";

/// 程序配置
///
/// 优先级：命令行参数 > 环境变量 > TOML 配置文件 > 默认值
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 第一份文档的语言代码
    pub lang1: Option<String>,
    /// 第二份文档的语言代码
    pub lang2: Option<String>,
    /// 输出文件路径
    pub output_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 运行日志文件（为空则不写）
    pub output_log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lang1: None,
            lang2: None,
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            verbose_logging: false,
            output_log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，再叠加环境变量
    pub async fn from_toml_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;

        Ok(config.with_env_overrides())
    }

    /// 加载配置：有配置文件时读文件，否则只读环境变量
    ///
    /// 命令行的 `--verbose` 只能打开详细日志，不能关闭配置里已打开的
    pub async fn load(path: Option<&Path>, verbose: bool) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path).await?,
            None => Self::from_env(),
        };
        config.verbose_logging |= verbose;
        Ok(config)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            lang1: env_string("QUIZ_MERGE_LANG1").or(self.lang1),
            lang2: env_string("QUIZ_MERGE_LANG2").or(self.lang2),
            output_file: env_string("QUIZ_MERGE_OUTPUT").unwrap_or(self.output_file),
            verbose_logging: std::env::var("QUIZ_MERGE_VERBOSE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: env_string("QUIZ_MERGE_LOG_FILE").or(self.output_log_file),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_file() {
        let config = Config::default();
        assert_eq!(config.output_file, "merged_output.docx");
        assert!(config.lang1.is_none());
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("lang1 = \"en\"\nverbose_logging = true\n").unwrap();
        assert_eq!(config.lang1.as_deref(), Some("en"));
        assert!(config.lang2.is_none());
        assert!(config.verbose_logging);
        assert_eq!(config.output_file, DEFAULT_OUTPUT_FILE);
    }

    #[tokio::test]
    async fn test_load_keeps_verbose_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz-merge.toml");
        std::fs::write(&path, "verbose_logging = true\noutput_file = \"out.docx\"\n").unwrap();

        let config = Config::load(Some(&path), false).await.unwrap();
        assert!(config.verbose_logging);
        assert_eq!(config.output_file, "out.docx");
    }

    #[tokio::test]
    async fn test_load_cli_flag_enables_verbose() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz-merge.toml");
        std::fs::write(&path, "verbose_logging = false\n").unwrap();

        let config = Config::load(Some(&path), true).await.unwrap();
        assert!(config.verbose_logging);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")), false).await;
        assert!(result.is_err());
    }
}
