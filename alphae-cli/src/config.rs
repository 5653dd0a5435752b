//! CLI 配置
//!
//! 配置文件与命令行参数合并：先读 `--config` 文件，命令行开关再覆盖其中的字段。

use crate::Cli;
use alphae_api::{AlphaeConfig, AlphaeError, ConfigError, LogLevel};

/// 错误报告格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorFormat {
    /// 源码上下文
    Text,
    /// 单行 JSON（工具集成）
    Json,
}

/// 读取配置文件（如有）并应用命令行覆盖
pub fn load_config(cli: &Cli) -> Result<AlphaeConfig, AlphaeError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                AlphaeError::Config(ConfigError::Io(format!("{}: {}", path.display(), e)))
            })?;
            AlphaeConfig::from_json_str(&text)?
        }
        None => AlphaeConfig::default(),
    };
    apply_overrides(&mut config, cli)?;
    Ok(config)
}

fn apply_overrides(config: &mut AlphaeConfig, cli: &Cli) -> Result<(), AlphaeError> {
    if cli.trace {
        config.vm.trace_execution = true;
    }
    if cli.no_dump {
        config.compiler.dump_chunk = false;
    }
    if cli.tokens {
        config.scanner.dump_tokens = true;
    }
    if let Some(name) = &cli.log_level {
        config.logging.level = LogLevel::parse(name)
            .ok_or_else(|| AlphaeError::Config(ConfigError::UnknownLogLevel(name.clone())))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("alphae").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(&parse(&["expr.ae"])).unwrap();
        assert_eq!(config, AlphaeConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let cli = parse(&["--trace", "--no-dump", "--tokens", "--log-level", "INFO", "expr.ae"]);
        let config = load_config(&cli).unwrap();
        assert!(config.vm.trace_execution);
        assert!(!config.compiler.dump_chunk);
        assert!(config.scanner.dump_tokens);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_unknown_log_level() {
        let err = load_config(&parse(&["--log-level", "loud", "expr.ae"])).unwrap_err();
        assert_eq!(err.phase(), "config");
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(&parse(&["--config", "/nonexistent/alphae.json", "expr.ae"]))
            .unwrap_err();
        assert!(matches!(err, AlphaeError::Config(ConfigError::Io(_))));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join(format!("alphae-cli-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "vm": { "stack_max": 32 }, "logging": { "level": "error" } }"#)
            .unwrap();

        let cli = parse(&["--config", path.to_str().unwrap(), "--trace", "expr.ae"]);
        let config = load_config(&cli).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.vm.stack_max, 32);
        assert!(config.vm.trace_execution);
        assert_eq!(config.logging.level, LogLevel::Error);
    }
}
