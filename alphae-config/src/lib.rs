//! Alphae Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Alphae crates.
//!
//! 所有结构体都支持 `#[serde(default)]`，配置文件只需写出要覆盖的字段：
//!
//! ```
//! use alphae_config::AlphaeConfig;
//!
//! let cfg = AlphaeConfig::from_json_str(r#"{ "vm": { "trace_execution": true } }"#).unwrap();
//! assert!(cfg.vm.trace_execution);
//! assert_eq!(cfg.vm.stack_max, 256);
//! ```

use serde::Deserialize;
use thiserror::Error;

/// 默认栈容量
pub const DEFAULT_STACK_MAX: usize = 256;
/// 配置文件允许的最大栈容量
pub const MAX_STACK_MAX: usize = 1 << 20;
/// 默认表达式嵌套深度上限
pub const DEFAULT_MAX_NESTING: usize = 256;

/// Configuration for compiler behavior
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// 编译成功后反汇编整个 chunk
    pub dump_chunk: bool,
    /// 一元运算和括号的最大嵌套层数
    pub max_nesting: usize,
}

/// Configuration for the scanner
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// 编译前输出 token 列表
    pub dump_tokens: bool,
}

/// Configuration for the virtual machine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VmConfig {
    /// 每条指令执行前输出栈内容和反汇编
    pub trace_execution: bool,
    /// 值栈的固定容量
    pub stack_max: usize,
}

/// 日志级别（配置文件中使用小写）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// 从字符串解析（不区分大小写）
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            // silent = only errors
            "error" | "silent" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Configuration for logging
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

/// 完整配置
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AlphaeConfig {
    pub scanner: ScannerConfig,
    pub compiler: CompilerConfig,
    pub vm: VmConfig,
    pub logging: LoggingConfig,
}

/// 配置解析错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: stack_max must be greater than zero")]
    ZeroStack,
    #[error("invalid config: stack_max must not exceed {max}")]
    StackTooLarge { max: usize },
    #[error("invalid config: unknown log level '{0}'")]
    UnknownLogLevel(String),
    /// 配置文件读取失败
    #[error("cannot read config: {0}")]
    Io(String),
}

impl AlphaeConfig {
    /// 从 JSON 文本解析配置
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: AlphaeConfig = serde_json::from_str(text)?;
        if config.vm.stack_max == 0 {
            return Err(ConfigError::ZeroStack);
        }
        if config.vm.stack_max > MAX_STACK_MAX {
            return Err(ConfigError::StackTooLarge { max: MAX_STACK_MAX });
        }
        Ok(config)
    }
}

/// Execution phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Scanner,
    Compiler,
    Vm,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Scanner => "scanner",
            Phase::Compiler => "compiler",
            Phase::Vm => "vm",
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            dump_chunk: true,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            trace_execution: false,
            stack_max: DEFAULT_STACK_MAX,
        }
    }
}
