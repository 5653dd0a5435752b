//! API 错误类型
//!
//! 编译、执行、配置三类错误合并为 [`AlphaeError`]，并可转成 [`ErrorReport`]。

use alphae_config::{ConfigError, Phase};
use alphae_core::{CompileError, ErrorLocation, RuntimeError, RuntimeErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Alphae 错误类型
#[derive(Error, Debug)]
pub enum AlphaeError {
    /// 编译错误
    #[error("{0}")]
    Compile(#[from] CompileError),

    /// 运行时错误
    #[error("{0}")]
    Runtime(#[from] RuntimeError),

    /// 配置错误
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// 使用全局 API 前未初始化
    #[error("global config not initialized")]
    Uninitialized,
}

impl AlphaeError {
    /// 出错的源码行；配置错误没有行号
    pub fn line(&self) -> Option<usize> {
        match self {
            AlphaeError::Compile(e) => e.line(),
            AlphaeError::Runtime(e) => Some(e.line),
            AlphaeError::Config(_) | AlphaeError::Uninitialized => None,
        }
    }

    /// `compiler`、`vm` 或 `config`
    pub fn phase(&self) -> &'static str {
        match self {
            AlphaeError::Compile(_) => Phase::Compiler.as_str(),
            AlphaeError::Runtime(_) => Phase::Vm.as_str(),
            AlphaeError::Config(_) | AlphaeError::Uninitialized => "config",
        }
    }

    /// 进程退出码（sysexits：65 数据错误，70 内部错误，78 配置错误）
    pub fn exit_code(&self) -> i32 {
        match self {
            AlphaeError::Compile(_) => 65,
            AlphaeError::Runtime(_) => 70,
            AlphaeError::Config(_) | AlphaeError::Uninitialized => 78,
        }
    }

    /// 编译错误只取第一条诊断（panic mode 下也只会有一条）
    pub fn to_report(&self) -> ErrorReport {
        match self {
            AlphaeError::Compile(e) => {
                let first = e.diagnostics.first();
                let error_kind = match first.map(|d| &d.location) {
                    Some(ErrorLocation::Scan) => "ScanError",
                    _ => "SyntaxError",
                };
                ErrorReport {
                    phase: self.phase(),
                    line: self.line(),
                    error_kind: error_kind.to_string(),
                    message: first.map(|d| d.message.clone()).unwrap_or_default(),
                }
            }
            AlphaeError::Runtime(e) => ErrorReport {
                phase: self.phase(),
                line: self.line(),
                error_kind: runtime_kind_name(&e.kind).to_string(),
                message: e.kind.to_string(),
            },
            AlphaeError::Config(_) | AlphaeError::Uninitialized => ErrorReport {
                phase: self.phase(),
                line: None,
                error_kind: "ConfigError".to_string(),
                message: self.to_string(),
            },
        }
    }
}

fn runtime_kind_name(kind: &RuntimeErrorKind) -> &'static str {
    match kind {
        RuntimeErrorKind::StackOverflow { .. } => "StackOverflow",
        RuntimeErrorKind::StackUnderflow => "StackUnderflow",
        RuntimeErrorKind::InvalidConstant { .. } => "InvalidConstant",
        RuntimeErrorKind::UnexpectedEnd { .. } => "UnexpectedEnd",
    }
}

/// 结构化错误报告
///
/// 与具体输出形式无关，CLI 的 text/json 两种格式都由它生成。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// 错误阶段: compiler, vm, config
    pub phase: &'static str,
    /// 1 起算的行号
    pub line: Option<usize>,
    /// `SyntaxError`、`ScanError`、`StackOverflow` 等
    pub error_kind: String,
    /// 不含位置前缀的消息
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "[line {}] {} error: {}", line, self.phase, self.message),
            None => write!(f, "{} error: {}", self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// 单行 JSON（`--error-format json`）
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
