//! 编译期与运行期错误

use std::fmt;
use thiserror::Error;

/// 诊断所指向的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorLocation {
    /// 某个 token 处
    At(String),
    /// 输入末尾
    AtEnd,
    /// 扫描错误，消息自带上下文
    Scan,
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorLocation::At(lexeme) => write!(f, " at '{lexeme}'"),
            ErrorLocation::AtEnd => f.write_str(" at end"),
            ErrorLocation::Scan => Ok(()),
        }
    }
}

/// 单条编译诊断
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line {line}] Error{location}: {message}")]
pub struct Diagnostic {
    pub line: usize,
    pub location: ErrorLocation,
    pub message: String,
}

/// 编译失败；panic mode 下只会记录第一条诊断
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_diagnostics(.diagnostics))]
pub struct CompileError {
    pub diagnostics: Vec<Diagnostic>,
}

fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl CompileError {
    /// 第一条诊断的行号
    pub fn line(&self) -> Option<usize> {
        self.diagnostics.first().map(|d| d.line)
    }
}

/// 运行时错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeErrorKind {
    #[error("Stack overflow (capacity {capacity}).")]
    StackOverflow { capacity: usize },
    #[error("Stack underflow.")]
    StackUnderflow,
    #[error("Invalid constant index {index}.")]
    InvalidConstant { index: usize },
    #[error("Unexpected end of bytecode at offset {offset}.")]
    UnexpectedEnd { offset: usize },
}

/// 运行时错误（带出错指令的源码行）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line {line}] Runtime error: {kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let at = Diagnostic {
            line: 3,
            location: ErrorLocation::At(")".to_string()),
            message: "Expect expression.".to_string(),
        };
        assert_eq!(at.to_string(), "[line 3] Error at ')': Expect expression.");

        let end = Diagnostic {
            line: 1,
            location: ErrorLocation::AtEnd,
            message: "Expect ')' after expression.".to_string(),
        };
        assert_eq!(
            end.to_string(),
            "[line 1] Error at end: Expect ')' after expression."
        );

        let scan = Diagnostic {
            line: 2,
            location: ErrorLocation::Scan,
            message: "Unexpected character.".to_string(),
        };
        assert_eq!(scan.to_string(), "[line 2] Error: Unexpected character.");
    }

    #[test]
    fn test_compile_error_display() {
        let err = CompileError {
            diagnostics: vec![Diagnostic {
                line: 1,
                location: ErrorLocation::AtEnd,
                message: "Expect expression.".to_string(),
            }],
        };
        assert_eq!(err.to_string(), "[line 1] Error at end: Expect expression.");
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_runtime_error_display() {
        let err = RuntimeError {
            kind: RuntimeErrorKind::StackOverflow { capacity: 256 },
            line: 7,
        };
        assert_eq!(
            err.to_string(),
            "[line 7] Runtime error: Stack overflow (capacity 256)."
        );
    }
}
