//! Alphae Core - scanner, compiler, chunk, disassembler and VM (pure logic, no IO)
//!
//! 只操作内存中的数据：源码字符串进、`Value` 出。诊断和追踪文本写到注入的
//! [`TextSink`](alphae_log::TextSink)，日志写到注入的 [`Logger`](alphae_log::Logger)。
//!
//! ```
//! use alphae_core::{InterpretResult, VM};
//!
//! let mut vm = VM::new();
//! assert_eq!(vm.interpret("(1 + 2) * 3"), InterpretResult::Ok(9.0));
//! ```

pub mod chunk;
pub mod compiler;
pub mod debug;
pub mod error;
pub mod memory;
pub mod scanner;
pub mod value;
pub mod vm;

// Re-export common types
pub use chunk::{Chunk, OpCode};
pub use compiler::{Compiler, Precedence};
pub use debug::{disassemble_chunk, disassemble_instruction};
pub use error::{CompileError, Diagnostic, ErrorLocation, RuntimeError, RuntimeErrorKind};
pub use scanner::{dump_tokens, Scanner, Token, TokenKind};
pub use value::{format_value, Value};
pub use vm::{InterpretResult, VM};

// Re-export config types from alphae-config
pub use alphae_config::{CompilerConfig, Phase, ScannerConfig, VmConfig};
