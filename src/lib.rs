//! Alphae - arithmetic expressions compiled to bytecode
//!
//! 源码经扫描、单遍 Pratt 编译写入 chunk，再由栈式虚拟机执行。
//!
//! # Architecture
//!
//! ```text
//! alphae-config  - 纯配置数据
//! alphae-log     - 结构化日志 + 诊断文本通道
//! alphae-core    - scanner / compiler / chunk / debug / vm（无 IO）
//! alphae-api     - 执行编排、统一错误
//! alphae-cli     - 命令行入口
//! ```
//!
//! # Quick Start
//!
//! ```
//! use alphae_workspace::{run, BufferText, RunConfig};
//! use std::sync::Arc;
//!
//! let text = BufferText::new();
//! let config = RunConfig::default().with_sink(Arc::new(text.clone()));
//! assert_eq!(run("-(2 + 3)", &config).unwrap().value, -5.0);
//! ```

// 重导出常用类型
pub use alphae_api::{
    compile, compile_and_run, compile_with_config, execute, execute_with_config, init_config,
    quick_run, run, AlphaeConfig, AlphaeError, CompileOutput, ErrorReport, ExecuteOutput,
    RunConfig, Value,
};
pub use alphae_core::{disassemble_chunk, Chunk, InterpretResult, OpCode, VM};
pub use alphae_log::{BufferText, Level, Logger, NullText, StdoutText, TextSink};

// 完整的子 crate
pub use alphae_api as api;
pub use alphae_core as core;
pub use alphae_log as log;
