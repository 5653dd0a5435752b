//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use alphae_core::{Compiler, CompilerConfig, InterpretResult, VmConfig, VM};
use alphae_log::BufferText;
use std::sync::Arc;

/// 执行结果
#[derive(Debug)]
pub struct ExecResult {
    /// 返回值
    pub return_value: f64,
    /// 写入文本 sink 的全部内容
    pub output: String,
}

/// 执行错误
#[derive(Debug)]
pub enum ExecError {
    Compiler(String),
    Runtime(String),
}

impl std::fmt::Display for ExecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecError::Compiler(msg) => write!(f, "Compiler error: {}", msg),
            ExecError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for ExecError {}

/// 编译并执行，不输出反汇编
pub fn run_code(code: &str) -> Result<ExecResult, ExecError> {
    run_with(code, false, VmConfig::default())
}

/// 编译并执行，可选反汇编与 VM 配置
pub fn run_with(code: &str, dump_chunk: bool, vm_config: VmConfig) -> Result<ExecResult, ExecError> {
    let text = BufferText::new();
    let mut vm = VM::with_config(vm_config)
        .with_compiler(Compiler::with_config(CompilerConfig { dump_chunk, ..Default::default() }))
        .with_sink(Arc::new(text.clone()));

    match vm.interpret(code) {
        InterpretResult::Ok(return_value) => Ok(ExecResult {
            return_value,
            output: text.contents(),
        }),
        InterpretResult::CompileError(err) => Err(ExecError::Compiler(err.to_string())),
        InterpretResult::RuntimeError(err) => Err(ExecError::Runtime(err.to_string())),
    }
}

/// 求值，失败时 panic
pub fn eval(code: &str) -> f64 {
    run_code(code)
        .unwrap_or_else(|e| panic!("{code:?}: {e}"))
        .return_value
}
