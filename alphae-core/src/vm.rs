//! 虚拟机实现
//!
//! 取指-译码-执行循环，值栈容量固定（`VmConfig::stack_max`），不会自动增长。

use crate::chunk::{Chunk, OpCode};
use crate::compiler::Compiler;
use crate::debug::disassemble_instruction;
use crate::error::{CompileError, RuntimeError, RuntimeErrorKind};
use crate::value::{format_value, Value};
use alphae_config::{VmConfig, DEFAULT_STACK_MAX};
use alphae_log::{debug, trace, warn, Logger, NullText, TextSink};
use std::sync::Arc;

/// 解释执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum InterpretResult {
    /// 正常结束，携带 RETURN 弹出的值
    Ok(Value),
    CompileError(CompileError),
    RuntimeError(RuntimeError),
}

impl InterpretResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, InterpretResult::Ok(_))
    }

    pub fn value(&self) -> Option<Value> {
        match self {
            InterpretResult::Ok(value) => Some(*value),
            _ => None,
        }
    }
}

/// 单条指令执行后的去向
enum Flow {
    Continue,
    Return(Value),
}

/// 虚拟机
pub struct VM {
    config: VmConfig,
    compiler: Compiler,
    /// 下一条要执行的字节偏移
    ip: usize,
    stack: Vec<Value>,
    sink: Arc<dyn TextSink>,
    logger: Arc<Logger>,
}

impl VM {
    pub fn new() -> Self {
        Self::with_config(VmConfig::default())
    }

    pub fn with_config(config: VmConfig) -> Self {
        Self::with_config_and_logger(config, Logger::noop())
    }

    pub fn with_config_and_logger(config: VmConfig, logger: Arc<Logger>) -> Self {
        Self {
            // 只预分配默认大小，`stack_max` 仅作上限检查
            stack: Vec::with_capacity(config.stack_max.min(DEFAULT_STACK_MAX)),
            config,
            compiler: Compiler::with_config_and_logger(Default::default(), Arc::clone(&logger)),
            ip: 0,
            sink: Arc::new(NullText),
            logger,
        }
    }

    /// 设置诊断文本输出
    pub fn with_sink(mut self, sink: Arc<dyn TextSink>) -> Self {
        self.sink = sink;
        self
    }

    /// 替换 `interpret` 使用的编译器
    pub fn with_compiler(mut self, compiler: Compiler) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    /// 当前栈内容（栈底在前）
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// 编译并执行；编译失败时不执行任何指令
    pub fn interpret(&mut self, source: &str) -> InterpretResult {
        match self.compiler.compile(source, Arc::clone(&self.sink)) {
            Ok(chunk) => self.run_chunk(&chunk),
            Err(err) => InterpretResult::CompileError(err),
        }
    }

    /// 执行已编译好的 chunk（可重复执行）
    pub fn run_chunk(&mut self, chunk: &Chunk) -> InterpretResult {
        self.ip = 0;
        self.stack.clear();

        match self.run(chunk) {
            Ok(value) => InterpretResult::Ok(value),
            Err(err) => {
                debug!(self.logger, "runtime error: {}", err);
                self.sink.append_line(&err.to_string());
                self.stack.clear();
                InterpretResult::RuntimeError(err)
            }
        }
    }

    /// 执行字节码的主循环
    fn run(&mut self, chunk: &Chunk) -> Result<Value, RuntimeError> {
        loop {
            if self.config.trace_execution {
                self.trace_instruction(chunk);
            }

            let offset = self.ip;
            let Some(&byte) = chunk.code().get(offset) else {
                return Err(self.error_at(chunk, offset, RuntimeErrorKind::UnexpectedEnd { offset }));
            };
            self.ip += 1;

            let op = match OpCode::try_from(byte) {
                Ok(op) => op,
                Err(unknown) => {
                    warn!(self.logger, "unknown opcode {} at offset {}, skipped", unknown, offset);
                    continue;
                }
            };

            trace!(self.logger, "execute: {:?}, stack: {:?}", op, self.stack);
            match self.execute(chunk, op) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Return(value)) => return Ok(value),
                Err(kind) => return Err(self.error_at(chunk, offset, kind)),
            }
        }
    }

    fn execute(&mut self, chunk: &Chunk, op: OpCode) -> Result<Flow, RuntimeErrorKind> {
        match op {
            OpCode::Constant => {
                let index = self.read_byte(chunk)? as usize;
                let value = chunk
                    .constant(index)
                    .ok_or(RuntimeErrorKind::InvalidConstant { index })?;
                self.push(value)?;
            }
            OpCode::Add => self.binary_op(|a, b| a + b)?,
            OpCode::Subtract => self.binary_op(|a, b| a - b)?,
            OpCode::Multiply => self.binary_op(|a, b| a * b)?,
            // 除零按 IEEE 754 得到 inf/NaN
            OpCode::Divide => self.binary_op(|a, b| a / b)?,
            OpCode::Negate => {
                let value = self.pop()?;
                self.push(-value)?;
            }
            OpCode::Return => {
                let value = self.pop()?;
                self.sink
                    .append_line(&format!("Final stack value: {}", format_value(value)));
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Continue)
    }

    fn read_byte(&mut self, chunk: &Chunk) -> Result<u8, RuntimeErrorKind> {
        let byte = chunk
            .code()
            .get(self.ip)
            .copied()
            .ok_or(RuntimeErrorKind::UnexpectedEnd { offset: self.ip })?;
        self.ip += 1;
        Ok(byte)
    }

    /// 先弹出 b 再弹出 a，压入 `a op b`
    fn binary_op(&mut self, op: impl Fn(Value, Value) -> Value) -> Result<(), RuntimeErrorKind> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(op(a, b))
    }

    fn push(&mut self, value: Value) -> Result<(), RuntimeErrorKind> {
        if self.stack.len() >= self.config.stack_max {
            return Err(RuntimeErrorKind::StackOverflow {
                capacity: self.config.stack_max,
            });
        }
        self.stack.push(value);
        Ok(())
    }

    fn pop(&mut self) -> Result<Value, RuntimeErrorKind> {
        self.stack.pop().ok_or(RuntimeErrorKind::StackUnderflow)
    }

    fn error_at(&self, chunk: &Chunk, offset: usize, kind: RuntimeErrorKind) -> RuntimeError {
        let line = chunk
            .line(offset)
            .or_else(|| chunk.lines().last().copied())
            .unwrap_or_default();
        RuntimeError { kind, line }
    }

    /// 输出栈内容，再反汇编即将执行的指令
    fn trace_instruction(&self, chunk: &Chunk) {
        let values: Vec<String> = self.stack.iter().map(|v| format_value(*v)).collect();
        self.sink
            .append_line(&format!("          [{}]", values.join(", ")));
        disassemble_instruction(chunk, self.ip, self.sink.as_ref());
    }
}

impl Default for VM {
    fn default() -> Self {
        Self::new()
    }
}
