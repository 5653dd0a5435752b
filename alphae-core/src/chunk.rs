//! 字节码块
//!
//! `code` 与 `lines` 逐字节对齐，常量池由 chunk 独占。编译器构建一次，VM 可反复执行。

use crate::memory::{grow_capacity, MIN_CAPACITY};
use crate::value::{Value, ValuePool};
use alphae_log::{trace, Logger};
use std::sync::Arc;

/// 单字节操作码，字节值即序列化格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// 后跟 1 字节常量池下标
    Constant = 0,
    Return = 1,
    Add = 2,
    Subtract = 3,
    Multiply = 4,
    Divide = 5,
    Negate = 6,
}

impl OpCode {
    /// 反汇编使用的助记符
    pub const fn name(self) -> &'static str {
        match self {
            OpCode::Constant => "OP_CONSTANT",
            OpCode::Return => "OP_RETURN",
            OpCode::Add => "OP_ADD",
            OpCode::Subtract => "OP_SUBTRACT",
            OpCode::Multiply => "OP_MULTIPLY",
            OpCode::Divide => "OP_DIVIDE",
            OpCode::Negate => "OP_NEGATE",
        }
    }

    /// 操作数字节数
    pub const fn operand_size(self) -> usize {
        match self {
            OpCode::Constant => 1,
            _ => 0,
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            0 => OpCode::Constant,
            1 => OpCode::Return,
            2 => OpCode::Add,
            3 => OpCode::Subtract,
            4 => OpCode::Multiply,
            5 => OpCode::Divide,
            6 => OpCode::Negate,
            other => return Err(other),
        })
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> u8 {
        op as u8
    }
}

/// 字节码块
#[derive(Clone)]
pub struct Chunk {
    /// 指令字节码
    code: Vec<u8>,
    /// 行号信息（与 code 等长）
    lines: Vec<usize>,
    /// 逻辑容量，按 8、16、32… 增长
    capacity: usize,
    /// 常量池
    constants: ValuePool,
    logger: Arc<Logger>,
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("code", &self.code)
            .field("lines", &self.lines)
            .field("capacity", &self.capacity)
            .field("constants", &self.constants.as_slice())
            .finish()
    }
}

impl Chunk {
    /// 创建新的字节码块
    pub fn new() -> Self {
        Self::with_logger(Logger::noop())
    }

    /// 创建新的字节码块（带 logger）
    pub fn with_logger(logger: Arc<Logger>) -> Self {
        Self {
            code: Vec::with_capacity(MIN_CAPACITY),
            lines: Vec::with_capacity(MIN_CAPACITY),
            capacity: MIN_CAPACITY,
            constants: ValuePool::new(),
            logger,
        }
    }

    /// 写入一个字节及其源码行号
    pub fn write(&mut self, byte: u8, line: usize) {
        if self.code.len() == self.capacity {
            let old = self.capacity;
            self.capacity = grow_capacity(old);
            let additional = self.capacity - self.code.len();
            self.code.reserve_exact(additional);
            self.lines.reserve_exact(additional);
            trace!(self.logger, "chunk grow: {} -> {}", old, self.capacity);
        }
        self.code.push(byte);
        self.lines.push(line);
    }

    /// 写入操作码
    pub fn write_op(&mut self, op: OpCode, line: usize) {
        self.write(op.into(), line);
    }

    /// 写入带 u8 操作数的指令
    pub fn write_op_u8(&mut self, op: OpCode, operand: u8, line: usize) {
        self.write_op(op, line);
        self.write(operand, line);
    }

    /// 添加常量，返回其下标；是否装得进单字节操作数由调用方检查
    pub fn add_constant(&mut self, value: Value) -> usize {
        self.constants.write(value)
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    /// 指定偏移处字节的行号
    pub fn line(&self, offset: usize) -> Option<usize> {
        self.lines.get(offset).copied()
    }

    pub fn constant(&self, index: usize) -> Option<Value> {
        self.constants.get(index)
    }

    pub fn constants(&self) -> &[Value] {
        self.constants.as_slice()
    }

    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    /// 字节码长度
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphae_log::{Level, LogRingBuffer};

    #[test]
    fn test_opcode_encoding() {
        assert_eq!(u8::from(OpCode::Constant), 0);
        assert_eq!(u8::from(OpCode::Return), 1);
        assert_eq!(u8::from(OpCode::Negate), 6);
        assert_eq!(OpCode::try_from(5), Ok(OpCode::Divide));
        assert_eq!(OpCode::try_from(7), Err(7));
    }

    #[test]
    fn test_fresh_chunk() {
        let chunk = Chunk::new();
        assert!(chunk.is_empty());
        assert_eq!(chunk.capacity(), 8);
    }

    #[test]
    fn test_write_op() {
        let mut chunk = Chunk::new();
        chunk.write_op(OpCode::Add, 1);
        assert_eq!(chunk.code(), &[2]);
        assert_eq!(chunk.lines(), &[1]);
        assert_eq!(chunk.capacity(), 8);
    }

    #[test]
    fn test_constant_instruction() {
        let mut chunk = Chunk::new();
        let idx = chunk.add_constant(1.2);
        chunk.write_op_u8(OpCode::Constant, idx as u8, 123);
        assert_eq!(chunk.code(), &[0, 0]);
        assert_eq!(chunk.lines(), &[123, 123]);
        assert_eq!(chunk.constant(0), Some(1.2));
        assert_eq!(chunk.constant(1), None);
    }

    #[test]
    fn test_growth_preserves_contents() {
        let ring = LogRingBuffer::new(16);
        let mut chunk = Chunk::with_logger(Logger::new(Level::Trace).with_sink(ring.clone()));

        for i in 0..8u8 {
            chunk.write(i, i as usize + 1);
        }
        assert_eq!(chunk.capacity(), 8);
        assert!(ring.is_empty());

        chunk.write(8, 9);
        assert_eq!(chunk.capacity(), 16);
        assert_eq!(ring.len(), 1);
        assert!(ring.contains("chunk grow: 8 -> 16"));

        assert_eq!(chunk.code(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(chunk.lines(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_line_lookup() {
        let mut chunk = Chunk::new();
        chunk.write_op(OpCode::Return, 4);
        assert_eq!(chunk.line(0), Some(4));
        assert_eq!(chunk.line(1), None);
    }
}
