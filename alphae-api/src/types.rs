//! API 类型定义
//!
//! 编译和执行的输入输出类型。

use alphae_core::{Chunk, Value};

/// 编译输出
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// 字节码块（可多次执行）
    pub chunk: Chunk,
}

/// 执行输出
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecuteOutput {
    /// RETURN 弹出的最终值
    pub value: Value,
}
