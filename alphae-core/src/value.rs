//! 值类型与常量池

use crate::memory::grow_capacity;

/// 运行时值：当前只有双精度浮点数
pub type Value = f64;

/// 渲染值（整数值不带小数部分）
pub fn format_value(value: Value) -> String {
    format!("{value}")
}

/// 常量池，只追加
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValuePool {
    values: Vec<Value>,
    capacity: usize,
}

impl ValuePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加常量，返回下标
    pub fn write(&mut self, value: Value) -> usize {
        if self.values.len() == self.capacity {
            self.capacity = grow_capacity(self.capacity);
            self.values.reserve_exact(self.capacity - self.values.len());
        }
        self.values.push(value);
        self.values.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}
