//! 动态数组容量策略

/// 首次分配的容量
pub const MIN_CAPACITY: usize = 8;

/// 下一次扩容后的容量：不足 8 时直接给 8，否则翻倍
pub const fn grow_capacity(capacity: usize) -> usize {
    if capacity < MIN_CAPACITY {
        MIN_CAPACITY
    } else {
        capacity * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_capacity() {
        assert_eq!(grow_capacity(0), 8);
        assert_eq!(grow_capacity(5), 8);
        assert_eq!(grow_capacity(8), 16);
        assert_eq!(grow_capacity(16), 32);
    }
}
