//! 内存中的有界日志 sink
//!
//! 测试用它断言写出了哪些日志；满了就挤掉最早的一条。

use crate::logger::LogSink;
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RingBufferStats {
    pub record_count: usize,
    /// 被挤掉（或容量为 0 时直接丢弃）的记录数
    pub dropped_count: usize,
    pub capacity: usize,
}

pub struct LogRingBuffer {
    slots: Mutex<VecDeque<Record>>,
    capacity: usize,
    dropped: AtomicUsize,
}

impl LogRingBuffer {
    /// 返回 `Arc`：一份交给 logger，一份留着查看
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            slots: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            dropped: AtomicUsize::new(0),
        })
    }

    fn slots(&self) -> MutexGuard<'_, VecDeque<Record>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 按写入顺序复制出全部记录
    pub fn dump_records(&self) -> Vec<Record> {
        self.slots().iter().cloned().collect()
    }

    /// 只要消息文本
    pub fn messages(&self) -> Vec<String> {
        self.slots().iter().map(|r| r.message.clone()).collect()
    }

    /// 每条记录一行
    pub fn dump(&self) -> String {
        let slots = self.slots();
        let lines: Vec<String> = slots.iter().map(Record::format).collect();
        lines.join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.slots().iter().any(|r| r.message.contains(needle))
    }

    /// 清空记录并重置丢弃计数
    pub fn clear(&self) {
        let mut slots = self.slots();
        slots.clear();
        self.dropped.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> RingBufferStats {
        RingBufferStats {
            record_count: self.len(),
            dropped_count: self.dropped_count(),
            capacity: self.capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl LogSink for LogRingBuffer {
    fn write(&self, record: &Record) {
        let mut slots = self.slots();
        let evict = slots.len() >= self.capacity;
        if evict {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            if slots.pop_front().is_none() {
                // 容量为 0
                return;
            }
        }
        slots.push_back(record.clone());
    }
}
