//! Logger：级别过滤、扇出到多个 sink、维护 span 栈
//!
//! 没有全局实例。组件构造时接收 `Arc<Logger>`，缺省用 [`Logger::noop`]。

use crate::record::{Level, Record};
use crate::span::{Span, SpanId};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// 日志记录的去处
pub trait LogSink: Send + Sync {
    fn write(&self, record: &Record);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, record: &Record) {
        (**self).write(record)
    }
}

pub struct Logger {
    threshold: AtomicU8,
    sinks: RwLock<Vec<Box<dyn LogSink>>>,
    spans: Mutex<Vec<Span>>,
    span_ids: AtomicU64,
}

impl Logger {
    pub fn new(level: Level) -> Arc<Self> {
        Arc::new(Self {
            threshold: AtomicU8::new(level.index()),
            sinks: RwLock::new(Vec::new()),
            spans: Mutex::new(Vec::new()),
            span_ids: AtomicU64::new(1),
        })
    }

    /// 只放行 Error 且没有 sink：什么也不输出
    pub fn noop() -> Arc<Self> {
        Self::new(Level::Error)
    }

    /// 构建时链式挂上 sink
    pub fn with_sink(self: Arc<Self>, sink: impl LogSink + 'static) -> Arc<Self> {
        self.add_sink(sink);
        self
    }

    /// 给已经共享出去的 logger 追加 sink
    pub fn add_sink(&self, sink: impl LogSink + 'static) {
        self.sinks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(sink));
    }

    pub fn set_level(&self, level: Level) {
        self.threshold.store(level.index(), Ordering::Relaxed);
    }

    pub fn level(&self) -> Level {
        Level::from_index(self.threshold.load(Ordering::Relaxed))
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level.index() >= self.threshold.load(Ordering::Relaxed)
    }

    /// 宏最终调用这里；消息已格式化
    #[inline(never)]
    pub fn log(&self, level: Level, target: &'static str, message: impl Into<String>) {
        if !self.is_enabled(level) {
            return;
        }
        let mut record = Record::new(level, target, message);
        if let Some(id) = self.spans().last().map(|span| span.id) {
            record = record.in_span(id);
        }
        let sinks = self.sinks.read().unwrap_or_else(PoisonError::into_inner);
        for sink in sinks.iter() {
            sink.write(&record);
        }
    }

    /// 进入 span；守卫析构时退出
    pub fn enter_span(self: &Arc<Self>, name: &'static str) -> SpanGuard {
        let id = SpanId(self.span_ids.fetch_add(1, Ordering::Relaxed));
        self.spans().push(Span { id, name });
        SpanGuard {
            logger: Arc::clone(self),
            id,
        }
    }

    pub fn span_depth(&self) -> usize {
        self.spans().len()
    }

    /// 最内层 span 的名字
    pub fn current_span(&self) -> Option<&'static str> {
        self.spans().last().map(|span| span.name)
    }

    // sink 里的 panic 不应让之后的日志全部失效
    fn spans(&self) -> MutexGuard<'_, Vec<Span>> {
        self.spans.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[must_use = "the span ends as soon as the guard is dropped"]
pub struct SpanGuard {
    logger: Arc<Logger>,
    id: SpanId,
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        // 守卫不一定按进入顺序释放，按 id 移除
        let mut spans = self.logger.spans();
        if let Some(pos) = spans.iter().rposition(|span| span.id == self.id) {
            spans.remove(pos);
        }
    }
}

#[cfg(feature = "stdout")]
pub struct StdoutSink;

#[cfg(feature = "stdout")]
impl LogSink for StdoutSink {
    fn write(&self, record: &Record) {
        println!("{}", record.format());
    }
}

#[cfg(feature = "stderr")]
pub struct StderrSink;

#[cfg(feature = "stderr")]
impl LogSink for StderrSink {
    fn write(&self, record: &Record) {
        eprintln!("{}", record.format());
    }
}
