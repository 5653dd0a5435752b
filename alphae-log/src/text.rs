//! 诊断文本通道
//!
//! 编译诊断、反汇编、执行追踪都写到这里，宿主决定最终渲染到哪。

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 只追加的文本输出
pub trait TextSink: Send + Sync {
    /// 追加文本，不换行
    fn append(&self, text: &str);

    /// 追加文本并换行
    fn append_line(&self, text: &str) {
        self.append(text);
        self.append("\n");
    }
}

impl<T: TextSink + ?Sized> TextSink for Arc<T> {
    fn append(&self, text: &str) {
        (**self).append(text);
    }

    fn append_line(&self, text: &str) {
        (**self).append_line(text);
    }
}

/// 写到标准输出
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutText;

impl TextSink for StdoutText {
    fn append(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // 管道关闭时静默丢弃
        let _ = out.write_all(text.as_bytes());
        if text.ends_with('\n') {
            let _ = out.flush();
        }
    }
}

/// 内存缓冲区，克隆后共享同一份内容
#[derive(Clone, Debug, Default)]
pub struct BufferText {
    buffer: Arc<Mutex<String>>,
}

impl BufferText {
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, String> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前累计的全部文本
    pub fn contents(&self) -> String {
        self.buffer().clone()
    }

    /// 按行切分的内容
    pub fn lines(&self) -> Vec<String> {
        self.buffer().lines().map(str::to_owned).collect()
    }

    pub fn clear(&self) {
        self.buffer().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }
}

impl TextSink for BufferText {
    fn append(&self, text: &str) {
        self.buffer().push_str(text);
    }
}

/// 丢弃所有输出
#[derive(Clone, Copy, Debug, Default)]
pub struct NullText;

impl TextSink for NullText {
    fn append(&self, _text: &str) {}
}
