//! alphae-log - 结构化日志与诊断文本输出
//!
//! 两种输出通道，互不依赖：
//! - **日志**（[`Logger`]）：分级、带模块路径的结构化记录，显式传递，无全局 logger
//! - **诊断文本**（[`TextSink`]）：只追加的文本通道，承载编译诊断、反汇编、
//!   执行追踪和最终结果，由宿主决定渲染位置（控制台、测试缓冲区……）
//!
//! # 快速开始
//!
//! ```
//! use alphae_log::{debug, BufferText, Level, LogRingBuffer, Logger, TextSink};
//!
//! let ring = LogRingBuffer::new(100);
//! let logger = Logger::new(Level::Debug).with_sink(ring.clone());
//! debug!(logger, "compiled {} bytes", 4);
//! assert_eq!(ring.len(), 1);
//!
//! let text = BufferText::new();
//! text.append("0000 ");
//! text.append_line("OP_RETURN");
//! assert_eq!(text.contents(), "0000 OP_RETURN\n");
//! ```

mod config;
mod logger;
mod macros;
mod record;
mod ring_buffer;
mod span;
mod text;

pub use config::{LogConfig, OutputConfig};
pub use logger::{LogSink, Logger, SpanGuard};
#[cfg(feature = "stderr")]
pub use logger::StderrSink;
#[cfg(feature = "stdout")]
pub use logger::StdoutSink;
pub use record::{Level, Record};
pub use ring_buffer::{LogRingBuffer, RingBufferStats};
pub use span::{Span, SpanId};
pub use text::{BufferText, NullText, StdoutText, TextSink};

// 宏通过 #[macro_export] 自动导出到 crate 根：
// trace!, debug!, info!, warn!, error!, log!

/// 日志结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// 日志系统错误类型
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 不支持的输出目标（对应 feature 未启用）
    #[error("Output not supported in this build: {0}")]
    Unsupported(&'static str),
    /// 环形缓冲区容量非法
    #[error("Ring buffer capacity must be greater than zero")]
    ZeroCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Error > Level::Warn);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::ZeroCapacity.to_string(),
            "Ring buffer capacity must be greater than zero"
        );
        assert_eq!(
            Error::Unsupported("stdout").to_string(),
            "Output not supported in this build: stdout"
        );
    }
}
