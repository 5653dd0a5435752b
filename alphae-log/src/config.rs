//! Logger 的声明式构建
//!
//! ```
//! use alphae_log::{Level, LogConfig, OutputConfig};
//!
//! let config = LogConfig::new(Level::Debug).with_output(OutputConfig::parse("ring:64").unwrap());
//! let (logger, ring) = config.init().unwrap();
//! alphae_log::debug!(logger, "ready");
//! assert_eq!(ring.unwrap().len(), 1);
//! ```

use crate::{Error, Level, LogRingBuffer, Logger, Result};
use std::sync::Arc;

/// 日志写到哪里
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputConfig {
    #[cfg(feature = "stdout")]
    Stdout,
    #[cfg(feature = "stderr")]
    Stderr,
    /// 内存环形缓冲区，参数为容量
    RingBuffer(usize),
}

impl OutputConfig {
    /// 解析 `stdout`、`stderr` 或 `ring:<容量>`
    pub fn parse(name: &str) -> Result<Self> {
        if let Some(capacity) = name.strip_prefix("ring:") {
            return match capacity.parse() {
                Ok(0) => Err(Error::ZeroCapacity),
                Ok(n) => Ok(OutputConfig::RingBuffer(n)),
                Err(_) => Err(Error::Unsupported("ring capacity")),
            };
        }
        match name {
            #[cfg(feature = "stdout")]
            "stdout" => Ok(OutputConfig::Stdout),
            #[cfg(feature = "stderr")]
            "stderr" => Ok(OutputConfig::Stderr),
            #[cfg(not(feature = "stdout"))]
            "stdout" => Err(Error::Unsupported("stdout")),
            #[cfg(not(feature = "stderr"))]
            "stderr" => Err(Error::Unsupported("stderr")),
            _ => Err(Error::Unsupported("unknown output")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub outputs: Vec<OutputConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(Level::Warn)
    }
}

impl LogConfig {
    /// 不带任何输出
    pub fn new(level: Level) -> Self {
        Self {
            level,
            outputs: Vec::new(),
        }
    }

    /// 调试用：Debug 级别，写 stderr，同时留一份在 10000 条的缓冲区里
    #[cfg(feature = "stderr")]
    pub fn dev() -> Self {
        Self::new(Level::Debug)
            .with_stderr()
            .with_ring_buffer(10_000)
    }

    /// 测试用：只有 Error，且没有输出
    pub fn test() -> Self {
        Self::new(Level::Error)
    }

    /// 追加输出；同一个控制台输出只保留一份
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        let console = !matches!(output, OutputConfig::RingBuffer(_));
        if !(console && self.outputs.contains(&output)) {
            self.outputs.push(output);
        }
        self
    }

    #[cfg(feature = "stdout")]
    pub fn with_stdout(self) -> Self {
        self.with_output(OutputConfig::Stdout)
    }

    #[cfg(feature = "stderr")]
    pub fn with_stderr(self) -> Self {
        self.with_output(OutputConfig::Stderr)
    }

    pub fn with_ring_buffer(self, capacity: usize) -> Self {
        self.with_output(OutputConfig::RingBuffer(capacity))
    }

    /// 构建 logger；有环形缓冲区时一并返回（多个时取最后一个）
    pub fn init(self) -> Result<(Arc<Logger>, Option<Arc<LogRingBuffer>>)> {
        let logger = Logger::new(self.level);
        let mut ring = None;
        for output in self.outputs {
            match output {
                #[cfg(feature = "stdout")]
                OutputConfig::Stdout => logger.add_sink(crate::StdoutSink),
                #[cfg(feature = "stderr")]
                OutputConfig::Stderr => logger.add_sink(crate::StderrSink),
                OutputConfig::RingBuffer(0) => return Err(Error::ZeroCapacity),
                OutputConfig::RingBuffer(capacity) => {
                    let buffer = LogRingBuffer::new(capacity);
                    logger.add_sink(Arc::clone(&buffer));
                    ring = Some(buffer);
                }
            }
        }
        Ok((logger, ring))
    }
}
