//! CLI 日志系统初始化
//!
//! alphae-log 的记录经 [`TracingSink`] 转成 tracing 事件，再由 `tracing-subscriber`
//! 按所选格式写到 stderr（stdout 留给诊断文本）。

use alphae_log::{Level, LogConfig, LogSink, Logger, Record};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer,
};

/// 所有转发事件共用的 tracing target
pub const TRACING_TARGET: &str = "alphae";

/// 日志输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// 把 alphae-log 记录转发给 tracing
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, record: &Record) {
        let module = record.target;
        let span = record.span_id;
        let message = record.message.as_str();
        match record.level {
            Level::Trace => {
                tracing::trace!(target: TRACING_TARGET, module, span = ?span, "{}", message)
            }
            Level::Debug => {
                tracing::debug!(target: TRACING_TARGET, module, span = ?span, "{}", message)
            }
            Level::Info => tracing::info!(target: TRACING_TARGET, module, span = ?span, "{}", message),
            Level::Warn => tracing::warn!(target: TRACING_TARGET, module, span = ?span, "{}", message),
            Level::Error => {
                tracing::error!(target: TRACING_TARGET, module, span = ?span, "{}", message)
            }
        }
    }
}

/// alphae 级别对应的 tracing 级别
pub fn tracing_level(level: Level) -> tracing::Level {
    match level {
        Level::Trace => tracing::Level::TRACE,
        Level::Debug => tracing::Level::DEBUG,
        Level::Info => tracing::Level::INFO,
        Level::Warn => tracing::Level::WARN,
        Level::Error => tracing::Level::ERROR,
    }
}

/// 安装 subscriber，返回接好 [`TracingSink`] 的 logger
///
/// `ring` 非零时另挂一个内存缓冲区（`--log-ring`），出错时可整体转储。
pub fn init(
    level: Level,
    format: LogFormat,
    ring: usize,
) -> alphae_log::Result<(Arc<Logger>, Option<Arc<alphae_log::LogRingBuffer>>)> {
    let targets = Targets::new()
        .with_default(LevelFilter::WARN)
        .with_target(TRACING_TARGET, tracing_level(level));

    let layer = create_format_layer(format, io::stderr).with_filter(targets);
    // 测试里可能已有全局 subscriber
    let _ = tracing_subscriber::registry().with(layer).try_init();

    let mut config = LogConfig::new(level);
    if ring > 0 {
        config = config.with_ring_buffer(ring);
    }
    let (logger, ring) = config.init()?;
    logger.add_sink(TracingSink);
    Ok((logger, ring))
}

/// Create formatter layer based on format
fn create_format_layer<W, F>(
    format: LogFormat,
    make_writer: F,
) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}
