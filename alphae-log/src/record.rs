//! 日志记录

use crate::span::SpanId;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// 日志级别，按严重程度递增
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// 全部级别；下标就是 logger 内部存储的阈值
    pub const ALL: [Level; 5] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
    ];

    /// 大写标签，如 `WARN`
    pub const fn label(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    pub(crate) const fn index(self) -> u8 {
        self as u8
    }

    /// 越界时按最严格的级别处理
    pub(crate) fn from_index(index: u8) -> Level {
        Self::ALL
            .get(index as usize)
            .copied()
            .unwrap_or(Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad 让 `{:<5}` 之类的宽度生效
        f.pad(self.label())
    }
}

/// 一条已格式化的日志
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// 写入时刻，Unix 毫秒
    pub timestamp_ms: u64,
    pub level: Level,
    /// 发出日志的模块路径，由宏填入 `module_path!()`
    pub target: &'static str,
    pub message: String,
    /// 写入时所在的 span
    pub span_id: Option<SpanId>,
}

impl Record {
    pub fn new(level: Level, target: &'static str, message: impl Into<String>) -> Self {
        Self {
            timestamp_ms: now_ms(),
            level,
            target,
            message: message.into(),
            span_id: None,
        }
    }

    /// 标记所属 span
    pub fn in_span(self, span_id: SpanId) -> Self {
        Self {
            span_id: Some(span_id),
            ..self
        }
    }

    /// 单行文本：`12:00:01.250 DEBUG alphae_core::vm #3: message`
    pub fn format(&self) -> String {
        let span = self
            .span_id
            .map(|id| format!(" {id}"))
            .unwrap_or_default();
        format!(
            "{} {:<5} {}{}: {}",
            wall_clock(self.timestamp_ms),
            self.level,
            self.target,
            span,
            self.message
        )
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// UTC 的 `HH:MM:SS.mmm`
fn wall_clock(timestamp_ms: u64) -> String {
    let t = Duration::from_millis(timestamp_ms);
    let secs = t.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600 % 24,
        secs / 60 % 60,
        secs % 60,
        t.subsec_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_index(level.index()), level);
        }
        assert_eq!(Level::from_index(200), Level::Error);
    }

    #[test]
    fn test_display_honours_width() {
        assert_eq!(format!("[{:<5}]", Level::Warn), "[WARN ]");
        assert_eq!(Level::Trace.to_string(), "TRACE");
    }

    #[test]
    fn test_format_line() {
        let record = Record {
            timestamp_ms: 86_400_000 + 13 * 3_600_000 + 5 * 60_000 + 9_007,
            level: Level::Debug,
            target: "alphae_core::vm",
            message: "push 1".to_string(),
            span_id: None,
        };
        assert_eq!(record.format(), "13:05:09.007 DEBUG alphae_core::vm: push 1");

        let record = record.in_span(SpanId(3));
        assert_eq!(record.span_id, Some(SpanId(3)));
        assert!(record.format().ends_with("alphae_core::vm #3: push 1"));
    }
}
