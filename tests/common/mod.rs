//! 测试辅助工具
//!
//! 通过门面 crate 运行完整流程，捕获文本输出和日志

#![allow(dead_code)]

use alphae_workspace::log::LogRingBuffer;
use alphae_workspace::{run, AlphaeError, BufferText, Level, Logger, RunConfig, Value};
use std::sync::Arc;

/// 一次完整运行的捕获结果
pub struct Captured {
    pub result: Result<Value, AlphaeError>,
    pub text: BufferText,
    pub logs: Arc<LogRingBuffer>,
}

impl Captured {
    pub fn lines(&self) -> Vec<String> {
        self.text.lines()
    }
}

/// 捕获文本和 trace 级日志的运行配置
pub fn capture_config() -> (RunConfig, BufferText, Arc<LogRingBuffer>) {
    let text = BufferText::new();
    let logs = LogRingBuffer::new(1024);
    let logger = Logger::new(Level::Trace).with_sink(logs.clone());
    let config = RunConfig::default()
        .with_logger(logger)
        .with_sink(Arc::new(text.clone()));
    (config, text, logs)
}

/// 按给定配置修改后运行
pub fn run_captured(source: &str, configure: impl FnOnce(&mut RunConfig)) -> Captured {
    let (mut config, text, logs) = capture_config();
    configure(&mut config);
    let result = run(source, &config).map(|output| output.value);
    Captured { result, text, logs }
}

/// 不输出反汇编，只求值
pub fn eval(source: &str) -> Value {
    run_captured(source, |c| c.compiler.dump_chunk = false)
        .result
        .unwrap_or_else(|e| panic!("{source:?}: {e}"))
}
