//! API 层配置
//!
//! 包含执行配置 RunConfig 和全局单例（供 CLI 使用）

use alphae_config::{AlphaeConfig, CompilerConfig, LogLevel, ScannerConfig, VmConfig};
use alphae_log::{Level, Logger, NullText, TextSink};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Execution configuration
#[derive(Clone)]
pub struct RunConfig {
    /// Scanner configuration (token listing)
    pub scanner: ScannerConfig,
    /// Compiler configuration
    pub compiler: CompilerConfig,
    /// VM configuration
    pub vm: VmConfig,
    /// Logger
    pub logger: Arc<Logger>,
    /// 诊断、反汇编、追踪和最终结果的输出
    pub sink: Arc<dyn TextSink>,
}

impl RunConfig {
    /// 从配置文件数据构建
    pub fn from_config(config: &AlphaeConfig, logger: Arc<Logger>, sink: Arc<dyn TextSink>) -> Self {
        Self {
            scanner: config.scanner.clone(),
            compiler: config.compiler.clone(),
            vm: config.vm.clone(),
            logger,
            sink,
        }
    }

    pub fn with_logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn TextSink>) -> Self {
        self.sink = sink;
        self
    }
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("scanner", &self.scanner)
            .field("compiler", &self.compiler)
            .field("vm", &self.vm)
            .field("log_level", &self.logger.level())
            .finish()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scanner: ScannerConfig::default(),
            compiler: CompilerConfig::default(),
            vm: VmConfig::default(),
            logger: Logger::noop(),
            sink: Arc::new(NullText),
        }
    }
}

/// 配置文件中的级别映射到日志级别
pub fn log_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::Trace,
        LogLevel::Debug => Level::Debug,
        LogLevel::Info => Level::Info,
        LogLevel::Warn => Level::Warn,
        LogLevel::Error => Level::Error,
    }
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration
///
/// 已经初始化过时原样退回传入的配置
pub fn init(config: RunConfig) -> Result<(), RunConfig> {
    GLOBAL_CONFIG.set(config)
}

/// Get global config reference
pub fn config() -> Option<&'static RunConfig> {
    GLOBAL_CONFIG.get()
}

/// 取全局配置，未初始化则用默认值初始化
pub fn config_or_default() -> &'static RunConfig {
    GLOBAL_CONFIG.get_or_init(RunConfig::default)
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}
