//! Alphae API - Execution orchestration layer
//!
//! Provides unified execution interface, including:
//! - Execution flow orchestration
//! - Configuration abstraction (RunConfig)
//! - Unified error handling (AlphaeError)
//!
//! For CLI convenience, this crate provides a global singleton API.
//! For library use, prefer the explicit `run(source, &config)` API.
//!
//! ```
//! use alphae_api::{run, RunConfig};
//! use alphae_log::BufferText;
//! use std::sync::Arc;
//!
//! let text = BufferText::new();
//! let config = RunConfig::default().with_sink(Arc::new(text.clone()));
//! let output = run("8 / 4 / 2", &config).unwrap();
//! assert_eq!(output.value, 1.0);
//! assert!(text.contents().ends_with("Final stack value: 1\n"));
//! ```

use alphae_core::{dump_tokens, Chunk, Compiler, InterpretResult, VM};
use alphae_log::{debug, info};
use std::sync::Arc;

// Re-export config
pub mod config;
pub use config::{
    config as get_config, config_or_default, init as init_config, is_initialized, log_level,
    RunConfig,
};

// Re-export config types from alphae_config
pub use alphae_config::{
    AlphaeConfig, CompilerConfig, ConfigError, LogLevel, LoggingConfig, ScannerConfig, VmConfig,
};

// Re-export error and types
pub mod error;
pub mod types;
pub use error::{AlphaeError, ErrorReport};
pub use types::{CompileOutput, ExecuteOutput};

// Re-export core types
pub use alphae_config;
pub use alphae_core::{Phase, Value};

/// Execute with explicit configuration
///
/// This is the recommended API for library users.
pub fn run(source: &str, config: &RunConfig) -> Result<ExecuteOutput, AlphaeError> {
    let _span = config.logger.enter_span("run");
    info!(config.logger, "Starting execution");

    let compiled = compile_with_config(source, config)?;
    let result = execute_with_config(&compiled.chunk, config)?;

    info!(config.logger, "Execution completed");
    Ok(result)
}

/// Compile with explicit configuration
pub fn compile_with_config(source: &str, config: &RunConfig) -> Result<CompileOutput, AlphaeError> {
    if config.scanner.dump_tokens {
        let count = dump_tokens(source, config.sink.as_ref());
        debug!(config.logger, "listed {} tokens", count);
    }

    info!(config.logger, "Starting compiler");
    let compiler =
        Compiler::with_config_and_logger(config.compiler.clone(), Arc::clone(&config.logger));
    let chunk = compiler.compile(source, Arc::clone(&config.sink))?;
    info!(config.logger, "Compiler completed");

    Ok(CompileOutput { chunk })
}

/// Execute a compiled chunk with explicit configuration
pub fn execute_with_config(chunk: &Chunk, config: &RunConfig) -> Result<ExecuteOutput, AlphaeError> {
    let mut vm = VM::with_config_and_logger(config.vm.clone(), Arc::clone(&config.logger))
        .with_sink(Arc::clone(&config.sink));

    match vm.run_chunk(chunk) {
        InterpretResult::Ok(value) => {
            debug!(config.logger, "final value: {}", value);
            Ok(ExecuteOutput { value })
        }
        InterpretResult::RuntimeError(e) => Err(AlphaeError::Runtime(e)),
        InterpretResult::CompileError(e) => Err(AlphaeError::Compile(e)),
    }
}

// ==================== Global config API ====================

/// Compile source code (uses global config)
pub fn compile(source: &str) -> Result<CompileOutput, AlphaeError> {
    let config = get_config().ok_or(AlphaeError::Uninitialized)?;
    compile_with_config(source, config)
}

/// Execute bytecode (uses global config)
pub fn execute(chunk: &Chunk) -> Result<ExecuteOutput, AlphaeError> {
    let config = get_config().ok_or(AlphaeError::Uninitialized)?;
    execute_with_config(chunk, config)
}

/// Compile and run (uses global config)
pub fn compile_and_run(source: &str) -> Result<ExecuteOutput, AlphaeError> {
    let config = get_config().ok_or(AlphaeError::Uninitialized)?;
    run(source, config)
}

/// Quick run with default config (auto-initializes if needed)
pub fn quick_run(source: &str) -> Result<ExecuteOutput, AlphaeError> {
    run(source, config_or_default())
}
