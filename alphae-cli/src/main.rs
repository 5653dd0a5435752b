//! Alphae CLI - Command line interface
//!
//! 读取源文件，编译并执行其中的表达式。诊断、反汇编、追踪和最终结果写到 stdout，
//! 日志经 tracing-subscriber 写到 stderr。

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

mod config;
mod logging;
mod platform;

use crate::config::{load_config, ErrorFormat};
use crate::logging::LogFormat;
use crate::platform::print_error_with_source;
use alphae_api::{init_config, log_level, run, RunConfig};
use alphae_log::{debug, StdoutText};

/// 源文件无法读取（sysexits EX_NOINPUT）
const EXIT_NO_INPUT: i32 = 66;
/// 日志输出无法建立（sysexits EX_CONFIG）
const EXIT_CONFIG: i32 = 78;

#[derive(Parser, Debug)]
#[command(
    name = "alphae",
    about = "Alphae - compile an arithmetic expression to bytecode and run it",
    version
)]
pub struct Cli {
    /// Source file containing one expression
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Trace every instruction (stack contents + disassembly)
    #[arg(long)]
    pub trace: bool,

    /// Do not disassemble the chunk after compiling
    #[arg(long)]
    pub no_dump: bool,

    /// List the scanned tokens before compiling
    #[arg(long)]
    pub tokens: bool,

    /// JSON configuration file
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (silent = error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Keep the last N log records in memory and dump them on failure
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub log_ring: usize,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Error report format
    #[arg(long, value_enum, default_value_t = ErrorFormat::Text)]
    pub error_format: ErrorFormat,
}

fn main() {
    let cli = Cli::parse();

    let file_config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_error_with_source(&e, "", cli.error_format);
            process::exit(e.exit_code());
        }
    };

    let level = log_level(file_config.logging.level);
    let (logger, ring) = match logging::init(level, cli.log_format, cli.log_ring) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_CONFIG);
        }
    };

    let source = match std::fs::read_to_string(&cli.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", cli.file.display(), e);
            process::exit(EXIT_NO_INPUT);
        }
    };
    debug!(logger, "loaded {} ({} bytes)", cli.file.display(), source.len());

    let run_config = RunConfig::from_config(&file_config, logger, Arc::new(StdoutText));

    // Initialize API config (global singleton for convenience)
    if init_config(run_config.clone()).is_err() {
        debug!(run_config.logger, "global config already initialized");
    }

    if let Err(e) = run(&source, &run_config) {
        print_error_with_source(&e, &source, cli.error_format);
        if let Some(ring) = ring.filter(|r| !r.is_empty()) {
            eprintln!("--- last {} log records ---", ring.len());
            eprintln!("{}", ring.dump());
        }
        process::exit(e.exit_code());
    }
}
