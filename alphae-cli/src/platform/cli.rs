//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示和源码上下文打印。

use crate::config::ErrorFormat;
use alphae_api::AlphaeError;

/// 错误行前后显示的上下文行数
const CONTEXT_LINES: usize = 2;

/// 打印错误并显示源代码上下文
///
/// 文本格式下编译和运行时错误的诊断行已由 text sink 写到 stdout，
/// stderr 上只补源码上下文；JSON 格式总是输出完整报告。
pub fn print_error_with_source(e: &AlphaeError, source: &str, format: ErrorFormat) {
    match format {
        ErrorFormat::Json => eprintln!("{}", e.to_report().to_json()),
        ErrorFormat::Text => {
            for row in render_text(e, source) {
                eprintln!("{row}");
            }
        }
    }
}

/// 文本格式下写到 stderr 的各行
pub fn render_text(e: &AlphaeError, source: &str) -> Vec<String> {
    match e {
        AlphaeError::Compile(_) | AlphaeError::Runtime(_) => e
            .line()
            .map(|line| source_context(source, line))
            .unwrap_or_default(),
        AlphaeError::Config(_) | AlphaeError::Uninitialized => vec![format!("❌ {}", e.to_report())],
    }
}

/// 渲染错误行及其前后几行，错误行以 `>` 标记
pub fn source_context(source: &str, error_line: usize) -> Vec<String> {
    let lines: Vec<&str> = source.lines().collect();
    if error_line == 0 || error_line > lines.len() {
        return Vec::new();
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(lines.len());
    let width = end_line.to_string().len();

    (start_line..=end_line)
        .map(|line_idx| {
            let marker = if line_idx == error_line { '>' } else { ' ' };
            format!("{marker} {line_idx:>width$} | {}", lines[line_idx - 1])
        })
        .collect()
}
