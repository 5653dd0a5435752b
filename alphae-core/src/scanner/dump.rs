//! token 列表输出（调试用）

use super::{Scanner, TokenKind};
use alphae_log::TextSink;

/// 把源码的全部 token 逐行写入 sink，返回 token 数（含 EOF）
///
/// 行号与上一个 token 相同时显示 `   | `
pub fn dump_tokens(source: &str, sink: &dyn TextSink) -> usize {
    sink.append_line(&format!("{:<4} {:<14} {}", "line", "type", "lexeme"));

    let mut last_line = None;
    let mut count = 0;
    for token in Scanner::new(source) {
        if last_line == Some(token.line) {
            sink.append("   | ");
        } else {
            sink.append(&format!("{:4} ", token.line));
            last_line = Some(token.line);
        }
        let kind = token.kind;
        sink.append_line(&format!("{:<14} '{}'", kind.name(), token.lexeme));
        count += 1;
        if kind == TokenKind::Eof {
            break;
        }
    }
    count
}
