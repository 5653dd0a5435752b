//! 单遍编译器
//!
//! 边扫描边用 Pratt 解析（优先级爬升）生成字节码。每次 `compile` 都新建一个
//! [`Session`]，扫描游标、前后 token 以及错误/panic 标志都只活在这一次编译里。

mod precedence;
mod rules;

pub use precedence::Precedence;

use crate::chunk::{Chunk, OpCode};
use crate::debug::disassemble_chunk;
use crate::error::{CompileError, Diagnostic, ErrorLocation};
use crate::scanner::{Scanner, Token, TokenKind};
use crate::value::Value;
use alphae_config::CompilerConfig;
use alphae_log::{debug, trace, Logger, TextSink};
use rules::get_rule;
use std::sync::Arc;

/// 单字节操作数能寻址的常量数
const MAX_CONSTANTS: usize = u8::MAX as usize + 1;

/// 编译器（无状态，可重复使用）
pub struct Compiler {
    config: CompilerConfig,
    logger: Arc<Logger>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_config(CompilerConfig::default())
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self::with_config_and_logger(config, Logger::noop())
    }

    pub fn with_config_and_logger(config: CompilerConfig, logger: Arc<Logger>) -> Self {
        Self { config, logger }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// 编译一个表达式
    ///
    /// 诊断写入 `sink`；成功且开启 `dump_chunk` 时再把整个 chunk 反汇编到 `sink`
    pub fn compile(&self, source: &str, sink: Arc<dyn TextSink>) -> Result<Chunk, CompileError> {
        let mut session = Session::new(source, Arc::clone(&sink), Arc::clone(&self.logger));
        session.max_depth = self.config.max_nesting;

        session.advance();
        session.expression();
        session.consume(TokenKind::Eof, "Expect end of expression.");
        let line = session.previous.line;
        session.emit_op(OpCode::Return, line);

        let Session {
            chunk,
            had_error,
            diagnostics,
            ..
        } = session;

        if had_error {
            debug!(
                self.logger,
                "compile failed with {} diagnostic(s)",
                diagnostics.len()
            );
            return Err(CompileError { diagnostics });
        }

        debug!(
            self.logger,
            "compiled {} bytes, {} constants",
            chunk.len(),
            chunk.constant_count()
        );
        if self.config.dump_chunk {
            disassemble_chunk(&chunk, "code", sink.as_ref());
        }
        Ok(chunk)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// 一次编译的全部可变状态
pub(crate) struct Session {
    scanner: Scanner,
    current: Token,
    previous: Token,
    /// 一旦置位，本次编译内不再清除
    had_error: bool,
    /// 置位期间不再报告新的诊断
    panic_mode: bool,
    diagnostics: Vec<Diagnostic>,
    /// 当前 `parse_precedence` 的递归层数
    depth: usize,
    max_depth: usize,
    chunk: Chunk,
    sink: Arc<dyn TextSink>,
    logger: Arc<Logger>,
}

impl Session {
    fn new(source: &str, sink: Arc<dyn TextSink>, logger: Arc<Logger>) -> Self {
        Self {
            scanner: Scanner::with_logger(source, Arc::clone(&logger)),
            current: Token::placeholder(),
            previous: Token::placeholder(),
            had_error: false,
            panic_mode: false,
            diagnostics: Vec::new(),
            depth: 0,
            max_depth: alphae_config::DEFAULT_MAX_NESTING,
            chunk: Chunk::with_logger(Arc::clone(&logger)),
            sink,
            logger,
        }
    }

    // ==================== token 流 ====================

    fn advance(&mut self) {
        let next = self.next_valid_token();
        self.previous = std::mem::replace(&mut self.current, next);
    }

    /// 跳过并报告错误 token
    fn next_valid_token(&mut self) -> Token {
        loop {
            let token = self.scanner.next_token();
            if token.kind != TokenKind::Error {
                return token;
            }
            let message = token.lexeme.clone();
            self.error_at(&token, &message);
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.current.kind == kind {
            self.advance();
            return;
        }
        self.error_at_current(message);
    }

    // ==================== 表达式 ====================

    fn expression(&mut self) {
        self.parse_precedence(Precedence::Assignment);
    }

    /// 一元运算和括号经由这里递归，层数受 `max_nesting` 限制
    fn parse_precedence(&mut self, precedence: Precedence) {
        if self.depth >= self.max_depth {
            self.error_at_current("Expression nested too deeply.");
            return;
        }
        self.depth += 1;
        self.parse_operand(precedence);
        self.depth -= 1;
    }

    fn parse_operand(&mut self, precedence: Precedence) {
        self.advance();
        let Some(prefix) = get_rule(self.previous.kind).prefix else {
            self.error("Expect expression.");
            return;
        };
        prefix(self);

        while precedence <= get_rule(self.current.kind).precedence {
            self.advance();
            if let Some(infix) = get_rule(self.previous.kind).infix {
                infix(self);
            }
        }
    }

    pub(crate) fn number(&mut self) {
        match self.previous.lexeme.parse::<Value>() {
            Ok(value) => self.emit_constant(value),
            Err(_) => self.error("Invalid number literal."),
        }
    }

    pub(crate) fn grouping(&mut self) {
        self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after expression.");
    }

    pub(crate) fn unary(&mut self) {
        let operator = self.previous.kind;
        let line = self.previous.line;

        self.parse_precedence(Precedence::Unary);

        if operator == TokenKind::Minus {
            self.emit_op(OpCode::Negate, line);
        }
    }

    pub(crate) fn binary(&mut self) {
        let operator = self.previous.kind;
        let line = self.previous.line;

        // 右操作数用高一级解析：同级运算符左结合
        let rule = get_rule(operator);
        self.parse_precedence(rule.precedence.next());

        let op = match operator {
            TokenKind::Plus => OpCode::Add,
            TokenKind::Minus => OpCode::Subtract,
            TokenKind::Star => OpCode::Multiply,
            TokenKind::Slash => OpCode::Divide,
            _ => return,
        };
        self.emit_op(op, line);
    }

    // ==================== 代码生成 ====================

    fn emit_op(&mut self, op: OpCode, line: usize) {
        self.chunk.write_op(op, line);
    }

    fn emit_constant(&mut self, value: Value) {
        let line = self.previous.line;
        if let Some(index) = self.make_constant(value) {
            self.chunk.write_op_u8(OpCode::Constant, index, line);
        }
    }

    fn make_constant(&mut self, value: Value) -> Option<u8> {
        if self.chunk.constant_count() >= MAX_CONSTANTS {
            self.error("Too many constants in one chunk.");
            return None;
        }
        let index = self.chunk.add_constant(value);
        trace!(self.logger, "constant #{} = {}", index, value);
        u8::try_from(index).ok()
    }

    // ==================== 错误报告 ====================

    fn error_at_current(&mut self, message: &str) {
        let token = self.current.clone();
        self.error_at(&token, message);
    }

    fn error(&mut self, message: &str) {
        let token = self.previous.clone();
        self.error_at(&token, message);
    }

    fn error_at(&mut self, token: &Token, message: &str) {
        if self.panic_mode {
            trace!(self.logger, "suppressed in panic mode: {}", message);
            return;
        }
        self.panic_mode = true;
        self.had_error = true;

        let location = match token.kind {
            TokenKind::Eof => ErrorLocation::AtEnd,
            TokenKind::Error => ErrorLocation::Scan,
            _ => ErrorLocation::At(token.lexeme.clone()),
        };
        let diagnostic = Diagnostic {
            line: token.line,
            location,
            message: message.to_string(),
        };
        debug!(self.logger, "{}", diagnostic);
        self.sink.append_line(&diagnostic.to_string());
        self.diagnostics.push(diagnostic);
    }
}
