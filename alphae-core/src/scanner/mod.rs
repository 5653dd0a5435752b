//! 词法扫描器
//!
//! 按需产出 token：编译器每次 `advance` 才向前扫描一个。源码被复制成字符数组并在末尾
//! 追加 `'\0'` 哨兵，读到哨兵即视为输入结束。

mod dump;
mod token;

pub use dump::dump_tokens;
pub use token::{Token, TokenKind};

use alphae_log::{trace, Logger};
use std::sync::Arc;

/// 输入结束哨兵
const SENTINEL: char = '\0';

pub struct Scanner {
    source: Vec<char>,
    /// 当前 lexeme 起点
    start: usize,
    /// 下一个待读字符
    current: usize,
    line: usize,
    /// 迭代器已经交出 EOF
    finished: bool,
    logger: Arc<Logger>,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self::with_logger(source, Logger::noop())
    }

    pub fn with_logger(source: &str, logger: Arc<Logger>) -> Self {
        let mut chars: Vec<char> = source.chars().collect();
        chars.push(SENTINEL);
        Self {
            source: chars,
            start: 0,
            current: 0,
            line: 1,
            finished: false,
            logger,
        }
    }

    /// 扫描下一个 token；到达结尾后每次都返回 EOF
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.current;

        if self.is_at_end() {
            return self.make_token(TokenKind::Eof);
        }

        let c = self.advance();
        if is_alpha(c) {
            return self.identifier();
        }
        if c.is_ascii_digit() {
            return self.number();
        }

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            '/' => TokenKind::Slash,
            '*' => TokenKind::Star,
            '!' => self.pick('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.pick('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.pick('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.pick('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '"' => return self.string(),
            // 出错字符已被 advance 消费，下一次扫描从它之后继续
            _ => return self.error_token("Unexpected character."),
        };
        self.make_token(kind)
    }

    fn is_at_end(&self) -> bool {
        self.peek() == SENTINEL
    }

    fn char_at(&self, index: usize) -> char {
        self.source.get(index).copied().unwrap_or(SENTINEL)
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        if c != SENTINEL {
            self.current += 1;
        }
        c
    }

    fn peek(&self) -> char {
        self.char_at(self.current)
    }

    fn peek_next(&self) -> char {
        if self.is_at_end() {
            SENTINEL
        } else {
            self.char_at(self.current + 1)
        }
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.current += 1;
        true
    }

    /// 双字符运算符：下一个字符是 `expected` 时取 `double`
    fn pick(&mut self, expected: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.matches(expected) {
            double
        } else {
            single
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                ' ' | '\r' | '\t' => {
                    self.advance();
                }
                '\n' => {
                    self.line += 1;
                    self.advance();
                }
                '/' if self.peek_next() == '/' => {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let token = Token::new(
            kind,
            self.start,
            self.current - self.start,
            self.line,
            self.lexeme(),
        );
        trace!(
            self.logger,
            "token {} '{}' at line {}",
            kind.name(),
            token.lexeme,
            token.line
        );
        token
    }

    fn error_token(&self, message: &str) -> Token {
        trace!(self.logger, "scan error at line {}: {}", self.line, message);
        Token::new(
            TokenKind::Error,
            self.start,
            self.current - self.start,
            self.line,
            message,
        )
    }

    fn string(&mut self) -> Token {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return self.error_token("Unterminated string.");
        }

        // 闭合引号
        self.advance();
        self.make_token(TokenKind::String)
    }

    fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // 小数点后至少要有一位数字，否则 `.` 单独成为 DOT
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        self.make_token(TokenKind::Number)
    }

    fn identifier(&mut self) -> Token {
        while is_alpha(self.peek()) || self.peek().is_ascii_digit() {
            self.advance();
        }
        let kind = self.identifier_kind();
        self.make_token(kind)
    }

    /// 按首字母（必要时次字母）分派到关键字候选
    fn identifier_kind(&self) -> TokenKind {
        let length = self.current - self.start;
        match self.char_at(self.start) {
            'a' => self.check_keyword(1, "nd", TokenKind::And),
            'c' => self.check_keyword(1, "lass", TokenKind::Class),
            'e' => self.check_keyword(1, "lse", TokenKind::Else),
            'f' if length > 1 => match self.char_at(self.start + 1) {
                'a' => self.check_keyword(2, "lse", TokenKind::False),
                'o' => self.check_keyword(2, "r", TokenKind::For),
                'u' => self.check_keyword(2, "n", TokenKind::Fun),
                _ => TokenKind::Identifier,
            },
            'i' => self.check_keyword(1, "f", TokenKind::If),
            'n' => self.check_keyword(1, "il", TokenKind::Nil),
            'o' => self.check_keyword(1, "r", TokenKind::Or),
            'p' => self.check_keyword(1, "rint", TokenKind::Print),
            'r' => self.check_keyword(1, "eturn", TokenKind::Return),
            's' => self.check_keyword(1, "uper", TokenKind::Super),
            't' if length > 1 => match self.char_at(self.start + 1) {
                'h' => self.check_keyword(2, "is", TokenKind::This),
                'r' => self.check_keyword(2, "ue", TokenKind::True),
                _ => TokenKind::Identifier,
            },
            'v' => self.check_keyword(1, "ar", TokenKind::Var),
            'w' => self.check_keyword(1, "hile", TokenKind::While),
            _ => TokenKind::Identifier,
        }
    }

    /// 长度和剩余拼写都一致才算关键字
    fn check_keyword(&self, offset: usize, rest: &str, kind: TokenKind) -> TokenKind {
        let length = self.current - self.start;
        let tail = &self.source[self.start + offset..self.current];
        if length == offset + rest.len() && tail.iter().copied().eq(rest.chars()) {
            kind
        } else {
            TokenKind::Identifier
        }
    }
}

/// 逐个产出 token，EOF 是最后一个
impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
