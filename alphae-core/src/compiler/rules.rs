//! Pratt 解析表：token 类型 → {前缀处理, 中缀处理, 绑定力}
//!
//! 首次使用时构建，之后只读。

use super::precedence::Precedence;
use super::Session;
use crate::scanner::TokenKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub(crate) type ParseFn = fn(&mut Session);

#[derive(Clone, Copy)]
pub(crate) struct ParseRule {
    pub prefix: Option<ParseFn>,
    pub infix: Option<ParseFn>,
    pub precedence: Precedence,
}

impl ParseRule {
    const EMPTY: ParseRule = ParseRule {
        prefix: None,
        infix: None,
        precedence: Precedence::None,
    };
}

fn rule_for(kind: TokenKind) -> ParseRule {
    match kind {
        TokenKind::LeftParen => ParseRule {
            prefix: Some(Session::grouping as ParseFn),
            infix: None,
            precedence: Precedence::None,
        },
        TokenKind::Minus => ParseRule {
            prefix: Some(Session::unary as ParseFn),
            infix: Some(Session::binary as ParseFn),
            precedence: Precedence::Term,
        },
        TokenKind::Plus => ParseRule {
            prefix: None,
            infix: Some(Session::binary as ParseFn),
            precedence: Precedence::Term,
        },
        TokenKind::Slash | TokenKind::Star => ParseRule {
            prefix: None,
            infix: Some(Session::binary as ParseFn),
            precedence: Precedence::Factor,
        },
        TokenKind::Number => ParseRule {
            prefix: Some(Session::number as ParseFn),
            infix: None,
            precedence: Precedence::None,
        },
        _ => ParseRule::EMPTY,
    }
}

static RULES: Lazy<HashMap<TokenKind, ParseRule>> = Lazy::new(|| {
    TokenKind::ALL
        .iter()
        .map(|&kind| (kind, rule_for(kind)))
        .collect()
});

pub(crate) fn get_rule(kind: TokenKind) -> ParseRule {
    RULES.get(&kind).copied().unwrap_or(ParseRule::EMPTY)
}
