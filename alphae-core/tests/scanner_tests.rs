//! 扫描器与 chunk 的端到端测试

use alphae_core::{Chunk, Scanner, TokenKind};
use alphae_log::BufferText;

fn kinds(source: &str) -> Vec<TokenKind> {
    Scanner::new(source).map(|t| t.kind).collect()
}

#[test]
fn test_number_lexemes() {
    for source in ["123", "12.5"] {
        let tokens: Vec<_> = Scanner::new(source).collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, source);
        assert_eq!(tokens[0].length, source.len());
    }
    assert_eq!(
        kinds("12."),
        vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]
    );
}

#[test]
fn test_maximal_munch() {
    assert_eq!(kinds("forest"), vec![TokenKind::Identifier, TokenKind::Eof]);
    assert_eq!(kinds("for"), vec![TokenKind::For, TokenKind::Eof]);
    assert_eq!(kinds("classy _var"), vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn test_malformed_input_terminates() {
    // 每个非法字符各产生一个错误 token，最后是 EOF
    let tokens: Vec<_> = Scanner::new("#$%").collect();
    assert_eq!(tokens.len(), 4);
    assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Error));
}

#[test]
fn test_token_listing() {
    let text = BufferText::new();
    alphae_core::dump_tokens("-(1)", &text);
    let lines = text.lines();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1], "   1 MINUS          '-'");
    assert_eq!(lines[5], "   | EOF            ''");
}

#[test]
fn test_chunk_growth() {
    let mut chunk = Chunk::new();
    for i in 0..9u8 {
        chunk.write(i, 100 + i as usize);
        if i < 8 {
            assert_eq!(chunk.capacity(), 8);
        }
    }
    assert_eq!(chunk.capacity(), 16);
    assert_eq!(chunk.code(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(
        chunk.lines(),
        &[100, 101, 102, 103, 104, 105, 106, 107, 108]
    );
}
