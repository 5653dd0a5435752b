//! 集成测试 - 端到端流程（扫描 → 编译 → 反汇编 → 执行）

mod common;

use alphae_workspace::core::{Scanner, TokenKind};
use alphae_workspace::{
    disassemble_chunk, AlphaeError, BufferText, Chunk, InterpretResult, OpCode, VM,
};
use common::{eval, run_captured};

fn kinds(source: &str) -> Vec<(TokenKind, String)> {
    Scanner::new(source)
        .map(|t| (t.kind, t.lexeme))
        .collect()
}

// ===== 扫描 =====

#[test]
fn test_number_lexemes() {
    for source in ["123", "12.5"] {
        assert_eq!(
            kinds(source),
            vec![
                (TokenKind::Number, source.to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }
    assert_eq!(
        kinds("12."),
        vec![
            (TokenKind::Number, "12".to_string()),
            (TokenKind::Dot, ".".to_string()),
            (TokenKind::Eof, String::new()),
        ]
    );
}

#[test]
fn test_maximal_munch() {
    assert_eq!(kinds("forest")[0].0, TokenKind::Identifier);
    assert_eq!(kinds("for")[0].0, TokenKind::For);
}

// ===== 编译与执行 =====

#[test]
fn test_add_pipeline() {
    let run = run_captured("1 + 2", |_| {});
    assert_eq!(*run.result.as_ref().unwrap(), 3.0);
    assert_eq!(
        run.lines(),
        vec![
            "== code ==",
            "0000    1 OP_CONSTANT         0 '1'",
            "0002    | OP_CONSTANT         1 '2'",
            "0004    | OP_ADD",
            "0005    | OP_RETURN",
            "Final stack value: 3",
        ]
    );
}

#[test]
fn test_evaluation_order() {
    assert_eq!(eval("5 - 3"), 2.0);
    assert_eq!(eval("8 / 4 / 2"), 1.0);
    assert_eq!(eval("-2 * 3"), -6.0);
    assert_eq!(eval("-(2 + 3)"), -5.0);
}

#[test]
fn test_division_by_zero_is_ieee() {
    assert_eq!(eval("1 / 0"), f64::INFINITY);
    assert!(eval("0 / 0").is_nan());
}

#[test]
fn test_trace_execution() {
    let run = run_captured("1 + 2", |c| {
        c.compiler.dump_chunk = false;
        c.vm.trace_execution = true;
    });
    assert_eq!(*run.result.as_ref().unwrap(), 3.0);
    assert_eq!(
        run.lines(),
        vec![
            "          []",
            "0000    1 OP_CONSTANT         0 '1'",
            "          [1]",
            "0002    | OP_CONSTANT         1 '2'",
            "          [1, 2]",
            "0004    | OP_ADD",
            "          [3]",
            "0005    | OP_RETURN",
            "Final stack value: 3",
        ]
    );
}

#[test]
fn test_multiline_source_lines() {
    let run = run_captured("1 +\n2", |_| {});
    let lines = run.lines();
    assert_eq!(lines[1], "0000    1 OP_CONSTANT         0 '1'");
    assert_eq!(lines[2], "0002    2 OP_CONSTANT         1 '2'");
    assert_eq!(lines[3], "0004    1 OP_ADD");
}

// ===== Chunk =====

#[test]
fn test_chunk_grows_once() {
    let mut chunk = Chunk::new();
    assert_eq!(chunk.capacity(), 8);
    for i in 0..9u8 {
        chunk.write(i, i as usize + 1);
    }
    assert_eq!(chunk.capacity(), 16);
    assert_eq!(chunk.code(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(chunk.lines(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_hand_built_chunk() {
    let mut chunk = Chunk::new();
    let index = chunk.add_constant(1.5) as u8;
    chunk.write_op_u8(OpCode::Constant, index, 1);
    chunk.write_op(OpCode::Negate, 1);
    chunk.write_op(OpCode::Return, 1);

    let text = BufferText::new();
    disassemble_chunk(&chunk, "test", &text);
    assert_eq!(
        text.lines(),
        vec![
            "== test ==",
            "0000    1 OP_CONSTANT         0 '1.5'",
            "0002    | OP_NEGATE",
            "0003    | OP_RETURN",
        ]
    );

    let mut vm = VM::new();
    assert_eq!(vm.run_chunk(&chunk), InterpretResult::Ok(-1.5));
    assert_eq!(vm.run_chunk(&chunk), InterpretResult::Ok(-1.5));
}

// ===== 错误 =====

#[test]
fn test_only_first_error_reported() {
    let run = run_captured("1 + * ) (", |_| {});
    match &run.result {
        Err(AlphaeError::Compile(e)) => assert_eq!(e.diagnostics.len(), 1),
        other => panic!("expected compile error, got {other:?}"),
    }
    assert_eq!(run.lines(), vec!["[line 1] Error at '*': Expect expression."]);
}

#[test]
fn test_unexpected_character() {
    let run = run_captured("1 # 2", |_| {});
    let err = run.result.as_ref().unwrap_err();
    assert_eq!(err.exit_code(), 65);
    assert_eq!(err.to_report().error_kind, "ScanError");
    assert_eq!(run.lines(), vec!["[line 1] Error: Unexpected character."]);
}

#[test]
fn test_stack_overflow_report() {
    let run = run_captured("1 + (2 + 3)", |c| {
        c.compiler.dump_chunk = false;
        c.vm.stack_max = 2;
    });
    let err = run.result.as_ref().unwrap_err();
    assert_eq!(err.exit_code(), 70);

    let report = err.to_report();
    assert_eq!(report.phase, "vm");
    assert_eq!(report.error_kind, "StackOverflow");
    assert_eq!(report.line, Some(1));
    assert!(report.to_json().contains("\"error_kind\":\"StackOverflow\""));
    assert_eq!(
        run.lines(),
        vec!["[line 1] Runtime error: Stack overflow (capacity 2)."]
    );
}

// ===== 日志 =====

#[test]
fn test_logs_captured() {
    let run = run_captured("1", |_| {});
    assert!(run.result.is_ok());
    assert!(run.logs.contains("Starting execution"));
    assert!(run.logs.contains("token NUMBER '1' at line 1"));
    assert!(run.logs.contains("Execution completed"));
}
