//! 反汇编器
//!
//! 只读地把 chunk 渲染成文本，写入注入的 [`TextSink`]。

use crate::chunk::{Chunk, OpCode};
use crate::value::format_value;
use alphae_log::TextSink;

/// 反汇编整个 chunk，先输出 `== name ==` 标题
pub fn disassemble_chunk(chunk: &Chunk, name: &str, sink: &dyn TextSink) {
    sink.append_line(&format!("== {name} =="));

    let mut offset = 0;
    while offset < chunk.len() {
        offset = disassemble_instruction(chunk, offset, sink);
    }
}

/// 反汇编单条指令，返回下一条指令的偏移
pub fn disassemble_instruction(chunk: &Chunk, offset: usize, sink: &dyn TextSink) -> usize {
    let line = chunk.line(offset).unwrap_or_default();
    if offset > 0 && chunk.line(offset - 1) == Some(line) {
        sink.append(&format!("{offset:04}    | "));
    } else {
        sink.append(&format!("{offset:04} {line:4} "));
    }

    let Some(&byte) = chunk.code().get(offset) else {
        sink.append_line("<end of code>");
        return offset + 1;
    };

    match OpCode::try_from(byte) {
        Ok(OpCode::Constant) => constant_instruction(chunk, offset, sink),
        Ok(op) => simple_instruction(op, offset, sink),
        Err(unknown) => {
            sink.append_line(&format!("Unknown opcode {unknown}"));
            offset + 1
        }
    }
}

fn simple_instruction(op: OpCode, offset: usize, sink: &dyn TextSink) -> usize {
    sink.append_line(op.name());
    offset + 1 + op.operand_size()
}

fn constant_instruction(chunk: &Chunk, offset: usize, sink: &dyn TextSink) -> usize {
    let name = OpCode::Constant.name();
    match chunk.code().get(offset + 1) {
        Some(&index) => {
            let value = chunk
                .constant(index as usize)
                .map(format_value)
                .unwrap_or_else(|| "<invalid>".to_string());
            sink.append_line(&format!("{name:<16} {index:4} '{value}'"));
        }
        None => sink.append_line(&format!("{name:<16} <missing operand>")),
    }
    offset + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphae_log::BufferText;

    #[test]
    fn test_disassemble_chunk() {
        let mut chunk = Chunk::new();
        let idx = chunk.add_constant(1.2);
        chunk.write_op_u8(OpCode::Constant, idx as u8, 123);
        chunk.write_op(OpCode::Negate, 123);
        chunk.write_op(OpCode::Return, 124);

        let text = BufferText::new();
        disassemble_chunk(&chunk, "test chunk", &text);

        assert_eq!(
            text.lines(),
            vec![
                "== test chunk ==",
                "0000  123 OP_CONSTANT         0 '1.2'",
                "0002    | OP_NEGATE",
                "0003  124 OP_RETURN",
            ]
        );
    }

    #[test]
    fn test_unknown_opcode_skips_one_byte() {
        let mut chunk = Chunk::new();
        chunk.write(42, 1);
        chunk.write_op(OpCode::Return, 1);

        let text = BufferText::new();
        assert_eq!(disassemble_instruction(&chunk, 0, &text), 1);
        assert_eq!(text.contents(), "0000    1 Unknown opcode 42\n");
    }

    #[test]
    fn test_truncated_and_invalid_constant() {
        let mut chunk = Chunk::new();
        chunk.write_op_u8(OpCode::Constant, 9, 1);
        chunk.write_op(OpCode::Constant, 1);

        let text = BufferText::new();
        disassemble_chunk(&chunk, "bad", &text);
        let lines = text.lines();
        assert_eq!(lines[1], "0000    1 OP_CONSTANT         9 '<invalid>'");
        assert_eq!(lines[2], "0002    | OP_CONSTANT      <missing operand>");
    }
}
