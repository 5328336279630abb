use super::*;
use crate::lang::ast::{Graphic, Surface, Width};
use crate::lang::ErrorCode;
use crate::mach::{Opcode, SCRATCH, VARIABLES};

#[test]
fn test_store_is_rpn() {
    let program = compile("5+3->A");
    assert_eq!(
        program.ops(),
        &[
            Opcode::Literal(5),
            Opcode::Literal(3),
            Opcode::Add,
            Opcode::Pop('A')
        ]
    );
}

#[test]
fn test_nested_store_keeps_value() {
    let program = compile("Disp 3->A");
    assert_eq!(
        program.ops(),
        &[
            Opcode::Literal(3),
            Opcode::Mask,
            Opcode::Dup,
            Opcode::Pop('A'),
            Opcode::Disp
        ]
    );
}

#[test]
fn test_byte_store_keeps_value_unmasked() {
    let program = compile("Disp 3->{L1}");
    assert_eq!(
        program.ops(),
        &[
            Opcode::Literal(3),
            Opcode::Dup,
            Opcode::Literal(34540),
            Opcode::Poke(Width::Byte),
            Opcode::Disp
        ]
    );
}

#[test]
fn test_pointer_store() {
    let program = compile("A->{L1+2}^^r");
    assert_eq!(
        program.ops(),
        &[
            Opcode::Push('A'),
            Opcode::Literal(34540),
            Opcode::Literal(2),
            Opcode::Add,
            Opcode::Poke(Width::Word)
        ]
    );
}

#[test]
fn test_address_of_variable() {
    let program = compile("o^^B->C");
    assert_eq!(
        program.ops(),
        &[Opcode::Literal(VARIABLES as i64 + 2), Opcode::Pop('C')]
    );
}

#[test]
fn test_if_else_layout() {
    let program = compile("If A\nDisp 1\nElse\nDisp 2\nEnd");
    assert_eq!(
        program.ops(),
        &[
            Opcode::Push('A'),
            Opcode::IfNot(5),
            Opcode::Literal(1),
            Opcode::Disp,
            Opcode::Jump(7),
            Opcode::Literal(2),
            Opcode::Disp
        ]
    );
}

#[test]
fn test_repeat_exits_when_true() {
    let program = compile("Repeat A:A++:End");
    assert_eq!(
        program.ops(),
        &[
            Opcode::Push('A'),
            Opcode::If(7),
            Opcode::Push('A'),
            Opcode::Literal(1),
            Opcode::Add,
            Opcode::Pop('A'),
            Opcode::Jump(0)
        ]
    );
}

#[test]
fn test_counted_loop_uses_scratch() {
    let program = compile("For(3)\nEnd");
    let counter = Opcode::Literal(SCRATCH as i64);
    assert_eq!(program.len(), 15);
    assert_eq!(program.op(0), Some(&Opcode::Literal(0)));
    assert_eq!(program.op(1), Some(&counter));
    assert_eq!(program.op(2), Some(&Opcode::Poke(Width::Word)));
    assert_eq!(program.op(6), Some(&Opcode::Lt));
    assert_eq!(program.op(7), Some(&Opcode::IfNot(15)));
    assert_eq!(program.op(14), Some(&Opcode::Jump(3)));
}

#[test]
fn test_nested_counted_loops_get_own_counters() {
    let program = compile("For(2)\nFor(2)\nEnd\nEnd");
    let inner = Opcode::Literal(SCRATCH as i64 + 2);
    assert!(program.ops().contains(&inner));
}

#[test]
fn test_draw_args_in_order() {
    let program = compile("Line(1,2,3,4)^^r");
    assert_eq!(
        program.ops(),
        &[
            Opcode::Literal(1),
            Opcode::Literal(2),
            Opcode::Literal(3),
            Opcode::Literal(4),
            Opcode::Draw(Graphic::Line, Surface::Back)
        ]
    );
}

#[test]
fn test_labels_resolve_forward_and_back() {
    let program = compile("Goto 2\nLbl 1\nDisp 1\nLbl 2\nGoto 1");
    assert_eq!(program.label("1"), Some(1));
    assert_eq!(program.label("2"), Some(3));
    assert_eq!(program.op(0), Some(&Opcode::Jump(3)));
    assert_eq!(program.op(3), Some(&Opcode::Jump(1)));
}

#[test]
fn test_label_at_end() {
    let program = compile("Goto E\nDisp 1\nLbl E");
    assert_eq!(program.label("E"), Some(3));
    assert_eq!(program.op(0), Some(&Opcode::Jump(3)));
}

#[test]
fn test_undefined_label() {
    let error = crate::compile("Disp 1\nGoto NOPE").unwrap_err();
    assert!(error.is(ErrorCode::UndefinedLabel));
    assert_eq!(error.to_string(), "UNDEFINED LABEL IN 2 (0..4); NOPE");
}

#[test]
fn test_first_undefined_label_is_reported() {
    let error = crate::compile("Goto B\nGoto A").unwrap_err();
    assert_eq!(error.line_number(), Some(1));
}

#[test]
fn test_duplicate_label() {
    let error = crate::compile("Lbl A\nDisp 1\nLbl A").unwrap_err();
    assert!(error.is(ErrorCode::DuplicateLabel));
    assert_eq!(error.line_number(), Some(3));
}

#[test]
fn test_spans_follow_statements() {
    let program = compile("1->A\n\nDisp A");
    assert_eq!(program.span_for(0).map(|s| s.line), Some(1));
    assert_eq!(program.span_for(2).map(|s| s.line), Some(3));
    assert_eq!(program.span_for(3).map(|s| s.line), Some(3));
}

#[test]
fn test_listing() {
    let program = compile("Lbl TOP\nGoto TOP");
    assert_eq!(program.to_string(), "TOP:\n    0  JUMP(0)\n");
}
