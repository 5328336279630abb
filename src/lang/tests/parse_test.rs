use super::*;
use crate::lang::{token::Buffer, ErrorCode, ErrorKind};

fn num(n: i64) -> Box<Expression> {
    Box::new(Expression::Number(n))
}

fn var(c: char) -> Box<Expression> {
    Box::new(Expression::Variable(c))
}

#[test]
fn test_store_into_variable() {
    let answer = Statement::Expression(
        span(1, 0..1),
        Expression::Assign(
            Box::new(Expression::Binary(BinaryOp::Add, num(5), num(3))),
            Target::Variable('A'),
        ),
    );
    assert_eq!(parse_one("5+3->A"), Some(answer));
}

#[test]
fn test_precedence() {
    let answer = Statement::Expression(
        span(1, 0..1),
        Expression::Assign(
            Box::new(Expression::Binary(
                BinaryOp::Add,
                num(2),
                Box::new(Expression::Binary(BinaryOp::Multiply, num(3), num(4))),
            )),
            Target::Variable('A'),
        ),
    );
    assert_eq!(parse_one("2+3*4->A"), Some(answer));
}

#[test]
fn test_left_associative() {
    let answer = Statement::Expression(
        span(1, 0..1),
        Expression::Assign(
            Box::new(Expression::Binary(
                BinaryOp::Subtract,
                Box::new(Expression::Binary(BinaryOp::Subtract, num(8), num(3))),
                num(2),
            )),
            Target::Variable('A'),
        ),
    );
    assert_eq!(parse_one("8-3-2->A"), Some(answer));
}

#[test]
fn test_comparison_below_arithmetic() {
    let answer = Statement::Expression(
        span(1, 0..1),
        Expression::Assign(
            Box::new(Expression::Binary(
                BinaryOp::Less,
                Box::new(Expression::Binary(BinaryOp::Add, var('A'), num(1))),
                num(5),
            )),
            Target::Variable('B'),
        ),
    );
    assert_eq!(parse_one("A+1<5->B"), Some(answer));
}

#[test]
fn test_negation_binds_tightest() {
    let answer = Statement::Expression(
        span(1, 0..1),
        Expression::Assign(
            Box::new(Expression::Binary(
                BinaryOp::Multiply,
                Box::new(Expression::Unary(UnaryOp::Negate, var('A'))),
                num(2),
            )),
            Target::Variable('B'),
        ),
    );
    assert_eq!(parse_one("-A*2->B"), Some(answer));
}

#[test]
fn test_chained_store() {
    let answer = Statement::Expression(
        span(1, 0..2),
        Expression::Assign(
            Box::new(Expression::Assign(num(20), Target::Variable('X'))),
            Target::Variable('Y'),
        ),
    );
    assert_eq!(parse_one("20->X->Y"), Some(answer));
}

#[test]
fn test_pointer_target() {
    let answer = Statement::Expression(
        span(1, 0..1),
        Expression::Assign(
            num(5),
            Target::Pointer(
                Box::new(Expression::Binary(
                    BinaryOp::Add,
                    Box::new(Expression::Buffer(Buffer::L1)),
                    num(2),
                )),
                Width::Word,
            ),
        ),
    );
    assert_eq!(parse_one("5->{L1+2}^^r"), Some(answer));
}

#[test]
fn test_increment_pointer() {
    let answer = Statement::Expression(
        span(1, 0..1),
        Expression::Increment(Target::Pointer(var('P'), Width::Byte)),
    );
    assert_eq!(parse_one("{P}++"), Some(answer));
}

#[test]
fn test_assignment_to_non_variable() {
    let e = parse_str("5->3").unwrap_err();
    assert!(e.is(ErrorCode::InvalidTarget));
    assert_eq!(e.column(), 3..4);
    assert!(parse_str("5->L1").is_err());
    assert!(parse_str("5++").is_err());
}

#[test]
fn test_if_without_end() {
    let e = parse_str("If A").unwrap_err();
    assert!(e.is(ErrorCode::MismatchedBlock));
    assert_eq!(e.kind(), ErrorKind::Parse);
    assert_eq!(e.line_number(), Some(1));
    assert_eq!(e.column(), 4..4);
}

#[test]
fn test_stray_terminators() {
    let e = parse_str("Disp 1\nEnd").unwrap_err();
    assert_eq!(e.to_string(), "MISMATCHED BLOCK IN 2 (0..3); END WITHOUT BLOCK");
    let e = parse_str("Else").unwrap_err();
    assert!(e.is(ErrorCode::MismatchedBlock));
}

#[test]
fn test_expression_is_not_a_statement() {
    let e = parse_str("A+1").unwrap_err();
    assert!(e.is(ErrorCode::SyntaxError));
    assert_eq!(e.to_string(), "SYNTAX ERROR IN 1 (0..1); EXPECTED STATEMENT, FOUND EXPRESSION");
}

#[test]
fn test_statements_need_separators() {
    let e = parse_str("Disp 1 Disp 2").unwrap_err();
    assert_eq!(
        e.to_string(),
        "SYNTAX ERROR IN 1 (7..11); EXPECTED END OF STATEMENT, FOUND 'Disp'"
    );
    assert_eq!(parse_str("Disp 1:Disp 2").map(|v| v.len()).ok(), Some(2));
}

#[test]
fn test_if_then_else() {
    let answer = Statement::If(
        span(1, 0..2),
        Expression::Variable('A'),
        vec![Statement::Disp(span(1, 10..14), vec![Expression::Number(1)])],
        vec![Statement::Disp(span(3, 0..4), vec![Expression::Number(2)])],
    );
    assert_eq!(parse_one("If A Then:Disp 1\nElse\nDisp 2\nEnd"), Some(answer));
}

#[test]
fn test_loops() {
    let answer = Statement::Loop(
        span(1, 0..3),
        Loop::For(Target::Variable('I'), Expression::Number(1), Expression::Number(3)),
        vec![Statement::Disp(span(1, 11..15), vec![Expression::Variable('I')])],
    );
    assert_eq!(parse_one("For(I,1,3):Disp I:End"), Some(answer));
    let answer = Statement::Loop(
        span(1, 0..3),
        Loop::Times(Expression::Number(4)),
        vec![],
    );
    assert_eq!(parse_one("For(4)\nEnd"), Some(answer));
    let answer = Statement::Loop(
        span(1, 0..6),
        Loop::Repeat(Expression::GetKey(num(15))),
        vec![],
    );
    assert_eq!(parse_one("Repeat getKey(15):End"), Some(answer));
    assert!(parse_str("For(3,1,2):End").is_err());
    assert!(parse_str("While 1").is_err());
}

#[test]
fn test_draw_commands() {
    let answer = Statement::Draw(
        span(1, 0..4),
        Graphic::Line,
        Surface::Back,
        vec![
            Expression::Number(0),
            Expression::Number(0),
            Expression::Number(95),
            Expression::Number(63),
        ],
    );
    assert_eq!(parse_one("Line(0,0,95,63)^^r"), Some(answer));
    let e = parse_str("Rect(1,2,3)").unwrap_err();
    assert_eq!(e.to_string(), "SYNTAX ERROR IN 1 (0..4); WRONG NUMBER OF ARGUMENTS");
    assert_eq!(
        parse_one("ClrDraw"),
        Some(Statement::Draw(span(1, 0..7), Graphic::ClrDraw, Surface::Main, vec![]))
    );
    assert_eq!(
        parse_one("Horizontal -^^r"),
        Some(Statement::Draw(span(1, 0..10), Graphic::ShiftLeft, Surface::Back, vec![]))
    );
    assert_eq!(
        parse_one("DispGraph^^r^^r"),
        Some(Statement::DispGraph(span(1, 0..9), Shade::Gray4))
    );
}

#[test]
fn test_queries() {
    let answer = Statement::Expression(
        span(1, 0..8),
        Expression::Assign(
            Box::new(Expression::PxlTest(Surface::Back, num(3), num(4))),
            Target::Variable('T'),
        ),
    );
    assert_eq!(parse_one("Pxl-Test(3,4)^^r->T"), Some(answer));
    let answer = Statement::Expression(
        span(1, 0..3),
        Expression::Assign(
            Box::new(Expression::AddressOf(Target::Variable('A'))),
            Target::Variable('P'),
        ),
    );
    assert_eq!(parse_one("o^^A->P"), Some(answer));
}

#[test]
fn test_labels_and_meta() {
    assert_eq!(
        parse_str("Lbl 0\nGoto LOOP").ok(),
        Some(vec![
            Statement::Label(span(1, 0..3), "0".to_string()),
            Statement::Goto(span(2, 0..4), "LOOP".to_string()),
        ])
    );
    assert_eq!(
        parse_one("@DEBUG 1"),
        Some(Statement::Meta(span(1, 0..6), Command::Debug(Expression::Number(1))))
    );
    assert_eq!(parse_one("@EXIT"), Some(Statement::Meta(span(1, 0..5), Command::Exit)));
    assert!(parse_str("Goto +").is_err());
}

#[test]
fn test_comments_and_blank_lines() {
    let v = parse_str(".PROGRAM\n\n  Disp 1 . one\n\n").unwrap();
    assert_eq!(v, vec![Statement::Disp(span(3, 2..6), vec![Expression::Number(1)])]);
}
