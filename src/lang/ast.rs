use super::token::Buffer;
use super::Span;

/// ## Abstract syntax tree
///
/// Statements keep the span where they begin so runtime errors can point
/// back at the source. Blocks are nested here and flattened by the
/// code generator.

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    /// An assignment, increment or decrement evaluated for its effect.
    Expression(Span, Expression),
    Disp(Span, Vec<Expression>),
    Pause(Span, Expression),
    Draw(Span, Graphic, Surface, Vec<Expression>),
    DispGraph(Span, Shade),
    If(Span, Expression, Vec<Statement>, Vec<Statement>),
    Loop(Span, Loop, Vec<Statement>),
    Label(Span, String),
    Goto(Span, String),
    Meta(Span, Command),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Loop {
    While(Expression),
    /// Runs until the condition becomes true.
    Repeat(Expression),
    /// `For(V,start,end)` with an inclusive end.
    For(Target, Expression, Expression),
    /// `For(n)` runs the body n times.
    Times(Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    Exit,
    Help,
    About,
    Debug(Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(i64),
    Variable(char),
    Buffer(Buffer),
    Deref(Box<Expression>, Width),
    AddressOf(Target),
    Unary(UnaryOp, Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
    Assign(Box<Expression>, Target),
    Increment(Target),
    Decrement(Target),
    GetKey(Box<Expression>),
    Rand,
    PxlTest(Surface, Box<Expression>, Box<Expression>),
}

impl Expression {
    /// True when the expression changes machine state at its outermost level.
    pub fn is_effect(&self) -> bool {
        matches!(
            self,
            Expression::Assign(..) | Expression::Increment(_) | Expression::Decrement(_)
        )
    }
}

/// Something a value can be stored into.
#[derive(Debug, PartialEq, Clone)]
pub enum Target {
    Variable(char),
    Pointer(Box<Expression>, Width),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    pub fn bytes(self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Word => 2,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOp {
    Negate,
    Square,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOp {
    pub fn precedence(self) -> usize {
        use BinaryOp::*;
        match self {
            Multiply | Divide | Modulo => 3,
            Add | Subtract => 2,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 1,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Graphic {
    PxlOn,
    PxlOff,
    PxlChange,
    Line,
    Rect,
    RectI,
    Circle,
    ClrDraw,
    ShiftLeft,
    ShiftRight,
    ShiftUp,
    ShiftDown,
}

impl Graphic {
    pub fn arity(self) -> usize {
        use Graphic::*;
        match self {
            PxlOn | PxlOff | PxlChange => 2,
            Circle => 3,
            Line | Rect | RectI => 4,
            ClrDraw | ShiftLeft | ShiftRight | ShiftUp | ShiftDown => 0,
        }
    }
}

/// Drawing targets the main buffer unless `^^r` picks the back buffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Surface {
    Main,
    Back,
}

/// `DispGraph`, `DispGraph^^r` and `DispGraph^^r^^r`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Shade {
    Mono,
    Gray3,
    Gray4,
}
