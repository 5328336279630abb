use super::Address;
use crate::lang::ast::{Graphic, Shade, Surface, Width};

/// ## Virtual machine instruction set
///
/// The Axe virtual machine has no registers.
/// Every operation is performed on the stack.
///
/// For example: `A+1->A` compiles to `[Push(A), Literal(1), Add, Pop(A)]`
///
/// Control flow only ever sets the program counter, so structured blocks
/// and `Goto` share the same three branch instructions.
///
/// See <https://en.wikipedia.org/wiki/Reverse_Polish_notation>

#[derive(Clone, Copy, PartialEq)]
pub enum Opcode {
    // *** Stack manipulation
    /// Push literal value on to the stack.
    Literal(i64),
    /// Push the value of a variable.
    Push(char),
    /// Pop stack value into a variable, wrapped to 16 bits.
    Pop(char),
    /// Pop an address and push the byte or word found there.
    Peek(Width),
    /// Pop an address, then a value, and store the value at the address.
    Poke(Width),
    /// Duplicate the top of the stack.
    Dup,
    /// Wrap the top of the stack to an unsigned 16 bit value.
    Mask,

    // *** Branch control
    /// Pop stack and branch to Address if not zero.
    If(Address),
    /// Pop stack and branch to Address if zero.
    IfNot(Address),
    /// Unconditional branch to Address.
    Jump(Address),

    // *** Statements
    Disp,
    Pause,
    Draw(Graphic, Surface),
    DispGraph(Shade),
    Debug,
    Exit,
    Help,
    About,

    // *** Expression operations
    Neg,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // *** Device queries
    GetKey,
    Rand,
    PxlTest(Surface),
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

fn r(surface: &Surface) -> &'static str {
    match surface {
        Surface::Main => "",
        Surface::Back => "^^R",
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Literal(v) => write!(f, "LITERAL({})", v),
            Push(c) => write!(f, "PUSH({})", c),
            Pop(c) => write!(f, "POP({})", c),
            Peek(w) => write!(f, "PEEK{}", if *w == Width::Word { "^^R" } else { "" }),
            Poke(w) => write!(f, "POKE{}", if *w == Width::Word { "^^R" } else { "" }),
            Dup => write!(f, "DUP"),
            Mask => write!(f, "MASK"),

            If(a) => write!(f, "IF({})", a),
            IfNot(a) => write!(f, "IFNOT({})", a),
            Jump(a) => write!(f, "JUMP({})", a),

            Disp => write!(f, "DISP"),
            Pause => write!(f, "PAUSE"),
            Draw(g, s) => write!(f, "{}{}", format!("{:?}", g).to_ascii_uppercase(), r(s)),
            DispGraph(shade) => match shade {
                Shade::Mono => write!(f, "DISPGRAPH"),
                Shade::Gray3 => write!(f, "DISPGRAPH^^R"),
                Shade::Gray4 => write!(f, "DISPGRAPH^^R^^R"),
            },
            Debug => write!(f, "DEBUG"),
            Exit => write!(f, "EXIT"),
            Help => write!(f, "HELP"),
            About => write!(f, "ABOUT"),

            Neg => write!(f, "NEG"),
            Mul => write!(f, "MUL"),
            Div => write!(f, "DIV"),
            Mod => write!(f, "MOD"),
            Add => write!(f, "ADD"),
            Sub => write!(f, "SUB"),
            Eq => write!(f, "EQ"),
            NotEq => write!(f, "NOTEQ"),
            Lt => write!(f, "LT"),
            LtEq => write!(f, "LTEQ"),
            Gt => write!(f, "GT"),
            GtEq => write!(f, "GTEQ"),

            GetKey => write!(f, "GETKEY"),
            Rand => write!(f, "RAND"),
            PxlTest(s) => write!(f, "PXLTEST{}", r(s)),
        }
    }
}
