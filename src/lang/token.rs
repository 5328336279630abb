/// ## Lexical units
///
/// Every token displays as the source text it was lexed from, so a token
/// stream can be written back out and lexed again.

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Whitespace(usize),
    Comment(String),
    Newline,
    Colon,
    Number(u16),
    Var(char),
    Buffer(Buffer),
    Name(String),
    Word(Word),
    Operator(Operator),
    Modifier(Modifier),
    Meta(Meta),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Eof,
}

impl Token {
    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Whitespace(_) | Token::Comment(_))
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Newline | Token::Colon)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Comment(s) => write!(f, "{}", s),
            Newline => writeln!(f),
            Colon => write!(f, ":"),
            Number(n) => write!(f, "{}", n),
            Var(c) => write!(f, "{}", c),
            Buffer(b) => write!(f, "{}", b),
            Name(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Modifier(s) => write!(f, "{}", s),
            Meta(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            LBrace => write!(f, "{{"),
            RBrace => write!(f, "}}"),
            Comma => write!(f, ","),
            Eof => Ok(()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Buffer {
    L1,
    L2,
    L3,
    L4,
    L5,
    L6,
}

impl Buffer {
    pub fn from_string(s: &str) -> Option<Buffer> {
        use Buffer::*;
        Some(match s {
            "L1" => L1,
            "L2" => L2,
            "L3" => L3,
            "L4" => L4,
            "L5" => L5,
            "L6" => L6,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Word {
    If,
    Then,
    Else,
    End,
    Lbl,
    Goto,
    Disp,
    For,
    While,
    Repeat,
    Pause,
    Rect,
    RectI,
    Circle,
    Line,
    DispGraph,
    ClrDraw,
    Horizontal,
    Vertical,
    Rand,
    GetKey,
    PxlOn,
    PxlOff,
    PxlChange,
    PxlTest,
}

impl Word {
    pub fn from_string(s: &str) -> Option<Word> {
        use Word::*;
        Some(match s {
            "If" => If,
            "Then" => Then,
            "Else" => Else,
            "End" => End,
            "Lbl" => Lbl,
            "Goto" => Goto,
            "Disp" => Disp,
            "For" => For,
            "While" => While,
            "Repeat" => Repeat,
            "Pause" => Pause,
            "Rect" => Rect,
            "RectI" => RectI,
            "Circle" => Circle,
            "Line" => Line,
            "DispGraph" => DispGraph,
            "ClrDraw" => ClrDraw,
            "Horizontal" => Horizontal,
            "Vertical" => Vertical,
            "rand" => Rand,
            "getKey" | "GetKey" => GetKey,
            "Pxl-On" => PxlOn,
            "Pxl-Off" => PxlOff,
            "Pxl-Change" => PxlChange,
            "Pxl-Test" | "pxl-Test" => PxlTest,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Rand => write!(f, "rand"),
            GetKey => write!(f, "getKey"),
            PxlOn => write!(f, "Pxl-On"),
            PxlOff => write!(f, "Pxl-Off"),
            PxlChange => write!(f, "Pxl-Change"),
            PxlTest => write!(f, "Pxl-Test"),
            _ => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Store,
    Increment,
    Decrement,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Modulo => write!(f, "^"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "!="),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Store => write!(f, "->"),
            Increment => write!(f, "++"),
            Decrement => write!(f, "--"),
        }
    }
}

/// Calculator token modifiers, spelled the way they are typed on a PC.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Modifier {
    /// `^^r` selects the back buffer or a two byte pointer.
    R,
    /// `^^2` squares the value before it.
    Square,
    /// `o^^` takes the address of a variable or pointer.
    AddressOf,
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Modifier::R => write!(f, "^^r"),
            Modifier::Square => write!(f, "^^2"),
            Modifier::AddressOf => write!(f, "o^^"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Meta {
    Exit,
    Help,
    About,
    Debug,
}

impl Meta {
    pub fn from_string(s: &str) -> Option<Meta> {
        Some(match s {
            "@EXIT" => Meta::Exit,
            "@HELP" => Meta::Help,
            "@ABOUT" => Meta::About,
            "@DEBUG" => Meta::Debug,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Meta {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Meta::Exit => write!(f, "@EXIT"),
            Meta::Help => write!(f, "@HELP"),
            Meta::About => write!(f, "@ABOUT"),
            Meta::Debug => write!(f, "@DEBUG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_display_as_typed() {
        for s in &["If", "RectI", "DispGraph", "rand", "getKey", "Pxl-Change"] {
            assert_eq!(Word::from_string(s).map(|w| w.to_string()), Some(s.to_string()));
        }
        assert_eq!(Word::from_string("GetKey"), Some(Word::GetKey));
        assert_eq!(Word::from_string("if"), None);
    }

    #[test]
    fn test_whitespace_width() {
        assert_eq!(Token::Whitespace(3).to_string(), "   ");
        assert_eq!(Token::Eof.to_string(), "");
    }
}
