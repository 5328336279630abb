use super::{Column, LineNumber, Span};
use crate::mach::Address;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: u16,
    line_number: Option<LineNumber>,
    column: Column,
    address: Option<Address>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $span:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_span($span)
    };
    ($err:ident, $span:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_span($span)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            column: 0..0,
            address: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code as u16
    }

    pub fn kind(&self) -> ErrorKind {
        match self.code {
            1 | 6 => ErrorKind::Lex,
            2..=5 | 8 | 9 => ErrorKind::Parse,
            7 | 11 | 12 => ErrorKind::Runtime,
            53 => ErrorKind::Host,
            _ => ErrorKind::Internal,
        }
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn in_line_number(mut self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        self.line_number = Some(line);
        self
    }

    pub fn in_column(mut self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        self.column = column.clone();
        self
    }

    pub fn in_span(self, span: &Span) -> Error {
        self.in_line_number(span.line).in_column(&span.column)
    }

    pub fn at_address(mut self, address: Address) -> Error {
        self.address = Some(address);
        self
    }

    pub fn message(mut self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        self.message = message.to_string();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnrecognizedCharacter = 1,
    SyntaxError = 2,
    MismatchedBlock = 3,
    InvalidTarget = 4,
    Overflow = 6,
    OutOfMemory = 7,
    UndefinedLabel = 8,
    DuplicateLabel = 9,
    DivisionByZero = 11,
    MemoryFault = 12,
    InternalError = 51,
    FileNotFound = 53,
}

/// Which stage of the pipeline rejected the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Parse,
    Runtime,
    Internal,
    Host,
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            1 => "UNRECOGNIZED CHARACTER",
            2 => "SYNTAX ERROR",
            3 => "MISMATCHED BLOCK",
            4 => "INVALID TARGET",
            6 => "OVERFLOW",
            7 => "OUT OF MEMORY",
            8 => "UNDEFINED LABEL",
            9 => "DUPLICATE LABEL",
            11 => "DIVISION BY ZERO",
            12 => "MEMORY FAULT",
            51 => "INTERNAL ERROR",
            53 => "FILE NOT FOUND",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN {}", line_number));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if let Some(address) = self.address {
            suffix.push_str(&format!(" AT {}", address));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            write!(f, "PROGRAM ERROR {}{}", self.code, suffix)
        } else {
            write!(f, "{}{}", code_str, suffix)
        }
    }
}
