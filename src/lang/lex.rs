use super::{token::*, Error, LineNumber, Span};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Splits source text into tokens paired with their positions.
/// The last token is always `Token::Eof`.
pub fn lex(s: &str) -> Result<Vec<(Span, Token)>> {
    AxeLexer::new(s).lex()
}

fn is_axe_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_axe_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct AxeLexer {
    chars: Vec<char>,
    pos: usize,
    line: LineNumber,
    col: usize,
}

impl AxeLexer {
    fn new(s: &str) -> AxeLexer {
        AxeLexer {
            chars: s.chars().collect(),
            pos: 0,
            line: 1,
            col: 0,
        }
    }

    fn lex(mut self) -> Result<Vec<(Span, Token)>> {
        let mut tokens = vec![];
        while let Some(ch) = self.peek() {
            let (line, col, begin) = (self.line, self.col, self.pos);
            let token = if is_axe_whitespace(ch) {
                self.whitespace()
            } else if ch == '\n' {
                self.bump();
                Token::Newline
            } else if ch == '.' {
                self.comment()
            } else if ch.is_ascii_digit() {
                self.number()?
            } else if ch == '@' {
                self.meta()?
            } else if ch.is_ascii_alphabetic() {
                self.alphabetic()
            } else {
                self.minutia()?
            };
            let span = Span::new(line, col..col + (self.pos - begin));
            tokens.push((span, token));
        }
        tokens.push((Span::new(self.line, self.col..self.col), Token::Eof));
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        let mut pos = self.pos;
        for ch in s.chars() {
            if self.chars.get(pos) != Some(&ch) {
                return false;
            }
            pos += 1;
        }
        true
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn here(&self, len: usize) -> Span {
        Span::new(self.line, self.col..self.col + len)
    }

    fn whitespace(&mut self) -> Token {
        let mut len = 0;
        while let Some(ch) = self.peek() {
            if !is_axe_whitespace(ch) {
                break;
            }
            self.bump();
            len += 1;
        }
        Token::Whitespace(len)
    }

    fn comment(&mut self) -> Token {
        let mut s = String::new();
        if self.starts_with("...") {
            self.bump_n(3);
            s.push_str("...");
            while self.peek().is_some() {
                if self.starts_with("...") {
                    self.bump_n(3);
                    s.push_str("...");
                    break;
                }
                if let Some(ch) = self.bump() {
                    s.push(ch);
                }
            }
            return Token::Comment(s);
        }
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.bump();
            s.push(ch);
        }
        Token::Comment(s)
    }

    fn number(&mut self) -> Result<Token> {
        let start = self.here(0);
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.bump();
            s.push(ch);
        }
        match s.parse::<u16>() {
            Ok(n) => Ok(Token::Number(n)),
            Err(_) => {
                let span = Span::new(start.line, start.column.start..self.col);
                Err(error!(Overflow, &span; &format!("NUMBER {} TOO LARGE", s)))
            }
        }
    }

    fn meta(&mut self) -> Result<Token> {
        let start = self.here(1);
        let mut len = 1;
        while let Some(ch) = self.chars.get(self.pos + len) {
            if !ch.is_ascii_alphabetic() {
                break;
            }
            len += 1;
        }
        let s: String = self.chars[self.pos..self.pos + len].iter().collect();
        match Meta::from_string(&s) {
            Some(meta) => {
                self.bump_n(len);
                Ok(Token::Meta(meta))
            }
            None => Err(error!(UnrecognizedCharacter, &start; &format!("UNEXPECTED '@' IN {}", s))),
        }
    }

    fn alphabetic(&mut self) -> Token {
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            if !is_axe_word(ch) {
                break;
            }
            self.bump();
            s.push(ch);
        }
        if s == "o" && self.starts_with("^^") {
            self.bump_n(2);
            return Token::Modifier(Modifier::AddressOf);
        }
        if s == "Pxl" || s == "pxl" {
            for suffix in &["-Change", "-Test", "-Off", "-On"] {
                if self.starts_with(suffix) {
                    let word = format!("{}{}", s, suffix);
                    if let Some(word) = Word::from_string(&word) {
                        self.bump_n(suffix.len());
                        return Token::Word(word);
                    }
                }
            }
        }
        if let Some(word) = Word::from_string(&s) {
            return Token::Word(word);
        }
        if let Some(buffer) = Buffer::from_string(&s) {
            return Token::Buffer(buffer);
        }
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if ch.is_ascii_uppercase() {
                return Token::Var(ch);
            }
        }
        Token::Name(s)
    }

    fn minutia(&mut self) -> Result<Token> {
        use Operator::*;
        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Err(error!(InternalError; "LEXER PAST END")),
        };
        let (len, token) = match ch {
            '^' if self.starts_with("^^r") => (3, Token::Modifier(Modifier::R)),
            '^' if self.starts_with("^^2") => (3, Token::Modifier(Modifier::Square)),
            '^' if self.starts_with("^^") => (0, Token::Eof),
            '^' => (1, Token::Operator(Modulo)),
            '-' if self.starts_with("->") => (2, Token::Operator(Store)),
            '-' if self.starts_with("--") => (2, Token::Operator(Decrement)),
            '-' => (1, Token::Operator(Minus)),
            '+' if self.starts_with("++") => (2, Token::Operator(Increment)),
            '+' => (1, Token::Operator(Plus)),
            '*' => (1, Token::Operator(Multiply)),
            '/' => (1, Token::Operator(Divide)),
            '=' => (1, Token::Operator(Equal)),
            '!' if self.starts_with("!=") => (2, Token::Operator(NotEqual)),
            '<' if self.starts_with("<=") => (2, Token::Operator(LessEqual)),
            '<' => (1, Token::Operator(Less)),
            '>' if self.starts_with(">=") => (2, Token::Operator(GreaterEqual)),
            '>' => (1, Token::Operator(Greater)),
            '(' => (1, Token::LParen),
            ')' => (1, Token::RParen),
            '{' => (1, Token::LBrace),
            '}' => (1, Token::RBrace),
            ',' => (1, Token::Comma),
            ':' => (1, Token::Colon),
            _ => (0, Token::Eof),
        };
        if len == 0 {
            let span = self.here(1);
            return Err(error!(UnrecognizedCharacter, &span; &format!("UNEXPECTED '{}'", ch)));
        }
        self.bump_n(len);
        Ok(token)
    }
}
