use super::{ast::*, lex, parse, Error, Span};

mod parse_test;

fn parse_str(s: &str) -> Result<Vec<Statement>, Error> {
    let tokens = lex(s)?;
    parse(&tokens)
}

fn parse_one(s: &str) -> Option<Statement> {
    match parse_str(s) {
        Ok(mut v) => v.pop(),
        Err(_) => None,
    }
}

fn span(line: usize, column: std::ops::Range<usize>) -> Span {
    Span::new(line, column)
}
