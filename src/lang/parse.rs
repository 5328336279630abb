use super::{ast::*, token::*, Error, ErrorCode, Span};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

static EOF: Token = Token::Eof;

/// Builds the nested statement tree for a whole compilation unit.
pub fn parse(tokens: &[(Span, Token)]) -> Result<Vec<Statement>> {
    Parser::new(tokens).program()
}

struct Parser<'a> {
    tokens: &'a [(Span, Token)],
    pos: usize,
}

enum Terminator {
    Eof(Span),
    End(Span),
    Else(Span),
}

fn describe(token: &Token) -> String {
    match token {
        Token::Eof => "END OF INPUT".to_string(),
        Token::Newline => "END OF LINE".to_string(),
        _ => format!("'{}'", token),
    }
}

fn expected(span: &Span, token: &Token, what: &str) -> Error {
    error!(SyntaxError, span; &format!("EXPECTED {}, FOUND {}", what, describe(token)))
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [(Span, Token)]) -> Parser<'a> {
        Parser { tokens, pos: 0 }
    }

    fn program(&mut self) -> Result<Vec<Statement>> {
        let (statements, terminator) = self.block()?;
        match terminator {
            Terminator::Eof(_) => Ok(statements),
            Terminator::End(span) => Err(error!(MismatchedBlock, &span; "END WITHOUT BLOCK")),
            Terminator::Else(span) => Err(error!(MismatchedBlock, &span; "ELSE WITHOUT IF")),
        }
    }

    fn skip_trivia(&mut self) {
        while let Some((_, token)) = self.tokens.get(self.pos) {
            if !token.is_trivia() {
                break;
            }
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> &'a Token {
        self.skip_trivia();
        match self.tokens.get(self.pos) {
            Some((_, token)) => token,
            None => &EOF,
        }
    }

    fn span(&mut self) -> Span {
        self.skip_trivia();
        match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some((span, _)) => span.clone(),
            None => Span::default(),
        }
    }

    fn next(&mut self) -> &'a Token {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.next();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<()> {
        let span = self.span();
        let found = self.next();
        if found == token {
            Ok(())
        } else {
            Err(expected(&span, found, &format!("'{}'", token)))
        }
    }

    fn block(&mut self) -> Result<(Vec<Statement>, Terminator)> {
        let mut statements: Vec<Statement> = vec![];
        loop {
            let span = self.span();
            match self.peek() {
                Token::Newline | Token::Colon => {
                    self.next();
                }
                Token::Eof => return Ok((statements, Terminator::Eof(span))),
                Token::Word(Word::End) => {
                    self.next();
                    return Ok((statements, Terminator::End(span)));
                }
                Token::Word(Word::Else) => {
                    self.next();
                    return Ok((statements, Terminator::Else(span)));
                }
                _ => {
                    statements.push(self.statement()?);
                    self.end_of_statement()?;
                }
            }
        }
    }

    /// Parses a block body that must be closed by `End`.
    fn body(&mut self) -> Result<Vec<Statement>> {
        let (statements, terminator) = self.block()?;
        match terminator {
            Terminator::End(_) => Ok(statements),
            Terminator::Eof(span) => Err(error!(MismatchedBlock, &span; "MISSING END")),
            Terminator::Else(span) => Err(error!(MismatchedBlock, &span; "ELSE WITHOUT IF")),
        }
    }

    fn end_of_statement(&mut self) -> Result<()> {
        let span = self.span();
        let token = self.peek();
        if token.is_separator() || *token == Token::Eof {
            Ok(())
        } else {
            Err(expected(&span, token, "END OF STATEMENT"))
        }
    }

    fn statement(&mut self) -> Result<Statement> {
        let span = self.span();
        match self.peek() {
            Token::Word(word) => match word {
                Word::If => self.r#if(span),
                Word::While => {
                    self.next();
                    let condition = self.expression()?;
                    Ok(Statement::Loop(span, Loop::While(condition), self.body()?))
                }
                Word::Repeat => {
                    self.next();
                    let condition = self.expression()?;
                    Ok(Statement::Loop(span, Loop::Repeat(condition), self.body()?))
                }
                Word::For => self.r#for(span),
                Word::Lbl => {
                    self.next();
                    Ok(Statement::Label(span, self.label_name()?))
                }
                Word::Goto => {
                    self.next();
                    Ok(Statement::Goto(span, self.label_name()?))
                }
                Word::Disp => {
                    self.next();
                    let mut list = vec![self.expression()?];
                    while self.eat(&Token::Comma) {
                        list.push(self.expression()?);
                    }
                    Ok(Statement::Disp(span, list))
                }
                Word::Pause => {
                    self.next();
                    Ok(Statement::Pause(span, self.expression()?))
                }
                Word::PxlOn => self.draw(span, Graphic::PxlOn),
                Word::PxlOff => self.draw(span, Graphic::PxlOff),
                Word::PxlChange => self.draw(span, Graphic::PxlChange),
                Word::Line => self.draw(span, Graphic::Line),
                Word::Rect => self.draw(span, Graphic::Rect),
                Word::RectI => self.draw(span, Graphic::RectI),
                Word::Circle => self.draw(span, Graphic::Circle),
                Word::ClrDraw => self.draw(span, Graphic::ClrDraw),
                Word::Horizontal => self.shift(span, Graphic::ShiftRight, Graphic::ShiftLeft),
                Word::Vertical => self.shift(span, Graphic::ShiftDown, Graphic::ShiftUp),
                Word::DispGraph => {
                    self.next();
                    let shade = match (
                        self.eat(&Token::Modifier(Modifier::R)),
                        self.eat(&Token::Modifier(Modifier::R)),
                    ) {
                        (false, _) => Shade::Mono,
                        (true, false) => Shade::Gray3,
                        (true, true) => Shade::Gray4,
                    };
                    Ok(Statement::DispGraph(span, shade))
                }
                _ => self.expression_statement(span),
            },
            Token::Meta(meta) => {
                self.next();
                let command = match meta {
                    Meta::Exit => Command::Exit,
                    Meta::Help => Command::Help,
                    Meta::About => Command::About,
                    Meta::Debug => Command::Debug(self.expression()?),
                };
                Ok(Statement::Meta(span, command))
            }
            _ => self.expression_statement(span),
        }
    }

    fn expression_statement(&mut self, span: Span) -> Result<Statement> {
        let expression = self.expression()?;
        if expression.is_effect() {
            Ok(Statement::Expression(span, expression))
        } else {
            Err(error!(SyntaxError, &span; "EXPECTED STATEMENT, FOUND EXPRESSION"))
        }
    }

    fn r#if(&mut self, span: Span) -> Result<Statement> {
        self.next();
        let condition = self.expression()?;
        self.eat(&Token::Word(Word::Then));
        let (then, terminator) = self.block()?;
        let otherwise = match terminator {
            Terminator::End(_) => vec![],
            Terminator::Else(_) => self.body()?,
            Terminator::Eof(span) => return Err(error!(MismatchedBlock, &span; "MISSING END")),
        };
        Ok(Statement::If(span, condition, then, otherwise))
    }

    fn r#for(&mut self, span: Span) -> Result<Statement> {
        self.next();
        self.expect(&Token::LParen)?;
        let first_span = self.span();
        let first = self.expression()?;
        let kind = if self.eat(&Token::Comma) {
            let target = into_target(first, &first_span)?;
            let start = self.expression()?;
            self.expect(&Token::Comma)?;
            let end = self.expression()?;
            Loop::For(target, start, end)
        } else {
            Loop::Times(first)
        };
        self.expect(&Token::RParen)?;
        Ok(Statement::Loop(span, kind, self.body()?))
    }

    fn label_name(&mut self) -> Result<String> {
        let span = self.span();
        match self.next() {
            Token::Name(name) => Ok(name.clone()),
            Token::Number(n) => Ok(n.to_string()),
            Token::Var(c) => Ok(c.to_string()),
            token => Err(expected(&span, token, "LABEL NAME")),
        }
    }

    fn draw(&mut self, span: Span, graphic: Graphic) -> Result<Statement> {
        self.next();
        let mut args = vec![];
        if graphic.arity() > 0 {
            self.expect(&Token::LParen)?;
            args.push(self.expression()?);
            while self.eat(&Token::Comma) {
                args.push(self.expression()?);
            }
            self.expect(&Token::RParen)?;
        }
        if args.len() != graphic.arity() {
            return Err(error!(SyntaxError, &span; "WRONG NUMBER OF ARGUMENTS"));
        }
        let surface = self.surface();
        Ok(Statement::Draw(span, graphic, surface, args))
    }

    fn shift(&mut self, span: Span, plus: Graphic, minus: Graphic) -> Result<Statement> {
        self.next();
        let direction_span = self.span();
        let graphic = match self.next() {
            Token::Operator(Operator::Plus) => plus,
            Token::Operator(Operator::Minus) => minus,
            token => return Err(expected(&direction_span, token, "'+' OR '-'")),
        };
        let surface = self.surface();
        Ok(Statement::Draw(span, graphic, surface, vec![]))
    }

    fn surface(&mut self) -> Surface {
        if self.eat(&Token::Modifier(Modifier::R)) {
            Surface::Back
        } else {
            Surface::Main
        }
    }

    fn width(&mut self) -> Width {
        if self.eat(&Token::Modifier(Modifier::R)) {
            Width::Word
        } else {
            Width::Byte
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        let mut expression = self.binary(1)?;
        while self.eat(&Token::Operator(Operator::Store)) {
            let target = self.target()?;
            expression = Expression::Assign(Box::new(expression), target);
        }
        Ok(expression)
    }

    fn target(&mut self) -> Result<Target> {
        let span = self.span();
        match self.next() {
            Token::Var(c) => Ok(Target::Variable(*c)),
            Token::LBrace => {
                let address = self.expression()?;
                self.expect(&Token::RBrace)?;
                Ok(Target::Pointer(Box::new(address), self.width()))
            }
            token => Err(error!(InvalidTarget, &span;
                &format!("ASSIGNMENT TO NON-VARIABLE {}", describe(token)))),
        }
    }

    fn binary(&mut self, precedence: usize) -> Result<Expression> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Token::Operator(op) => match binary_op(*op) {
                    Some(op) => op,
                    None => break,
                },
                _ => break,
            };
            if op.precedence() < precedence {
                break;
            }
            self.next();
            let rhs = self.binary(op.precedence() + 1)?;
            lhs = Expression::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expression> {
        if self.eat(&Token::Operator(Operator::Minus)) {
            let operand = self.unary()?;
            return Ok(Expression::Unary(UnaryOp::Negate, Box::new(operand)));
        }
        let mut expression = self.primary()?;
        loop {
            let span = self.span();
            expression = match self.peek() {
                Token::Modifier(Modifier::Square) => {
                    self.next();
                    Expression::Unary(UnaryOp::Square, Box::new(expression))
                }
                Token::Operator(Operator::Increment) => {
                    self.next();
                    Expression::Increment(into_target(expression, &span)?)
                }
                Token::Operator(Operator::Decrement) => {
                    self.next();
                    Expression::Decrement(into_target(expression, &span)?)
                }
                _ => return Ok(expression),
            }
        }
    }

    fn primary(&mut self) -> Result<Expression> {
        let span = self.span();
        match self.next() {
            Token::Number(n) => Ok(Expression::Number(i64::from(*n))),
            Token::Var(c) => Ok(Expression::Variable(*c)),
            Token::Buffer(b) => Ok(Expression::Buffer(*b)),
            Token::LParen => {
                let expression = self.expression()?;
                self.expect(&Token::RParen)?;
                Ok(expression)
            }
            Token::LBrace => {
                let address = self.expression()?;
                self.expect(&Token::RBrace)?;
                Ok(Expression::Deref(Box::new(address), self.width()))
            }
            Token::Modifier(Modifier::AddressOf) => Ok(Expression::AddressOf(self.target()?)),
            Token::Word(Word::Rand) => Ok(Expression::Rand),
            Token::Word(Word::GetKey) => {
                self.expect(&Token::LParen)?;
                let code = self.expression()?;
                self.expect(&Token::RParen)?;
                Ok(Expression::GetKey(Box::new(code)))
            }
            Token::Word(Word::PxlTest) => {
                self.expect(&Token::LParen)?;
                let x = self.expression()?;
                self.expect(&Token::Comma)?;
                let y = self.expression()?;
                self.expect(&Token::RParen)?;
                let surface = self.surface();
                Ok(Expression::PxlTest(surface, Box::new(x), Box::new(y)))
            }
            token => Err(expected(&span, token, "EXPRESSION")),
        }
    }
}

fn binary_op(op: Operator) -> Option<BinaryOp> {
    use Operator::*;
    Some(match op {
        Plus => BinaryOp::Add,
        Minus => BinaryOp::Subtract,
        Multiply => BinaryOp::Multiply,
        Divide => BinaryOp::Divide,
        Modulo => BinaryOp::Modulo,
        Equal => BinaryOp::Equal,
        NotEqual => BinaryOp::NotEqual,
        Less => BinaryOp::Less,
        LessEqual => BinaryOp::LessEqual,
        Greater => BinaryOp::Greater,
        GreaterEqual => BinaryOp::GreaterEqual,
        Store | Increment | Decrement => return None,
    })
}

fn into_target(expression: Expression, span: &Span) -> Result<Target> {
    match expression {
        Expression::Variable(c) => Ok(Target::Variable(c)),
        Expression::Deref(address, width) => Ok(Target::Pointer(address, width)),
        _ => Err(Error::new(ErrorCode::InvalidTarget)
            .in_span(span)
            .message("ASSIGNMENT TO NON-VARIABLE")),
    }
}
