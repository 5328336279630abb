use super::{Link, Memory, Opcode};
use crate::error;
use crate::lang::ast::*;
use crate::lang::{Error, Span};

type Result<T> = std::result::Result<T, Error>;

/// Lowers a statement tree into `link`.
pub fn generate(link: &mut Link, statements: &[Statement]) -> Result<()> {
    let mut generator = Generator { link, depth: 0 };
    generator.statements(statements)
}

struct Generator<'a> {
    link: &'a mut Link,
    /// Nesting of `For(n)` loops, each owns a scratch counter.
    depth: usize,
}

impl Generator<'_> {
    fn statements(&mut self, statements: &[Statement]) -> Result<()> {
        for statement in statements {
            self.statement(statement)?;
        }
        Ok(())
    }

    fn statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Expression(span, expression) => {
                self.link.mark(span);
                self.effect(expression)
            }
            Statement::Disp(span, list) => {
                self.link.mark(span);
                for expression in list {
                    self.expression(expression)?;
                    self.link.push(Opcode::Disp)?;
                }
                Ok(())
            }
            Statement::Pause(span, expression) => {
                self.link.mark(span);
                self.expression(expression)?;
                self.link.push(Opcode::Pause)
            }
            Statement::Draw(span, graphic, surface, args) => {
                self.link.mark(span);
                for expression in args {
                    self.expression(expression)?;
                }
                self.link.push(Opcode::Draw(*graphic, *surface))
            }
            Statement::DispGraph(span, shade) => {
                self.link.mark(span);
                self.link.push(Opcode::DispGraph(*shade))
            }
            Statement::If(span, condition, then, otherwise) => {
                self.r#if(span, condition, then, otherwise)
            }
            Statement::Loop(span, kind, body) => match kind {
                Loop::While(condition) => self.r#while(span, condition, body, false),
                Loop::Repeat(condition) => self.r#while(span, condition, body, true),
                Loop::For(target, start, end) => self.r#for(span, target, start, end, true, body),
                Loop::Times(count) => {
                    let counter = Target::Pointer(
                        Box::new(Expression::Number(Memory::scratch(self.depth) as i64)),
                        Width::Word,
                    );
                    self.depth += 1;
                    let start = Expression::Number(0);
                    let result = self.r#for(span, &counter, &start, count, false, body);
                    self.depth -= 1;
                    result
                }
            },
            Statement::Label(span, name) => self.link.push_label(span, name),
            Statement::Goto(span, name) => {
                self.link.mark(span);
                self.link.push_goto(span, name)
            }
            Statement::Meta(span, command) => {
                self.link.mark(span);
                match command {
                    Command::Exit => self.link.push(Opcode::Exit),
                    Command::Help => self.link.push(Opcode::Help),
                    Command::About => self.link.push(Opcode::About),
                    Command::Debug(expression) => {
                        self.expression(expression)?;
                        self.link.push(Opcode::Debug)
                    }
                }
            }
        }
    }

    fn r#if(
        &mut self,
        span: &Span,
        condition: &Expression,
        then: &[Statement],
        otherwise: &[Statement],
    ) -> Result<()> {
        self.link.mark(span);
        let else_symbol = self.link.next_symbol();
        self.expression(condition)?;
        self.link.push_ifnot(span, else_symbol)?;
        self.statements(then)?;
        if otherwise.is_empty() {
            self.link.push_symbol(else_symbol);
            return Ok(());
        }
        let end_symbol = self.link.next_symbol();
        self.link.push_jump(span, end_symbol)?;
        self.link.push_symbol(else_symbol);
        self.statements(otherwise)?;
        self.link.push_symbol(end_symbol);
        Ok(())
    }

    /// `While` leaves when the condition is zero, `Repeat` when it is not.
    fn r#while(
        &mut self,
        span: &Span,
        condition: &Expression,
        body: &[Statement],
        until: bool,
    ) -> Result<()> {
        let top_symbol = self.link.next_symbol();
        let exit_symbol = self.link.next_symbol();
        self.link.push_symbol(top_symbol);
        self.link.mark(span);
        self.expression(condition)?;
        if until {
            self.link.push_if(span, exit_symbol)?;
        } else {
            self.link.push_ifnot(span, exit_symbol)?;
        }
        self.statements(body)?;
        self.link.push_jump(span, top_symbol)?;
        self.link.push_symbol(exit_symbol);
        Ok(())
    }

    fn r#for(
        &mut self,
        span: &Span,
        target: &Target,
        start: &Expression,
        end: &Expression,
        inclusive: bool,
        body: &[Statement],
    ) -> Result<()> {
        let top_symbol = self.link.next_symbol();
        let exit_symbol = self.link.next_symbol();
        self.link.mark(span);
        self.expression(start)?;
        self.store(target)?;
        self.link.push_symbol(top_symbol);
        self.load(target)?;
        self.expression(end)?;
        self.link
            .push(if inclusive { Opcode::LtEq } else { Opcode::Lt })?;
        self.link.push_ifnot(span, exit_symbol)?;
        self.statements(body)?;
        self.link.mark(span);
        self.load(target)?;
        self.link.push(Opcode::Literal(1))?;
        self.link.push(Opcode::Add)?;
        self.store(target)?;
        self.link.push_jump(span, top_symbol)?;
        self.link.push_symbol(exit_symbol);
        Ok(())
    }

    /// Code for a statement level expression. Nothing is left on the stack.
    fn effect(&mut self, expression: &Expression) -> Result<()> {
        match expression {
            Expression::Assign(value, target) => {
                self.expression(value)?;
                self.store(target)
            }
            Expression::Increment(target) => self.step(target, Opcode::Add),
            Expression::Decrement(target) => self.step(target, Opcode::Sub),
            _ => Err(error!(InternalError; "EXPRESSION HAS NO EFFECT")),
        }
    }

    fn step(&mut self, target: &Target, op: Opcode) -> Result<()> {
        self.load(target)?;
        self.link.push(Opcode::Literal(1))?;
        self.link.push(op)?;
        self.store(target)
    }

    fn load(&mut self, target: &Target) -> Result<()> {
        match target {
            Target::Variable(c) => self.link.push(Opcode::Push(*c)),
            Target::Pointer(address, width) => {
                self.expression(address)?;
                self.link.push(Opcode::Peek(*width))
            }
        }
    }

    fn store(&mut self, target: &Target) -> Result<()> {
        match target {
            Target::Variable(c) => self.link.push(Opcode::Pop(*c)),
            Target::Pointer(address, width) => {
                self.expression(address)?;
                self.link.push(Opcode::Poke(*width))
            }
        }
    }

    /// Copies the value about to be stored so it remains as the result.
    /// Word stores leave the wrapped word, byte stores the value as given.
    fn keep(&mut self, target: &Target) -> Result<()> {
        match target {
            Target::Variable(_) | Target::Pointer(_, Width::Word) => {
                self.link.push(Opcode::Mask)?;
            }
            Target::Pointer(_, Width::Byte) => {}
        }
        self.link.push(Opcode::Dup)
    }

    /// Code that leaves exactly one value on the stack.
    fn expression(&mut self, expression: &Expression) -> Result<()> {
        match expression {
            Expression::Number(n) => self.link.push(Opcode::Literal(*n)),
            Expression::Variable(c) => self.link.push(Opcode::Push(*c)),
            Expression::Buffer(buffer) => self.link.push(Opcode::Literal(buffer.base() as i64)),
            Expression::Deref(address, width) => {
                self.expression(address)?;
                self.link.push(Opcode::Peek(*width))
            }
            Expression::AddressOf(Target::Variable(c)) => match Memory::variable(*c) {
                Some(addr) => self.link.push(Opcode::Literal(addr as i64)),
                None => Err(error!(InternalError; "UNKNOWN VARIABLE")),
            },
            Expression::AddressOf(Target::Pointer(address, _)) => self.expression(address),
            Expression::Unary(UnaryOp::Negate, operand) => {
                self.expression(operand)?;
                self.link.push(Opcode::Neg)
            }
            Expression::Unary(UnaryOp::Square, operand) => {
                self.expression(operand)?;
                self.link.push(Opcode::Dup)?;
                self.link.push(Opcode::Mul)
            }
            Expression::Binary(op, lhs, rhs) => {
                self.expression(lhs)?;
                self.expression(rhs)?;
                self.link.push(binary_opcode(*op))
            }
            Expression::Assign(value, target) => {
                self.expression(value)?;
                self.keep(target)?;
                self.store(target)
            }
            Expression::Increment(target) | Expression::Decrement(target) => {
                let op = match expression {
                    Expression::Increment(_) => Opcode::Add,
                    _ => Opcode::Sub,
                };
                self.load(target)?;
                self.link.push(Opcode::Literal(1))?;
                self.link.push(op)?;
                self.keep(target)?;
                self.store(target)
            }
            Expression::GetKey(code) => {
                self.expression(code)?;
                self.link.push(Opcode::GetKey)
            }
            Expression::Rand => self.link.push(Opcode::Rand),
            Expression::PxlTest(surface, x, y) => {
                self.expression(x)?;
                self.expression(y)?;
                self.link.push(Opcode::PxlTest(*surface))
            }
        }
    }
}

fn binary_opcode(op: BinaryOp) -> Opcode {
    match op {
        BinaryOp::Add => Opcode::Add,
        BinaryOp::Subtract => Opcode::Sub,
        BinaryOp::Multiply => Opcode::Mul,
        BinaryOp::Divide => Opcode::Div,
        BinaryOp::Modulo => Opcode::Mod,
        BinaryOp::Equal => Opcode::Eq,
        BinaryOp::NotEqual => Opcode::NotEq,
        BinaryOp::Less => Opcode::Lt,
        BinaryOp::LessEqual => Opcode::LtEq,
        BinaryOp::Greater => Opcode::Gt,
        BinaryOp::GreaterEqual => Opcode::GtEq,
    }
}
