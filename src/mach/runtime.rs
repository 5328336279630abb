use super::{Address, Device, Draw, Memory, Opcode, Operation, Program, Stack};
use crate::error;
use crate::lang::ast::Width;
use crate::lang::Error;
use std::convert::TryFrom;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

type Result<T> = std::result::Result<T, Error>;

/// Instructions executed between checks of the cancellation flag.
const SLICE: usize = 5000;

/// ## Virtual machine

/// Returned to the host whenever execution yields.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The cycle budget ran out. Call `execute` again to continue.
    Running,
    /// Nothing left to run.
    Stopped,
    /// `@EXIT` was reached.
    Exit,
    /// The host cancelled the run.
    Interrupted,
    Fault(Error),
    Help,
    About,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
    Faulted,
}

#[derive(Debug)]
pub struct Runtime {
    program: Program,
    memory: Memory,
    stack: Stack<i64>,
    pc: Address,
    debug: bool,
    status: Status,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new()
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime {
            program: Program::default(),
            memory: Memory::new(),
            stack: Stack::new("EXPRESSION TOO COMPLEX"),
            pc: 0,
            debug: false,
            status: Status::Halted,
        }
    }

    /// Start `program` from its first instruction. Memory and the debug
    /// flag carry over from whatever ran before.
    pub fn load(&mut self, program: Program) {
        self.program = program;
        self.stack.clear();
        self.pc = 0;
        self.status = Status::Running;
    }

    pub fn reset(&mut self) {
        *self = Runtime::new();
    }

    /// Halts a running program. Returns false if nothing was running.
    pub fn interrupt(&mut self) -> bool {
        if self.status == Status::Running {
            self.status = Status::Halted;
            true
        } else {
            false
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn pc(&self) -> Address {
        self.pc
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn variable(&self, name: char) -> Option<u16> {
        Memory::variable(name).map(|addr| self.memory.peek_word(addr))
    }

    /// Runs to completion, checking `cancel` between slices.
    /// `Help` and `About` also return early; call again to resume.
    pub fn run(&mut self, device: &mut dyn Device, cancel: &AtomicBool) -> Event {
        loop {
            if cancel.load(Ordering::SeqCst) {
                cancel.store(false, Ordering::SeqCst);
                if self.interrupt() {
                    return Event::Interrupted;
                }
            }
            match self.execute(device, SLICE) {
                Event::Running => continue,
                event => return event,
            }
        }
    }

    /// Runs at most `cycles` instructions.
    pub fn execute(&mut self, device: &mut dyn Device, cycles: usize) -> Event {
        for _ in 0..cycles {
            match self.step(device) {
                Event::Running => continue,
                event => return event,
            }
        }
        if self.status == Status::Running {
            Event::Running
        } else {
            Event::Stopped
        }
    }

    /// Executes the instruction at the program counter.
    pub fn step(&mut self, device: &mut dyn Device) -> Event {
        if self.status != Status::Running {
            return Event::Stopped;
        }
        let addr = self.pc;
        let op = match self.program.op(addr) {
            Some(op) => *op,
            None => {
                self.status = Status::Halted;
                return Event::Stopped;
            }
        };
        if self.debug {
            device.log(&format!("{:>5} {:<14} {:?}", addr, op.to_string(), self.stack));
        }
        self.pc += 1;
        match self.dispatch(op, device) {
            Ok(event) => event,
            Err(error) => {
                self.status = Status::Faulted;
                let mut error = error.at_address(addr);
                if error.line_number().is_none() {
                    if let Some(span) = self.program.span_for(addr) {
                        error = error.in_span(span);
                    }
                }
                Event::Fault(error)
            }
        }
    }

    fn dispatch(&mut self, op: Opcode, device: &mut dyn Device) -> Result<Event> {
        match op {
            Opcode::Literal(val) => self.stack.push(val)?,
            Opcode::Push(name) => {
                let addr = self.variable_address(name)?;
                let val = self.memory.peek_word(addr);
                self.stack.push(val as i64)?;
            }
            Opcode::Pop(name) => {
                let addr = self.variable_address(name)?;
                let val = self.stack.pop()?;
                self.memory.poke_word(addr, val as u16);
            }
            Opcode::Peek(width) => {
                let addr = self.stack.pop()?;
                let addr = self.address(addr, width)?;
                let val = match width {
                    Width::Byte => self.memory.peek(addr) as i64,
                    Width::Word => self.memory.peek_word(addr) as i64,
                };
                self.stack.push(val)?;
            }
            Opcode::Poke(width) => {
                let addr = self.stack.pop()?;
                let val = self.stack.pop()?;
                let addr = self.address(addr, width)?;
                match width {
                    Width::Byte => self.memory.poke(addr, val as u8),
                    Width::Word => self.memory.poke_word(addr, val as u16),
                }
            }
            Opcode::Dup => {
                let val = self.stack.pop()?;
                self.stack.push(val)?;
                self.stack.push(val)?;
            }
            Opcode::Mask => {
                let val = self.stack.pop()?;
                self.stack.push(i64::from(val as u16))?;
            }
            Opcode::If(addr) => {
                if self.stack.pop()? != 0 {
                    self.jump(addr)?;
                }
            }
            Opcode::IfNot(addr) => {
                if self.stack.pop()? == 0 {
                    self.jump(addr)?;
                }
            }
            Opcode::Jump(addr) => self.jump(addr)?,
            Opcode::Disp => {
                let val = self.stack.pop()?;
                device.display(&val.to_string());
            }
            Opcode::Pause => {
                let val = self.stack.pop()?;
                device.pause(pause_duration(val));
            }
            Opcode::Draw(graphic, surface) => {
                let args = self.stack.pop_n(graphic.arity())?;
                device.draw(surface, Draw::new(graphic, &args)?);
            }
            Opcode::DispGraph(shade) => device.show(shade),
            Opcode::Debug => self.debug = self.stack.pop()? != 0,
            Opcode::Exit => {
                self.status = Status::Halted;
                return Ok(Event::Exit);
            }
            Opcode::Help => return Ok(Event::Help),
            Opcode::About => return Ok(Event::About),
            Opcode::Neg => {
                let val = self.stack.pop()?;
                self.stack.push(Operation::negate(val))?;
            }
            Opcode::Mul => self.binary(Operation::multiply)?,
            Opcode::Div => self.binary(Operation::divide)?,
            Opcode::Mod => self.binary(Operation::remainder)?,
            Opcode::Add => self.binary(Operation::sum)?,
            Opcode::Sub => self.binary(Operation::subtract)?,
            Opcode::Eq => self.binary(Operation::equal)?,
            Opcode::NotEq => self.binary(Operation::not_equal)?,
            Opcode::Lt => self.binary(Operation::less)?,
            Opcode::LtEq => self.binary(Operation::less_equal)?,
            Opcode::Gt => self.binary(Operation::greater)?,
            Opcode::GtEq => self.binary(Operation::greater_equal)?,
            Opcode::GetKey => {
                let code = self.stack.pop()?;
                let pressed = match u8::try_from(code) {
                    Ok(code) => device.key_pressed(code),
                    Err(_) => false,
                };
                self.stack.push(pressed as i64)?;
            }
            Opcode::Rand => self.stack.push(device.random() as i64)?,
            Opcode::PxlTest(surface) => {
                let (x, y) = self.stack.pop_2()?;
                self.stack.push(device.pixel(surface, x, y) as i64)?;
            }
        }
        Ok(Event::Running)
    }

    fn binary(&mut self, f: fn(i64, i64) -> Result<i64>) -> Result<()> {
        let (lhs, rhs) = self.stack.pop_2()?;
        self.stack.push(f(lhs, rhs)?)
    }

    fn jump(&mut self, addr: Address) -> Result<()> {
        if addr > self.program.len() {
            return Err(error!(InternalError; "UNDEFINED LABEL"));
        }
        self.pc = addr;
        Ok(())
    }

    fn variable_address(&self, name: char) -> Result<Address> {
        match Memory::variable(name) {
            Some(addr) => self.address(addr as i64, Width::Word),
            None => Err(error!(InternalError; "UNKNOWN VARIABLE")),
        }
    }

    /// Every memory access goes through here.
    fn address(&self, addr: i64, width: Width) -> Result<Address> {
        match usize::try_from(addr) {
            Ok(a) if a + width.bytes() <= self.memory.len() => Ok(a),
            _ => Err(error!(MemoryFault; &format!("ADDRESS {}", addr))),
        }
    }
}

/// Pause counts in units of 1/1800 of a second, wrapped to 16 bits
/// like any other value, so the longest pause is about 36 seconds.
fn pause_duration(val: i64) -> Duration {
    let units = u64::from(val as u16);
    Duration::from_micros(units * 1_000_000 / 1800)
}
