extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;

mod console;

use ansi_term::Style;
use axe::dev::{Headless, KeyBindings};
use axe::error;
use axe::lang::{lex, parse, Error};
use axe::mach::{Device, Event, Program, Runtime};
use console::Console;
use linefeed::{Interface, ReadResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Which part of the pipeline `--test` runs on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Component {
    Lexer,
    Parser,
    Interpreter,
}

#[derive(Debug, Default)]
pub struct Options {
    pub file: Option<PathBuf>,
    pub test: Option<Component>,
    pub keys: Option<PathBuf>,
}

pub const HELP: &str = "\
Statements are separated by newlines or ':'.
  expr->A            store into a variable, {p} or {p}^^r
  Disp expr,...      print values
  If c [Then] / Else / End
  While c / Repeat c / For(V,a,b) / For(n) ... End
  Lbl NAME / Goto NAME
  Pxl-On(x,y) Line(x1,y1,x2,y2) Rect(x,y,w,h) Circle(x,y,r) ClrDraw DispGraph
  getKey(n)  rand  Pxl-Test(x,y)
  @DEBUG expr  @HELP  @ABOUT  @EXIT";

pub const ABOUT: &str = concat!(
    "Axe interpreter ",
    env!("CARGO_PKG_VERSION"),
    "\nA stack machine for a calculator flavored subset of the Axe language."
);

enum Outcome {
    Done,
    Exit,
    Interrupted,
    Fault(Error),
}

pub fn main(options: Options) -> i32 {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("{}", error);
    }
    let bindings = match &options.keys {
        Some(path) => match KeyBindings::load(path) {
            Ok(bindings) => bindings,
            Err(error) => {
                print_error(&error);
                return 1;
            }
        },
        None => KeyBindings::standard(),
    };
    let component = options.test.unwrap_or(Component::Interpreter);
    match &options.file {
        Some(path) => run_file(path, component, options.test.is_some(), bindings, interrupted),
        None => match session(component, bindings, interrupted) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("{}", error);
                1
            }
        },
    }
}

fn run_file(
    path: &Path,
    component: Component,
    testing: bool,
    bindings: KeyBindings,
    interrupted: Arc<AtomicBool>,
) -> i32 {
    let source = match load(path) {
        Ok(source) => source,
        Err(error) => {
            print_error(&error);
            return 1;
        }
    };
    let result = match component {
        Component::Lexer => show_tokens(&source),
        Component::Parser => show_tree(&source),
        Component::Interpreter if testing => {
            let mut device = Headless::new().with_bindings(bindings);
            let mut runtime = Runtime::new();
            run_source(&source, &mut runtime, &mut device, &interrupted).map(|outcome| {
                for record in device.records() {
                    println!("{}", Style::new().dimmed().paint(record));
                }
                for line in device.output() {
                    println!("{}", line);
                }
                outcome
            })
        }
        Component::Interpreter => {
            let mut device = Console::new(bindings, interrupted.clone());
            let mut runtime = Runtime::new();
            run_source(&source, &mut runtime, &mut device, &interrupted)
        }
    };
    match result {
        Ok(Outcome::Fault(error)) | Err(error) => {
            print_error(&error);
            1
        }
        Ok(Outcome::Interrupted) => {
            print_error(&error!(InternalError; "BREAK"));
            1
        }
        Ok(_) => 0,
    }
}

fn session(
    component: Component,
    bindings: KeyBindings,
    interrupted: Arc<AtomicBool>,
) -> std::io::Result<()> {
    let interface = Interface::new("axe")?;
    interface.set_prompt(match component {
        Component::Lexer => "lexer> ",
        Component::Parser => "parser> ",
        Component::Interpreter => "axe> ",
    })?;
    let mut runtime = Runtime::new();
    let mut console = Console::new(bindings, interrupted.clone());
    println!("{}", ABOUT);
    loop {
        let line = match interface.read_line()? {
            ReadResult::Input(line) => line,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if !line.trim().is_empty() {
            interface.add_history_unique(line.clone());
        }
        interrupted.store(false, Ordering::SeqCst);
        let result = match component {
            Component::Lexer => show_tokens(&line),
            Component::Parser => show_tree(&line),
            Component::Interpreter => run_source(&line, &mut runtime, &mut console, &interrupted),
        };
        match result {
            Ok(Outcome::Exit) => break,
            Ok(Outcome::Fault(error)) | Err(error) => print_error(&error),
            Ok(Outcome::Interrupted) => print_error(&error!(InternalError; "BREAK")),
            Ok(Outcome::Done) => {}
        }
    }
    Ok(())
}

/// Compiles `source` and runs it on `runtime`, which keeps its memory
/// from earlier runs.
fn run_source<D: Device + Attach>(
    source: &str,
    runtime: &mut Runtime,
    device: &mut D,
    interrupted: &AtomicBool,
) -> Result<Outcome, Error> {
    let program = axe::compile(source)?;
    runtime.load(program);
    device.attach();
    let outcome = drive(runtime, device, interrupted);
    device.detach();
    Ok(outcome)
}

fn drive(runtime: &mut Runtime, device: &mut dyn Device, interrupted: &AtomicBool) -> Outcome {
    loop {
        match runtime.run(device, interrupted) {
            Event::Running => {}
            Event::Help => HELP.lines().for_each(|line| device.display(line)),
            Event::About => ABOUT.lines().for_each(|line| device.display(line)),
            Event::Stopped => return Outcome::Done,
            Event::Exit => return Outcome::Exit,
            Event::Interrupted => return Outcome::Interrupted,
            Event::Fault(error) => return Outcome::Fault(error),
        }
    }
}

fn show_tokens(source: &str) -> Result<Outcome, Error> {
    for (span, token) in lex(source)? {
        if !token.is_trivia() {
            println!("{:<12} {:?}", span.to_string(), token);
        }
    }
    Ok(Outcome::Done)
}

fn show_tree(source: &str) -> Result<Outcome, Error> {
    let tokens = lex(source)?;
    let statements = parse(&tokens)?;
    println!("{:#?}", statements);
    print!("{}", Program::compile(&statements)?);
    Ok(Outcome::Done)
}

fn load(path: &Path) -> Result<String, Error> {
    match std::fs::read_to_string(path) {
        Ok(source) => Ok(source),
        Err(error) => {
            let msg = format!("{}: {}", path.display(), error);
            match error.kind() {
                ErrorKind::NotFound => Err(error!(FileNotFound; &msg)),
                _ => Err(error!(InternalError; &msg)),
            }
        }
    }
}

fn print_error(error: &Error) {
    eprintln!("{}", Style::new().bold().paint(error.to_string()));
}

/// Devices that hold the terminal while a program runs.
trait Attach {
    fn attach(&mut self) {}
    fn detach(&mut self) {}
}

impl Attach for Headless {}
