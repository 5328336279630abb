//! # Axe
//!
//! An interpreter for a subset of Axe, the compiled language of the
//! TI-83/84 graphing calculators. Programs run on a stack machine with
//! the calculator's 64K address space, a 96x64 monochrome screen, and the
//! calculator's key codes.
//!
//! Run a program with `axe run game.axe`. Start `axe` without arguments
//! for an interactive session where every line runs as soon as it is
//! entered and variables persist between lines.
//! ```text
//! axe> 5+3->A
//! axe> Disp A
//! 8
//! ```
//!
//! The library splits into [`lang`](lang/index.html), which turns text
//! into a syntax tree, [`mach`](mach/index.html), which lowers the tree to
//! instructions and executes them, and [`dev`](dev/index.html), which
//! provides the screen and keyboard a program talks to.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/chapter_1.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_1;

pub mod dev;
pub mod lang;
pub mod mach;

/// Lexes, parses and links `source` in one step.
pub fn compile(source: &str) -> Result<mach::Program, lang::Error> {
    let tokens = lang::lex(source)?;
    let statements = lang::parse(&tokens)?;
    mach::Program::compile(&statements)
}
