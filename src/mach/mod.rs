/*!
## Rust Machine Module

This Rust module lowers Axe programs to a flat instruction array and
runs them on a stack based virtual machine.

*/

pub type Address = usize;
pub type Symbol = isize;

mod codegen;
mod device;
mod link;
mod memory;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;

pub use device::Device;
pub use device::Draw;
pub use link::Link;
pub use memory::Memory;
pub use memory::{MEMORY_SIZE, SCRATCH, VARIABLES};
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use runtime::Status;
pub use stack::Stack;

#[cfg(test)]
mod tests;
