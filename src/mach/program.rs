use super::{codegen, Address, Link, Opcode};
use crate::lang::ast::Statement;
use crate::lang::{Error, Span};
use std::collections::{BTreeMap, HashMap};

type Result<T> = std::result::Result<T, Error>;

/// ## Resolved program
///
/// A flat instruction array with every branch pointing at an absolute
/// address, the address of each source label, and the span of the
/// statement each run of instructions came from.

#[derive(Debug, Clone, Default)]
pub struct Program {
    ops: Vec<Opcode>,
    labels: HashMap<String, Address>,
    spans: BTreeMap<Address, Span>,
}

impl Program {
    pub(super) fn new(
        ops: Vec<Opcode>,
        labels: HashMap<String, Address>,
        spans: BTreeMap<Address, Span>,
    ) -> Program {
        Program { ops, labels, spans }
    }

    /// Lowers and links a parsed program. Nothing is produced unless
    /// every label resolves.
    pub fn compile(statements: &[Statement]) -> Result<Program> {
        let mut link = Link::new();
        codegen::generate(&mut link, statements)?;
        link.link()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn op(&self, addr: Address) -> Option<&Opcode> {
        self.ops.get(addr)
    }

    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }

    /// Address of the instruction following `Lbl name`.
    pub fn label(&self, name: &str) -> Option<Address> {
        self.labels.get(name).copied()
    }

    /// Span of the statement that produced the instruction at `addr`.
    pub fn span_for(&self, addr: Address) -> Option<&Span> {
        self.spans.range(..=addr).next_back().map(|(_, span)| span)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut labels: BTreeMap<Address, Vec<&str>> = BTreeMap::new();
        for (name, addr) in &self.labels {
            labels.entry(*addr).or_default().push(name);
        }
        for (addr, op) in self.ops.iter().enumerate() {
            if let Some(names) = labels.get_mut(&addr) {
                names.sort_unstable();
                for name in names.iter() {
                    writeln!(f, "{}:", name)?;
                }
            }
            writeln!(f, "{:>5}  {}", addr, op)?;
        }
        if let Some(names) = labels.get_mut(&self.ops.len()) {
            names.sort_unstable();
            for name in names.iter() {
                writeln!(f, "{}:", name)?;
            }
        }
        Ok(())
    }
}
