use super::{Address, Opcode, Program, Stack, Symbol};
use crate::error;
use crate::lang::{Error, Span};
use std::collections::{BTreeMap, HashMap};

type Result<T> = std::result::Result<T, Error>;

/// ## Jump resolution
///
/// Branches are emitted with a placeholder address and a symbol. Labels
/// from the source get positive symbols, the code generator allocates
/// negative ones for block boundaries. `link` patches every branch once
/// all symbols have an address.

pub struct Link {
    current_symbol: Symbol,
    ops: Stack<Opcode>,
    symbols: BTreeMap<Symbol, Address>,
    unlinked: HashMap<Address, (Span, Symbol)>,
    labels: HashMap<String, Symbol>,
    spans: BTreeMap<Address, Span>,
}

impl Default for Link {
    fn default() -> Link {
        Link::new()
    }
}

impl Link {
    pub fn new() -> Link {
        Link {
            current_symbol: 0,
            ops: Stack::new("PROGRAM TOO LARGE"),
            symbols: BTreeMap::new(),
            unlinked: HashMap::new(),
            labels: HashMap::new(),
            spans: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> Address {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn push(&mut self, op: Opcode) -> Result<()> {
        self.ops.push(op)
    }

    /// Remembers that code from here on came from the statement at `span`.
    pub fn mark(&mut self, span: &Span) {
        self.spans.insert(self.ops.len(), span.clone());
    }

    pub fn next_symbol(&mut self) -> Symbol {
        self.current_symbol -= 1;
        self.current_symbol
    }

    pub fn push_symbol(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol, self.ops.len());
    }

    pub fn push_jump(&mut self, span: &Span, symbol: Symbol) -> Result<()> {
        self.link_addr_to_symbol(span, symbol);
        self.push(Opcode::Jump(0))
    }

    pub fn push_if(&mut self, span: &Span, symbol: Symbol) -> Result<()> {
        self.link_addr_to_symbol(span, symbol);
        self.push(Opcode::If(0))
    }

    pub fn push_ifnot(&mut self, span: &Span, symbol: Symbol) -> Result<()> {
        self.link_addr_to_symbol(span, symbol);
        self.push(Opcode::IfNot(0))
    }

    pub fn push_label(&mut self, span: &Span, name: &str) -> Result<()> {
        let symbol = self.symbol_for_label(name);
        if self.symbols.contains_key(&symbol) {
            return Err(error!(DuplicateLabel, span; name));
        }
        self.push_symbol(symbol);
        Ok(())
    }

    pub fn push_goto(&mut self, span: &Span, name: &str) -> Result<()> {
        let symbol = self.symbol_for_label(name);
        self.push_jump(span, symbol)
    }

    fn symbol_for_label(&mut self, name: &str) -> Symbol {
        if let Some(symbol) = self.labels.get(name) {
            return *symbol;
        }
        let symbol = self.labels.len() as Symbol + 1;
        self.labels.insert(name.to_string(), symbol);
        symbol
    }

    fn link_addr_to_symbol(&mut self, span: &Span, symbol: Symbol) {
        self.unlinked.insert(self.ops.len(), (span.clone(), symbol));
    }

    pub fn link(self) -> Result<Program> {
        let Link {
            ops,
            symbols,
            unlinked,
            labels,
            spans,
            ..
        } = self;
        let mut errors: Vec<Error> = vec![];
        let mut ops = ops.into_vec();
        for (op_addr, (span, symbol)) in &unlinked {
            match symbols.get(symbol) {
                None => {
                    if *symbol > 0 {
                        let name = label_for_symbol(&labels, *symbol);
                        errors.push(error!(UndefinedLabel, span; name));
                        continue;
                    }
                }
                Some(dest) => {
                    if let Some(op) = ops.get_mut(*op_addr) {
                        if let Some(new_op) = match op {
                            Opcode::If(_) => Some(Opcode::If(*dest)),
                            Opcode::IfNot(_) => Some(Opcode::IfNot(*dest)),
                            Opcode::Jump(_) => Some(Opcode::Jump(*dest)),
                            _ => None,
                        } {
                            *op = new_op;
                            continue;
                        }
                    }
                }
            }
            errors.push(error!(InternalError, span; "LINK FAILURE"));
        }
        if let Some(error) = errors
            .into_iter()
            .min_by_key(|e| (e.line_number(), e.column().start))
        {
            return Err(error);
        }
        let labels = labels
            .into_iter()
            .filter_map(|(name, symbol)| symbols.get(&symbol).map(|addr| (name, *addr)))
            .collect();
        Ok(Program::new(ops, labels, spans))
    }
}

fn label_for_symbol(labels: &HashMap<String, Symbol>, symbol: Symbol) -> &str {
    labels
        .iter()
        .find(|(_, s)| **s == symbol)
        .map(|(name, _)| name.as_str())
        .unwrap_or("")
}
