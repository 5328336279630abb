use super::Address;
use crate::lang::token::Buffer;

/// Number of addressable bytes. The last valid address is `MEMORY_SIZE - 1`.
pub const MEMORY_SIZE: usize = 65535;
/// Variables A through Z, two bytes each, little endian.
pub const VARIABLES: Address = 35254;
/// Hidden loop counters for `For(n)`, two bytes per nesting level.
pub const SCRATCH: Address = 2000;

/// ## Calculator address space
///
/// The layout follows the RAM map of the calculator so that programs
/// written against the named buffers behave as they would there.
///
/// | region | base | size |
/// |-|-|-|
/// | L4 | 33445 | 256 |
/// | L5 | 34056 | 128 |
/// | L1 | 34540 | 714 |
/// | A..Z | 35254 | 52 |
/// | L2 | 35386 | 531 |
/// | L6 | 37696 | 768 |
/// | L3 | 39026 | 768 |
///
/// Access is raw. The runtime checks every address before it gets here.

#[derive(Clone, PartialEq)]
pub struct Memory {
    ram: Vec<u8>,
}

impl Default for Memory {
    fn default() -> Memory {
        Memory::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory {{ {} bytes }}", self.ram.len())
    }
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            ram: vec![0; MEMORY_SIZE],
        }
    }

    pub fn len(&self) -> usize {
        self.ram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ram.is_empty()
    }

    pub fn peek(&self, addr: Address) -> u8 {
        self.ram[addr]
    }

    pub fn poke(&mut self, addr: Address, val: u8) {
        self.ram[addr] = val;
    }

    pub fn peek_word(&self, addr: Address) -> u16 {
        u16::from_le_bytes([self.ram[addr], self.ram[addr + 1]])
    }

    pub fn poke_word(&mut self, addr: Address, val: u16) {
        let [lo, hi] = val.to_le_bytes();
        self.ram[addr] = lo;
        self.ram[addr + 1] = hi;
    }

    /// Address of a single letter variable.
    pub fn variable(name: char) -> Option<Address> {
        if name.is_ascii_uppercase() {
            Some(VARIABLES + 2 * (name as usize - 'A' as usize))
        } else {
            None
        }
    }

    pub fn scratch(depth: usize) -> Address {
        SCRATCH + 2 * depth
    }
}

impl Buffer {
    pub fn base(self) -> Address {
        match self {
            Buffer::L1 => 34540,
            Buffer::L2 => 35386,
            Buffer::L3 => 39026,
            Buffer::L4 => 33445,
            Buffer::L5 => 34056,
            Buffer::L6 => 37696,
        }
    }

    pub fn size(self) -> usize {
        match self {
            Buffer::L1 => 714,
            Buffer::L2 => 531,
            Buffer::L3 | Buffer::L6 => 768,
            Buffer::L4 => 256,
            Buffer::L5 => 128,
        }
    }
}
