//! VM state: register bank, flag bank, memory, stacks, program counter.

use regvm_common::{Register, MAX_REGISTERS};

use crate::cell::Cell;
use crate::config::VmConfig;
use crate::error::ConfigError;
use crate::memory::Memory;
use crate::sink::OutputSink;
use crate::stack::{CircularStack, DEFAULT_CALL_STACK_SIZE};

/// Number of cells in the flag bank.
pub const FLAG_COUNT: usize = 4;

/// Slots of the flag bank.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// 1 when the last result was 0.
    Zero = 0,
    /// Reserved. Never written by the current instruction set.
    Carry = 1,
    /// 1 when the last result was negative.
    Sign = 2,
    /// Unused.
    Reserved = 3,
}

impl Flag {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The regvm register machine.
///
/// Owns all of its state; separate instances share nothing. Registers,
/// flags, memory and stacks live as long as the VM and persist across
/// calls to [`VM::run`]. Only the program counter is reset per run.
pub struct VM<S = Vec<i32>> {
    /// General-purpose registers A..H.
    pub(crate) registers: [Cell; MAX_REGISTERS],
    /// Zero, carry, sign, unused.
    pub(crate) flags: [Cell; FLAG_COUNT],
    /// Data memory.
    pub(crate) memory: Memory,
    /// Data stack for PSH/POP.
    pub(crate) stack: CircularStack,
    /// Call stack. Allocated but not referenced by any instruction.
    pub(crate) call_stack: CircularStack,
    /// Index of the next opcode in the program buffer.
    pub(crate) pc: usize,
    /// Destination of OUT.
    pub(crate) sink: S,
}

impl VM<Vec<i32>> {
    /// Create a VM that collects OUT values in a `Vec`.
    pub fn new(config: VmConfig) -> Result<Self, ConfigError> {
        Self::with_sink(config, Vec::new())
    }
}

impl Default for VM<Vec<i32>> {
    fn default() -> Self {
        Self::from_parts(
            Memory::default(),
            CircularStack::default(),
            CircularStack::zeroed(DEFAULT_CALL_STACK_SIZE),
            Vec::new(),
        )
    }
}

impl<S: OutputSink> VM<S> {
    /// Create a VM that sends OUT values to `sink`.
    pub fn with_sink(config: VmConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(
            Memory::new(config.memory_size)?,
            CircularStack::new(config.stack_size)?,
            CircularStack::new(config.call_stack_size)?,
            sink,
        ))
    }
}

impl<S> VM<S> {
    fn from_parts(memory: Memory, stack: CircularStack, call_stack: CircularStack, sink: S) -> Self {
        Self {
            registers: [Cell::default(); MAX_REGISTERS],
            flags: [Cell::default(); FLAG_COUNT],
            memory,
            stack,
            call_stack,
            pc: 0,
            sink,
        }
    }

    /// Position of the next instruction to fetch.
    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn register(&self, reg: Register) -> i32 {
        self.registers[reg.index()].read()
    }

    /// Snapshot of all registers, A first.
    pub fn registers(&self) -> [i32; MAX_REGISTERS] {
        self.registers.map(|c| c.read())
    }

    pub fn flag(&self, flag: Flag) -> i32 {
        self.flags[flag.index()].read()
    }

    /// Snapshot of the flag bank in slot order.
    pub fn flags(&self) -> [i32; FLAG_COUNT] {
        self.flags.map(|c| c.read())
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable access for loaders that pre-seed data memory.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn stack(&self) -> &CircularStack {
        &self.stack
    }

    pub fn call_stack(&self) -> &CircularStack {
        &self.call_stack
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Recompute zero and sign from the last instruction's result.
    /// Carry is left as it was.
    pub(crate) fn update_flags(&mut self, result: i32) {
        self.flags[Flag::Zero.index()].write(i32::from(result == 0));
        self.flags[Flag::Sign.index()].write(i32::from(result < 0));
    }
}
