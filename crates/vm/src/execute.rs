//! Main execution loop and instruction dispatch.
//!
//! Each step decodes one instruction, executes it, and then the engine
//! (not the instruction) advances the program counter by the instruction's
//! width and recomputes the flags from the instruction's result. HLT is the
//! only instruction that skips both.

use std::time::{Duration, Instant};

use regvm_common::{Instruction, Program, Register};
use tracing::{debug, info};

use crate::error::RuntimeError;
use crate::machine::VM;
use crate::sink::OutputSink;

/// Outcome of a single [`VM::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction executed and the program counter moved past it.
    Continue,
    /// HLT executed. The program counter still points at it.
    Halted,
    /// The program counter is at or past the end of the buffer.
    Finished,
}

/// Statistics for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed, including a final HLT.
    pub executed: usize,
    /// True if the run ended on HLT rather than the end of the buffer.
    pub halted: bool,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// What an instruction hands back to the engine.
enum Effect {
    /// Result value the flags are computed from.
    Result(i32),
    Halt,
}

impl<S: OutputSink> VM<S> {
    /// Execute `program` from position 0 until HLT, the end of the buffer,
    /// or the first error.
    ///
    /// Register, flag, memory and stack contents carry over from earlier
    /// runs. On error, everything written by instructions before the
    /// faulting one stays in place.
    pub fn run(&mut self, program: &Program) -> Result<RunSummary, RuntimeError> {
        let started = Instant::now();
        info!(words = program.len(), "beginning execution");

        self.pc = 0;
        let mut executed = 0;
        let mut halted = false;

        loop {
            match self.step(program)? {
                Step::Continue => executed += 1,
                Step::Halted => {
                    executed += 1;
                    halted = true;
                    break;
                }
                Step::Finished => break,
            }
        }

        let elapsed = started.elapsed();
        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            executed, "finished execution"
        );

        Ok(RunSummary {
            executed,
            halted,
            elapsed,
        })
    }

    /// Fetch, decode and execute the instruction at the program counter.
    pub fn step(&mut self, program: &Program) -> Result<Step, RuntimeError> {
        let at = self.pc;
        if at >= program.len() {
            return Ok(Step::Finished);
        }

        let instr = Instruction::decode(program.words(), at)?;

        match self.dispatch(&instr, at)? {
            Effect::Halt => {
                info!(pc = at, "halted");
                Ok(Step::Halted)
            }
            Effect::Result(result) => {
                debug!(pc = at, instruction = %instr, result, "executed");
                self.pc += instr.width();
                self.update_flags(result);
                Ok(Step::Continue)
            }
        }
    }

    fn dispatch(&mut self, instr: &Instruction, at: usize) -> Result<Effect, RuntimeError> {
        let result = match *instr {
            Instruction::Hlt => return Ok(Effect::Halt),
            Instruction::Out { reg } => self.exec_out(reg),
            Instruction::Mov { src, dst } => self.exec_mov(src, dst),
            Instruction::Ldm { reg, addr } => self.exec_ldm(reg, addr, at)?,
            Instruction::Ldi { reg, value } => self.exec_ldi(reg, value),
            Instruction::Stv { reg, addr } => self.exec_stv(reg, addr, at)?,
            Instruction::Pop { reg } => self.exec_pop(reg),
            Instruction::Psh { reg } => self.exec_psh(reg),
            Instruction::Adm { reg, addr } => self.exec_adm(reg, addr, at)?,
        };
        Ok(Effect::Result(result))
    }

    fn exec_out(&mut self, reg: Register) -> i32 {
        let value = self.register(reg);
        self.sink.emit(reg, value);
        value
    }

    fn exec_mov(&mut self, src: Register, dst: Register) -> i32 {
        let value = self.register(src);
        self.registers[dst.index()].write(value);
        self.register(dst)
    }

    fn exec_ldm(&mut self, reg: Register, addr: i32, at: usize) -> Result<i32, RuntimeError> {
        let value = self.memory.read(addr).map_err(|e| e.at(at))?;
        self.registers[reg.index()].write(value);
        Ok(self.register(reg))
    }

    fn exec_ldi(&mut self, reg: Register, value: i32) -> i32 {
        self.registers[reg.index()].write(value);
        self.register(reg)
    }

    /// STV has no natural result; flags are computed from 0.
    fn exec_stv(&mut self, reg: Register, addr: i32, at: usize) -> Result<i32, RuntimeError> {
        let value = self.register(reg);
        self.memory.write(addr, value).map_err(|e| e.at(at))?;
        Ok(0)
    }

    fn exec_pop(&mut self, reg: Register) -> i32 {
        let value = self.stack.pop();
        self.registers[reg.index()].write(value);
        self.register(reg)
    }

    fn exec_psh(&mut self, reg: Register) -> i32 {
        let value = self.register(reg);
        self.stack.push(value);
        value
    }

    fn exec_adm(&mut self, reg: Register, addr: i32, at: usize) -> Result<i32, RuntimeError> {
        let value = self.memory.read(addr).map_err(|e| e.at(at))?;
        self.registers[reg.index()].add(value);
        Ok(self.register(reg))
    }
}
