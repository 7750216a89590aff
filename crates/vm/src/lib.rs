//! regvm virtual machine: executes flat program buffers.
//!
//! The VM is a register machine with:
//! - Eight general-purpose registers (`A`..`H`) and a four-cell flag bank
//! - A bounded linear data memory
//! - A bounded circular data stack, plus a reserved call stack
//!
//! # Usage
//!
//! ```
//! use regvm_common::{Instruction, Program, Register};
//! use regvm_vm::run;
//!
//! let program = Program::from_instructions(&[
//!     Instruction::Ldi { reg: Register::A, value: 42 },
//!     Instruction::Out { reg: Register::A },
//!     Instruction::Hlt,
//! ]);
//!
//! assert_eq!(run(&program).unwrap(), vec![42]);
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod execute;
pub mod machine;
pub mod memory;
pub mod sink;
pub mod stack;

pub use cell::Cell;
pub use config::{VmConfig, MAX_CAPACITY};
pub use error::{AddressError, ConfigError, RuntimeError};
pub use execute::{RunSummary, Step};
pub use machine::{Flag, VM};
pub use memory::Memory;
pub use sink::{OutputSink, StdoutSink};
pub use stack::CircularStack;

use regvm_common::Program;

/// Execute a program on a fresh default-sized VM and return every value
/// emitted by OUT, in order.
///
/// # Errors
///
/// Returns [`RuntimeError`] on the first illegal address, invalid
/// register, unfinished instruction or unknown opcode.
pub fn run(program: &Program) -> Result<Vec<i32>, RuntimeError> {
    let mut vm: VM = VM::default();
    vm.run(program)?;
    Ok(vm.into_sink())
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use regvm_common::register::ALL_REGISTERS;
    use regvm_common::{Instruction, Register};

    fn arb_register() -> impl Strategy<Value = Register> {
        prop::sample::select(&ALL_REGISTERS[..])
    }

    fn run_vm(instrs: &[Instruction]) -> VM {
        let mut vm: VM = VM::default();
        vm.run(&Program::from_instructions(instrs)).unwrap();
        vm
    }

    proptest! {
        /// LDI r, v followed by OUT r emits exactly v.
        #[test]
        fn ldi_then_out_emits_literal(reg in arb_register(), value in any::<i32>()) {
            let out = run(&Program::from_instructions(&[
                Instruction::Ldi { reg, value },
                Instruction::Out { reg },
            ])).unwrap();
            prop_assert_eq!(out, vec![value]);
        }

        /// MOV copies without changing the source.
        #[test]
        fn mov_is_a_pure_copy(
            src in arb_register(),
            dst in arb_register(),
            value in any::<i32>(),
        ) {
            let vm = run_vm(&[
                Instruction::Ldi { reg: src, value },
                Instruction::Mov { src, dst },
            ]);
            prop_assert_eq!(vm.register(dst), value);
            prop_assert_eq!(vm.register(src), value);
        }

        /// STV then LDM through any in-range address returns the value.
        #[test]
        fn store_load_roundtrip(
            reg in arb_register(),
            reg2 in arb_register(),
            addr in 0i32..65536,
            value in any::<i32>(),
        ) {
            let vm = run_vm(&[
                Instruction::Ldi { reg, value },
                Instruction::Stv { reg, addr },
                Instruction::Ldm { reg: reg2, addr },
            ]);
            prop_assert_eq!(vm.register(reg2), value);
            prop_assert_eq!(vm.memory().read(addr), Ok(value));
        }

        /// A single PSH/POP pair moves the value between registers.
        #[test]
        fn push_pop_roundtrip(
            reg in arb_register(),
            reg2 in arb_register(),
            value in any::<i32>(),
        ) {
            let vm = run_vm(&[
                Instruction::Ldi { reg, value },
                Instruction::Psh { reg },
                Instruction::Pop { reg: reg2 },
            ]);
            prop_assert_eq!(vm.register(reg2), value);
            prop_assert_eq!(vm.stack().pointer(), 0);
        }

        /// Zero and sign flags track the last result; carry is never set.
        #[test]
        fn flags_track_last_result(reg in arb_register(), value in any::<i32>()) {
            let vm = run_vm(&[Instruction::Ldi { reg, value }]);
            prop_assert_eq!(vm.flag(Flag::Zero), i32::from(value == 0));
            prop_assert_eq!(vm.flag(Flag::Sign), i32::from(value < 0));
            prop_assert_eq!(vm.flag(Flag::Carry), 0);
        }

        /// ADM adds with 32-bit wraparound.
        #[test]
        fn adm_wraps(a in any::<i32>(), b in any::<i32>(), addr in 0i32..65536) {
            let vm = run_vm(&[
                Instruction::Ldi { reg: Register::A, value: b },
                Instruction::Stv { reg: Register::A, addr },
                Instruction::Ldi { reg: Register::B, value: a },
                Instruction::Adm { reg: Register::B, addr },
            ]);
            prop_assert_eq!(vm.register(Register::B), a.wrapping_add(b));
        }

        /// Any address outside [0, 65536) faults on LDM.
        #[test]
        fn out_of_range_addresses_fault(
            addr in prop_oneof![i32::MIN..0, 65536i32..=i32::MAX],
        ) {
            let result = run(&Program::from_instructions(&[
                Instruction::Ldm { reg: Register::A, addr },
            ]));
            prop_assert_eq!(
                result,
                Err(RuntimeError::IllegalAddress { at: 0, address: addr, size: 65536 })
            );
        }
    }
}
