//! Destinations for the OUT instruction.

use regvm_common::Register;

/// Receives every value emitted by OUT, in execution order.
pub trait OutputSink {
    fn emit(&mut self, register: Register, value: i32);
}

/// Collects emitted values in memory.
impl OutputSink for Vec<i32> {
    fn emit(&mut self, _register: Register, value: i32) {
        self.push(value);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn emit(&mut self, register: Register, value: i32) {
        (**self).emit(register, value);
    }
}

/// Prints each value on its own line of standard output, unbuffered by
/// the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, _register: Register, value: i32) {
        println!("{value}");
    }
}
