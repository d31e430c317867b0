//! Instruction set and compiled body representation
//!
//! An employee body compiles to a flat instruction list over an operand
//! stack, with a constant pool and a fixed number of local slots. Jump
//! targets are absolute instruction indices, back-patched by the emitter.

use super::value::Value;
use crate::parser::ast::BinOp;

/// One stack-machine instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    /// Push a constant pool entry.
    LoadConst(usize),
    /// Push a copy of a local slot.
    LoadLocal(usize),
    /// Pop the stack top into a local slot.
    StoreLocal(usize),
    /// Pop two operands, apply the operator, push the result.
    Binary(BinOp),
    /// Pop a value and write its text form as one output line.
    Show,
    /// Read one input line and push it as text, first writing the prompt at
    /// the given constant pool index when present.
    Ask(Option<usize>),
    /// Pop the condition; jump to the index when it is falsy.
    BranchIfFalse(usize),
    /// Jump unconditionally to the index.
    Jump(usize),
    /// End execution of the body.
    Return,
}

/// A compiled employee body.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBody {
    pub(crate) instrs: Vec<Instr>,
    pub(crate) consts: Vec<Value>,
    pub(crate) slot_count: usize,
}

impl CodeBody {
    /// The instruction sequence.
    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    /// The constant pool.
    pub fn consts(&self) -> &[Value] {
        &self.consts
    }

    /// Number of local slots the body needs.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }
}
