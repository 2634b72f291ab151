/*
    x86_dasm
    Copyright 2022-2025 Daniel Balsom
    https://github.com/dbalsom/marty_dasm

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.
*/

use std::fmt;

use crate::{
    cpu_common::{ArchitectureMode, Prefixes},
    decode::flags::EntryFlags,
    error::DecodeFault,
    mnemonic::Mnemonic,
    opcode::Opcode,
    operand::Operand,
    translator::{self, Translate},
};

/// One decoded instruction. Owned by the caller and independent of the decoder that produced it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub opcode: Opcode,
    /// Address of the first byte, including the disassembler's base address.
    pub offset: u64,
    /// Bytes consumed. At least 1, even when decoding failed.
    pub length: usize,
    pub mode: ArchitectureMode,
    pub operand_size: u8,
    pub address_size: u8,
    pub prefixes: Prefixes,
    pub operands: [Operand; 4],
    pub is_far: bool,
    pub is_near: bool,
    pub flags: EntryFlags,
    pub error: Option<DecodeFault>,
    /// Raw bytes, present only when the disassembler was asked to keep them.
    pub bytes: Option<Vec<u8>>,
}

impl Instruction {
    /// Address of the instruction that follows this one.
    #[inline]
    pub fn pc(&self) -> u64 {
        self.offset.wrapping_add(self.length as u64)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }

    pub fn operand_count(&self) -> usize {
        self.operands.iter().take_while(|o| !o.is_none()).count()
    }

    /// The operand slots in use.
    pub fn active_operands(&self) -> &[Operand] {
        &self.operands[..self.operand_count()]
    }

    pub fn has_memory_operand(&self) -> bool {
        self.operands.iter().any(|o| o.is_memory())
    }
}

/// Renders through the process-wide default translator.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&translator::default_translator().translate(self))
    }
}
