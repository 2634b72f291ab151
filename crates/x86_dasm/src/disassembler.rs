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

use crate::{
    byte_source::ByteSource,
    cpu_common::{ArchitectureMode, Vendor},
    decode::Decoder,
    error::{ConfigurationError, DecodeFault},
    instruction::Instruction,
};

/// Options controlling a disassembler for its lifetime
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisassemblerOptions {
    pub mode: ArchitectureMode,
    pub vendor: Vendor,
    /// Address of the byte at `start_offset`.
    pub address: u64,
    /// Copy each instruction's raw bytes onto it.
    pub keep_bytes: bool,
    pub start_offset: usize,
}

impl Default for DisassemblerOptions {
    fn default() -> Self {
        Self { mode: ArchitectureMode::Bits32, vendor: Vendor::Any, address: 0, keep_bytes: false, start_offset: 0 }
    }
}

/// Decodes instructions from a byte source, in order.
pub struct Disassembler<S: ByteSource> {
    source: S,
    opts: DisassemblerOptions,
    decoder: Decoder,
    cursor: usize,
    bytes_decoded: usize,
}

impl<S: ByteSource> Disassembler<S> {
    /// Create a new Disassembler over `source`. The source must hold at least one byte at or
    /// after the start offset.
    pub fn new(source: S, opts: DisassemblerOptions) -> Result<Self, ConfigurationError> {
        let len = source.len();
        if len == 0 {
            return Err(ConfigurationError::EmptySource);
        }
        if opts.start_offset >= len {
            return Err(ConfigurationError::OffsetOutOfRange { offset: opts.start_offset, len });
        }
        Ok(Self {
            source,
            opts,
            decoder: Decoder::new(opts.mode, opts.vendor),
            cursor: opts.start_offset,
            bytes_decoded: 0,
        })
    }

    /// Shorthand for the common case: `mode`, any vendor, starting at offset 0 of `source`.
    pub fn with_mode(source: S, mode: ArchitectureMode, address: u64, keep_bytes: bool) -> Result<Self, ConfigurationError> {
        Self::new(source, DisassemblerOptions { mode, address, keep_bytes, ..Default::default() })
    }

    /// Borrow the options
    pub fn options(&self) -> DisassemblerOptions {
        self.opts
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Decodes the instruction at the cursor and advances past it. Returns `None` once the
    /// cursor reaches the end of the source.
    pub fn next_instruction(&mut self) -> Option<Instruction> {
        if self.cursor >= self.source.len() {
            return None;
        }
        let pc = self.opts.address.wrapping_add((self.cursor - self.opts.start_offset) as u64);
        let instruction = self.decoder.decode(&self.source, self.cursor, pc, self.opts.keep_bytes);
        self.cursor += instruction.length;
        // A tail cut short by the end of the source is yielded but not counted as decoded.
        if instruction.error != Some(DecodeFault::Truncated) {
            self.bytes_decoded += instruction.length;
        }
        Some(instruction)
    }

    /// Restarts at the start offset and returns a lazy sequence over the whole source.
    pub fn disassemble(&mut self) -> Instructions<'_, S> {
        self.reset();
        Instructions { dasm: self }
    }

    /// Bytes of complete instructions decoded since construction or the last restart.
    pub fn bytes_decoded(&self) -> usize {
        self.bytes_decoded
    }

    pub fn reset(&mut self) {
        self.cursor = self.opts.start_offset;
        self.bytes_decoded = 0;
    }
}

/// The instruction sequence returned by [Disassembler::disassemble].
pub struct Instructions<'a, S: ByteSource> {
    dasm: &'a mut Disassembler<S>,
}

impl<S: ByteSource> Instructions<'_, S> {
    /// Bytes consumed by the instructions pulled so far.
    pub fn bytes_decoded(&self) -> usize {
        self.dasm.bytes_decoded
    }
}

impl<S: ByteSource> Iterator for Instructions<'_, S> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        self.dasm.next_instruction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mnemonic::Mnemonic;

    #[test]
    fn rejects_bad_configuration() {
        let empty: Vec<u8> = Vec::new();
        assert_eq!(Disassembler::new(empty, Default::default()).err(), Some(ConfigurationError::EmptySource));
        let opts = DisassemblerOptions { start_offset: 4, ..Default::default() };
        assert_eq!(
            Disassembler::new([0x90u8; 4], opts).err(),
            Some(ConfigurationError::OffsetOutOfRange { offset: 4, len: 4 })
        );
    }

    #[test]
    fn next_instruction_advances_and_ends() {
        let mut dasm = Disassembler::new(vec![0x90u8, 0xC3], Default::default()).unwrap();
        assert_eq!(dasm.next_instruction().map(|i| i.mnemonic), Some(Mnemonic::NOP));
        assert_eq!(dasm.next_instruction().map(|i| i.mnemonic), Some(Mnemonic::RET));
        assert!(dasm.next_instruction().is_none());
        assert_eq!(dasm.bytes_decoded(), 2);
    }

    #[test]
    fn disassemble_restarts() {
        let bytes = [0x90u8, 0x90, 0x90];
        let mut dasm = Disassembler::new(&bytes[..], Default::default()).unwrap();
        let mut seq = dasm.disassemble();
        seq.next();
        assert_eq!(seq.bytes_decoded(), 1);
        assert_eq!(dasm.disassemble().count(), 3);
        assert_eq!(dasm.bytes_decoded(), 3);
    }

    #[test]
    fn start_offset_and_address() {
        let bytes = [0xCCu8, 0x90, 0xEB, 0xFE];
        let opts = DisassemblerOptions { start_offset: 1, address: 0x400000, ..Default::default() };
        let mut dasm = Disassembler::new(&bytes[..], opts).unwrap();
        let all: Vec<_> = dasm.disassemble().collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].offset, 0x400000);
        assert_eq!(all[1].offset, 0x400001);
        assert_eq!(all[1].mnemonic, Mnemonic::JMP);
        assert!(all.iter().all(|i| i.bytes.is_none()));
    }
}
