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

//! Single-instruction decoding.
//!
//! Decoding runs in stages: legacy and REX prefixes are scanned, the opcode bytes walk the
//! shared [table::OpcodeTable] down to one entry, then the entry's operand templates are
//! materialised from the modrm, SIB, displacement and immediate bytes that follow. Any failure
//! produces an instruction carrying the [DecodeFault] and the number of bytes inspected.

pub mod flags;
pub mod modrm;
mod optable;
pub mod table;

use crate::{
    byte_source::{ByteCursor, ByteSource},
    cpu_common::{
        effective_address_size,
        effective_operand_size,
        segment_override_flag,
        ArchitectureMode,
        PrefixFlags,
        Prefixes,
        Vendor,
    },
    decode::{
        modrm::{decode_memory, ModRmByte},
        table::{InstTemplate, LookupTable, Node, OpcodeTable, OperandTemplate, Sz, TableKind},
    },
    error::DecodeFault,
    instruction::Instruction,
    mnemonic::Mnemonic,
    opcode::Opcode,
    operand::{FarPointer, Immediate, MemoryOperand, Operand, RelativeTarget},
    register::Register,
};

/// The longest encoding the processor accepts.
pub const MAX_INSTRUCTION_LENGTH: usize = 15;

/// Scratch state for the instruction being decoded. Reset at the start of every decode.
#[derive(Copy, Clone, Debug, Default)]
struct DecodeState {
    /// Segment, lock, operand-size and address-size prefixes still in effect.
    prefix_flags: u32,
    rex: u8,
    /// The last F2 or F3 byte seen, 0 if none or once consumed as a mandatory prefix.
    last_rep: u8,
    modrm: Option<ModRmByte>,
    opcode: Opcode,
    operand_size: u8,
    address_size: u8,
}

impl DecodeState {
    #[inline]
    fn has(&self, flag: u32) -> bool {
        self.prefix_flags & flag != 0
    }
}

/// Decodes one instruction at a time for a fixed mode and vendor filter.
#[derive(Clone, Debug)]
pub struct Decoder {
    mode: ArchitectureMode,
    vendor: Vendor,
    state: DecodeState,
}

impl Decoder {
    pub fn new(mode: ArchitectureMode, vendor: Vendor) -> Self {
        // Build the shared table up front rather than inside the first decode.
        let _ = OpcodeTable::get();
        Self { mode, vendor, state: DecodeState::default() }
    }

    pub fn mode(&self) -> ArchitectureMode {
        self.mode
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// Decodes the instruction starting at `offset` in `source`, located at address `pc`.
    /// Always returns an instruction of at least one byte; failures are recorded on it.
    pub fn decode<S: ByteSource + ?Sized>(
        &mut self,
        source: &S,
        offset: usize,
        pc: u64,
        keep_bytes: bool,
    ) -> Instruction {
        self.state = DecodeState::default();
        let mut cursor = ByteCursor::new(source, offset);

        let result = self.decode_inner(&mut cursor, pc).and_then(|i| {
            if cursor.consumed() > MAX_INSTRUCTION_LENGTH {
                Err(DecodeFault::TooLong)
            }
            else {
                Ok(i)
            }
        });

        let mut instruction = match result {
            Ok(instruction) => instruction,
            Err(fault) => {
                log::trace!(
                    "decode failed at {:#x} after {} byte(s): {}",
                    pc,
                    cursor.consumed(),
                    fault
                );
                Instruction {
                    mnemonic: Mnemonic::Invalid,
                    opcode: self.state.opcode,
                    offset: pc,
                    length: cursor.consumed().max(1),
                    mode: self.mode,
                    error: Some(fault),
                    ..Default::default()
                }
            }
        };
        if keep_bytes {
            instruction.bytes = Some(cursor.consumed_bytes());
        }
        instruction
    }

    fn decode_inner<S: ByteSource + ?Sized>(
        &mut self,
        cursor: &mut ByteCursor<'_, S>,
        pc: u64,
    ) -> Result<Instruction, DecodeFault> {
        let first = self.read_prefixes(cursor)?;
        let table = OpcodeTable::get();

        self.state.opcode = Opcode::from(first);
        let index = self.walk(cursor, table.root().slots[first as usize])?;
        let entry: InstTemplate = *table.entry(index);

        if self.mode.is_64() && entry.flags.invalid_64() {
            return Err(DecodeFault::InvalidIn64BitMode);
        }

        let prefixes = Prefixes { flags: self.state.prefix_flags, rex: self.state.rex };
        let opsize_prefix = self.state.has(PrefixFlags::OPERAND_SIZE);
        self.state.operand_size = match self.mode {
            ArchitectureMode::Bits64 if prefixes.rex_w() => 64,
            ArchitectureMode::Bits64 if opsize_prefix => 16,
            ArchitectureMode::Bits64 if entry.flags.default_64() => 64,
            mode => effective_operand_size(mode, false, opsize_prefix),
        };
        self.state.address_size = effective_address_size(self.mode, self.state.has(PrefixFlags::ADDRESS_SIZE));

        if entry.flags.has_modrm() {
            self.modrm(cursor)?;
        }

        let mut operands = [Operand::None; 4];
        for (slot, template) in operands.iter_mut().zip(entry.operands) {
            *slot = self.decode_operand(cursor, template)?;
        }

        // Relative targets are taken from the end of the instruction.
        let end = pc.wrapping_add(cursor.consumed() as u64);
        for operand in operands.iter_mut() {
            if let Operand::Relative(rel) = operand {
                rel.target = truncate(end.wrapping_add(rel.displacement as u64), rel.size);
            }
        }

        let mut flags = self.state.prefix_flags;
        match self.state.last_rep {
            0xF3 if entry.flags.is_string() => flags |= PrefixFlags::REP,
            0xF3 => flags |= PrefixFlags::REPE,
            0xF2 => flags |= PrefixFlags::REPNE,
            _ => {}
        }

        // Only the one-byte 90 form is a no-op; 87 C0 still zero-extends rax in 64-bit mode.
        let mut mnemonic = entry.mnemonic;
        if mnemonic == Mnemonic::XCHG
            && self.state.opcode == Opcode::from(0x90)
            && matches!(
                (operands[0], operands[1]),
                (Operand::Register(Register::AX), Operand::Register(Register::AX))
                    | (Operand::Register(Register::EAX), Operand::Register(Register::EAX))
            )
        {
            mnemonic = Mnemonic::NOP;
            operands = [Operand::None; 4];
        }
        if mnemonic == Mnemonic::NOP && flags & PrefixFlags::REPE != 0 {
            mnemonic = Mnemonic::PAUSE;
            flags &= !PrefixFlags::REPE;
        }

        Ok(Instruction {
            mnemonic,
            opcode: self.state.opcode,
            offset: pc,
            length: cursor.consumed(),
            mode: self.mode,
            operand_size: self.state.operand_size,
            address_size: self.state.address_size,
            prefixes: Prefixes { flags, rex: self.state.rex },
            operands,
            is_far: entry.flags.is_far(),
            is_near: entry.flags.is_near(),
            flags: entry.flags,
            error: None,
            bytes: None,
        })
    }

    /// Consumes prefixes and returns the first opcode byte. Repeated prefixes are accepted and
    /// the last of each kind wins. A REX byte only counts when nothing but the opcode follows it.
    fn read_prefixes<S: ByteSource + ?Sized>(&mut self, cursor: &mut ByteCursor<'_, S>) -> Result<u8, DecodeFault> {
        let st = &mut self.state;
        loop {
            if cursor.consumed() >= MAX_INSTRUCTION_LENGTH {
                return Err(DecodeFault::TooLong);
            }
            let byte = cursor.read_u8()?;
            match byte {
                0x40..=0x4F if self.mode.is_64() => {
                    st.rex = byte;
                    continue;
                }
                0x66 => st.prefix_flags |= PrefixFlags::OPERAND_SIZE,
                0x67 => st.prefix_flags |= PrefixFlags::ADDRESS_SIZE,
                0xF0 => st.prefix_flags |= PrefixFlags::LOCK,
                0xF2 | 0xF3 => st.last_rep = byte,
                _ => match segment_override_flag(byte) {
                    Some(flag) => st.prefix_flags = (st.prefix_flags & !PrefixFlags::SEG_OVERRIDE_MASK) | flag,
                    None => return Ok(byte),
                },
            }
            st.rex = 0;
        }
    }

    fn modrm<S: ByteSource + ?Sized>(&mut self, cursor: &mut ByteCursor<'_, S>) -> Result<ModRmByte, DecodeFault> {
        if let Some(modrm) = self.state.modrm {
            return Ok(modrm);
        }
        let modrm = ModRmByte::from_byte(cursor.read_u8()?);
        self.state.modrm = Some(modrm);
        Ok(modrm)
    }

    /// Descends from `node` to a table entry.
    fn walk<S: ByteSource + ?Sized>(&mut self, cursor: &mut ByteCursor<'_, S>, node: Node) -> Result<u16, DecodeFault> {
        let table = match node {
            Node::Empty => return Err(DecodeFault::UnknownOpcode),
            Node::Leaf(entry) => return Ok(entry),
            Node::Table(t) => OpcodeTable::get().table(t),
        };

        let next = match table.kind {
            TableKind::Opcode => {
                let byte = cursor.read_u8()?;
                self.state.opcode.advance(byte);
                table.slots[byte as usize]
            }
            TableKind::Sse => return self.walk_sse(cursor, table),
            TableKind::Reg => table.slots[self.modrm(cursor)?.reg_value() as usize],
            TableKind::Mod => table.slots[self.modrm(cursor)?.is_register() as usize],
            TableKind::Rm => table.slots[self.modrm(cursor)?.rm_value() as usize],
            TableKind::Mode => table.slots[self.mode.is_64() as usize],
            TableKind::OperandSize => {
                let size = effective_operand_size(
                    self.mode,
                    self.state.rex & 0x08 != 0,
                    self.state.has(PrefixFlags::OPERAND_SIZE),
                );
                table.slots[size_slot(size)]
            }
            TableKind::AddressSize => {
                let size = effective_address_size(self.mode, self.state.has(PrefixFlags::ADDRESS_SIZE));
                table.slots[size_slot(size)]
            }
            TableKind::Vendor => match self.vendor {
                Vendor::Amd => table.slots[0],
                Vendor::Intel => table.slots[1],
                Vendor::Any if table.slots[0] != Node::Empty => table.slots[0],
                Vendor::Any => table.slots[1],
            },
        };
        self.walk(cursor, next)
    }

    /// Resolves a mandatory-prefix table. The last F2/F3 is tried first, then 66, then the
    /// unprefixed form. A prefix is only consumed if its branch resolves to an entry.
    fn walk_sse<S: ByteSource + ?Sized>(
        &mut self,
        cursor: &mut ByteCursor<'_, S>,
        table: &'static LookupTable,
    ) -> Result<u16, DecodeFault> {
        let rep_slot = match self.state.last_rep {
            0xF2 => Some(2),
            0xF3 => Some(3),
            _ => None,
        };
        if let Some(slot) = rep_slot.filter(|s| table.slots[*s] != Node::Empty) {
            let saved = self.state.last_rep;
            self.state.last_rep = 0;
            match self.walk(cursor, table.slots[slot]) {
                Err(DecodeFault::UnknownOpcode) => self.state.last_rep = saved,
                result => return result,
            }
        }

        if self.state.has(PrefixFlags::OPERAND_SIZE) && table.slots[1] != Node::Empty {
            self.state.prefix_flags &= !PrefixFlags::OPERAND_SIZE;
            match self.walk(cursor, table.slots[1]) {
                Err(DecodeFault::UnknownOpcode) => self.state.prefix_flags |= PrefixFlags::OPERAND_SIZE,
                result => return result,
            }
        }

        self.walk(cursor, table.slots[0])
    }

    fn resolve_size(&self, sz: Sz) -> u16 {
        let opsize = self.state.operand_size as u16;
        match sz {
            Sz::None => 0,
            Sz::B => 8,
            Sz::W => 16,
            Sz::D => 32,
            Sz::Q => 64,
            Sz::T => 80,
            Sz::Dq => 128,
            Sz::V | Sz::P => opsize,
            Sz::Z if opsize == 16 => 16,
            Sz::Z => 32,
            Sz::Y if opsize == 64 => 64,
            Sz::Y => 32,
            Sz::Native if self.mode.is_64() => 64,
            Sz::Native => 32,
        }
    }

    fn memory<S: ByteSource + ?Sized>(
        &mut self,
        cursor: &mut ByteCursor<'_, S>,
        modrm: ModRmByte,
        size: u16,
    ) -> Result<Operand, DecodeFault> {
        let mem = decode_memory(cursor, modrm, self.state.rex, self.state.address_size, self.mode.is_64(), size)?;
        Ok(Operand::Memory(mem))
    }

    fn decode_operand<S: ByteSource + ?Sized>(
        &mut self,
        cursor: &mut ByteCursor<'_, S>,
        template: OperandTemplate,
    ) -> Result<Operand, DecodeFault> {
        use OperandTemplate as T;

        let rex = self.state.rex;
        let rex_present = rex != 0;
        let rex_r = (rex & 0x04) << 1;
        let rex_b = (rex & 0x01) << 3;

        let operand = match template {
            T::NoOperand => Operand::None,
            T::ModRm(sz) => {
                let modrm = self.modrm(cursor)?;
                let size = self.resolve_size(sz);
                if modrm.is_register() {
                    Operand::Register(Register::gpr(size, modrm.rm_value() | rex_b, rex_present))
                }
                else {
                    self.memory(cursor, modrm, size)?
                }
            }
            T::ModRmMemory(sz) => {
                let modrm = self.modrm(cursor)?;
                if modrm.is_register() {
                    return Err(DecodeFault::InvalidOperand);
                }
                let size = self.resolve_size(sz);
                self.memory(cursor, modrm, size)?
            }
            T::ModRmReg(sz) => {
                let modrm = self.modrm(cursor)?;
                Operand::Register(Register::gpr(self.resolve_size(sz), modrm.reg_value() | rex_r, rex_present))
            }
            T::ModRmRmReg(sz) => {
                let modrm = self.modrm(cursor)?;
                Operand::Register(Register::gpr(self.resolve_size(sz), modrm.rm_value() | rex_b, rex_present))
            }
            T::Immediate(sz) => {
                let size = self.resolve_size(sz);
                let value = cursor.read_uint(size as usize / 8)?;
                // Iz under a 64-bit operand size is a sign-extended imm32.
                let sign_extended = sz == Sz::Z && self.state.operand_size == 64;
                Operand::Immediate(Immediate { value, size, sign_extended })
            }
            T::ImmediateSigned(sz) => {
                let size = self.resolve_size(sz);
                let value = cursor.read_uint(size as usize / 8)?;
                Operand::Immediate(Immediate { value, size, sign_extended: true })
            }
            T::Relative(sz) => {
                let width = self.resolve_size(sz);
                let displacement = match width {
                    8 => cursor.read_i8()? as i64,
                    16 => cursor.read_i16()? as i64,
                    _ => cursor.read_i32()? as i64,
                };
                Operand::Relative(RelativeTarget { displacement, size: self.state.operand_size as u16, target: 0 })
            }
            T::Offset(sz) => {
                let width = self.state.address_size;
                let raw = cursor.read_uint(width as usize / 8)?;
                Operand::Memory(MemoryOperand {
                    displacement: crate::operand::sign_extend(raw, width as u16),
                    displacement_size: width,
                    size: self.resolve_size(sz),
                    ..Default::default()
                })
            }
            T::FarPointer => {
                let size = if self.state.operand_size == 16 { 16 } else { 32 };
                let offset = cursor.read_uint(size as usize / 8)? as u32;
                let segment = cursor.read_u16()?;
                Operand::FarPointer(FarPointer { segment, offset, size })
            }
            T::SegmentReg => {
                let modrm = self.modrm(cursor)?;
                Operand::Register(Register::segment(modrm.reg_value()).ok_or(DecodeFault::InvalidSegmentRegister)?)
            }
            T::ControlReg => Operand::Register(Register::control(self.modrm(cursor)?.reg_value() | rex_r)),
            T::DebugReg => Operand::Register(Register::debug(self.modrm(cursor)?.reg_value() | rex_r)),
            T::MmxReg => Operand::Register(Register::mmx(self.modrm(cursor)?.reg_value())),
            T::MmxModRm(sz) => {
                let modrm = self.modrm(cursor)?;
                if modrm.is_register() {
                    Operand::Register(Register::mmx(modrm.rm_value()))
                }
                else {
                    let size = self.resolve_size(sz);
                    self.memory(cursor, modrm, size)?
                }
            }
            T::MmxRm => {
                let modrm = self.modrm(cursor)?;
                if !modrm.is_register() {
                    return Err(DecodeFault::InvalidOperand);
                }
                Operand::Register(Register::mmx(modrm.rm_value()))
            }
            T::XmmReg => Operand::Register(Register::xmm(self.modrm(cursor)?.reg_value() | rex_r)),
            T::XmmModRm(sz) => {
                let modrm = self.modrm(cursor)?;
                if modrm.is_register() {
                    Operand::Register(Register::xmm(modrm.rm_value() | rex_b))
                }
                else {
                    let size = self.resolve_size(sz);
                    self.memory(cursor, modrm, size)?
                }
            }
            T::XmmRm => {
                let modrm = self.modrm(cursor)?;
                if !modrm.is_register() {
                    return Err(DecodeFault::InvalidOperand);
                }
                Operand::Register(Register::xmm(modrm.rm_value() | rex_b))
            }
            T::St0 => Operand::Register(Register::ST0),
            T::StRm => Operand::Register(Register::x87(self.modrm(cursor)?.rm_value())),
            T::FixedRegister(reg) => Operand::Register(reg),
            T::SizedRegister(index, sz) => Operand::Register(Register::gpr(self.resolve_size(sz), index, false)),
            T::OpcodeRegister(sz) => {
                let index = (self.state.opcode.base_opcode() & 0x07) | rex_b;
                Operand::Register(Register::gpr(self.resolve_size(sz), index, rex_present))
            }
            T::Constant(value) => Operand::Constant(value as u64),
        };
        Ok(operand)
    }
}

fn size_slot(size: u8) -> usize {
    match size {
        16 => 0,
        32 => 1,
        _ => 2,
    }
}

/// Truncates an address to the given operand width in bits.
fn truncate(address: u64, size: u16) -> u64 {
    match size {
        8 => address & 0xFF,
        16 => address & 0xFFFF,
        32 => address & 0xFFFF_FFFF,
        _ => address,
    }
}

/// Decodes a single instruction from the start of `bytes`.
pub fn decode_one(bytes: &[u8], mode: ArchitectureMode, vendor: Vendor, pc: u64) -> Instruction {
    Decoder::new(mode, vendor).decode(bytes, 0, pc, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d32(bytes: &[u8]) -> Instruction {
        decode_one(bytes, ArchitectureMode::Bits32, Vendor::Any, 0)
    }

    fn d64(bytes: &[u8]) -> Instruction {
        decode_one(bytes, ArchitectureMode::Bits64, Vendor::Any, 0)
    }

    #[test]
    fn mov_eax_imm32() {
        let i = d32(&[0xB8, 0x34, 0x12, 0x00, 0x00]);
        assert_eq!(i.mnemonic, Mnemonic::MOV);
        assert_eq!(i.length, 5);
        assert_eq!(i.operands[0], Operand::Register(Register::EAX));
        assert_eq!(i.operands[1].value(), 0x1234);
        assert!(i.operands[2].is_none() && i.operands[3].is_none());
        assert_eq!(i.bytes.as_deref(), Some(&[0xB8, 0x34, 0x12, 0x00, 0x00][..]));
    }

    #[test]
    fn invalid_segment_register() {
        let i = d32(&[0x8C, 0x38]);
        assert!(i.is_error());
        assert_eq!(i.error, Some(DecodeFault::InvalidSegmentRegister));
        assert_eq!(i.mnemonic, Mnemonic::Invalid);
        assert!(i.length >= 1);
    }

    #[test]
    fn rip_relative() {
        let i = d64(&[0x48, 0x8B, 0x05, 0xF7, 0xFF, 0xFF, 0xFF]);
        assert_eq!(i.mnemonic, Mnemonic::MOV);
        assert_eq!(i.length, 7);
        assert_eq!(i.operands[0], Operand::Register(Register::RAX));
        assert_eq!(i.operands[1].base(), Some(Register::RIP));
        assert_eq!(i.operands[1].value(), -9);
    }

    #[test]
    fn nop_and_pause() {
        let i = d32(&[0x90]);
        assert_eq!((i.mnemonic, i.length, i.operand_count()), (Mnemonic::NOP, 1, 0));
        let i = d32(&[0xF3, 0x90]);
        assert_eq!((i.mnemonic, i.length), (Mnemonic::PAUSE, 2));
        assert!(!i.prefixes.repe());
        // REX.B turns 90 into a real exchange.
        let i = d64(&[0x41, 0x90]);
        assert_eq!(i.mnemonic, Mnemonic::XCHG);
        assert_eq!(i.operands[0], Operand::Register(Register::R8D));

        // The ModRM exchange of a register with itself is never folded.
        for bytes in [&[0x87, 0xC0][..], &[0x66, 0x87, 0xC0], &[0xF3, 0x87, 0xC0]] {
            assert_eq!(d32(bytes).mnemonic, Mnemonic::XCHG);
            assert_eq!(d64(bytes).mnemonic, Mnemonic::XCHG);
        }
        let i = d64(&[0x87, 0xC0]);
        assert_eq!(i.operands[0], Operand::Register(Register::EAX));
        assert_eq!(i.operands[1], Operand::Register(Register::EAX));
    }

    #[test]
    fn address_size_prefix_selects_16_bit_forms() {
        let i = d32(&[0x67, 0x0F, 0x02, 0x00]);
        assert_eq!(i.mnemonic, Mnemonic::LAR);
        assert_eq!(i.length, 4);
        assert_eq!(i.address_size, 16);
        let mem = i.operands[1].memory().unwrap();
        assert_eq!((mem.base, mem.index, mem.size), (Some(Register::BX), Some(Register::SI), 16));
    }

    #[test]
    fn vendor_filtering() {
        let clgi = [0x0F, 0x01, 0xDD];
        let invept = [0x66, 0x0F, 0x38, 0x80, 0x00];
        let with = |bytes: &[u8], vendor| decode_one(bytes, ArchitectureMode::Bits32, vendor, 0);

        assert_eq!(with(&clgi, Vendor::Amd).mnemonic, Mnemonic::CLGI);
        assert_eq!(with(&clgi, Vendor::Any).mnemonic, Mnemonic::CLGI);
        assert_eq!(with(&clgi, Vendor::Intel).error, Some(DecodeFault::UnknownOpcode));

        assert_eq!(with(&invept, Vendor::Intel).mnemonic, Mnemonic::INVEPT);
        assert_eq!(with(&invept, Vendor::Any).mnemonic, Mnemonic::INVEPT);
        assert!(with(&invept, Vendor::Amd).is_error());
        assert!(!with(&invept, Vendor::Intel).prefixes.operand_size());
    }

    #[test]
    fn mandatory_prefix_falls_back_when_unmatched() {
        // 66 0F 12 with a register operand has no 66 form; it stays an operand-size prefix.
        let i = d32(&[0x66, 0x0F, 0x12, 0xC1]);
        assert_eq!(i.mnemonic, Mnemonic::MOVHLPS);
        assert!(i.prefixes.operand_size());
        // F3 0F B8 is popcnt; without F3 there is nothing at 0F B8.
        let i = d32(&[0xF3, 0x0F, 0xB8, 0xC1]);
        assert_eq!(i.mnemonic, Mnemonic::POPCNT);
        assert!(!i.prefixes.repe());
        assert!(d32(&[0x0F, 0xB8, 0xC1]).is_error());
    }

    #[test]
    fn mode_specific_entries() {
        assert_eq!(d32(&[0x63, 0xC8]).mnemonic, Mnemonic::ARPL);
        let i = d64(&[0x48, 0x63, 0xC8]);
        assert_eq!(i.mnemonic, Mnemonic::MOVSXD);
        assert_eq!(i.operands[0], Operand::Register(Register::RCX));
        assert_eq!(i.operands[1], Operand::Register(Register::EAX));

        assert_eq!(d64(&[0x06]).error, Some(DecodeFault::InvalidIn64BitMode));
        assert_eq!(d64(&[0x0F, 0x01, 0xF8]).mnemonic, Mnemonic::SWAPGS);
        assert!(d32(&[0x0F, 0x01, 0xF8]).is_error());
    }

    #[test]
    fn default_64_bit_operand_size() {
        let i = d64(&[0x50]);
        assert_eq!(i.operands[0], Operand::Register(Register::RAX));
        let i = d64(&[0x66, 0x50]);
        assert_eq!(i.operands[0], Operand::Register(Register::AX));
        let i = d64(&[0x41, 0x57]);
        assert_eq!(i.operands[0], Operand::Register(Register::R15));
    }

    #[test]
    fn size_variant_mnemonics() {
        assert_eq!(d32(&[0x98]).mnemonic, Mnemonic::CWDE);
        assert_eq!(d32(&[0x66, 0x98]).mnemonic, Mnemonic::CBW);
        assert_eq!(d64(&[0x48, 0x98]).mnemonic, Mnemonic::CDQE);
        assert_eq!(d32(&[0xA5]).mnemonic, Mnemonic::MOVSD);
        assert_eq!(d64(&[0x48, 0xA5]).mnemonic, Mnemonic::MOVSQ);
        assert_eq!(d32(&[0xE3, 0x00]).mnemonic, Mnemonic::JECXZ);
        assert_eq!(d32(&[0x67, 0xE3, 0x00]).mnemonic, Mnemonic::JCXZ);
        assert_eq!(d64(&[0x9C]).mnemonic, Mnemonic::PUSHFQ);
    }

    #[test]
    fn rep_prefix_classes() {
        let i = d32(&[0xF3, 0xA4]);
        assert_eq!(i.mnemonic, Mnemonic::MOVSB);
        assert!(i.prefixes.rep());
        let i = d32(&[0xF3, 0xA6]);
        assert!(i.prefixes.repe());
        let i = d32(&[0xF2, 0xAE]);
        assert!(i.prefixes.repne());
    }

    #[test]
    fn immediates_sign_extend() {
        let i = d32(&[0x83, 0xC0, 0xFF]);
        assert_eq!(i.mnemonic, Mnemonic::ADD);
        assert_eq!(i.operands[1].value(), -1);
        let i = d64(&[0x48, 0x05, 0x00, 0x00, 0x00, 0x80]);
        match i.operands[1] {
            Operand::Immediate(imm) => {
                assert!(imm.sign_extended);
                assert_eq!(imm.size, 32);
            }
            other => panic!("unexpected operand {:?}", other),
        }
        let i = d64(&[0x48, 0xB8, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(i.length, 10);
        assert_eq!(i.operands[1].value(), 0x0807060504030201);
    }

    #[test]
    fn relative_targets() {
        let i = decode_one(&[0xEB, 0xFE], ArchitectureMode::Bits32, Vendor::Any, 0x1000);
        assert_eq!(i.operands[0], Operand::Relative(RelativeTarget { displacement: -2, size: 32, target: 0x1000 }));
        let i = decode_one(&[0x66, 0xE9, 0x0A, 0x00], ArchitectureMode::Bits32, Vendor::Any, 0x8000_0008);
        match i.operands[0] {
            Operand::Relative(rel) => assert_eq!(rel.target, 0x16),
            other => panic!("unexpected operand {:?}", other),
        }
        let i = decode_one(&[0xE8, 0x00, 0x00, 0x00, 0x00], ArchitectureMode::Bits64, Vendor::Any, 0xFFFF_FFFF_0000);
        match i.operands[0] {
            Operand::Relative(rel) => assert_eq!((rel.size, rel.target), (64, 0xFFFF_FFFF_0005)),
            other => panic!("unexpected operand {:?}", other),
        }
    }

    #[test]
    fn rex_byte_registers() {
        let i = d64(&[0x40, 0x88, 0xE6]);
        assert_eq!(i.operands[0], Operand::Register(Register::SIL));
        assert_eq!(i.operands[1], Operand::Register(Register::SPL));
        let i = d32(&[0x88, 0xE6]);
        assert_eq!(i.operands[0], Operand::Register(Register::DH));
        // A legacy prefix after REX cancels it.
        let i = d64(&[0x48, 0x66, 0x89, 0xC0]);
        assert_eq!(i.operands[0], Operand::Register(Register::AX));
    }

    #[test]
    fn truncation_and_length_limit() {
        let i = d32(&[0xA1, 0x37]);
        assert_eq!(i.error, Some(DecodeFault::Truncated));
        assert_eq!(i.length, 2);
        let i = d32(&[0x66; 16]);
        assert_eq!(i.error, Some(DecodeFault::TooLong));
        assert_eq!(i.length, 15);
    }

    #[test]
    fn opcode_record() {
        let i = d32(&[0x66, 0x0F, 0x38, 0x80, 0x00]);
        assert_eq!(i.opcode.to_string(), "0F 38 80");
        assert_eq!(d32(&[0x90]).opcode.to_string(), "90");
    }

    #[test]
    fn x87_aliases_and_forms() {
        assert_eq!(d32(&[0xD9, 0xD8]).mnemonic, Mnemonic::FSTP1);
        assert_eq!(d32(&[0xDF, 0xC0]).mnemonic, Mnemonic::FFREEP);
        assert_eq!(d32(&[0xD9, 0xE8]).mnemonic, Mnemonic::FLD1);
        let i = d32(&[0xDD, 0x00]);
        assert_eq!(i.mnemonic, Mnemonic::FLD);
        assert_eq!(i.operands[0].size(), 64);
    }

    #[test]
    fn memory_only_operand_rejects_register_form() {
        assert_eq!(d32(&[0x8D, 0xC0]).error, Some(DecodeFault::InvalidOperand));
    }
}
