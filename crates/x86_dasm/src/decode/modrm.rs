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

//! ModRM and SIB decoding.

use crate::{
    byte_source::{ByteCursor, ByteSource},
    error::DecodeFault,
    operand::MemoryOperand,
    register::Register,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModRmByte {
    b_mod: u8,
    b_reg: u8,
    b_rm: u8,
    /// Displacement width in bytes under 16-bit addressing.
    disp16: u8,
    /// Displacement width in bytes under 32 and 64-bit addressing, not counting a SIB base of 5.
    disp32: u8,
}

const MODRM_TABLE: [ModRmByte; 256] = {
    let mut table = [ModRmByte { b_mod: 0, b_reg: 0, b_rm: 0, disp16: 0, disp32: 0 }; 256];
    let mut byte: usize = 0;

    while byte < 256 {
        let b = byte as u8;
        let b_mod = (b >> 6) & 0x03;
        let b_rm = b & 0x07;

        let (disp16, disp32) = match b_mod {
            // [disp16] and [disp32] are the single special cases of mod 00
            0b00 => (if b_rm == 0b110 { 2 } else { 0 }, if b_rm == 0b101 { 4 } else { 0 }),
            0b01 => (1, 1),
            0b10 => (2, 4),
            _ => (0, 0),
        };

        table[byte] = ModRmByte { b_mod, b_reg: (b >> 3) & 0x07, b_rm, disp16, disp32 };
        byte += 1;
    }
    table
};

impl ModRmByte {
    #[inline(always)]
    pub fn from_byte(byte: u8) -> ModRmByte {
        MODRM_TABLE[byte as usize]
    }

    /// Return the 'mod' field (top two bits) of the modrm byte.
    #[inline(always)]
    pub fn mod_value(&self) -> u8 {
        self.b_mod
    }

    #[inline(always)]
    pub fn reg_value(&self) -> u8 {
        self.b_reg
    }

    #[inline(always)]
    pub fn rm_value(&self) -> u8 {
        self.b_rm
    }

    /// Whether the r/m field names a register rather than memory.
    #[inline(always)]
    pub fn is_register(&self) -> bool {
        self.mod_value() == 0b11
    }

    #[inline(always)]
    pub fn has_sib(&self, address_size: u8) -> bool {
        address_size != 16 && !self.is_register() && self.b_rm == 0b100
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SibByte {
    pub scale: u8,
    pub index: u8,
    pub base: u8,
}

impl SibByte {
    pub fn from_byte(byte: u8) -> SibByte {
        SibByte { scale: 1 << (byte >> 6), index: (byte >> 3) & 0x07, base: byte & 0x07 }
    }
}

const MODRM16_BASE: [Option<Register>; 8] = [
    Some(Register::BX),
    Some(Register::BX),
    Some(Register::BP),
    Some(Register::BP),
    Some(Register::SI),
    Some(Register::DI),
    Some(Register::BP),
    Some(Register::BX),
];

const MODRM16_INDEX: [Option<Register>; 8] =
    [Some(Register::SI), Some(Register::DI), Some(Register::SI), Some(Register::DI), None, None, None, None];

/// Decodes the memory form of a modrm byte: reads any SIB byte and displacement that follow.
pub fn decode_memory<S: ByteSource + ?Sized>(
    cursor: &mut ByteCursor<'_, S>,
    modrm: ModRmByte,
    rex: u8,
    address_size: u8,
    mode_64: bool,
    size: u16,
) -> Result<MemoryOperand, DecodeFault> {
    let mut mem = MemoryOperand { size, ..Default::default() };

    if address_size == 16 {
        if !(modrm.mod_value() == 0 && modrm.b_rm == 0b110) {
            mem.base = MODRM16_BASE[modrm.b_rm as usize];
            mem.index = MODRM16_INDEX[modrm.b_rm as usize];
            if mem.index.is_some() {
                mem.scale = 1;
            }
        }
        read_displacement(cursor, &mut mem, modrm.disp16)?;
        return Ok(mem);
    }

    let rex_b = (rex & 0x01) << 3;
    let rex_x = (rex & 0x02) << 2;
    let mut disp_width = modrm.disp32;

    if modrm.has_sib(address_size) {
        let sib = SibByte::from_byte(cursor.read_u8()?);
        let index = sib.index | rex_x;
        if index != 0b100 {
            mem.index = Some(Register::gpr(address_size as u16, index, false));
            mem.scale = sib.scale;
        }
        if sib.base == 0b101 && modrm.mod_value() == 0 {
            disp_width = 4;
        }
        else {
            mem.base = Some(Register::gpr(address_size as u16, sib.base | rex_b, false));
        }
    }
    else if modrm.mod_value() == 0 && modrm.b_rm == 0b101 {
        if mode_64 {
            mem.base = Some(if address_size == 32 { Register::EIP } else { Register::RIP });
        }
    }
    else {
        mem.base = Some(Register::gpr(address_size as u16, modrm.b_rm | rex_b, false));
    }

    read_displacement(cursor, &mut mem, disp_width)?;
    Ok(mem)
}

fn read_displacement<S: ByteSource + ?Sized>(
    cursor: &mut ByteCursor<'_, S>,
    mem: &mut MemoryOperand,
    width: u8,
) -> Result<(), DecodeFault> {
    mem.displacement = match width {
        1 => cursor.read_i8()? as i64,
        2 => cursor.read_i16()? as i64,
        4 => cursor.read_i32()? as i64,
        _ => return Ok(()),
    };
    mem.displacement_size = width * 8;
    Ok(())
}
