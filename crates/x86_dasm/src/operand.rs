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

//! Decoded operands.

use crate::register::Register;

/// An effective address. `scale` is 1, 2, 4 or 8 when an index is present and 0 otherwise.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryOperand {
    pub base: Option<Register>,
    pub index: Option<Register>,
    pub scale: u8,
    /// Sign-extended displacement.
    pub displacement: i64,
    /// Encoded width of the displacement in bits, 0 if there is none.
    pub displacement_size: u8,
    /// Size of the data addressed, in bits. 0 when the instruction does not imply one (lea, lgdt).
    pub size: u16,
}

impl MemoryOperand {
    /// True if the address is a bare displacement.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.base.is_none() && self.index.is_none()
    }

    /// The displacement as it was encoded, zero-extended from its width.
    pub fn unsigned_displacement(&self) -> u64 {
        match self.displacement_size {
            8 => self.displacement as u8 as u64,
            16 => self.displacement as u16 as u64,
            32 => self.displacement as u32 as u64,
            _ => self.displacement as u64,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Immediate {
    /// Raw encoded value, zero-extended.
    pub value: u64,
    /// Encoded width in bits.
    pub size: u16,
    /// The immediate is sign-extended to the operand size when executed.
    pub sign_extended: bool,
}

/// A relative branch. `target` is computed from the end of the instruction and truncated to
/// the operand size.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RelativeTarget {
    pub displacement: i64,
    pub size: u16,
    pub target: u64,
}

/// A direct far pointer, `segment:offset`. `size` is the offset width.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FarPointer {
    pub segment: u16,
    pub offset: u32,
    pub size: u16,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Operand {
    #[default]
    None,
    Register(Register),
    Memory(MemoryOperand),
    Immediate(Immediate),
    /// An implicit constant operand, such as the 1 of `shl eax, 1`.
    Constant(u64),
    Relative(RelativeTarget),
    FarPointer(FarPointer),
}

impl Operand {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Operand::None)
    }

    #[inline]
    pub fn is_memory(&self) -> bool {
        matches!(self, Operand::Memory(_))
    }

    #[inline]
    pub fn is_register(&self) -> bool {
        matches!(self, Operand::Register(_))
    }

    /// Immediates and implicit constants.
    #[inline]
    pub fn is_immediate(&self) -> bool {
        matches!(self, Operand::Immediate(_) | Operand::Constant(_))
    }

    pub fn register(&self) -> Option<Register> {
        match self {
            Operand::Register(r) => Some(*r),
            _ => None,
        }
    }

    pub fn memory(&self) -> Option<&MemoryOperand> {
        match self {
            Operand::Memory(m) => Some(m),
            _ => None,
        }
    }

    /// Size of the operand in bits.
    pub fn size(&self) -> u16 {
        match self {
            Operand::None => 0,
            Operand::Register(r) => r.size(),
            Operand::Memory(m) => m.size,
            Operand::Immediate(i) => i.size,
            Operand::Constant(_) => 8,
            Operand::Relative(r) => r.size,
            Operand::FarPointer(p) => p.size + 16,
        }
    }

    pub fn base(&self) -> Option<Register> {
        match self {
            Operand::Register(r) => Some(*r),
            Operand::Memory(m) => m.base,
            _ => None,
        }
    }

    pub fn index(&self) -> Option<Register> {
        self.memory().and_then(|m| m.index)
    }

    pub fn scale(&self) -> u8 {
        self.memory().map_or(0, |m| m.scale)
    }

    /// The operand's numeric value interpreted as signed at its encoded width: the immediate,
    /// the branch displacement, the memory displacement or the far pointer offset.
    pub fn value(&self) -> i64 {
        match self {
            Operand::Memory(m) => m.displacement,
            Operand::Immediate(i) => sign_extend(i.value, i.size),
            Operand::Constant(c) => *c as i64,
            Operand::Relative(r) => r.displacement,
            Operand::FarPointer(p) => p.offset as i64,
            Operand::None | Operand::Register(_) => 0,
        }
    }
}

/// Sign-extends the low `bits` of `value`.
pub(crate) fn sign_extend(value: u64, bits: u16) -> i64 {
    match bits {
        8 => value as u8 as i8 as i64,
        16 => value as u16 as i16 as i64,
        32 => value as u32 as i32 as i64,
        _ => value as i64,
    }
}
