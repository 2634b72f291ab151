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

#![cfg_attr(rustfmt, rustfmt_skip)]

/// Per-entry attribute bits carried alongside each table entry. Some are written in the table
/// definition, the rest are derived from an entry's operand templates when it is inserted.
pub const ENTRY_DEF64: u16    = 0b0000_0000_0000_0001; // Defaults to 64-bit operand size in 64-bit mode
pub const ENTRY_INV64: u16    = 0b0000_0000_0000_0010; // Undefined in 64-bit mode
pub const ENTRY_OSO: u16      = 0b0000_0000_0000_0100; // Operand-size prefix affects this instruction
pub const ENTRY_ASO: u16      = 0b0000_0000_0000_1000; // Address-size prefix affects this instruction
pub const ENTRY_STR: u16      = 0b0000_0000_0001_0000; // String move class: F3 renders as rep, not repe
pub const ENTRY_FAR: u16      = 0b0000_0000_0010_0000; // Far branch
pub const ENTRY_NEAR: u16     = 0b0000_0000_0100_0000; // Near indirect branch
pub const ENTRY_MODRM: u16    = 0b0000_0000_1000_0000; // Instruction has a modrm byte

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct EntryFlags(pub u16);

impl EntryFlags {
    pub fn new(data: u16) -> Self {
        Self(data)
    }
    #[inline(always)]
    pub fn get(&self) -> u16 {
        self.0
    }
    #[inline(always)]
    pub fn default_64(&self) -> bool {
        self.0 & ENTRY_DEF64 != 0
    }
    #[inline(always)]
    pub fn invalid_64(&self) -> bool {
        self.0 & ENTRY_INV64 != 0
    }
    #[inline(always)]
    pub fn uses_operand_size(&self) -> bool {
        self.0 & ENTRY_OSO != 0
    }
    #[inline(always)]
    pub fn uses_address_size(&self) -> bool {
        self.0 & ENTRY_ASO != 0
    }
    #[inline(always)]
    pub fn is_string(&self) -> bool {
        self.0 & ENTRY_STR != 0
    }
    #[inline(always)]
    pub fn is_far(&self) -> bool {
        self.0 & ENTRY_FAR != 0
    }
    #[inline(always)]
    pub fn is_near(&self) -> bool {
        self.0 & ENTRY_NEAR != 0
    }
    #[inline(always)]
    pub fn has_modrm(&self) -> bool {
        self.0 & ENTRY_MODRM != 0
    }
}
