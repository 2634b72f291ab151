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

use std::fmt::{Display, UpperHex};

/// The opcode map an instruction's final opcode byte was read from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum OpcodeMap {
    #[default]
    Primary,
    Ext0F,
    Ext0F38,
    Ext0F3A,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct Opcode {
    map: OpcodeMap,
    byte: u8,
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        Opcode { map: OpcodeMap::Primary, byte: value }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode.byte
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.map {
            OpcodeMap::Primary => write!(f, "{:02X}", self.byte),
            OpcodeMap::Ext0F => write!(f, "0F {:02X}", self.byte),
            OpcodeMap::Ext0F38 => write!(f, "0F 38 {:02X}", self.byte),
            OpcodeMap::Ext0F3A => write!(f, "0F 3A {:02X}", self.byte),
        }
    }
}

impl UpperHex for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Opcode {
    pub fn new(map: OpcodeMap, byte: u8) -> Self {
        Opcode { map, byte }
    }

    /// Folds the next opcode byte in. Escape bytes move to the next map; any other byte
    /// replaces the final opcode byte.
    pub fn advance(&mut self, byte: u8) {
        match (self.map, self.byte, byte) {
            (OpcodeMap::Primary, 0x0F, 0x38) => self.map = OpcodeMap::Ext0F38,
            (OpcodeMap::Primary, 0x0F, 0x3A) => self.map = OpcodeMap::Ext0F3A,
            (OpcodeMap::Primary, 0x0F, _) => self.map = OpcodeMap::Ext0F,
            _ => {}
        }
        self.byte = byte;
    }

    pub fn map(&self) -> OpcodeMap {
        self.map
    }

    pub fn base_opcode(&self) -> u8 {
        self.byte
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_select_the_map() {
        let mut op = Opcode::from(0x0F);
        op.advance(0x38);
        op.advance(0x80);
        assert_eq!(op.map(), OpcodeMap::Ext0F38);
        assert_eq!(op.to_string(), "0F 38 80");

        let mut op = Opcode::from(0x0F);
        op.advance(0x01);
        assert_eq!(format!("{:X}", op), "0F 01");
        assert_eq!(op.map(), OpcodeMap::Ext0F);
        assert_eq!(op.base_opcode(), 0x01);
    }

    #[test]
    fn primary_bytes_replace() {
        let mut op = Opcode::from(0x90);
        assert_eq!(op.to_string(), "90");
        op.advance(0x38);
        assert_eq!(op.map(), OpcodeMap::Primary);
        assert_eq!(u8::from(op), 0x38);
    }
}
