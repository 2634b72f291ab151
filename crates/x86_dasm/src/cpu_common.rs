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

//! Processor modes, vendor selection and prefix bookkeeping shared by the decoder and translators.

use std::fmt::{Display, Formatter};

use crate::{error::ConfigurationError, register::Register};

/// The processor mode code is decoded for. Fixes the default operand and address widths
/// and whether REX prefixes exist.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum ArchitectureMode {
    Bits16,
    #[default]
    Bits32,
    Bits64,
}

impl ArchitectureMode {
    #[inline]
    pub fn bits(&self) -> u8 {
        match self {
            ArchitectureMode::Bits16 => 16,
            ArchitectureMode::Bits32 => 32,
            ArchitectureMode::Bits64 => 64,
        }
    }

    #[inline]
    pub fn is_64(&self) -> bool {
        matches!(self, ArchitectureMode::Bits64)
    }
}

impl TryFrom<u32> for ArchitectureMode {
    type Error = ConfigurationError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(ArchitectureMode::Bits16),
            32 => Ok(ArchitectureMode::Bits32),
            64 => Ok(ArchitectureMode::Bits64),
            other => Err(ConfigurationError::InvalidMode(other)),
        }
    }
}

impl Display for ArchitectureMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Restricts which vendor-specific table entries may match during lookup.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum Vendor {
    #[default]
    Any,
    Amd,
    Intel,
}

// Instruction prefixes

pub struct PrefixFlags {}

impl PrefixFlags {
    pub const ES_OVERRIDE: u32 = 0b_0000_0000_0000_0100;
    pub const CS_OVERRIDE: u32 = 0b_0000_0000_0000_1000;
    pub const SS_OVERRIDE: u32 = 0b_0000_0000_0001_0000;
    pub const DS_OVERRIDE: u32 = 0b_0000_0000_0010_0000;
    pub const FS_OVERRIDE: u32 = 0b_0000_0000_0100_0000;
    pub const GS_OVERRIDE: u32 = 0b_0000_0000_1000_0000;
    pub const SEG_OVERRIDE_MASK: u32 = 0b_0000_0000_1111_1100;
    pub const LOCK: u32 = 0b_0000_0001_0000_0000;
    pub const REP: u32 = 0b_0000_0010_0000_0000;
    pub const REPE: u32 = 0b_0000_0100_0000_0000;
    pub const REPNE: u32 = 0b_0000_1000_0000_0000;
    pub const REP_MASK: u32 = 0b_0000_1110_0000_0000;
    pub const OPERAND_SIZE: u32 = 0b_0010_0000_0000_0000;
    pub const ADDRESS_SIZE: u32 = 0b_0100_0000_0000_0000;
}

/// Prefix state of a decoded instruction after table resolution. Mandatory prefixes that
/// selected the opcode are no longer reported here.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Prefixes {
    pub flags: u32,
    /// The REX byte in effect, 0 if none.
    pub rex: u8,
}

impl Prefixes {
    #[inline]
    pub fn has(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    pub fn segment(&self) -> Option<Register> {
        match self.flags & PrefixFlags::SEG_OVERRIDE_MASK {
            PrefixFlags::ES_OVERRIDE => Some(Register::ES),
            PrefixFlags::CS_OVERRIDE => Some(Register::CS),
            PrefixFlags::SS_OVERRIDE => Some(Register::SS),
            PrefixFlags::DS_OVERRIDE => Some(Register::DS),
            PrefixFlags::FS_OVERRIDE => Some(Register::FS),
            PrefixFlags::GS_OVERRIDE => Some(Register::GS),
            _ => None,
        }
    }

    pub fn lock(&self) -> bool {
        self.has(PrefixFlags::LOCK)
    }
    pub fn rep(&self) -> bool {
        self.has(PrefixFlags::REP)
    }
    pub fn repe(&self) -> bool {
        self.has(PrefixFlags::REPE)
    }
    pub fn repne(&self) -> bool {
        self.has(PrefixFlags::REPNE)
    }
    pub fn operand_size(&self) -> bool {
        self.has(PrefixFlags::OPERAND_SIZE)
    }
    pub fn address_size(&self) -> bool {
        self.has(PrefixFlags::ADDRESS_SIZE)
    }

    #[inline]
    pub fn rex_w(&self) -> bool {
        self.rex & 0x08 != 0
    }
    #[inline]
    pub fn rex_r(&self) -> bool {
        self.rex & 0x04 != 0
    }
    #[inline]
    pub fn rex_x(&self) -> bool {
        self.rex & 0x02 != 0
    }
    #[inline]
    pub fn rex_b(&self) -> bool {
        self.rex & 0x01 != 0
    }
}

/// Returns the segment override flag for a segment prefix byte.
pub const fn segment_override_flag(byte: u8) -> Option<u32> {
    match byte {
        0x26 => Some(PrefixFlags::ES_OVERRIDE),
        0x2E => Some(PrefixFlags::CS_OVERRIDE),
        0x36 => Some(PrefixFlags::SS_OVERRIDE),
        0x3E => Some(PrefixFlags::DS_OVERRIDE),
        0x64 => Some(PrefixFlags::FS_OVERRIDE),
        0x65 => Some(PrefixFlags::GS_OVERRIDE),
        _ => None,
    }
}

/// Effective operand size in bits before any default-64 promotion, as used to select
/// size-specific table entries.
pub fn effective_operand_size(mode: ArchitectureMode, rex_w: bool, opsize_prefix: bool) -> u8 {
    match mode {
        ArchitectureMode::Bits64 if rex_w => 64,
        ArchitectureMode::Bits64 | ArchitectureMode::Bits32 => {
            if opsize_prefix {
                16
            }
            else {
                32
            }
        }
        ArchitectureMode::Bits16 => {
            if opsize_prefix {
                32
            }
            else {
                16
            }
        }
    }
}

/// Effective address size in bits.
pub fn effective_address_size(mode: ArchitectureMode, adsize_prefix: bool) -> u8 {
    match (mode, adsize_prefix) {
        (ArchitectureMode::Bits64, false) => 64,
        (ArchitectureMode::Bits64, true) => 32,
        (ArchitectureMode::Bits32, false) => 32,
        (ArchitectureMode::Bits32, true) => 16,
        (ArchitectureMode::Bits16, false) => 16,
        (ArchitectureMode::Bits16, true) => 32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_bits() {
        assert_eq!(ArchitectureMode::try_from(64).unwrap(), ArchitectureMode::Bits64);
        assert_eq!(ArchitectureMode::try_from(8), Err(ConfigurationError::InvalidMode(8)));
    }

    #[test]
    fn operand_size_rules() {
        assert_eq!(effective_operand_size(ArchitectureMode::Bits16, false, true), 32);
        assert_eq!(effective_operand_size(ArchitectureMode::Bits32, false, true), 16);
        assert_eq!(effective_operand_size(ArchitectureMode::Bits64, true, true), 64);
        assert_eq!(effective_operand_size(ArchitectureMode::Bits64, false, false), 32);
        assert_eq!(effective_address_size(ArchitectureMode::Bits64, true), 32);
    }

    #[test]
    fn segment_prefix_lookup() {
        let prefixes = Prefixes { flags: segment_override_flag(0x64).unwrap() | PrefixFlags::LOCK, rex: 0x48 };
        assert_eq!(prefixes.segment(), Some(Register::FS));
        assert!(prefixes.lock());
        assert!(prefixes.rex_w());
        assert!(!prefixes.rex_b());
    }
}
