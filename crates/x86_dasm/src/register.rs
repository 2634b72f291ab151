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

use std::fmt::{Display, Formatter};

macro_rules! registers {
    ($($variant:ident => ($name:literal, $bits:literal),)*) => {
        /// Every register an operand can name.
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum Register {
            $($variant,)*
        }

        impl Register {
            /// Lowercase assembler name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Register::$variant => $name,)*
                }
            }

            /// Width of the register in bits.
            pub fn size(&self) -> u16 {
                match self {
                    $(Register::$variant => $bits,)*
                }
            }
        }
    };
}

registers! {
    AL => ("al", 8), CL => ("cl", 8), DL => ("dl", 8), BL => ("bl", 8),
    AH => ("ah", 8), CH => ("ch", 8), DH => ("dh", 8), BH => ("bh", 8),
    SPL => ("spl", 8), BPL => ("bpl", 8), SIL => ("sil", 8), DIL => ("dil", 8),
    R8B => ("r8b", 8), R9B => ("r9b", 8), R10B => ("r10b", 8), R11B => ("r11b", 8),
    R12B => ("r12b", 8), R13B => ("r13b", 8), R14B => ("r14b", 8), R15B => ("r15b", 8),

    AX => ("ax", 16), CX => ("cx", 16), DX => ("dx", 16), BX => ("bx", 16),
    SP => ("sp", 16), BP => ("bp", 16), SI => ("si", 16), DI => ("di", 16),
    R8W => ("r8w", 16), R9W => ("r9w", 16), R10W => ("r10w", 16), R11W => ("r11w", 16),
    R12W => ("r12w", 16), R13W => ("r13w", 16), R14W => ("r14w", 16), R15W => ("r15w", 16),

    EAX => ("eax", 32), ECX => ("ecx", 32), EDX => ("edx", 32), EBX => ("ebx", 32),
    ESP => ("esp", 32), EBP => ("ebp", 32), ESI => ("esi", 32), EDI => ("edi", 32),
    R8D => ("r8d", 32), R9D => ("r9d", 32), R10D => ("r10d", 32), R11D => ("r11d", 32),
    R12D => ("r12d", 32), R13D => ("r13d", 32), R14D => ("r14d", 32), R15D => ("r15d", 32),

    RAX => ("rax", 64), RCX => ("rcx", 64), RDX => ("rdx", 64), RBX => ("rbx", 64),
    RSP => ("rsp", 64), RBP => ("rbp", 64), RSI => ("rsi", 64), RDI => ("rdi", 64),
    R8 => ("r8", 64), R9 => ("r9", 64), R10 => ("r10", 64), R11 => ("r11", 64),
    R12 => ("r12", 64), R13 => ("r13", 64), R14 => ("r14", 64), R15 => ("r15", 64),

    ES => ("es", 16), CS => ("cs", 16), SS => ("ss", 16), DS => ("ds", 16), FS => ("fs", 16), GS => ("gs", 16),

    CR0 => ("cr0", 64), CR1 => ("cr1", 64), CR2 => ("cr2", 64), CR3 => ("cr3", 64),
    CR4 => ("cr4", 64), CR5 => ("cr5", 64), CR6 => ("cr6", 64), CR7 => ("cr7", 64),
    CR8 => ("cr8", 64), CR9 => ("cr9", 64), CR10 => ("cr10", 64), CR11 => ("cr11", 64),
    CR12 => ("cr12", 64), CR13 => ("cr13", 64), CR14 => ("cr14", 64), CR15 => ("cr15", 64),

    DR0 => ("dr0", 64), DR1 => ("dr1", 64), DR2 => ("dr2", 64), DR3 => ("dr3", 64),
    DR4 => ("dr4", 64), DR5 => ("dr5", 64), DR6 => ("dr6", 64), DR7 => ("dr7", 64),
    DR8 => ("dr8", 64), DR9 => ("dr9", 64), DR10 => ("dr10", 64), DR11 => ("dr11", 64),
    DR12 => ("dr12", 64), DR13 => ("dr13", 64), DR14 => ("dr14", 64), DR15 => ("dr15", 64),

    ST0 => ("st0", 80), ST1 => ("st1", 80), ST2 => ("st2", 80), ST3 => ("st3", 80),
    ST4 => ("st4", 80), ST5 => ("st5", 80), ST6 => ("st6", 80), ST7 => ("st7", 80),

    MM0 => ("mm0", 64), MM1 => ("mm1", 64), MM2 => ("mm2", 64), MM3 => ("mm3", 64),
    MM4 => ("mm4", 64), MM5 => ("mm5", 64), MM6 => ("mm6", 64), MM7 => ("mm7", 64),

    XMM0 => ("xmm0", 128), XMM1 => ("xmm1", 128), XMM2 => ("xmm2", 128), XMM3 => ("xmm3", 128),
    XMM4 => ("xmm4", 128), XMM5 => ("xmm5", 128), XMM6 => ("xmm6", 128), XMM7 => ("xmm7", 128),
    XMM8 => ("xmm8", 128), XMM9 => ("xmm9", 128), XMM10 => ("xmm10", 128), XMM11 => ("xmm11", 128),
    XMM12 => ("xmm12", 128), XMM13 => ("xmm13", 128), XMM14 => ("xmm14", 128), XMM15 => ("xmm15", 128),

    IP => ("ip", 16), EIP => ("eip", 32), RIP => ("rip", 64),
}

impl Register {
    #[inline]
    pub fn is_segment(&self) -> bool {
        matches!(self, Register::ES | Register::CS | Register::SS | Register::DS | Register::FS | Register::GS)
    }

    /// General purpose register of the given width. `rex` selects spl/bpl/sil/dil over
    /// ah/ch/dh/bh for byte registers 4-7.
    pub fn gpr(size: u16, index: u8, rex: bool) -> Register {
        let index = (index & 0x0F) as usize;
        match size {
            8 if rex => REGISTER8_REX_LUT[index],
            8 => REGISTER8_LUT[index & 0x07],
            16 => REGISTER16_LUT[index],
            32 => REGISTER32_LUT[index],
            _ => REGISTER64_LUT[index],
        }
    }

    pub fn segment(index: u8) -> Option<Register> {
        SREGISTER_LUT.get(index as usize).copied()
    }

    pub fn control(index: u8) -> Register {
        CREGISTER_LUT[(index & 0x0F) as usize]
    }

    pub fn debug(index: u8) -> Register {
        DREGISTER_LUT[(index & 0x0F) as usize]
    }

    pub fn x87(index: u8) -> Register {
        STREGISTER_LUT[(index & 0x07) as usize]
    }

    pub fn mmx(index: u8) -> Register {
        MMREGISTER_LUT[(index & 0x07) as usize]
    }

    pub fn xmm(index: u8) -> Register {
        XMMREGISTER_LUT[(index & 0x0F) as usize]
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub const REGISTER8_LUT: [Register; 8] = [
    Register::AL,
    Register::CL,
    Register::DL,
    Register::BL,
    Register::AH,
    Register::CH,
    Register::DH,
    Register::BH,
];

pub const REGISTER8_REX_LUT: [Register; 16] = [
    Register::AL,
    Register::CL,
    Register::DL,
    Register::BL,
    Register::SPL,
    Register::BPL,
    Register::SIL,
    Register::DIL,
    Register::R8B,
    Register::R9B,
    Register::R10B,
    Register::R11B,
    Register::R12B,
    Register::R13B,
    Register::R14B,
    Register::R15B,
];

pub const REGISTER16_LUT: [Register; 16] = [
    Register::AX,
    Register::CX,
    Register::DX,
    Register::BX,
    Register::SP,
    Register::BP,
    Register::SI,
    Register::DI,
    Register::R8W,
    Register::R9W,
    Register::R10W,
    Register::R11W,
    Register::R12W,
    Register::R13W,
    Register::R14W,
    Register::R15W,
];

pub const REGISTER32_LUT: [Register; 16] = [
    Register::EAX,
    Register::ECX,
    Register::EDX,
    Register::EBX,
    Register::ESP,
    Register::EBP,
    Register::ESI,
    Register::EDI,
    Register::R8D,
    Register::R9D,
    Register::R10D,
    Register::R11D,
    Register::R12D,
    Register::R13D,
    Register::R14D,
    Register::R15D,
];

pub const REGISTER64_LUT: [Register; 16] = [
    Register::RAX,
    Register::RCX,
    Register::RDX,
    Register::RBX,
    Register::RSP,
    Register::RBP,
    Register::RSI,
    Register::RDI,
    Register::R8,
    Register::R9,
    Register::R10,
    Register::R11,
    Register::R12,
    Register::R13,
    Register::R14,
    Register::R15,
];

pub const SREGISTER_LUT: [Register; 6] =
    [Register::ES, Register::CS, Register::SS, Register::DS, Register::FS, Register::GS];

pub const CREGISTER_LUT: [Register; 16] = [
    Register::CR0,
    Register::CR1,
    Register::CR2,
    Register::CR3,
    Register::CR4,
    Register::CR5,
    Register::CR6,
    Register::CR7,
    Register::CR8,
    Register::CR9,
    Register::CR10,
    Register::CR11,
    Register::CR12,
    Register::CR13,
    Register::CR14,
    Register::CR15,
];

pub const DREGISTER_LUT: [Register; 16] = [
    Register::DR0,
    Register::DR1,
    Register::DR2,
    Register::DR3,
    Register::DR4,
    Register::DR5,
    Register::DR6,
    Register::DR7,
    Register::DR8,
    Register::DR9,
    Register::DR10,
    Register::DR11,
    Register::DR12,
    Register::DR13,
    Register::DR14,
    Register::DR15,
];

pub const STREGISTER_LUT: [Register; 8] = [
    Register::ST0,
    Register::ST1,
    Register::ST2,
    Register::ST3,
    Register::ST4,
    Register::ST5,
    Register::ST6,
    Register::ST7,
];

pub const MMREGISTER_LUT: [Register; 8] = [
    Register::MM0,
    Register::MM1,
    Register::MM2,
    Register::MM3,
    Register::MM4,
    Register::MM5,
    Register::MM6,
    Register::MM7,
];

pub const XMMREGISTER_LUT: [Register; 16] = [
    Register::XMM0,
    Register::XMM1,
    Register::XMM2,
    Register::XMM3,
    Register::XMM4,
    Register::XMM5,
    Register::XMM6,
    Register::XMM7,
    Register::XMM8,
    Register::XMM9,
    Register::XMM10,
    Register::XMM11,
    Register::XMM12,
    Register::XMM13,
    Register::XMM14,
    Register::XMM15,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_registers_depend_on_rex() {
        assert_eq!(Register::gpr(8, 4, false), Register::AH);
        assert_eq!(Register::gpr(8, 4, true), Register::SPL);
        assert_eq!(Register::gpr(8, 12, true), Register::R12B);
    }

    #[test]
    fn names_and_sizes() {
        assert_eq!(Register::gpr(64, 9, true).to_string(), "r9");
        assert_eq!(Register::R13D.size(), 32);
        assert_eq!(Register::x87(3).name(), "st3");
        assert_eq!(Register::segment(6), None);
        assert!(Register::GS.is_segment());
    }
}
