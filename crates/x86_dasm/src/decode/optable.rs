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
#![allow(non_upper_case_globals)]

//! Instruction definitions. Operand shorthands follow the usual opcode-map notation:
//! the letter names the encoding (E = modrm r/m, G = modrm reg, I = immediate, J = relative,
//! O = moffs, M = memory only, V/W/U = xmm, P/Q/N = mmx) and the suffix names the size.

use crate::{
    decode::{
        flags::*,
        table::{OperandTemplate, OperandTemplate::*, Sz, TableBuilder},
    },
    mnemonic::Mnemonic,
    register::Register,
};

const Eb: OperandTemplate = ModRm(Sz::B);
const Ew: OperandTemplate = ModRm(Sz::W);
const Ed: OperandTemplate = ModRm(Sz::D);
const Eq: OperandTemplate = ModRm(Sz::Q);
const Ev: OperandTemplate = ModRm(Sz::V);
const Ey: OperandTemplate = ModRm(Sz::Y);
const Gb: OperandTemplate = ModRmReg(Sz::B);
const Gw: OperandTemplate = ModRmReg(Sz::W);
const Gd: OperandTemplate = ModRmReg(Sz::D);
const Gv: OperandTemplate = ModRmReg(Sz::V);
const Gy: OperandTemplate = ModRmReg(Sz::Y);
const Rn: OperandTemplate = ModRmRmReg(Sz::Native);
const Rv: OperandTemplate = ModRmRmReg(Sz::V);
const M: OperandTemplate = ModRmMemory(Sz::None);
const Mb: OperandTemplate = ModRmMemory(Sz::B);
const Mw: OperandTemplate = ModRmMemory(Sz::W);
const Md: OperandTemplate = ModRmMemory(Sz::D);
const Mq: OperandTemplate = ModRmMemory(Sz::Q);
const Mt: OperandTemplate = ModRmMemory(Sz::T);
const Mdq: OperandTemplate = ModRmMemory(Sz::Dq);
const Mv: OperandTemplate = ModRmMemory(Sz::V);
const My: OperandTemplate = ModRmMemory(Sz::Y);
const Mp: OperandTemplate = ModRmMemory(Sz::P);
const Ib: OperandTemplate = Immediate(Sz::B);
const Iw: OperandTemplate = Immediate(Sz::W);
const Iz: OperandTemplate = Immediate(Sz::Z);
const Iv: OperandTemplate = Immediate(Sz::V);
const sIb: OperandTemplate = ImmediateSigned(Sz::B);
const I1: OperandTemplate = Constant(1);
const Jb: OperandTemplate = Relative(Sz::B);
const Jz: OperandTemplate = Relative(Sz::Z);
const Ob: OperandTemplate = Offset(Sz::B);
const Ov: OperandTemplate = Offset(Sz::V);
const Ap: OperandTemplate = FarPointer;
const Sw: OperandTemplate = SegmentReg;
const Cn: OperandTemplate = ControlReg;
const Dn: OperandTemplate = DebugReg;
const Zb: OperandTemplate = OpcodeRegister(Sz::B);
const Zv: OperandTemplate = OpcodeRegister(Sz::V);
const Zy: OperandTemplate = OpcodeRegister(Sz::Y);
const rAX: OperandTemplate = SizedRegister(0, Sz::V);
const eAX: OperandTemplate = SizedRegister(0, Sz::Z);
const AL: OperandTemplate = FixedRegister(Register::AL);
const CL: OperandTemplate = FixedRegister(Register::CL);
const AX: OperandTemplate = FixedRegister(Register::AX);
const DX: OperandTemplate = FixedRegister(Register::DX);
const ES: OperandTemplate = FixedRegister(Register::ES);
const CS: OperandTemplate = FixedRegister(Register::CS);
const SS: OperandTemplate = FixedRegister(Register::SS);
const DS: OperandTemplate = FixedRegister(Register::DS);
const FS: OperandTemplate = FixedRegister(Register::FS);
const GS: OperandTemplate = FixedRegister(Register::GS);
const ST0: OperandTemplate = St0;
const STi: OperandTemplate = StRm;
const Pq: OperandTemplate = MmxReg;
const Qq: OperandTemplate = MmxModRm(Sz::Q);
const Nq: OperandTemplate = MmxRm;
const Vx: OperandTemplate = XmmReg;
const Wx: OperandTemplate = XmmModRm(Sz::Dq);
const Wq: OperandTemplate = XmmModRm(Sz::Q);
const Wd: OperandTemplate = XmmModRm(Sz::D);
const Ww: OperandTemplate = XmmModRm(Sz::W);
const Ux: OperandTemplate = XmmRm;

macro_rules! op {
    ($t:ident, $path:expr, $m:ident $(, $o:expr)* $(; $f:expr)?) => {
        $t.insert($path, Mnemonic::$m, &[$($o),*], 0 $(| $f)?)
    };
}

const ALU: [Mnemonic; 8] = [
    Mnemonic::ADD, Mnemonic::OR, Mnemonic::ADC, Mnemonic::SBB,
    Mnemonic::AND, Mnemonic::SUB, Mnemonic::XOR, Mnemonic::CMP,
];

const SHIFT: [Mnemonic; 8] = [
    Mnemonic::ROL, Mnemonic::ROR, Mnemonic::RCL, Mnemonic::RCR,
    Mnemonic::SHL, Mnemonic::SHR, Mnemonic::SHL, Mnemonic::SAR,
];

const JCC: [Mnemonic; 16] = [
    Mnemonic::JO, Mnemonic::JNO, Mnemonic::JB, Mnemonic::JAE,
    Mnemonic::JZ, Mnemonic::JNZ, Mnemonic::JBE, Mnemonic::JA,
    Mnemonic::JS, Mnemonic::JNS, Mnemonic::JP, Mnemonic::JNP,
    Mnemonic::JL, Mnemonic::JGE, Mnemonic::JLE, Mnemonic::JG,
];

const CMOVCC: [Mnemonic; 16] = [
    Mnemonic::CMOVO, Mnemonic::CMOVNO, Mnemonic::CMOVB, Mnemonic::CMOVAE,
    Mnemonic::CMOVZ, Mnemonic::CMOVNZ, Mnemonic::CMOVBE, Mnemonic::CMOVA,
    Mnemonic::CMOVS, Mnemonic::CMOVNS, Mnemonic::CMOVP, Mnemonic::CMOVNP,
    Mnemonic::CMOVL, Mnemonic::CMOVGE, Mnemonic::CMOVLE, Mnemonic::CMOVG,
];

const SETCC: [Mnemonic; 16] = [
    Mnemonic::SETO, Mnemonic::SETNO, Mnemonic::SETB, Mnemonic::SETAE,
    Mnemonic::SETZ, Mnemonic::SETNZ, Mnemonic::SETBE, Mnemonic::SETA,
    Mnemonic::SETS, Mnemonic::SETNS, Mnemonic::SETP, Mnemonic::SETNP,
    Mnemonic::SETL, Mnemonic::SETGE, Mnemonic::SETLE, Mnemonic::SETG,
];

/// Populates the builder with every supported instruction.
pub fn define(t: &mut TableBuilder) {
    primary(t);
    x87(t);
    secondary(t);
    sse(t);
    three_byte(t);
}

fn primary(t: &mut TableBuilder) {
    // ALU rows 00-3F share one layout.
    for (row, &m) in ALU.iter().enumerate() {
        let base = (row as u8) << 3;
        t.insert(&format!("{:02x}", base), m, &[Eb, Gb], 0);
        t.insert(&format!("{:02x}", base + 1), m, &[Ev, Gv], 0);
        t.insert(&format!("{:02x}", base + 2), m, &[Gb, Eb], 0);
        t.insert(&format!("{:02x}", base + 3), m, &[Gv, Ev], 0);
        t.insert(&format!("{:02x}", base + 4), m, &[AL, Ib], 0);
        t.insert(&format!("{:02x}", base + 5), m, &[rAX, Iz], 0);
        t.insert(&format!("80 /reg={}", row), m, &[Eb, Ib], 0);
        t.insert(&format!("81 /reg={}", row), m, &[Ev, Iz], 0);
        t.insert(&format!("82 /reg={}", row), m, &[Eb, Ib], ENTRY_INV64);
        t.insert(&format!("83 /reg={}", row), m, &[Ev, sIb], 0);
    }
    op!(t, "06", PUSH, ES; ENTRY_INV64);
    op!(t, "07", POP, ES; ENTRY_INV64);
    op!(t, "0e", PUSH, CS; ENTRY_INV64);
    op!(t, "16", PUSH, SS; ENTRY_INV64);
    op!(t, "17", POP, SS; ENTRY_INV64);
    op!(t, "1e", PUSH, DS; ENTRY_INV64);
    op!(t, "1f", POP, DS; ENTRY_INV64);
    op!(t, "27", DAA; ENTRY_INV64);
    op!(t, "2f", DAS; ENTRY_INV64);
    op!(t, "37", AAA; ENTRY_INV64);
    op!(t, "3f", AAS; ENTRY_INV64);

    // 40-4F are REX prefixes in 64-bit mode and never reach the table there.
    op!(t, "40+r", INC, Zv; ENTRY_INV64);
    op!(t, "48+r", DEC, Zv; ENTRY_INV64);
    op!(t, "50+r", PUSH, Zv; ENTRY_DEF64);
    op!(t, "58+r", POP, Zv; ENTRY_DEF64);

    op!(t, "60 /o=16", PUSHA; ENTRY_INV64);
    op!(t, "60 /o=32", PUSHAD; ENTRY_INV64);
    op!(t, "61 /o=16", POPA; ENTRY_INV64);
    op!(t, "61 /o=32", POPAD; ENTRY_INV64);
    op!(t, "62", BOUND, Gv, M; ENTRY_INV64);
    op!(t, "63 /m=!64", ARPL, Ew, Gw);
    op!(t, "63 /m=64", MOVSXD, Gv, Ed);
    op!(t, "68", PUSH, Iz; ENTRY_DEF64);
    op!(t, "69", IMUL, Gv, Ev, Iz);
    op!(t, "6a", PUSH, sIb; ENTRY_DEF64);
    op!(t, "6b", IMUL, Gv, Ev, sIb);
    op!(t, "6c", INSB; ENTRY_STR | ENTRY_ASO);
    op!(t, "6d /o=16", INSW; ENTRY_STR | ENTRY_ASO);
    op!(t, "6d /o=32", INSD; ENTRY_STR | ENTRY_ASO);
    op!(t, "6d /o=64", INSD; ENTRY_STR | ENTRY_ASO);
    op!(t, "6e", OUTSB; ENTRY_STR | ENTRY_ASO);
    op!(t, "6f /o=16", OUTSW; ENTRY_STR | ENTRY_ASO);
    op!(t, "6f /o=32", OUTSD; ENTRY_STR | ENTRY_ASO);
    op!(t, "6f /o=64", OUTSD; ENTRY_STR | ENTRY_ASO);

    for (cc, &m) in JCC.iter().enumerate() {
        t.insert(&format!("{:02x}", 0x70 + cc), m, &[Jb], ENTRY_DEF64);
        t.insert(&format!("0f {:02x}", 0x80 + cc), m, &[Jz], ENTRY_DEF64);
    }

    op!(t, "84", TEST, Eb, Gb);
    op!(t, "85", TEST, Ev, Gv);
    op!(t, "86", XCHG, Eb, Gb);
    op!(t, "87", XCHG, Ev, Gv);
    op!(t, "88", MOV, Eb, Gb);
    op!(t, "89", MOV, Ev, Gv);
    op!(t, "8a", MOV, Gb, Eb);
    op!(t, "8b", MOV, Gv, Ev);
    op!(t, "8c", MOV, Ev, Sw);
    op!(t, "8d", LEA, Gv, M);
    op!(t, "8e", MOV, Sw, Ew);
    op!(t, "8f /reg=0", POP, Ev; ENTRY_DEF64);

    // 90 decodes as xchg and becomes nop or pause once prefixes are resolved.
    op!(t, "90+r", XCHG, Zv, rAX);
    op!(t, "98 /o=16", CBW);
    op!(t, "98 /o=32", CWDE);
    op!(t, "98 /o=64", CDQE);
    op!(t, "99 /o=16", CWD);
    op!(t, "99 /o=32", CDQ);
    op!(t, "99 /o=64", CQO);
    op!(t, "9a", CALL, Ap; ENTRY_INV64 | ENTRY_FAR);
    op!(t, "9b", WAIT);
    op!(t, "9c /m=!64 /o=16", PUSHFW);
    op!(t, "9c /m=!64 /o=32", PUSHFD);
    op!(t, "9c /m=64 /o=16", PUSHFW; ENTRY_DEF64);
    op!(t, "9c /m=64 /o=32", PUSHFQ; ENTRY_DEF64);
    op!(t, "9c /m=64 /o=64", PUSHFQ; ENTRY_DEF64);
    op!(t, "9d /m=!64 /o=16", POPFW);
    op!(t, "9d /m=!64 /o=32", POPFD);
    op!(t, "9d /m=64 /o=16", POPFW; ENTRY_DEF64);
    op!(t, "9d /m=64 /o=32", POPFQ; ENTRY_DEF64);
    op!(t, "9d /m=64 /o=64", POPFQ; ENTRY_DEF64);
    op!(t, "9e", SAHF);
    op!(t, "9f", LAHF);

    op!(t, "a0", MOV, AL, Ob);
    op!(t, "a1", MOV, rAX, Ov);
    op!(t, "a2", MOV, Ob, AL);
    op!(t, "a3", MOV, Ov, rAX);
    op!(t, "a4", MOVSB; ENTRY_STR | ENTRY_ASO);
    op!(t, "a5 /o=16", MOVSW; ENTRY_STR | ENTRY_ASO);
    op!(t, "a5 /o=32", MOVSD; ENTRY_STR | ENTRY_ASO);
    op!(t, "a5 /o=64", MOVSQ; ENTRY_STR | ENTRY_ASO);
    op!(t, "a6", CMPSB; ENTRY_ASO);
    op!(t, "a7 /o=16", CMPSW; ENTRY_ASO);
    op!(t, "a7 /o=32", CMPSD; ENTRY_ASO);
    op!(t, "a7 /o=64", CMPSQ; ENTRY_ASO);
    op!(t, "a8", TEST, AL, Ib);
    op!(t, "a9", TEST, rAX, Iz);
    op!(t, "aa", STOSB; ENTRY_STR | ENTRY_ASO);
    op!(t, "ab /o=16", STOSW; ENTRY_STR | ENTRY_ASO);
    op!(t, "ab /o=32", STOSD; ENTRY_STR | ENTRY_ASO);
    op!(t, "ab /o=64", STOSQ; ENTRY_STR | ENTRY_ASO);
    op!(t, "ac", LODSB; ENTRY_STR | ENTRY_ASO);
    op!(t, "ad /o=16", LODSW; ENTRY_STR | ENTRY_ASO);
    op!(t, "ad /o=32", LODSD; ENTRY_STR | ENTRY_ASO);
    op!(t, "ad /o=64", LODSQ; ENTRY_STR | ENTRY_ASO);
    op!(t, "ae", SCASB; ENTRY_ASO);
    op!(t, "af /o=16", SCASW; ENTRY_ASO);
    op!(t, "af /o=32", SCASD; ENTRY_ASO);
    op!(t, "af /o=64", SCASQ; ENTRY_ASO);
    op!(t, "b0+r", MOV, Zb, Ib);
    op!(t, "b8+r", MOV, Zv, Iv);

    for (reg, &m) in SHIFT.iter().enumerate() {
        t.insert(&format!("c0 /reg={}", reg), m, &[Eb, Ib], 0);
        t.insert(&format!("c1 /reg={}", reg), m, &[Ev, Ib], 0);
        t.insert(&format!("d0 /reg={}", reg), m, &[Eb, I1], 0);
        t.insert(&format!("d1 /reg={}", reg), m, &[Ev, I1], 0);
        t.insert(&format!("d2 /reg={}", reg), m, &[Eb, CL], 0);
        t.insert(&format!("d3 /reg={}", reg), m, &[Ev, CL], 0);
    }
    op!(t, "c2", RET, Iw; ENTRY_DEF64 | ENTRY_NEAR);
    op!(t, "c3", RET; ENTRY_DEF64 | ENTRY_NEAR);
    op!(t, "c4", LES, Gv, Mp; ENTRY_INV64);
    op!(t, "c5", LDS, Gv, Mp; ENTRY_INV64);
    op!(t, "c6 /reg=0", MOV, Eb, Ib);
    op!(t, "c7 /reg=0", MOV, Ev, Iz);
    op!(t, "c8", ENTER, Iw, Ib; ENTRY_DEF64);
    op!(t, "c9", LEAVE; ENTRY_DEF64);
    op!(t, "ca", RETF, Iw; ENTRY_FAR);
    op!(t, "cb", RETF; ENTRY_FAR);
    op!(t, "cc", INT3);
    op!(t, "cd", INT, Ib);
    op!(t, "ce", INTO; ENTRY_INV64);
    op!(t, "cf /o=16", IRETW);
    op!(t, "cf /o=32", IRETD);
    op!(t, "cf /o=64", IRETQ);

    op!(t, "d4", AAM, Ib; ENTRY_INV64);
    op!(t, "d5", AAD, Ib; ENTRY_INV64);
    op!(t, "d6", SALC; ENTRY_INV64);
    op!(t, "d7", XLATB; ENTRY_ASO);

    op!(t, "e0", LOOPNE, Jb; ENTRY_DEF64 | ENTRY_ASO);
    op!(t, "e1", LOOPE, Jb; ENTRY_DEF64 | ENTRY_ASO);
    op!(t, "e2", LOOP, Jb; ENTRY_DEF64 | ENTRY_ASO);
    op!(t, "e3 /a=16", JCXZ, Jb; ENTRY_DEF64);
    op!(t, "e3 /a=32", JECXZ, Jb; ENTRY_DEF64);
    op!(t, "e3 /a=64", JRCXZ, Jb; ENTRY_DEF64);
    op!(t, "e4", IN, AL, Ib);
    op!(t, "e5", IN, eAX, Ib);
    op!(t, "e6", OUT, Ib, AL);
    op!(t, "e7", OUT, Ib, eAX);
    op!(t, "e8", CALL, Jz; ENTRY_DEF64);
    op!(t, "e9", JMP, Jz; ENTRY_DEF64);
    op!(t, "ea", JMP, Ap; ENTRY_INV64 | ENTRY_FAR);
    op!(t, "eb", JMP, Jb; ENTRY_DEF64);
    op!(t, "ec", IN, AL, DX);
    op!(t, "ed", IN, eAX, DX);
    op!(t, "ee", OUT, DX, AL);
    op!(t, "ef", OUT, DX, eAX);

    op!(t, "f1", INT1);
    op!(t, "f4", HLT);
    op!(t, "f5", CMC);
    op!(t, "f6 /reg=0", TEST, Eb, Ib);
    op!(t, "f6 /reg=1", TEST, Eb, Ib);
    op!(t, "f6 /reg=2", NOT, Eb);
    op!(t, "f6 /reg=3", NEG, Eb);
    op!(t, "f6 /reg=4", MUL, Eb);
    op!(t, "f6 /reg=5", IMUL, Eb);
    op!(t, "f6 /reg=6", DIV, Eb);
    op!(t, "f6 /reg=7", IDIV, Eb);
    op!(t, "f7 /reg=0", TEST, Ev, Iz);
    op!(t, "f7 /reg=1", TEST, Ev, Iz);
    op!(t, "f7 /reg=2", NOT, Ev);
    op!(t, "f7 /reg=3", NEG, Ev);
    op!(t, "f7 /reg=4", MUL, Ev);
    op!(t, "f7 /reg=5", IMUL, Ev);
    op!(t, "f7 /reg=6", DIV, Ev);
    op!(t, "f7 /reg=7", IDIV, Ev);
    op!(t, "f8", CLC);
    op!(t, "f9", STC);
    op!(t, "fa", CLI);
    op!(t, "fb", STI);
    op!(t, "fc", CLD);
    op!(t, "fd", STD);
    op!(t, "fe /reg=0", INC, Eb);
    op!(t, "fe /reg=1", DEC, Eb);
    op!(t, "ff /reg=0", INC, Ev);
    op!(t, "ff /reg=1", DEC, Ev);
    op!(t, "ff /reg=2", CALL, Ev; ENTRY_DEF64 | ENTRY_NEAR);
    op!(t, "ff /reg=3 /mod=mem", CALL, Mp; ENTRY_FAR);
    op!(t, "ff /reg=4", JMP, Ev; ENTRY_DEF64 | ENTRY_NEAR);
    op!(t, "ff /reg=5 /mod=mem", JMP, Mp; ENTRY_FAR);
    op!(t, "ff /reg=6", PUSH, Ev; ENTRY_DEF64);
}

fn x87(t: &mut TableBuilder) {
    const D8: [Mnemonic; 8] = [
        Mnemonic::FADD, Mnemonic::FMUL, Mnemonic::FCOM, Mnemonic::FCOMP,
        Mnemonic::FSUB, Mnemonic::FSUBR, Mnemonic::FDIV, Mnemonic::FDIVR,
    ];
    const DA: [Mnemonic; 8] = [
        Mnemonic::FIADD, Mnemonic::FIMUL, Mnemonic::FICOM, Mnemonic::FICOMP,
        Mnemonic::FISUB, Mnemonic::FISUBR, Mnemonic::FIDIV, Mnemonic::FIDIVR,
    ];
    for reg in 0..8 {
        t.insert(&format!("d8 /reg={} /mod=mem", reg), D8[reg], &[Md], 0);
        t.insert(&format!("d8 /reg={} /mod=reg", reg), D8[reg], &[ST0, STi], 0);
        t.insert(&format!("dc /reg={} /mod=mem", reg), D8[reg], &[Mq], 0);
        t.insert(&format!("da /reg={} /mod=mem", reg), DA[reg], &[Md], 0);
        t.insert(&format!("de /reg={} /mod=mem", reg), DA[reg], &[Mw], 0);
    }

    op!(t, "d9 /reg=0 /mod=mem", FLD, Md);
    op!(t, "d9 /reg=2 /mod=mem", FST, Md);
    op!(t, "d9 /reg=3 /mod=mem", FSTP, Md);
    op!(t, "d9 /reg=4 /mod=mem", FLDENV, M);
    op!(t, "d9 /reg=5 /mod=mem", FLDCW, Mw);
    op!(t, "d9 /reg=6 /mod=mem", FNSTENV, M);
    op!(t, "d9 /reg=7 /mod=mem", FNSTCW, Mw);
    op!(t, "d9 /reg=0 /mod=reg", FLD, ST0, STi);
    op!(t, "d9 /reg=1 /mod=reg", FXCH, ST0, STi);
    op!(t, "d9 /reg=2 /mod=reg /rm=0", FNOP);
    op!(t, "d9 /reg=3 /mod=reg", FSTP1, STi);
    op!(t, "d9 /reg=4 /mod=reg /rm=0", FCHS);
    op!(t, "d9 /reg=4 /mod=reg /rm=1", FABS);
    op!(t, "d9 /reg=4 /mod=reg /rm=4", FTST);
    op!(t, "d9 /reg=4 /mod=reg /rm=5", FXAM);
    const D9_5: [Mnemonic; 7] = [
        Mnemonic::FLD1, Mnemonic::FLDL2T, Mnemonic::FLDL2E, Mnemonic::FLDPI,
        Mnemonic::FLDLG2, Mnemonic::FLDLN2, Mnemonic::FLDZ,
    ];
    const D9_6: [Mnemonic; 8] = [
        Mnemonic::F2XM1, Mnemonic::FYL2X, Mnemonic::FPTAN, Mnemonic::FPATAN,
        Mnemonic::FXTRACT, Mnemonic::FPREM1, Mnemonic::FDECSTP, Mnemonic::FINCSTP,
    ];
    const D9_7: [Mnemonic; 8] = [
        Mnemonic::FPREM, Mnemonic::FYL2XP1, Mnemonic::FSQRT, Mnemonic::FSINCOS,
        Mnemonic::FRNDINT, Mnemonic::FSCALE, Mnemonic::FSIN, Mnemonic::FCOS,
    ];
    for (rm, &m) in D9_5.iter().enumerate() {
        t.insert(&format!("d9 /reg=5 /mod=reg /rm={}", rm), m, &[], 0);
    }
    for rm in 0..8 {
        t.insert(&format!("d9 /reg=6 /mod=reg /rm={}", rm), D9_6[rm], &[], 0);
        t.insert(&format!("d9 /reg=7 /mod=reg /rm={}", rm), D9_7[rm], &[], 0);
    }

    op!(t, "da /reg=0 /mod=reg", FCMOVB, ST0, STi);
    op!(t, "da /reg=1 /mod=reg", FCMOVE, ST0, STi);
    op!(t, "da /reg=2 /mod=reg", FCMOVBE, ST0, STi);
    op!(t, "da /reg=3 /mod=reg", FCMOVU, ST0, STi);
    op!(t, "da /reg=5 /mod=reg /rm=1", FUCOMPP);

    op!(t, "db /reg=0 /mod=mem", FILD, Md);
    op!(t, "db /reg=1 /mod=mem", FISTTP, Md);
    op!(t, "db /reg=2 /mod=mem", FIST, Md);
    op!(t, "db /reg=3 /mod=mem", FISTP, Md);
    op!(t, "db /reg=5 /mod=mem", FLD, Mt);
    op!(t, "db /reg=7 /mod=mem", FSTP, Mt);
    op!(t, "db /reg=0 /mod=reg", FCMOVNB, ST0, STi);
    op!(t, "db /reg=1 /mod=reg", FCMOVNE, ST0, STi);
    op!(t, "db /reg=2 /mod=reg", FCMOVNBE, ST0, STi);
    op!(t, "db /reg=3 /mod=reg", FCMOVNU, ST0, STi);
    op!(t, "db /reg=4 /mod=reg /rm=2", FNCLEX);
    op!(t, "db /reg=4 /mod=reg /rm=3", FNINIT);
    op!(t, "db /reg=5 /mod=reg", FUCOMI, ST0, STi);
    op!(t, "db /reg=6 /mod=reg", FCOMI, ST0, STi);

    op!(t, "dc /reg=0 /mod=reg", FADD, STi, ST0);
    op!(t, "dc /reg=1 /mod=reg", FMUL, STi, ST0);
    op!(t, "dc /reg=2 /mod=reg", FCOM2, STi);
    op!(t, "dc /reg=3 /mod=reg", FCOMP3, STi);
    op!(t, "dc /reg=4 /mod=reg", FSUBR, STi, ST0);
    op!(t, "dc /reg=5 /mod=reg", FSUB, STi, ST0);
    op!(t, "dc /reg=6 /mod=reg", FDIVR, STi, ST0);
    op!(t, "dc /reg=7 /mod=reg", FDIV, STi, ST0);

    op!(t, "dd /reg=0 /mod=mem", FLD, Mq);
    op!(t, "dd /reg=1 /mod=mem", FISTTP, Mq);
    op!(t, "dd /reg=2 /mod=mem", FST, Mq);
    op!(t, "dd /reg=3 /mod=mem", FSTP, Mq);
    op!(t, "dd /reg=4 /mod=mem", FRSTOR, M);
    op!(t, "dd /reg=6 /mod=mem", FNSAVE, M);
    op!(t, "dd /reg=7 /mod=mem", FNSTSW, Mw);
    op!(t, "dd /reg=0 /mod=reg", FFREE, STi);
    op!(t, "dd /reg=1 /mod=reg", FXCH4, STi);
    op!(t, "dd /reg=2 /mod=reg", FST, STi);
    op!(t, "dd /reg=3 /mod=reg", FSTP, STi);
    op!(t, "dd /reg=4 /mod=reg", FUCOM, STi);
    op!(t, "dd /reg=5 /mod=reg", FUCOMP, STi);

    op!(t, "de /reg=0 /mod=reg", FADDP, STi, ST0);
    op!(t, "de /reg=1 /mod=reg", FMULP, STi, ST0);
    op!(t, "de /reg=2 /mod=reg", FCOMP5, STi);
    op!(t, "de /reg=3 /mod=reg /rm=1", FCOMPP);
    op!(t, "de /reg=4 /mod=reg", FSUBRP, STi, ST0);
    op!(t, "de /reg=5 /mod=reg", FSUBP, STi, ST0);
    op!(t, "de /reg=6 /mod=reg", FDIVRP, STi, ST0);
    op!(t, "de /reg=7 /mod=reg", FDIVP, STi, ST0);

    op!(t, "df /reg=0 /mod=mem", FILD, Mw);
    op!(t, "df /reg=1 /mod=mem", FISTTP, Mw);
    op!(t, "df /reg=2 /mod=mem", FIST, Mw);
    op!(t, "df /reg=3 /mod=mem", FISTP, Mw);
    op!(t, "df /reg=4 /mod=mem", FBLD, Mt);
    op!(t, "df /reg=5 /mod=mem", FILD, Mq);
    op!(t, "df /reg=6 /mod=mem", FBSTP, Mt);
    op!(t, "df /reg=7 /mod=mem", FISTP, Mq);
    op!(t, "df /reg=0 /mod=reg", FFREEP, STi);
    op!(t, "df /reg=1 /mod=reg", FXCH7, STi);
    op!(t, "df /reg=2 /mod=reg", FSTP8, STi);
    op!(t, "df /reg=3 /mod=reg", FSTP9, STi);
    op!(t, "df /reg=4 /mod=reg /rm=0", FNSTSW, AX);
    op!(t, "df /reg=5 /mod=reg", FUCOMIP, ST0, STi);
    op!(t, "df /reg=6 /mod=reg", FCOMIP, ST0, STi);
}

/// The 0F map outside the SSE ranges.
fn secondary(t: &mut TableBuilder) {
    op!(t, "0f 00 /reg=0", SLDT, Ew);
    op!(t, "0f 00 /reg=1", STR, Ew);
    op!(t, "0f 00 /reg=2", LLDT, Ew);
    op!(t, "0f 00 /reg=3", LTR, Ew);
    op!(t, "0f 00 /reg=4", VERR, Ew);
    op!(t, "0f 00 /reg=5", VERW, Ew);

    op!(t, "0f 01 /reg=0 /mod=mem", SGDT, M);
    op!(t, "0f 01 /reg=1 /mod=mem", SIDT, M);
    op!(t, "0f 01 /reg=2 /mod=mem", LGDT, M);
    op!(t, "0f 01 /reg=3 /mod=mem", LIDT, M);
    op!(t, "0f 01 /reg=4", SMSW, Ew);
    op!(t, "0f 01 /reg=6", LMSW, Ew);
    op!(t, "0f 01 /reg=7 /mod=mem", INVLPG, Mb);
    op!(t, "0f 01 /reg=0 /mod=reg /rm=1 /vendor=intel", VMCALL);
    op!(t, "0f 01 /reg=0 /mod=reg /rm=2 /vendor=intel", VMLAUNCH);
    op!(t, "0f 01 /reg=0 /mod=reg /rm=3 /vendor=intel", VMRESUME);
    op!(t, "0f 01 /reg=0 /mod=reg /rm=4 /vendor=intel", VMXOFF);
    op!(t, "0f 01 /reg=1 /mod=reg /rm=0", MONITOR);
    op!(t, "0f 01 /reg=1 /mod=reg /rm=1", MWAIT);
    op!(t, "0f 01 /reg=1 /mod=reg /rm=2", CLAC);
    op!(t, "0f 01 /reg=1 /mod=reg /rm=3", STAC);
    op!(t, "0f 01 /reg=2 /mod=reg /rm=0", XGETBV);
    op!(t, "0f 01 /reg=2 /mod=reg /rm=1", XSETBV);
    op!(t, "0f 01 /reg=3 /mod=reg /rm=0 /vendor=amd", VMRUN);
    op!(t, "0f 01 /reg=3 /mod=reg /rm=1 /vendor=amd", VMMCALL);
    op!(t, "0f 01 /reg=3 /mod=reg /rm=2 /vendor=amd", VMLOAD);
    op!(t, "0f 01 /reg=3 /mod=reg /rm=3 /vendor=amd", VMSAVE);
    op!(t, "0f 01 /reg=3 /mod=reg /rm=4 /vendor=amd", STGI);
    op!(t, "0f 01 /reg=3 /mod=reg /rm=5 /vendor=amd", CLGI);
    op!(t, "0f 01 /reg=3 /mod=reg /rm=6 /vendor=amd", SKINIT);
    op!(t, "0f 01 /reg=3 /mod=reg /rm=7 /vendor=amd", INVLPGA);
    op!(t, "0f 01 /reg=7 /mod=reg /rm=0 /m=64", SWAPGS);
    op!(t, "0f 01 /reg=7 /mod=reg /rm=1", RDTSCP);

    op!(t, "0f 02", LAR, Gv, Ew);
    op!(t, "0f 03", LSL, Gv, Ew);
    op!(t, "0f 05", SYSCALL);
    op!(t, "0f 06", CLTS);
    op!(t, "0f 07", SYSRET);
    op!(t, "0f 08", INVD);
    op!(t, "0f 09", WBINVD);
    op!(t, "0f 0b", UD2);
    op!(t, "0f 0d /reg=0 /mod=mem", PREFETCH, Mb);
    op!(t, "0f 0d /reg=1 /mod=mem", PREFETCHW, Mb);
    op!(t, "0f 0e /vendor=amd", FEMMS);

    op!(t, "0f 18 /reg=0 /mod=mem", PREFETCHNTA, Mb);
    op!(t, "0f 18 /reg=1 /mod=mem", PREFETCHT0, Mb);
    op!(t, "0f 18 /reg=2 /mod=mem", PREFETCHT1, Mb);
    op!(t, "0f 18 /reg=3 /mod=mem", PREFETCHT2, Mb);
    op!(t, "0f 1f /reg=0", NOP, Ev);

    op!(t, "0f 20", MOV, Rn, Cn);
    op!(t, "0f 21", MOV, Rn, Dn);
    op!(t, "0f 22", MOV, Cn, Rn);
    op!(t, "0f 23", MOV, Dn, Rn);

    op!(t, "0f 30", WRMSR);
    op!(t, "0f 31", RDTSC);
    op!(t, "0f 32", RDMSR);
    op!(t, "0f 33", RDPMC);
    op!(t, "0f 34", SYSENTER);
    op!(t, "0f 35", SYSEXIT);
    op!(t, "0f 37", GETSEC);

    for cc in 0..16 {
        t.insert(&format!("0f {:02x}", 0x40 + cc), CMOVCC[cc], &[Gv, Ev], 0);
        t.insert(&format!("0f {:02x}", 0x90 + cc), SETCC[cc], &[Eb], 0);
    }

    op!(t, "0f 78 /sse=none /vendor=intel", VMREAD, Ey, Gy; ENTRY_DEF64);
    op!(t, "0f 79 /sse=none /vendor=intel", VMWRITE, Gy, Ey; ENTRY_DEF64);

    op!(t, "0f a0", PUSH, FS; ENTRY_DEF64);
    op!(t, "0f a1", POP, FS; ENTRY_DEF64);
    op!(t, "0f a2", CPUID);
    op!(t, "0f a3", BT, Ev, Gv);
    op!(t, "0f a4", SHLD, Ev, Gv, Ib);
    op!(t, "0f a5", SHLD, Ev, Gv, CL);
    op!(t, "0f a8", PUSH, GS; ENTRY_DEF64);
    op!(t, "0f a9", POP, GS; ENTRY_DEF64);
    op!(t, "0f aa", RSM);
    op!(t, "0f ab", BTS, Ev, Gv);
    op!(t, "0f ac", SHRD, Ev, Gv, Ib);
    op!(t, "0f ad", SHRD, Ev, Gv, CL);
    op!(t, "0f ae /reg=0 /mod=mem", FXSAVE, M);
    op!(t, "0f ae /reg=1 /mod=mem", FXRSTOR, M);
    op!(t, "0f ae /reg=2 /mod=mem", LDMXCSR, Md);
    op!(t, "0f ae /reg=3 /mod=mem", STMXCSR, Md);
    op!(t, "0f ae /reg=4 /mod=mem", XSAVE, M);
    op!(t, "0f ae /reg=5 /mod=mem", XRSTOR, M);
    op!(t, "0f ae /reg=6 /mod=mem", XSAVEOPT, M);
    op!(t, "0f ae /reg=7 /mod=mem", CLFLUSH, Mb);
    op!(t, "0f ae /reg=5 /mod=reg", LFENCE);
    op!(t, "0f ae /reg=6 /mod=reg", MFENCE);
    op!(t, "0f ae /reg=7 /mod=reg", SFENCE);
    op!(t, "0f af", IMUL, Gv, Ev);
    op!(t, "0f b0", CMPXCHG, Eb, Gb);
    op!(t, "0f b1", CMPXCHG, Ev, Gv);
    op!(t, "0f b2", LSS, Gv, Mp);
    op!(t, "0f b3", BTR, Ev, Gv);
    op!(t, "0f b4", LFS, Gv, Mp);
    op!(t, "0f b5", LGS, Gv, Mp);
    op!(t, "0f b6", MOVZX, Gv, Eb);
    op!(t, "0f b7", MOVZX, Gv, Ew);
    op!(t, "0f b8 /sse=f3", POPCNT, Gv, Ev);
    op!(t, "0f ba /reg=4", BT, Ev, Ib);
    op!(t, "0f ba /reg=5", BTS, Ev, Ib);
    op!(t, "0f ba /reg=6", BTR, Ev, Ib);
    op!(t, "0f ba /reg=7", BTC, Ev, Ib);
    op!(t, "0f bb", BTC, Ev, Gv);
    op!(t, "0f bc /sse=none", BSF, Gv, Ev);
    op!(t, "0f bc /sse=f3", TZCNT, Gv, Ev);
    op!(t, "0f bd /sse=none", BSR, Gv, Ev);
    op!(t, "0f bd /sse=f3", LZCNT, Gv, Ev);
    op!(t, "0f be", MOVSX, Gv, Eb);
    op!(t, "0f bf", MOVSX, Gv, Ew);
    op!(t, "0f c0", XADD, Eb, Gb);
    op!(t, "0f c1", XADD, Ev, Gv);
    op!(t, "0f c7 /reg=1 /mod=mem /o=16", CMPXCHG8B, Mq);
    op!(t, "0f c7 /reg=1 /mod=mem /o=32", CMPXCHG8B, Mq);
    op!(t, "0f c7 /reg=1 /mod=mem /o=64", CMPXCHG16B, Mdq);
    op!(t, "0f c7 /sse=none /reg=6 /mod=mem /vendor=intel", VMPTRLD, Mq);
    op!(t, "0f c7 /sse=66 /reg=6 /mod=mem /vendor=intel", VMCLEAR, Mq);
    op!(t, "0f c7 /sse=f3 /reg=6 /mod=mem /vendor=intel", VMXON, Mq);
    op!(t, "0f c7 /sse=none /reg=7 /mod=mem /vendor=intel", VMPTRST, Mq);
    op!(t, "0f c7 /reg=6 /mod=reg", RDRAND, Rv);
    op!(t, "0f c7 /reg=7 /mod=reg", RDSEED, Rv);
    op!(t, "0f c8+r", BSWAP, Zy);
}

/// Inserts the MMX form without a mandatory prefix and the SSE2 form under 66.
fn mmx_sse2(t: &mut TableBuilder, opcode: &str, m: Mnemonic) {
    t.insert(&format!("{} /sse=none", opcode), m, &[Pq, Qq], 0);
    t.insert(&format!("{} /sse=66", opcode), m, &[Vx, Wx], 0);
}

/// Inserts the packed-single, packed-double, scalar-single and scalar-double forms.
fn sse_arith(t: &mut TableBuilder, opcode: &str, ps: Mnemonic, pd: Mnemonic, ss: Mnemonic, sd: Mnemonic) {
    t.insert(&format!("{} /sse=none", opcode), ps, &[Vx, Wx], 0);
    t.insert(&format!("{} /sse=66", opcode), pd, &[Vx, Wx], 0);
    t.insert(&format!("{} /sse=f3", opcode), ss, &[Vx, Wd], 0);
    t.insert(&format!("{} /sse=f2", opcode), sd, &[Vx, Wq], 0);
}

fn sse(t: &mut TableBuilder) {
    op!(t, "0f 10 /sse=none", MOVUPS, Vx, Wx);
    op!(t, "0f 10 /sse=66", MOVUPD, Vx, Wx);
    op!(t, "0f 10 /sse=f3", MOVSS, Vx, Wd);
    op!(t, "0f 10 /sse=f2", MOVSD, Vx, Wq);
    op!(t, "0f 11 /sse=none", MOVUPS, Wx, Vx);
    op!(t, "0f 11 /sse=66", MOVUPD, Wx, Vx);
    op!(t, "0f 11 /sse=f3", MOVSS, Wd, Vx);
    op!(t, "0f 11 /sse=f2", MOVSD, Wq, Vx);
    op!(t, "0f 12 /sse=none /mod=mem", MOVLPS, Vx, Mq);
    op!(t, "0f 12 /sse=none /mod=reg", MOVHLPS, Vx, Ux);
    op!(t, "0f 12 /sse=66 /mod=mem", MOVLPD, Vx, Mq);
    op!(t, "0f 12 /sse=f2", MOVDDUP, Vx, Wq);
    op!(t, "0f 12 /sse=f3", MOVSLDUP, Vx, Wx);
    op!(t, "0f 13 /sse=none /mod=mem", MOVLPS, Mq, Vx);
    op!(t, "0f 13 /sse=66 /mod=mem", MOVLPD, Mq, Vx);
    op!(t, "0f 14 /sse=none", UNPCKLPS, Vx, Wx);
    op!(t, "0f 14 /sse=66", UNPCKLPD, Vx, Wx);
    op!(t, "0f 15 /sse=none", UNPCKHPS, Vx, Wx);
    op!(t, "0f 15 /sse=66", UNPCKHPD, Vx, Wx);
    op!(t, "0f 16 /sse=none /mod=mem", MOVHPS, Vx, Mq);
    op!(t, "0f 16 /sse=none /mod=reg", MOVLHPS, Vx, Ux);
    op!(t, "0f 16 /sse=66 /mod=mem", MOVHPD, Vx, Mq);
    op!(t, "0f 16 /sse=f3", MOVSHDUP, Vx, Wx);
    op!(t, "0f 17 /sse=none /mod=mem", MOVHPS, Mq, Vx);
    op!(t, "0f 17 /sse=66 /mod=mem", MOVHPD, Mq, Vx);

    op!(t, "0f 28 /sse=none", MOVAPS, Vx, Wx);
    op!(t, "0f 28 /sse=66", MOVAPD, Vx, Wx);
    op!(t, "0f 29 /sse=none", MOVAPS, Wx, Vx);
    op!(t, "0f 29 /sse=66", MOVAPD, Wx, Vx);
    op!(t, "0f 2a /sse=none", CVTPI2PS, Vx, Qq);
    op!(t, "0f 2a /sse=66", CVTPI2PD, Vx, Qq);
    op!(t, "0f 2a /sse=f3", CVTSI2SS, Vx, Ey);
    op!(t, "0f 2a /sse=f2", CVTSI2SD, Vx, Ey);
    op!(t, "0f 2b /sse=none /mod=mem", MOVNTPS, Mdq, Vx);
    op!(t, "0f 2b /sse=66 /mod=mem", MOVNTPD, Mdq, Vx);
    op!(t, "0f 2c /sse=none", CVTTPS2PI, Pq, Wq);
    op!(t, "0f 2c /sse=66", CVTTPD2PI, Pq, Wx);
    op!(t, "0f 2c /sse=f3", CVTTSS2SI, Gy, Wd);
    op!(t, "0f 2c /sse=f2", CVTTSD2SI, Gy, Wq);
    op!(t, "0f 2d /sse=none", CVTPS2PI, Pq, Wq);
    op!(t, "0f 2d /sse=66", CVTPD2PI, Pq, Wx);
    op!(t, "0f 2d /sse=f3", CVTSS2SI, Gy, Wd);
    op!(t, "0f 2d /sse=f2", CVTSD2SI, Gy, Wq);
    op!(t, "0f 2e /sse=none", UCOMISS, Vx, Wd);
    op!(t, "0f 2e /sse=66", UCOMISD, Vx, Wq);
    op!(t, "0f 2f /sse=none", COMISS, Vx, Wd);
    op!(t, "0f 2f /sse=66", COMISD, Vx, Wq);

    op!(t, "0f 50 /sse=none /mod=reg", MOVMSKPS, Gd, Ux);
    op!(t, "0f 50 /sse=66 /mod=reg", MOVMSKPD, Gd, Ux);
    sse_arith(t, "0f 51", Mnemonic::SQRTPS, Mnemonic::SQRTPD, Mnemonic::SQRTSS, Mnemonic::SQRTSD);
    op!(t, "0f 52 /sse=none", RSQRTPS, Vx, Wx);
    op!(t, "0f 52 /sse=f3", RSQRTSS, Vx, Wd);
    op!(t, "0f 53 /sse=none", RCPPS, Vx, Wx);
    op!(t, "0f 53 /sse=f3", RCPSS, Vx, Wd);
    op!(t, "0f 54 /sse=none", ANDPS, Vx, Wx);
    op!(t, "0f 54 /sse=66", ANDPD, Vx, Wx);
    op!(t, "0f 55 /sse=none", ANDNPS, Vx, Wx);
    op!(t, "0f 55 /sse=66", ANDNPD, Vx, Wx);
    op!(t, "0f 56 /sse=none", ORPS, Vx, Wx);
    op!(t, "0f 56 /sse=66", ORPD, Vx, Wx);
    op!(t, "0f 57 /sse=none", XORPS, Vx, Wx);
    op!(t, "0f 57 /sse=66", XORPD, Vx, Wx);
    sse_arith(t, "0f 58", Mnemonic::ADDPS, Mnemonic::ADDPD, Mnemonic::ADDSS, Mnemonic::ADDSD);
    sse_arith(t, "0f 59", Mnemonic::MULPS, Mnemonic::MULPD, Mnemonic::MULSS, Mnemonic::MULSD);
    op!(t, "0f 5a /sse=none", CVTPS2PD, Vx, Wq);
    op!(t, "0f 5a /sse=66", CVTPD2PS, Vx, Wx);
    op!(t, "0f 5a /sse=f3", CVTSS2SD, Vx, Wd);
    op!(t, "0f 5a /sse=f2", CVTSD2SS, Vx, Wq);
    op!(t, "0f 5b /sse=none", CVTDQ2PS, Vx, Wx);
    op!(t, "0f 5b /sse=66", CVTPS2DQ, Vx, Wx);
    op!(t, "0f 5b /sse=f3", CVTTPS2DQ, Vx, Wx);
    sse_arith(t, "0f 5c", Mnemonic::SUBPS, Mnemonic::SUBPD, Mnemonic::SUBSS, Mnemonic::SUBSD);
    sse_arith(t, "0f 5d", Mnemonic::MINPS, Mnemonic::MINPD, Mnemonic::MINSS, Mnemonic::MINSD);
    sse_arith(t, "0f 5e", Mnemonic::DIVPS, Mnemonic::DIVPD, Mnemonic::DIVSS, Mnemonic::DIVSD);
    sse_arith(t, "0f 5f", Mnemonic::MAXPS, Mnemonic::MAXPD, Mnemonic::MAXSS, Mnemonic::MAXSD);

    const PACKED_60: [Mnemonic; 12] = [
        Mnemonic::PUNPCKLBW, Mnemonic::PUNPCKLWD, Mnemonic::PUNPCKLDQ, Mnemonic::PACKSSWB,
        Mnemonic::PCMPGTB, Mnemonic::PCMPGTW, Mnemonic::PCMPGTD, Mnemonic::PACKUSWB,
        Mnemonic::PUNPCKHBW, Mnemonic::PUNPCKHWD, Mnemonic::PUNPCKHDQ, Mnemonic::PACKSSDW,
    ];
    for (i, &m) in PACKED_60.iter().enumerate() {
        mmx_sse2(t, &format!("0f {:02x}", 0x60 + i), m);
    }
    op!(t, "0f 6c /sse=66", PUNPCKLQDQ, Vx, Wx);
    op!(t, "0f 6d /sse=66", PUNPCKHQDQ, Vx, Wx);
    op!(t, "0f 6e /sse=none /o=16", MOVD, Pq, Ey);
    op!(t, "0f 6e /sse=none /o=32", MOVD, Pq, Ey);
    op!(t, "0f 6e /sse=none /o=64", MOVQ, Pq, Ey);
    op!(t, "0f 6e /sse=66 /o=16", MOVD, Vx, Ey);
    op!(t, "0f 6e /sse=66 /o=32", MOVD, Vx, Ey);
    op!(t, "0f 6e /sse=66 /o=64", MOVQ, Vx, Ey);
    op!(t, "0f 6f /sse=none", MOVQ, Pq, Qq);
    op!(t, "0f 6f /sse=66", MOVDQA, Vx, Wx);
    op!(t, "0f 6f /sse=f3", MOVDQU, Vx, Wx);
    op!(t, "0f 70 /sse=none", PSHUFW, Pq, Qq, Ib);
    op!(t, "0f 70 /sse=66", PSHUFD, Vx, Wx, Ib);
    op!(t, "0f 70 /sse=f3", PSHUFHW, Vx, Wx, Ib);
    op!(t, "0f 70 /sse=f2", PSHUFLW, Vx, Wx, Ib);
    for (opcode, reg, m) in [
        ("0f 71", 2, Mnemonic::PSRLW), ("0f 71", 4, Mnemonic::PSRAW), ("0f 71", 6, Mnemonic::PSLLW),
        ("0f 72", 2, Mnemonic::PSRLD), ("0f 72", 4, Mnemonic::PSRAD), ("0f 72", 6, Mnemonic::PSLLD),
        ("0f 73", 2, Mnemonic::PSRLQ), ("0f 73", 6, Mnemonic::PSLLQ),
    ] {
        t.insert(&format!("{} /sse=none /reg={} /mod=reg", opcode, reg), m, &[Nq, Ib], 0);
        t.insert(&format!("{} /sse=66 /reg={} /mod=reg", opcode, reg), m, &[Ux, Ib], 0);
    }
    op!(t, "0f 73 /sse=66 /reg=3 /mod=reg", PSRLDQ, Ux, Ib);
    op!(t, "0f 73 /sse=66 /reg=7 /mod=reg", PSLLDQ, Ux, Ib);
    mmx_sse2(t, "0f 74", Mnemonic::PCMPEQB);
    mmx_sse2(t, "0f 75", Mnemonic::PCMPEQW);
    mmx_sse2(t, "0f 76", Mnemonic::PCMPEQD);
    op!(t, "0f 77 /sse=none", EMMS);
    op!(t, "0f 7c /sse=66", HADDPD, Vx, Wx);
    op!(t, "0f 7c /sse=f2", HADDPS, Vx, Wx);
    op!(t, "0f 7d /sse=66", HSUBPD, Vx, Wx);
    op!(t, "0f 7d /sse=f2", HSUBPS, Vx, Wx);
    op!(t, "0f 7e /sse=none /o=16", MOVD, Ey, Pq);
    op!(t, "0f 7e /sse=none /o=32", MOVD, Ey, Pq);
    op!(t, "0f 7e /sse=none /o=64", MOVQ, Ey, Pq);
    op!(t, "0f 7e /sse=66 /o=16", MOVD, Ey, Vx);
    op!(t, "0f 7e /sse=66 /o=32", MOVD, Ey, Vx);
    op!(t, "0f 7e /sse=66 /o=64", MOVQ, Ey, Vx);
    op!(t, "0f 7e /sse=f3", MOVQ, Vx, Wq);
    op!(t, "0f 7f /sse=none", MOVQ, Qq, Pq);
    op!(t, "0f 7f /sse=66", MOVDQA, Wx, Vx);
    op!(t, "0f 7f /sse=f3", MOVDQU, Wx, Vx);

    op!(t, "0f c2 /sse=none", CMPPS, Vx, Wx, Ib);
    op!(t, "0f c2 /sse=66", CMPPD, Vx, Wx, Ib);
    op!(t, "0f c2 /sse=f3", CMPSS, Vx, Wd, Ib);
    op!(t, "0f c2 /sse=f2", CMPSD, Vx, Wq, Ib);
    op!(t, "0f c3 /sse=none /mod=mem", MOVNTI, My, Gy);
    op!(t, "0f c4 /sse=none", PINSRW, Pq, Ed, Ib);
    op!(t, "0f c4 /sse=66", PINSRW, Vx, Ed, Ib);
    op!(t, "0f c5 /sse=none /mod=reg", PEXTRW, Gd, Nq, Ib);
    op!(t, "0f c5 /sse=66 /mod=reg", PEXTRW, Gd, Ux, Ib);
    op!(t, "0f c6 /sse=none", SHUFPS, Vx, Wx, Ib);
    op!(t, "0f c6 /sse=66", SHUFPD, Vx, Wx, Ib);

    op!(t, "0f d0 /sse=66", ADDSUBPD, Vx, Wx);
    op!(t, "0f d0 /sse=f2", ADDSUBPS, Vx, Wx);
    op!(t, "0f d6 /sse=66", MOVQ, Wq, Vx);
    op!(t, "0f d6 /sse=f3 /mod=reg", MOVQ2DQ, Vx, Nq);
    op!(t, "0f d6 /sse=f2 /mod=reg", MOVDQ2Q, Pq, Ux);
    op!(t, "0f d7 /sse=none /mod=reg", PMOVMSKB, Gd, Nq);
    op!(t, "0f d7 /sse=66 /mod=reg", PMOVMSKB, Gd, Ux);
    op!(t, "0f e6 /sse=66", CVTTPD2DQ, Vx, Wx);
    op!(t, "0f e6 /sse=f3", CVTDQ2PD, Vx, Wq);
    op!(t, "0f e6 /sse=f2", CVTPD2DQ, Vx, Wx);
    op!(t, "0f e7 /sse=none /mod=mem", MOVNTQ, Mq, Pq);
    op!(t, "0f e7 /sse=66 /mod=mem", MOVNTDQ, Mdq, Vx);
    op!(t, "0f f0 /sse=f2 /mod=mem", LDDQU, Vx, Mdq);
    op!(t, "0f f7 /sse=none /mod=reg", MASKMOVQ, Pq, Nq);
    op!(t, "0f f7 /sse=66 /mod=reg", MASKMOVDQU, Vx, Ux);

    const PACKED_D0: [(u8, Mnemonic); 40] = [
        (0xd1, Mnemonic::PSRLW), (0xd2, Mnemonic::PSRLD), (0xd3, Mnemonic::PSRLQ), (0xd4, Mnemonic::PADDQ),
        (0xd5, Mnemonic::PMULLW), (0xd8, Mnemonic::PSUBUSB), (0xd9, Mnemonic::PSUBUSW), (0xda, Mnemonic::PMINUB),
        (0xdb, Mnemonic::PAND), (0xdc, Mnemonic::PADDUSB), (0xdd, Mnemonic::PADDUSW), (0xde, Mnemonic::PMAXUB),
        (0xdf, Mnemonic::PANDN), (0xe0, Mnemonic::PAVGB), (0xe1, Mnemonic::PSRAW), (0xe2, Mnemonic::PSRAD),
        (0xe3, Mnemonic::PAVGW), (0xe4, Mnemonic::PMULHUW), (0xe5, Mnemonic::PMULHW), (0xe8, Mnemonic::PSUBSB),
        (0xe9, Mnemonic::PSUBSW), (0xea, Mnemonic::PMINSW), (0xeb, Mnemonic::POR), (0xec, Mnemonic::PADDSB),
        (0xed, Mnemonic::PADDSW), (0xee, Mnemonic::PMAXSW), (0xef, Mnemonic::PXOR), (0xf1, Mnemonic::PSLLW),
        (0xf2, Mnemonic::PSLLD), (0xf3, Mnemonic::PSLLQ), (0xf4, Mnemonic::PMULUDQ), (0xf5, Mnemonic::PMADDWD),
        (0xf6, Mnemonic::PSADBW), (0xf8, Mnemonic::PSUBB), (0xf9, Mnemonic::PSUBW), (0xfa, Mnemonic::PSUBD),
        (0xfb, Mnemonic::PSUBQ), (0xfc, Mnemonic::PADDB), (0xfd, Mnemonic::PADDW), (0xfe, Mnemonic::PADDD),
    ];
    for (byte, m) in PACKED_D0 {
        mmx_sse2(t, &format!("0f {:02x}", byte), m);
    }
}

/// The 0F 38 and 0F 3A maps.
fn three_byte(t: &mut TableBuilder) {
    const SSSE3: [(u8, Mnemonic); 15] = [
        (0x00, Mnemonic::PSHUFB), (0x01, Mnemonic::PHADDW), (0x02, Mnemonic::PHADDD), (0x03, Mnemonic::PHADDSW),
        (0x04, Mnemonic::PMADDUBSW), (0x05, Mnemonic::PHSUBW), (0x06, Mnemonic::PHSUBD), (0x07, Mnemonic::PHSUBSW),
        (0x08, Mnemonic::PSIGNB), (0x09, Mnemonic::PSIGNW), (0x0a, Mnemonic::PSIGND), (0x0b, Mnemonic::PMULHRSW),
        (0x1c, Mnemonic::PABSB), (0x1d, Mnemonic::PABSW), (0x1e, Mnemonic::PABSD),
    ];
    for (byte, m) in SSSE3 {
        mmx_sse2(t, &format!("0f 38 {:02x}", byte), m);
    }

    const SSE41: [(u8, Mnemonic); 24] = [
        (0x10, Mnemonic::PBLENDVB), (0x14, Mnemonic::BLENDVPS), (0x15, Mnemonic::BLENDVPD), (0x17, Mnemonic::PTEST),
        (0x28, Mnemonic::PMULDQ), (0x29, Mnemonic::PCMPEQQ), (0x2b, Mnemonic::PACKUSDW), (0x37, Mnemonic::PCMPGTQ),
        (0x38, Mnemonic::PMINSB), (0x39, Mnemonic::PMINSD), (0x3a, Mnemonic::PMINUW), (0x3b, Mnemonic::PMINUD),
        (0x3c, Mnemonic::PMAXSB), (0x3d, Mnemonic::PMAXSD), (0x3e, Mnemonic::PMAXUW), (0x3f, Mnemonic::PMAXUD),
        (0x40, Mnemonic::PMULLD), (0x41, Mnemonic::PHMINPOSUW), (0xdb, Mnemonic::AESIMC), (0xdc, Mnemonic::AESENC),
        (0xdd, Mnemonic::AESENCLAST), (0xde, Mnemonic::AESDEC), (0xdf, Mnemonic::AESDECLAST), (0x2a, Mnemonic::MOVNTDQA),
    ];
    for (byte, m) in SSE41 {
        let source = if byte == 0x2a { Mdq } else { Wx };
        t.insert(&format!("0f 38 {:02x} /sse=66", byte), m, &[Vx, source], 0);
    }

    const PMOVX: [(u8, Mnemonic, OperandTemplate); 12] = [
        (0x20, Mnemonic::PMOVSXBW, Wq), (0x21, Mnemonic::PMOVSXBD, Wd), (0x22, Mnemonic::PMOVSXBQ, Ww),
        (0x23, Mnemonic::PMOVSXWD, Wq), (0x24, Mnemonic::PMOVSXWQ, Wd), (0x25, Mnemonic::PMOVSXDQ, Wq),
        (0x30, Mnemonic::PMOVZXBW, Wq), (0x31, Mnemonic::PMOVZXBD, Wd), (0x32, Mnemonic::PMOVZXBQ, Ww),
        (0x33, Mnemonic::PMOVZXWD, Wq), (0x34, Mnemonic::PMOVZXWQ, Wd), (0x35, Mnemonic::PMOVZXDQ, Wq),
    ];
    for (byte, m, source) in PMOVX {
        t.insert(&format!("0f 38 {:02x} /sse=66", byte), m, &[Vx, source], 0);
    }

    op!(t, "0f 38 80 /sse=66 /mod=mem /vendor=intel", INVEPT, Gy, Mdq; ENTRY_DEF64);
    op!(t, "0f 38 81 /sse=66 /mod=mem /vendor=intel", INVVPID, Gy, Mdq; ENTRY_DEF64);
    op!(t, "0f 38 f0 /sse=none /mod=mem", MOVBE, Gv, Mv);
    op!(t, "0f 38 f1 /sse=none /mod=mem", MOVBE, Mv, Gv);
    op!(t, "0f 38 f0 /sse=f2", CRC32, Gy, Eb);
    op!(t, "0f 38 f1 /sse=f2", CRC32, Gy, Ev);

    const SSE41_IMM: [(u8, Mnemonic, OperandTemplate); 13] = [
        (0x08, Mnemonic::ROUNDPS, Wx), (0x09, Mnemonic::ROUNDPD, Wx), (0x0a, Mnemonic::ROUNDSS, Wd),
        (0x0b, Mnemonic::ROUNDSD, Wq), (0x0c, Mnemonic::BLENDPS, Wx), (0x0d, Mnemonic::BLENDPD, Wx),
        (0x0e, Mnemonic::PBLENDW, Wx), (0x21, Mnemonic::INSERTPS, Wd), (0x40, Mnemonic::DPPS, Wx),
        (0x41, Mnemonic::DPPD, Wx), (0x42, Mnemonic::MPSADBW, Wx), (0x44, Mnemonic::PCLMULQDQ, Wx),
        (0xdf, Mnemonic::AESKEYGENASSIST, Wx),
    ];
    for (byte, m, source) in SSE41_IMM {
        t.insert(&format!("0f 3a {:02x} /sse=66", byte), m, &[Vx, source, Ib], 0);
    }
    for (byte, m) in [
        (0x60, Mnemonic::PCMPESTRM), (0x61, Mnemonic::PCMPESTRI),
        (0x62, Mnemonic::PCMPISTRM), (0x63, Mnemonic::PCMPISTRI),
    ] {
        t.insert(&format!("0f 3a {:02x} /sse=66", byte), m, &[Vx, Wx, Ib], 0);
    }
    op!(t, "0f 3a 0f /sse=none", PALIGNR, Pq, Qq, Ib);
    op!(t, "0f 3a 0f /sse=66", PALIGNR, Vx, Wx, Ib);
    op!(t, "0f 3a 14 /sse=66", PEXTRB, Ed, Vx, Ib);
    op!(t, "0f 3a 15 /sse=66", PEXTRW, Ed, Vx, Ib);
    op!(t, "0f 3a 16 /sse=66 /o=16", PEXTRD, Ed, Vx, Ib);
    op!(t, "0f 3a 16 /sse=66 /o=32", PEXTRD, Ed, Vx, Ib);
    op!(t, "0f 3a 16 /sse=66 /o=64", PEXTRQ, Eq, Vx, Ib);
    op!(t, "0f 3a 17 /sse=66", EXTRACTPS, Ed, Vx, Ib);
    op!(t, "0f 3a 20 /sse=66", PINSRB, Vx, Ed, Ib);
    op!(t, "0f 3a 22 /sse=66 /o=16", PINSRD, Vx, Ed, Ib);
    op!(t, "0f 3a 22 /sse=66 /o=32", PINSRD, Vx, Ed, Ib);
    op!(t, "0f 3a 22 /sse=66 /o=64", PINSRQ, Vx, Eq, Ib);
}
