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

macro_rules! mnemonics {
    ($($m:ident),* $(,)?) => {
        /// Instruction mnemonics. Variants carry the canonical uppercase text; the translators
        /// lower-case it unless asked otherwise.
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub enum Mnemonic {
            #[default]
            Invalid,
            $($m),*
        }

        pub(crate) fn mnemonic_to_str(op: Mnemonic) -> &'static str {
            match op {
                Mnemonic::Invalid => "INVALID",
                $(Mnemonic::$m => stringify!($m)),*
            }
        }
    };
}

#[rustfmt::skip]
mnemonics! {
    AAA, AAD, AAM, AAS, ADC, ADD, ADDPD, ADDPS, ADDSD, ADDSS,
    ADDSUBPD, ADDSUBPS, AESDEC, AESDECLAST, AESENC, AESENCLAST, AESIMC, AESKEYGENASSIST, AND, ANDNPD,
    ANDNPS, ANDPD, ANDPS, ARPL, BLENDPD, BLENDPS, BLENDVPD, BLENDVPS, BOUND, BSF,
    BSR, BSWAP, BT, BTC, BTR, BTS, CALL, CBW, CDQ, CDQE,
    CLAC, CLC, CLD, CLFLUSH, CLGI, CLI, CLTS, CMC, CMOVA, CMOVAE,
    CMOVB, CMOVBE, CMOVG, CMOVGE, CMOVL, CMOVLE, CMOVNO, CMOVNP, CMOVNS, CMOVNZ,
    CMOVO, CMOVP, CMOVS, CMOVZ, CMP, CMPPD, CMPPS, CMPSB, CMPSD, CMPSQ,
    CMPSS, CMPSW, CMPXCHG, CMPXCHG16B, CMPXCHG8B, COMISD, COMISS, CPUID, CQO, CRC32,
    CVTDQ2PD, CVTDQ2PS, CVTPD2DQ, CVTPD2PI, CVTPD2PS, CVTPI2PD, CVTPI2PS, CVTPS2DQ, CVTPS2PD, CVTPS2PI,
    CVTSD2SI, CVTSD2SS, CVTSI2SD, CVTSI2SS, CVTSS2SD, CVTSS2SI, CVTTPD2DQ, CVTTPD2PI, CVTTPS2DQ, CVTTPS2PI,
    CVTTSD2SI, CVTTSS2SI, CWD, CWDE, DAA, DAS, DEC, DIV, DIVPD, DIVPS,
    DIVSD, DIVSS, DPPD, DPPS, EMMS, ENTER, EXTRACTPS, F2XM1, FABS, FADD,
    FADDP, FBLD, FBSTP, FCHS, FCMOVB, FCMOVBE, FCMOVE, FCMOVNB, FCMOVNBE, FCMOVNE,
    FCMOVNU, FCMOVU, FCOM, FCOM2, FCOMI, FCOMIP, FCOMP, FCOMP3, FCOMP5, FCOMPP,
    FCOS, FDECSTP, FDIV, FDIVP, FDIVR, FDIVRP, FEMMS, FFREE, FFREEP, FIADD,
    FICOM, FICOMP, FIDIV, FIDIVR, FILD, FIMUL, FINCSTP, FIST, FISTP, FISTTP,
    FISUB, FISUBR, FLD, FLD1, FLDCW, FLDENV, FLDL2E, FLDL2T, FLDLG2, FLDLN2,
    FLDPI, FLDZ, FMUL, FMULP, FNCLEX, FNINIT, FNOP, FNSAVE, FNSTCW, FNSTENV,
    FNSTSW, FPATAN, FPREM, FPREM1, FPTAN, FRNDINT, FRSTOR, FSCALE, FSIN, FSINCOS,
    FSQRT, FST, FSTP, FSTP1, FSTP8, FSTP9, FSUB, FSUBP, FSUBR, FSUBRP,
    FTST, FUCOM, FUCOMI, FUCOMIP, FUCOMP, FUCOMPP, FXAM, FXCH, FXCH4, FXCH7,
    FXRSTOR, FXSAVE, FXTRACT, FYL2X, FYL2XP1, GETSEC, HADDPD, HADDPS, HLT, HSUBPD,
    HSUBPS, IDIV, IMUL, IN, INC, INSB, INSD, INSERTPS, INSW, INT,
    INT1, INT3, INTO, INVD, INVEPT, INVLPG, INVLPGA, INVVPID, IRETD, IRETQ,
    IRETW, JA, JAE, JB, JBE, JCXZ, JECXZ, JG, JGE, JL,
    JLE, JMP, JNO, JNP, JNS, JNZ, JO, JP, JRCXZ, JS,
    JZ, LAHF, LAR, LDDQU, LDMXCSR, LDS, LEA, LEAVE, LES, LFENCE,
    LFS, LGDT, LGS, LIDT, LLDT, LMSW, LODSB, LODSD, LODSQ, LODSW,
    LOOP, LOOPE, LOOPNE, LSL, LSS, LTR, LZCNT, MASKMOVDQU, MASKMOVQ, MAXPD,
    MAXPS, MAXSD, MAXSS, MFENCE, MINPD, MINPS, MINSD, MINSS, MONITOR, MOV,
    MOVAPD, MOVAPS, MOVBE, MOVD, MOVDDUP, MOVDQ2Q, MOVDQA, MOVDQU, MOVHLPS, MOVHPD,
    MOVHPS, MOVLHPS, MOVLPD, MOVLPS, MOVMSKPD, MOVMSKPS, MOVNTDQ, MOVNTDQA, MOVNTI, MOVNTPD,
    MOVNTPS, MOVNTQ, MOVQ, MOVQ2DQ, MOVSB, MOVSD, MOVSHDUP, MOVSLDUP, MOVSQ, MOVSS,
    MOVSW, MOVSX, MOVSXD, MOVUPD, MOVUPS, MOVZX, MPSADBW, MUL, MULPD, MULPS,
    MULSD, MULSS, MWAIT, NEG, NOP, NOT, OR, ORPD, ORPS, OUT,
    OUTSB, OUTSD, OUTSW, PABSB, PABSD, PABSW, PACKSSDW, PACKSSWB, PACKUSDW, PACKUSWB,
    PADDB, PADDD, PADDQ, PADDSB, PADDSW, PADDUSB, PADDUSW, PADDW, PALIGNR, PAND,
    PANDN, PAUSE, PAVGB, PAVGW, PBLENDVB, PBLENDW, PCLMULQDQ, PCMPEQB, PCMPEQD, PCMPEQQ,
    PCMPEQW, PCMPESTRI, PCMPESTRM, PCMPGTB, PCMPGTD, PCMPGTQ, PCMPGTW, PCMPISTRI, PCMPISTRM, PEXTRB,
    PEXTRD, PEXTRQ, PEXTRW, PHADDD, PHADDSW, PHADDW, PHMINPOSUW, PHSUBD, PHSUBSW, PHSUBW,
    PINSRB, PINSRD, PINSRQ, PINSRW, PMADDUBSW, PMADDWD, PMAXSB, PMAXSD, PMAXSW, PMAXUB,
    PMAXUD, PMAXUW, PMINSB, PMINSD, PMINSW, PMINUB, PMINUD, PMINUW, PMOVMSKB, PMOVSXBD,
    PMOVSXBQ, PMOVSXBW, PMOVSXDQ, PMOVSXWD, PMOVSXWQ, PMOVZXBD, PMOVZXBQ, PMOVZXBW, PMOVZXDQ, PMOVZXWD,
    PMOVZXWQ, PMULDQ, PMULHRSW, PMULHUW, PMULHW, PMULLD, PMULLW, PMULUDQ, POP, POPA,
    POPAD, POPCNT, POPFD, POPFQ, POPFW, POR, PREFETCH, PREFETCHNTA, PREFETCHT0, PREFETCHT1,
    PREFETCHT2, PREFETCHW, PSADBW, PSHUFB, PSHUFD, PSHUFHW, PSHUFLW, PSHUFW, PSIGNB, PSIGND,
    PSIGNW, PSLLD, PSLLDQ, PSLLQ, PSLLW, PSRAD, PSRAW, PSRLD, PSRLDQ, PSRLQ,
    PSRLW, PSUBB, PSUBD, PSUBQ, PSUBSB, PSUBSW, PSUBUSB, PSUBUSW, PSUBW, PTEST,
    PUNPCKHBW, PUNPCKHDQ, PUNPCKHQDQ, PUNPCKHWD, PUNPCKLBW, PUNPCKLDQ, PUNPCKLQDQ, PUNPCKLWD, PUSH, PUSHA,
    PUSHAD, PUSHFD, PUSHFQ, PUSHFW, PXOR, RCL, RCPPS, RCPSS, RCR, RDMSR,
    RDPMC, RDRAND, RDSEED, RDTSC, RDTSCP, RET, RETF, ROL, ROR, ROUNDPD,
    ROUNDPS, ROUNDSD, ROUNDSS, RSM, RSQRTPS, RSQRTSS, SAHF, SALC, SAR, SBB,
    SCASB, SCASD, SCASQ, SCASW, SETA, SETAE, SETB, SETBE, SETG, SETGE,
    SETL, SETLE, SETNO, SETNP, SETNS, SETNZ, SETO, SETP, SETS, SETZ,
    SFENCE, SGDT, SHL, SHLD, SHR, SHRD, SHUFPD, SHUFPS, SIDT, SKINIT,
    SLDT, SMSW, SQRTPD, SQRTPS, SQRTSD, SQRTSS, STAC, STC, STD, STGI,
    STI, STMXCSR, STOSB, STOSD, STOSQ, STOSW, STR, SUB, SUBPD, SUBPS,
    SUBSD, SUBSS, SWAPGS, SYSCALL, SYSENTER, SYSEXIT, SYSRET, TEST, TZCNT, UCOMISD,
    UCOMISS, UD2, UNPCKHPD, UNPCKHPS, UNPCKLPD, UNPCKLPS, VERR, VERW, VMCALL, VMCLEAR,
    VMLAUNCH, VMLOAD, VMMCALL, VMPTRLD, VMPTRST, VMREAD, VMRESUME, VMRUN, VMSAVE, VMWRITE,
    VMXOFF, VMXON, WAIT, WBINVD, WRMSR, XADD, XCHG, XGETBV, XLATB, XOR,
    XORPD, XORPS, XRSTOR, XSAVE, XSAVEOPT, XSETBV,
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mnemonic_to_str(*self))
    }
}

impl Mnemonic {
    pub fn to_str(&self) -> &'static str {
        mnemonic_to_str(*self)
    }

    /// Shifts and rotates. A memory destination shifted by CL has no other size hint.
    #[inline]
    pub fn is_shift_or_rotate(&self) -> bool {
        matches!(
            self,
            Mnemonic::RCL | Mnemonic::ROL | Mnemonic::ROR | Mnemonic::RCR | Mnemonic::SHL | Mnemonic::SHR | Mnemonic::SAR
        )
    }

    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, Mnemonic::CALL)
    }

    pub fn is_jump(&self) -> bool {
        use Mnemonic::*;
        matches!(
            self,
            JO | JNO | JB | JAE | JZ | JNZ | JBE | JA | JS | JNS | JP | JNP | JL | JGE | JLE | JG | JCXZ | JECXZ
                | JRCXZ | JMP
        )
    }

    /// Instructions whose operands keep Intel order in AT&T syntax.
    #[inline]
    pub fn keeps_operand_order(&self) -> bool {
        matches!(self, Mnemonic::ENTER | Mnemonic::BOUND)
    }
}
