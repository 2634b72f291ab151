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
    instruction::Instruction,
    operand::{MemoryOperand, Operand},
    register::Register,
    translator::{
        format_hex,
        immediate_value,
        write_branch_target,
        write_lock_rep,
        write_memory_displacement,
        write_segment_prefix,
        write_size_prefixes,
        FormatterOutput,
        Translate,
        TranslatorOptions,
    },
};

/// Intel syntax: destination first, memory as `[base+index*scale+disp]`, size keywords only
/// where the operand size is not implied by the other operands.
#[derive(Clone, Debug, Default)]
pub struct IntelTranslator {
    pub options: TranslatorOptions,
}

impl IntelTranslator {
    pub const fn new() -> Self {
        Self { options: TranslatorOptions::new() }
    }

    pub fn with_options(options: TranslatorOptions) -> Self {
        Self { options }
    }
}

impl Translate for IntelTranslator {
    fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    fn format_prefixes(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        write_size_prefixes(inst, out);
        write_segment_prefix(inst, out);
        write_lock_rep(inst, out);
    }

    fn format_mnemonic(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        out.write_mnemonic(&self.options.mnemonic_case(inst.mnemonic.to_str()));
    }

    fn format_operands(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        for (i, operand) in inst.active_operands().iter().enumerate() {
            if i > 0 {
                out.write_separator(",");
                out.write_separator(" ");
            }
            self.format_operand(inst, operand, needs_cast(inst, i), out);
        }
    }
}

/// Whether operand `i` needs a size keyword to be unambiguous.
fn needs_cast(inst: &Instruction, i: usize) -> bool {
    let ops = &inst.operands;
    match i {
        0 if ops[0].is_memory() => {
            ops[1].is_none()
                || ops[1].is_immediate()
                || (ops[0].size() != ops[1].size() && !ops[1].is_register())
                || (ops[1].register() == Some(Register::CL) && inst.mnemonic.is_shift_or_rotate())
        }
        1 => {
            ops[1].is_memory()
                && ops[0].size() != ops[1].size()
                && !ops[0].register().is_some_and(|r| r.is_segment())
        }
        2 => ops[2].is_memory() && ops[2].size() != ops[1].size(),
        _ => false,
    }
}

impl IntelTranslator {
    fn format_operand(&self, inst: &Instruction, operand: &Operand, cast: bool, out: &mut dyn FormatterOutput) {
        match operand {
            Operand::None => {}
            Operand::Register(reg) => out.write_register(reg.name()),
            Operand::Memory(mem) => {
                if cast {
                    write_cast(inst, operand.size(), out);
                }
                self.format_memory(inst, mem, out);
            }
            Operand::Immediate(imm) => out.write_immediate(&format_hex(immediate_value(inst, imm))),
            Operand::Constant(value) => {
                if cast {
                    write_cast(inst, operand.size(), out);
                }
                out.write_immediate(&value.to_string());
            }
            Operand::Relative(rel) => write_branch_target(&self.options, rel.target, out),
            Operand::FarPointer(ptr) => {
                let (keyword, offset) = match ptr.size {
                    16 => ("word", ptr.offset & 0xFFFF),
                    _ => ("dword", ptr.offset),
                };
                out.write_text(keyword);
                out.write_separator(" ");
                out.write_immediate(&format_hex(ptr.segment));
                out.write_separator(":");
                out.write_immediate(&format_hex(offset));
            }
        }
    }

    fn format_memory(&self, inst: &Instruction, mem: &MemoryOperand, out: &mut dyn FormatterOutput) {
        out.write_separator("[");
        if let Some(seg) = inst.prefixes.segment() {
            out.write_register(seg.name());
            out.write_separator(":");
        }
        if let Some(base) = mem.base {
            out.write_register(base.name());
        }
        if let Some(index) = mem.index {
            if mem.base.is_some() {
                out.write_symbol("+");
            }
            out.write_register(index.name());
            if mem.scale > 1 {
                out.write_symbol("*");
                out.write_displacement(&mem.scale.to_string());
            }
        }
        write_memory_displacement(&self.options, mem, true, out);
        out.write_separator("]");
    }
}

fn write_cast(inst: &Instruction, size: u16, out: &mut dyn FormatterOutput) {
    if inst.is_far {
        out.write_text("far");
        out.write_separator(" ");
    }
    let keyword = match size {
        8 => "byte",
        16 => "word",
        32 => "dword",
        64 => "qword",
        80 => "tword",
        128 => "oword",
        _ => return,
    };
    out.write_text(keyword);
    out.write_separator(" ");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cpu_common::{ArchitectureMode, Vendor},
        decode::decode_one,
    };

    fn intel(bytes: &[u8], mode: ArchitectureMode) -> String {
        IntelTranslator::new().translate(&decode_one(bytes, mode, Vendor::Any, 0))
    }

    fn i16(bytes: &[u8]) -> String {
        intel(bytes, ArchitectureMode::Bits16)
    }

    fn i32(bytes: &[u8]) -> String {
        intel(bytes, ArchitectureMode::Bits32)
    }

    fn i64(bytes: &[u8]) -> String {
        intel(bytes, ArchitectureMode::Bits64)
    }

    #[test]
    fn basic_forms() {
        assert_eq!(i32(&[0xB8, 0x34, 0x12, 0x00, 0x00]), "mov eax, 0x1234");
        assert_eq!(i32(&[0x90]), "nop");
        assert_eq!(i32(&[0xF3, 0x90]), "pause");
        assert_eq!(i32(&[0x67, 0x0F, 0x02, 0x00]), "lar eax, word [bx+si]");
        assert_eq!(i64(&[0x48, 0x8B, 0x05, 0xF7, 0xFF, 0xFF, 0xFF]), "mov rax, [rip-0x9]");
    }

    #[test]
    fn memory_addressing() {
        assert_eq!(i32(&[0x8B, 0x44, 0x88, 0x10]), "mov eax, [eax+ecx*4+0x10]");
        assert_eq!(i32(&[0x8B, 0x04, 0x08]), "mov eax, [eax+ecx]");
        assert_eq!(i32(&[0x8B, 0x45, 0xFC]), "mov eax, [ebp-0x4]");
        assert_eq!(i32(&[0x8B, 0x05, 0x78, 0x56, 0x34, 0x12]), "mov eax, [0x12345678]");
        assert_eq!(i32(&[0x8B, 0x04, 0x8D, 0x00, 0x10, 0x00, 0x00]), "mov eax, [ecx*4+0x1000]");
        assert_eq!(i32(&[0x64, 0xA1, 0x30, 0x00, 0x00, 0x00]), "mov eax, [fs:0x30]");
        assert_eq!(i16(&[0x8B, 0x46, 0xFE]), "mov ax, [bp-0x2]");
        assert_eq!(i16(&[0xA1, 0xFE, 0xFF]), "mov ax, [0xfffe]");
        assert_eq!(i64(&[0x4B, 0x8B, 0x04, 0x6C]), "mov rax, [r12+r13*2]");
    }

    #[test]
    fn size_keywords() {
        assert_eq!(i32(&[0xC7, 0x00, 0x01, 0x00, 0x00, 0x00]), "mov dword [eax], 0x1");
        assert_eq!(i32(&[0xC6, 0x00, 0x01]), "mov byte [eax], 0x1");
        assert_eq!(i32(&[0xFF, 0x00]), "inc dword [eax]");
        assert_eq!(i32(&[0xD3, 0x20]), "shl dword [eax], cl");
        assert_eq!(i32(&[0xD1, 0x20]), "shl dword [eax], 1");
        assert_eq!(i32(&[0x89, 0x00]), "mov [eax], eax");
        assert_eq!(i32(&[0x0F, 0xB6, 0x00]), "movzx eax, byte [eax]");
        assert_eq!(i32(&[0x8D, 0x04, 0x24]), "lea eax, [esp]");
        assert_eq!(i32(&[0x8E, 0x18]), "mov ds, [eax]");
        assert_eq!(i32(&[0xFF, 0x28]), "jmp far dword [eax]");
    }

    #[test]
    fn immediates() {
        assert_eq!(i32(&[0x83, 0xC0, 0xFF]), "add eax, 0xffffffff");
        assert_eq!(i16(&[0x83, 0xC0, 0xFF]), "add ax, 0xffff");
        assert_eq!(i64(&[0x48, 0x83, 0xC0, 0xFF]), "add rax, 0xffffffffffffffff");
        assert_eq!(i32(&[0x6A, 0xF0]), "push 0xfffffff0");
        assert_eq!(i32(&[0xCD, 0x21]), "int 0x21");
    }

    #[test]
    fn branches_and_pointers() {
        assert_eq!(i32(&[0xEB, 0xFE]), "jmp 0x0");
        assert_eq!(i32(&[0xE8, 0x00, 0x10, 0x00, 0x00]), "call 0x1005");
        assert_eq!(i32(&[0xEA, 0x00, 0x10, 0x00, 0x00, 0x08, 0x00]), "jmp dword 0x8:0x1000");
        assert_eq!(i16(&[0xEA, 0x00, 0x10, 0x08, 0x00]), "jmp word 0x8:0x1000");
    }

    #[test]
    fn prefixes() {
        assert_eq!(i32(&[0xF3, 0xA4]), "rep movsb");
        assert_eq!(i32(&[0xF3, 0xA6]), "repe cmpsb");
        assert_eq!(i32(&[0xF2, 0xAE]), "repne scasb");
        assert_eq!(i32(&[0xF0, 0x01, 0x18]), "lock add [eax], ebx");
        assert_eq!(i32(&[0x2E, 0x90]), "cs nop");
        assert_eq!(i32(&[0x66, 0xF4]), "o16 hlt");
        assert_eq!(i32(&[0x67, 0x90]), "a16 nop");
        assert_eq!(i16(&[0x66, 0xF4]), "o32 hlt");
        assert_eq!(i32(&[0x66, 0xB8, 0x34, 0x12]), "mov ax, 0x1234");
    }

    #[test]
    fn symbol_resolver() {
        let t = IntelTranslator::with_options(TranslatorOptions::new().with_resolver(|a| match a {
            0x1005 => Some("main".to_string()),
            0x12345678 => Some("counter".to_string()),
            _ => None,
        }));
        let d = |b: &[u8]| decode_one(b, ArchitectureMode::Bits32, Vendor::Any, 0);
        assert_eq!(t.translate(&d(&[0xE8, 0x00, 0x10, 0x00, 0x00])), "call main");
        assert_eq!(t.translate(&d(&[0x8B, 0x05, 0x78, 0x56, 0x34, 0x12])), "mov eax, [counter]");
        assert_eq!(t.translate(&d(&[0xEB, 0xFE])), "jmp 0x0");
        // Displacements off a register are never looked up.
        assert_eq!(t.translate(&d(&[0x8B, 0x80, 0x78, 0x56, 0x34, 0x12])), "mov eax, [eax+0x12345678]");
    }
}
