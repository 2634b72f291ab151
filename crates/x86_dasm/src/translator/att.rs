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
    mnemonic::Mnemonic,
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

/// AT&T (GNU as) syntax: source first, `%` registers, `$` immediates, memory as
/// `disp(base,index,scale)` and a size suffix on the mnemonic when a memory operand is present.
#[derive(Clone, Debug, Default)]
pub struct AttTranslator {
    pub options: TranslatorOptions,
}

impl AttTranslator {
    pub const fn new() -> Self {
        Self { options: TranslatorOptions::new() }
    }

    pub fn with_options(options: TranslatorOptions) -> Self {
        Self { options }
    }
}

fn size_suffix(size: u16) -> Option<char> {
    match size {
        8 => Some('b'),
        16 => Some('w'),
        32 => Some('l'),
        64 => Some('q'),
        80 => Some('t'),
        _ => None,
    }
}

fn write_register(reg: Register, out: &mut dyn FormatterOutput) {
    out.write_symbol("%");
    out.write_register(reg.name());
}

fn write_immediate(text: &str, out: &mut dyn FormatterOutput) {
    out.write_symbol("$");
    out.write_immediate(text);
}

/// Indirect branches take a `*` before their target.
fn is_indirect_branch(inst: &Instruction) -> bool {
    (inst.mnemonic.is_jump() || inst.mnemonic.is_call())
        && (inst.operands[0].is_register() || inst.operands[0].is_memory())
}

impl Translate for AttTranslator {
    fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    fn format_prefixes(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        write_size_prefixes(inst, out);
        write_segment_prefix(inst, out);
        write_lock_rep(inst, out);
    }

    fn format_mnemonic(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        let name = inst.mnemonic.to_str();
        let mut text = match inst.mnemonic {
            Mnemonic::RETF => String::from("lret"),
            Mnemonic::JMP | Mnemonic::CALL if inst.is_far => format!("l{}", name),
            _ => name.to_string(),
        };

        let suffixed = !inst.is_far && !inst.mnemonic.keeps_operand_order() && inst.has_memory_operand();
        if suffixed {
            if let Some(suffix) = size_suffix(inst.operands[0].size()) {
                text.push(suffix);
            }
        }
        out.write_mnemonic(&self.options.mnemonic_case(&text));
    }

    fn format_operands(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        if is_indirect_branch(inst) {
            out.write_symbol("*");
        }

        let operands = inst.active_operands();
        let ordered: Box<dyn Iterator<Item = &Operand>> = if inst.mnemonic.keeps_operand_order() {
            Box::new(operands.iter())
        }
        else {
            Box::new(operands.iter().rev())
        };

        for (i, operand) in ordered.enumerate() {
            if i > 0 {
                out.write_separator(",");
                out.write_separator(" ");
            }
            self.format_operand(inst, operand, out);
        }
    }
}

impl AttTranslator {
    fn format_operand(&self, inst: &Instruction, operand: &Operand, out: &mut dyn FormatterOutput) {
        match operand {
            Operand::None => {}
            Operand::Register(reg) => write_register(*reg, out),
            Operand::Memory(mem) => self.format_memory(inst, mem, out),
            Operand::Immediate(imm) => write_immediate(&format_hex(immediate_value(inst, imm)), out),
            Operand::Constant(value) => write_immediate(&format_hex(*value), out),
            Operand::Relative(rel) => write_branch_target(&self.options, rel.target, out),
            Operand::FarPointer(ptr) => {
                let offset = if ptr.size == 16 { ptr.offset & 0xFFFF } else { ptr.offset };
                write_immediate(&format_hex(ptr.segment), out);
                out.write_separator(",");
                out.write_separator(" ");
                write_immediate(&format_hex(offset), out);
            }
        }
    }

    fn format_memory(&self, inst: &Instruction, mem: &MemoryOperand, out: &mut dyn FormatterOutput) {
        if let Some(seg) = inst.prefixes.segment() {
            write_register(seg, out);
            out.write_separator(":");
        }
        write_memory_displacement(&self.options, mem, false, out);

        if mem.is_absolute() {
            return;
        }
        out.write_separator("(");
        if let Some(base) = mem.base {
            write_register(base, out);
        }
        if let Some(index) = mem.index {
            out.write_separator(",");
            write_register(index, out);
            if mem.scale > 1 {
                out.write_separator(",");
                out.write_displacement(&mem.scale.to_string());
            }
        }
        out.write_separator(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cpu_common::{ArchitectureMode, Vendor},
        decode::decode_one,
    };

    fn att(bytes: &[u8], mode: ArchitectureMode) -> String {
        AttTranslator::new().translate(&decode_one(bytes, mode, Vendor::Any, 0))
    }

    fn a32(bytes: &[u8]) -> String {
        att(bytes, ArchitectureMode::Bits32)
    }

    fn a64(bytes: &[u8]) -> String {
        att(bytes, ArchitectureMode::Bits64)
    }

    #[test]
    fn operands_are_reversed() {
        assert_eq!(a32(&[0xB8, 0x34, 0x12, 0x00, 0x00]), "mov $0x1234, %eax");
        assert_eq!(a32(&[0x89, 0xD8]), "mov %ebx, %eax");
        assert_eq!(a32(&[0x90]), "nop");
    }

    #[test]
    fn memory_forms_and_suffixes() {
        assert_eq!(a32(&[0x8B, 0x44, 0x88, 0x10]), "movl 0x10(%eax,%ecx,4), %eax");
        assert_eq!(a32(&[0x8B, 0x04, 0x8D, 0x00, 0x10, 0x00, 0x00]), "movl 0x1000(,%ecx,4), %eax");
        assert_eq!(a32(&[0x8B, 0x45, 0xFC]), "movl -0x4(%ebp), %eax");
        assert_eq!(a32(&[0x8B, 0x05, 0x78, 0x56, 0x34, 0x12]), "movl 0x12345678, %eax");
        assert_eq!(a32(&[0xC6, 0x00, 0x01]), "movb $0x1, (%eax)");
        assert_eq!(a32(&[0x64, 0xA1, 0x30, 0x00, 0x00, 0x00]), "movl %fs:0x30, %eax");
        assert_eq!(a64(&[0x48, 0x8B, 0x05, 0xF7, 0xFF, 0xFF, 0xFF]), "movq -0x9(%rip), %rax");
    }

    #[test]
    fn constants_and_immediates() {
        assert_eq!(a32(&[0xD1, 0x20]), "shll $0x1, (%eax)");
        assert_eq!(a32(&[0x83, 0xC0, 0xFF]), "add $0xffffffff, %eax");
    }

    #[test]
    fn branches() {
        assert_eq!(a32(&[0xE8, 0x00, 0x10, 0x00, 0x00]), "call 0x1005");
        assert_eq!(a32(&[0xFF, 0xE0]), "jmp *%eax");
        assert_eq!(a32(&[0xFF, 0x10]), "calll *(%eax)");
        assert_eq!(a32(&[0xFF, 0x28]), "ljmp *(%eax)");
        assert_eq!(a32(&[0xEA, 0x00, 0x10, 0x00, 0x00, 0x08, 0x00]), "ljmp $0x8, $0x1000");
        assert_eq!(a32(&[0xCB]), "lret");
        assert_eq!(a32(&[0xCA, 0x08, 0x00]), "lret $0x8");
    }

    #[test]
    fn operand_order_kept_for_enter_and_bound() {
        assert_eq!(a32(&[0xC8, 0x10, 0x00, 0x01]), "enter $0x10, $0x1");
        assert_eq!(a32(&[0x62, 0x03]), "bound %eax, (%ebx)");
    }

    #[test]
    fn prefixes_and_resolver() {
        assert_eq!(a32(&[0xF3, 0xA5]), "rep movsd");
        assert_eq!(a32(&[0xF3, 0x90]), "pause");
        let t = AttTranslator::with_options(TranslatorOptions::new().with_resolver(|a| (a == 0x1005).then(|| "start".into())));
        let inst = decode_one(&[0xE8, 0x00, 0x10, 0x00, 0x00], ArchitectureMode::Bits32, Vendor::Any, 0);
        assert_eq!(t.translate(&inst), "call start");
    }
}
