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

//! Rendering of decoded instructions as assembler text.
//!
//! A translator writes an [Instruction] into a [FormatterOutput] sink. A `String` sink
//! collects plain text; a [TokenStream] keeps the semantic role of each piece so callers can
//! colour or post-process it. [IntelTranslator] and [AttTranslator] share the address and
//! raw-byte columns, the prefix text and the symbol lookup defined here.

pub mod att;
pub mod intel;
pub mod tokens;

use std::{
    fmt::{self, Debug, LowerHex},
    sync::{Arc, RwLock},
};

use num_traits::PrimInt;

pub use att::AttTranslator;
pub use intel::IntelTranslator;
/// Re-export token types at the translator module root for convenient access
pub use tokens::{DecoratorToken, SemanticToken, Token, TokenItem, TokenStream};

use crate::{
    instruction::Instruction,
    mnemonic::Mnemonic,
    operand::{sign_extend, Immediate, MemoryOperand},
};

/// Maps an absolute address to a name. Returning `None` falls back to the numeric address.
pub type SymbolResolver = Arc<dyn Fn(u64) -> Option<String> + Send + Sync>;

/// Options controlling translation
#[derive(Clone, Default)]
pub struct TranslatorOptions {
    /// Prefix each line with the instruction address.
    pub include_address: bool,
    /// Prefix each line with the raw instruction bytes. Only instructions decoded with
    /// `keep_bytes` carry them.
    pub include_binary: bool,
    /// If true, render mnemonic in uppercase; otherwise lowercase.
    pub uppercase_mnemonic: bool,
    /// Consulted for branch targets and absolute memory addresses.
    pub symbol_resolver: Option<SymbolResolver>,
}

impl TranslatorOptions {
    pub const fn new() -> Self {
        Self {
            include_address: false,
            include_binary: false,
            uppercase_mnemonic: false,
            symbol_resolver: None,
        }
    }

    pub fn with_address(mut self, include: bool) -> Self {
        self.include_address = include;
        self
    }

    pub fn with_binary(mut self, include: bool) -> Self {
        self.include_binary = include;
        self
    }

    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(u64) -> Option<String> + Send + Sync + 'static,
    {
        self.symbol_resolver = Some(Arc::new(resolver));
        self
    }

    pub fn resolve(&self, address: u64) -> Option<String> {
        self.symbol_resolver.as_ref().and_then(|resolve| resolve(address))
    }

    /// Apply the mnemonic case setting.
    pub fn mnemonic_case(&self, text: &str) -> String {
        if self.uppercase_mnemonic {
            text.to_ascii_uppercase()
        }
        else {
            text.to_ascii_lowercase()
        }
    }
}

impl Debug for TranslatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorOptions")
            .field("include_address", &self.include_address)
            .field("include_binary", &self.include_binary)
            .field("uppercase_mnemonic", &self.uppercase_mnemonic)
            .field("symbol_resolver", &self.symbol_resolver.is_some())
            .finish()
    }
}

/// Output sink for formatting tokens. Implement this to capture rich tokens
/// (e.g., for colorizing) or to accumulate plain text.
pub trait FormatterOutput {
    /// Fallback text writer for any token type
    fn write_text(&mut self, s: &str);

    /// Specific token helpers (default to write_text)
    fn write_prefix(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_register(&mut self, s: &str) {
        self.write_text(s)
    }
    fn write_mnemonic(&mut self, s: &str) {
        self.write_text(s)
    }
    fn write_operand(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_immediate(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_relative(&mut self, s: &str) {
        self.write_text(s)
    }
    fn write_displacement(&mut self, s: &str) {
        self.write_text(s)
    }
    fn write_separator(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_symbol(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_error(&mut self) {
        self.write_text("invalid")
    }
}

/// Provide a basic String sink implementation
impl FormatterOutput for String {
    fn write_text(&mut self, s: &str) {
        self.push_str(s);
    }
}

/// An assembler syntax.
pub trait Translate {
    fn options(&self) -> &TranslatorOptions;

    /// Emit prefixes (size overrides, segment, lock, rep), each followed by a space.
    fn format_prefixes(&self, inst: &Instruction, out: &mut dyn FormatterOutput);
    /// Emit the mnemonic token without leading/trailing spaces.
    fn format_mnemonic(&self, inst: &Instruction, out: &mut dyn FormatterOutput);
    /// Emit operands, separated but without a leading space.
    fn format_operands(&self, inst: &Instruction, out: &mut dyn FormatterOutput);

    /// Compose the full line from parts
    fn format_instruction(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        let opts = self.options();
        if opts.include_address {
            write_address(inst, out);
        }
        if opts.include_binary {
            write_binary(inst, out);
        }

        if inst.is_error() || inst.mnemonic == Mnemonic::Invalid {
            out.write_error();
            return;
        }

        self.format_prefixes(inst, out);
        self.format_mnemonic(inst, out);

        if inst.operand_count() > 0 {
            out.write_separator(" ");
            self.format_operands(inst, out);
        }
    }

    fn translate(&self, inst: &Instruction) -> String {
        let mut s = String::new();
        self.format_instruction(inst, &mut s);
        s
    }

    /// Translate a sequence, one instruction per line.
    fn translate_all<'a, I>(&self, instructions: I) -> String
    where
        I: IntoIterator<Item = &'a Instruction>,
        Self: Sized,
    {
        let mut s = String::new();
        for (i, inst) in instructions.into_iter().enumerate() {
            if i > 0 {
                s.push('\n');
            }
            self.format_instruction(inst, &mut s);
        }
        s
    }
}

/// Either syntax, selectable at runtime.
#[derive(Clone, Debug)]
pub enum Translator {
    Intel(IntelTranslator),
    Att(AttTranslator),
}

impl Translator {
    pub fn intel(options: TranslatorOptions) -> Self {
        Translator::Intel(IntelTranslator { options })
    }

    pub fn att(options: TranslatorOptions) -> Self {
        Translator::Att(AttTranslator { options })
    }

    fn inner(&self) -> &dyn Translate {
        match self {
            Translator::Intel(t) => t,
            Translator::Att(t) => t,
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Translator::Intel(IntelTranslator::new())
    }
}

impl From<IntelTranslator> for Translator {
    fn from(t: IntelTranslator) -> Self {
        Translator::Intel(t)
    }
}

impl From<AttTranslator> for Translator {
    fn from(t: AttTranslator) -> Self {
        Translator::Att(t)
    }
}

impl Translate for Translator {
    fn options(&self) -> &TranslatorOptions {
        self.inner().options()
    }
    fn format_prefixes(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        self.inner().format_prefixes(inst, out)
    }
    fn format_mnemonic(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        self.inner().format_mnemonic(inst, out)
    }
    fn format_operands(&self, inst: &Instruction, out: &mut dyn FormatterOutput) {
        self.inner().format_operands(inst, out)
    }
}

static DEFAULT_TRANSLATOR: RwLock<Translator> = RwLock::new(Translator::Intel(IntelTranslator::new()));

/// The translator used by `Display for Instruction`. Intel syntax unless changed.
pub fn default_translator() -> Translator {
    match DEFAULT_TRANSLATOR.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the process-wide default translator. This affects every thread that renders
/// through `Display`; callers needing different syntaxes concurrently should hold their own
/// translator instead.
pub fn set_default_translator(translator: impl Into<Translator>) {
    let translator = translator.into();
    match DEFAULT_TRANSLATOR.write() {
        Ok(mut guard) => *guard = translator,
        Err(poisoned) => *poisoned.into_inner() = translator,
    }
}

pub fn format_hex<T: PrimInt + LowerHex>(value: T) -> String {
    format!("0x{:x}", value)
}

/// Keep the low `bits` of `value`.
pub fn mask_to<T: PrimInt>(value: T, bits: u32) -> T {
    let width = T::zero().count_zeros();
    if bits == 0 || bits >= width {
        value
    }
    else {
        value & !(T::max_value() << bits as usize)
    }
}

fn write_address(inst: &Instruction, out: &mut dyn FormatterOutput) {
    let text = if inst.mode.is_64() {
        format!("{:016x} ", inst.offset)
    }
    else {
        format!("{:08x} ", inst.offset)
    };
    out.write_text(&text);
}

fn write_binary(inst: &Instruction, out: &mut dyn FormatterOutput) {
    if let Some(bytes) = &inst.bytes {
        let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        out.write_text(&format!("{:<16} ", hex));
    }
}

/// `o16`/`o32`/`a16`/`a32` for size prefixes the instruction has no use for.
pub(crate) fn write_size_prefixes(inst: &Instruction, out: &mut dyn FormatterOutput) {
    if inst.prefixes.operand_size() && !inst.flags.uses_operand_size() {
        out.write_prefix(if inst.mode.bits() == 16 { "o32" } else { "o16" });
        out.write_separator(" ");
    }
    if inst.prefixes.address_size() && !inst.flags.uses_address_size() {
        out.write_prefix(if inst.mode.bits() == 32 { "a16" } else { "a32" });
        out.write_separator(" ");
    }
}

/// A segment override renders on its own when no memory operand takes it.
pub(crate) fn write_segment_prefix(inst: &Instruction, out: &mut dyn FormatterOutput) {
    if let Some(seg) = inst.prefixes.segment() {
        if !inst.has_memory_operand() {
            out.write_prefix(seg.name());
            out.write_separator(" ");
        }
    }
}

pub(crate) fn write_lock_rep(inst: &Instruction, out: &mut dyn FormatterOutput) {
    if inst.prefixes.lock() {
        out.write_prefix("lock");
        out.write_separator(" ");
    }
    let rep = if inst.prefixes.rep() {
        Some("rep")
    }
    else if inst.prefixes.repe() {
        Some("repe")
    }
    else if inst.prefixes.repne() {
        Some("repne")
    }
    else {
        None
    };
    if let Some(rep) = rep {
        out.write_prefix(rep);
        out.write_separator(" ");
    }
}

/// The immediate as executed: sign-extended immediates are widened and truncated to the
/// operand size.
pub(crate) fn immediate_value(inst: &Instruction, imm: &Immediate) -> u64 {
    if imm.sign_extended && imm.size != inst.operand_size as u16 {
        mask_to(sign_extend(imm.value, imm.size) as u64, inst.operand_size as u32)
    }
    else {
        imm.value
    }
}

/// A memory displacement. Bare addresses print unsigned and go through the resolver;
/// displacements added to a register print signed, with `+` only when `plus` is set.
pub(crate) fn write_memory_displacement(
    opts: &TranslatorOptions,
    mem: &MemoryOperand,
    plus: bool,
    out: &mut dyn FormatterOutput,
) {
    if mem.displacement_size == 0 {
        return;
    }
    if mem.is_absolute() {
        let address = mem.unsigned_displacement();
        match opts.resolve(address) {
            Some(name) => out.write_operand(&name),
            None => out.write_displacement(&format_hex(address)),
        }
    }
    else if mem.displacement < 0 {
        out.write_symbol("-");
        out.write_displacement(&format_hex(mem.displacement.unsigned_abs()));
    }
    else if mem.displacement > 0 {
        if plus {
            out.write_symbol("+");
        }
        out.write_displacement(&format_hex(mem.displacement as u64));
    }
}

pub(crate) fn write_branch_target(opts: &TranslatorOptions, target: u64, out: &mut dyn FormatterOutput) {
    match opts.resolve(target) {
        Some(name) => out.write_operand(&name),
        None => out.write_relative(&format_hex(target)),
    }
}
