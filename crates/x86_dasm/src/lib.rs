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

//! An x86 disassembler for 16, 32 and 64-bit code.
//!
//! Bytes are read through a [byte_source::ByteSource], decoded by a [decode::Decoder] against a
//! shared opcode table into [instruction::Instruction] records, and rendered on demand by an
//! Intel or AT&T [translator].
//!
//! ```
//! use x86_dasm::prelude::*;
//!
//! let code = [0xB8, 0x34, 0x12, 0x00, 0x00, 0x90];
//! let mut dasm = Disassembler::with_mode(&code[..], ArchitectureMode::Bits32, 0, false).unwrap();
//! let text: Vec<String> = dasm.disassemble().map(|i| i.to_string()).collect();
//! assert_eq!(text, ["mov eax, 0x1234", "nop"]);
//! ```

pub mod byte_source;
pub mod cpu_common;
pub mod decode;
pub mod disassembler;
pub mod error;
pub mod instruction;
pub mod mnemonic;
pub mod opcode;
pub mod operand;
pub mod register;
pub mod translator;

pub mod prelude {
    pub use crate::{
        byte_source::{ByteSource, NativeMemory, OffsetSource},
        cpu_common::{ArchitectureMode, PrefixFlags, Prefixes, Vendor},
        decode::{decode_one, Decoder},
        disassembler::{Disassembler, DisassemblerOptions, Instructions},
        error::{ConfigurationError, DecodeFault},
        instruction::Instruction,
        mnemonic::Mnemonic,
        opcode::{Opcode, OpcodeMap},
        operand::{FarPointer, Immediate, MemoryOperand, Operand, RelativeTarget},
        register::Register,
        translator::{
            default_translator,
            set_default_translator,
            AttTranslator,
            DecoratorToken,
            FormatterOutput,
            IntelTranslator,
            SemanticToken,
            SymbolResolver,
            TokenItem,
            TokenStream,
            Translate,
            Translator,
            TranslatorOptions,
        },
    };
}
