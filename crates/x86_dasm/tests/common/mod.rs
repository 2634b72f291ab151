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

#![allow(dead_code)]

use std::sync::Once;

use x86_dasm::{decode::table::OpcodeTable, prelude::*};

static INIT: Once = Once::new();

pub fn init_tests() {
    INIT.call_once(|| {
        let table = OpcodeTable::get();
        assert!(table.entry_count() > 0);
    });
}

/// Parse whitespace-separated hex text into bytes.
pub fn hex(text: &str) -> Vec<u8> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(digits.len() % 2, 0, "odd number of hex digits in {:?}", text);
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).expect("bad hex digit"))
        .collect()
}

pub fn disassemble_all(bytes: &[u8], mode: ArchitectureMode, address: u64) -> Vec<Instruction> {
    let mut dasm = Disassembler::with_mode(bytes, mode, address, true).expect("valid configuration");
    dasm.disassemble().collect()
}

pub fn intel_lines(bytes: &[u8], mode: ArchitectureMode, address: u64) -> Vec<String> {
    let t = IntelTranslator::new();
    disassemble_all(bytes, mode, address).iter().map(|i| t.translate(i)).collect()
}

pub fn att_lines(bytes: &[u8], mode: ArchitectureMode, address: u64) -> Vec<String> {
    let t = AttTranslator::new();
    disassemble_all(bytes, mode, address).iter().map(|i| t.translate(i)).collect()
}

/// The six instruction block used by the bulk decoding tests, 64-bit mode.
pub const BLOCK_64: [u8; 42] = [
    0x67, 0x66, 0x8B, 0x40, 0xF0, // mov ax, [eax-0x10]
    0x67, 0x66, 0x03, 0x5E, 0x10, // add bx, [esi+0x10]
    0x48, 0x03, 0x04, 0x25, 0xFF, 0xFF, 0x00, 0x00, // add rax, [0xffff]
    0x67, 0x66, 0x03, 0x44, 0xBE, 0xF0, // add ax, [esi+edi*4-0x10]
    0x4C, 0x03, 0x84, 0x98, 0x00, 0x00, 0x00, 0x80, // add r8, [rax+rbx*4-0x80000000]
    0x48, 0xA1, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x00, 0x00, // mov rax, [0x800000000000]
];

pub const BLOCK_64_TEXT: [&str; 6] = [
    "mov ax, [eax-0x10]",
    "add bx, [esi+0x10]",
    "add rax, [0xffff]",
    "add ax, [esi+edi*4-0x10]",
    "add r8, [rax+rbx*4-0x80000000]",
    "mov rax, [0x800000000000]",
];
