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

mod common;

use x86_dasm::prelude::*;

use crate::common::{hex, init_tests, BLOCK_64, BLOCK_64_TEXT};

const ITERATIONS: usize = 1_000_000;

fn repeated_block() -> Vec<u8> {
    BLOCK_64.iter().copied().cycle().take(BLOCK_64.len() * ITERATIONS).collect()
}

#[test]
fn large_buffer() {
    init_tests();
    let code = repeated_block();
    let mut dasm = Disassembler::with_mode(&code[..], ArchitectureMode::Bits64, 0, false).unwrap();

    let mut count = 0;
    let mut total = 0;
    for inst in dasm.disassemble() {
        assert!(!inst.is_error());
        count += 1;
        total += inst.length;
    }
    assert_eq!(count, 6 * ITERATIONS);
    assert_eq!(total, code.len());
    assert_eq!(dasm.bytes_decoded(), code.len());
}

#[test]
fn large_native_memory() {
    init_tests();
    let code = repeated_block();
    // SAFETY: `code` outlives the disassembler and is not modified while it is read.
    let memory = unsafe { NativeMemory::new(code.as_ptr(), code.len()) };
    let mut dasm = Disassembler::with_mode(memory, ArchitectureMode::Bits64, 0, false).unwrap();

    let single: Vec<_> = Disassembler::with_mode(&BLOCK_64[..], ArchitectureMode::Bits64, 0, false)
        .unwrap()
        .disassemble()
        .map(|i| (i.mnemonic, i.length, i.operands))
        .collect();

    let mut count = 0;
    for (n, inst) in dasm.disassemble().enumerate() {
        let (mnemonic, length, operands) = single[n % 6];
        assert_eq!((inst.mnemonic, inst.length, inst.operands), (mnemonic, length, operands));
        count += 1;
    }
    assert_eq!(count, 6 * ITERATIONS);
    assert_eq!(dasm.bytes_decoded(), code.len());
}

#[test]
fn buffer_offset() {
    init_tests();
    let mut dasm = Disassembler::with_mode(&BLOCK_64[..], ArchitectureMode::Bits64, 0x10000, false).unwrap();
    assert_eq!(dasm.disassemble().next().map(|i| i.offset), Some(0x10000));
    let text: Vec<_> = dasm.disassemble().map(|i| i.to_string()).collect();
    assert_eq!(text, BLOCK_64_TEXT);
}

#[test]
fn start_offset_and_offset_source() {
    init_tests();
    let code = hex("cc cc  b8 34 12 00 00  90");
    let opts = DisassemblerOptions { start_offset: 2, address: 0x1000, ..Default::default() };
    let mut dasm = Disassembler::new(&code[..], opts).unwrap();
    let insts: Vec<_> = dasm.disassemble().collect();
    assert_eq!(insts.len(), 2);
    assert_eq!((insts[0].offset, insts[1].offset), (0x1000, 0x1005));

    let view = OffsetSource::new(&code[..], 2);
    let mut dasm = Disassembler::with_mode(view, ArchitectureMode::Bits32, 0x1000, false).unwrap();
    let again: Vec<_> = dasm.disassemble().collect();
    assert_eq!(insts, again);

    assert_eq!(
        Disassembler::new(&code[..], DisassemblerOptions { start_offset: 8, ..Default::default() }).err(),
        Some(ConfigurationError::OffsetOutOfRange { offset: 8, len: 8 })
    );
}

#[test]
fn next_instruction_and_restart() {
    init_tests();
    let code = hex("90 90 c3");
    let mut dasm = Disassembler::with_mode(&code[..], ArchitectureMode::Bits32, 0, true).unwrap();
    let first = dasm.next_instruction().unwrap();
    assert_eq!(first.bytes.as_deref(), Some(&[0x90u8][..]));
    assert_eq!(dasm.bytes_decoded(), 1);

    let mut seq = dasm.disassemble();
    assert_eq!(seq.next().map(|i| i.offset), Some(0));
    assert_eq!(seq.bytes_decoded(), 1);
    assert_eq!(seq.count(), 2);
    assert_eq!(dasm.bytes_decoded(), 3);
    assert!(dasm.next_instruction().is_none());
}

#[test]
fn truncated_tail_still_advances() {
    init_tests();
    let code = hex("90 b8 34 12");
    let insts: Vec<_> = Disassembler::with_mode(&code[..], ArchitectureMode::Bits32, 0, false)
        .unwrap()
        .disassemble()
        .collect();
    assert_eq!(insts.len(), 2);
    assert_eq!(insts[1].error, Some(DecodeFault::Truncated));
    assert_eq!(insts[1].length, 3);
    assert_eq!(insts.iter().map(|i| i.length).sum::<usize>(), code.len());
}

#[test]
fn truncated_tail_is_not_counted() {
    init_tests();
    let code = hex("00 00 00 67");
    let mut dasm = Disassembler::with_mode(&code[..], ArchitectureMode::Bits32, 0, false).unwrap();
    let insts: Vec<_> = dasm.disassemble().collect();
    assert_eq!(insts.len(), 2);
    assert_eq!(insts[0].error, None);
    assert_eq!(insts[1].error, Some(DecodeFault::Truncated));
    assert_eq!(insts[1].length, 2);
    assert_eq!(dasm.bytes_decoded(), 2);
}

#[test]
fn vendor_filtering() {
    init_tests();
    // clgi (AMD) then invept (Intel)
    let code = hex("0f 01 dd  66 0f 38 80 00");
    let decode = |vendor| -> Vec<bool> {
        let opts = DisassemblerOptions { mode: ArchitectureMode::Bits64, vendor, ..Default::default() };
        Disassembler::new(&code[..], opts).unwrap().disassemble().map(|i| i.is_error()).collect()
    };

    let amd = decode(Vendor::Amd);
    assert!(!amd[0]);
    assert!(*amd.last().unwrap());

    let intel = decode(Vendor::Intel);
    assert!(intel[0]);
    assert!(!*intel.last().unwrap());

    assert_eq!(decode(Vendor::Any), [false, false]);
}
