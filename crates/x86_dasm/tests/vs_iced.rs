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

use iced_x86::{Decoder as IcedDecoder, DecoderOptions as IcedDecoderOptions};
use x86_dasm::prelude::*;

use crate::common::{disassemble_all, hex, init_tests};

const BASE: u64 = 0x1000;

const CORPUS_16: &[&str] = &[
    "b8 34 12",
    "66 b8 78 56 34 12",
    "8b 46 fe",
    "a1 fe ff",
    "67 8b 44 88 10",
    "e8 00 10",
    "eb fe",
    "74 10",
    "ea 00 10 08 00",
    "f3 a4",
    "cd 21",
    "c3",
];

const CORPUS_32: &[&str] = &[
    "b8 34 12 00 00",
    "8b 44 88 10",
    "8b 04 8d 00 10 00 00",
    "8b 45 fc",
    "c7 00 01 00 00 00",
    "c6 00 01",
    "66 b8 34 12",
    "67 8b 46 fe",
    "64 a1 30 00 00 00",
    "e8 00 10 00 00",
    "eb fe",
    "74 10",
    "0f 84 00 01 00 00",
    "66 e9 00 10",
    "ff 15 78 56 34 12",
    "ff e0",
    "83 c0 ff",
    "6a f0",
    "f3 a5",
    "f0 01 18",
    "0f b6 00",
    "8d 04 24",
    "d1 20",
    "d3 20",
    "c8 10 00 01",
    "ea 00 10 00 00 08 00",
    "c2 08 00",
    "cb",
];

const CORPUS_64: &[&str] = &[
    "48 8b 05 f7 ff ff ff",
    "4b 8b 04 6c",
    "48 83 c0 ff",
    "48 b8 88 77 66 55 44 33 22 11",
    "b8 34 12 00 00",
    "48 63 c1",
    "41 ff d3",
    "ff 25 00 00 00 00",
    "e8 00 00 00 00",
    "eb fe",
    "0f 85 f0 ff ff ff",
    "41 50",
    "c3",
];

/// Decode the corpus with both decoders and compare instruction lengths and near branch targets.
fn compare(corpus: &[&str], mode: ArchitectureMode) {
    init_tests();
    let code: Vec<u8> = corpus.iter().flat_map(|s| hex(s)).collect();
    let ours = disassemble_all(&code, mode, BASE);

    let mut iced = IcedDecoder::with_ip(u32::from(mode.bits()), &code, BASE, IcedDecoderOptions::NONE);
    let mut count = 0;
    while iced.can_decode() {
        let theirs = iced.decode();
        assert!(!theirs.is_invalid(), "reference decoder rejected {}", corpus[count]);

        let inst = &ours[count];
        assert!(!inst.is_error(), "{}: {:?}", corpus[count], inst.error);
        assert_eq!(inst.length, theirs.len(), "length mismatch for {}", corpus[count]);
        assert_eq!(inst.offset, theirs.ip(), "offset mismatch for {}", corpus[count]);

        if let Some(Operand::Relative(rel)) = inst.operands.iter().find(|o| matches!(o, Operand::Relative(_))) {
            assert_eq!(rel.target, theirs.near_branch_target(), "branch target mismatch for {}", corpus[count]);
        }
        count += 1;
    }
    assert_eq!(count, corpus.len());
    assert_eq!(ours.len(), corpus.len());
}

#[test]
fn lengths_match_iced_16() {
    compare(CORPUS_16, ArchitectureMode::Bits16);
}

#[test]
fn lengths_match_iced_32() {
    compare(CORPUS_32, ArchitectureMode::Bits32);
}

#[test]
fn lengths_match_iced_64() {
    compare(CORPUS_64, ArchitectureMode::Bits64);
}
