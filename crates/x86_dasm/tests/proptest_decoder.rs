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

use proptest::prelude::*;
use x86_dasm::prelude::*;

use crate::common::{disassemble_all, init_tests};

fn any_mode() -> impl Strategy<Value = ArchitectureMode> {
    prop_oneof![
        Just(ArchitectureMode::Bits16),
        Just(ArchitectureMode::Bits32),
        Just(ArchitectureMode::Bits64),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn decoding_always_advances(bytes in proptest::collection::vec(any::<u8>(), 1..256), mode in any_mode()) {
        init_tests();
        let insts = disassemble_all(&bytes, mode, 0);
        let mut offset = 0u64;
        for inst in &insts {
            prop_assert!(inst.length >= 1);
            prop_assert!(inst.length <= 15 || inst.is_error());
            prop_assert_eq!(inst.offset, offset);
            offset += inst.length as u64;
        }
        prop_assert_eq!(offset as usize, bytes.len());
    }

    #[test]
    fn decoding_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 1..32), mode in any_mode(), pc in any::<u32>()) {
        init_tests();
        let a = decode_one(&bytes, mode, Vendor::Any, pc as u64);
        let b = decode_one(&bytes, mode, Vendor::Any, pc as u64);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.bytes.as_deref(), Some(&bytes[..a.length]));

        let intel = IntelTranslator::new();
        let att = AttTranslator::new();
        prop_assert_eq!(intel.translate(&a), intel.translate(&b));
        prop_assert_eq!(att.translate(&a), att.translate(&b));
    }
}
