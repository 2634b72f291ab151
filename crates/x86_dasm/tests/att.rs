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

use crate::common::{att_lines, disassemble_all, hex, init_tests};

#[test]
fn att_syntax_lines() {
    init_tests();
    let code = hex("b8 34 12 00 00  8b 44 88 10  c6 00 01  ff e0  ff 15 78 56 34 12  c8 10 00 01  cb");
    assert_eq!(
        att_lines(&code, ArchitectureMode::Bits32, 0),
        [
            "mov $0x1234, %eax",
            "movl 0x10(%eax,%ecx,4), %eax",
            "movb $0x1, (%eax)",
            "jmp *%eax",
            "calll *0x12345678",
            "enter $0x10, $0x1",
            "lret",
        ]
    );
}

#[test]
fn translators_share_address_and_binary_columns() {
    init_tests();
    let code = hex("67 0f 02 00  90  f3 90");
    let insts = disassemble_all(&code, ArchitectureMode::Bits32, 0x1000);
    let options = TranslatorOptions::new().with_address(true).with_binary(true);

    let intel = Translator::intel(options.clone()).translate_all(&insts);
    assert_eq!(
        intel,
        "00001000 670f0200         lar eax, word [bx+si]\n\
         00001004 90               nop\n\
         00001005 f390             pause"
    );

    let att = Translator::att(options).translate_all(&insts);
    assert_eq!(
        att,
        "00001000 670f0200         larl (%bx,%si), %eax\n\
         00001004 90               nop\n\
         00001005 f390             pause"
    );
}

// The only test in this binary that renders through `Display`, since it swaps the
// process-wide default.
#[test]
fn default_translator_switch() {
    init_tests();
    let inst = decode_one(&hex("b8 34 12 00 00"), ArchitectureMode::Bits32, Vendor::Any, 0);
    assert_eq!(inst.to_string(), "mov eax, 0x1234");

    set_default_translator(AttTranslator::new());
    assert_eq!(inst.to_string(), "mov $0x1234, %eax");

    let t = default_translator();
    assert!(matches!(t, Translator::Att(_)));

    set_default_translator(Translator::intel(TranslatorOptions::new().with_address(true)));
    assert_eq!(inst.to_string(), "00000000 mov eax, 0x1234");

    set_default_translator(IntelTranslator::new());
    assert_eq!(inst.to_string(), "mov eax, 0x1234");
}
