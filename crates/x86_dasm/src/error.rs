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

use thiserror::Error;

/// Why a single instruction failed to decode. Recorded on the returned instruction;
/// iteration always continues past it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeFault {
    #[error("undefined opcode")]
    UnknownOpcode,
    #[error("unexpected end of input")]
    Truncated,
    #[error("instruction invalid in 64-bit mode")]
    InvalidIn64BitMode,
    #[error("operand encoding not permitted for this instruction")]
    InvalidOperand,
    #[error("invalid segment register")]
    InvalidSegmentRegister,
    #[error("instruction exceeds 15 bytes")]
    TooLong,
}

/// Caller misuse detected when a disassembler is configured.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("byte source is empty")]
    EmptySource,
    #[error("start offset {offset} is outside the source (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("invalid architecture mode: {0} (expected 16, 32 or 64)")]
    InvalidMode(u32),
}
