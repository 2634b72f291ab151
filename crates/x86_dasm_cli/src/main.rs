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

//! x86dasm - disassemble hex-encoded machine code read from stdin
//!
//! Usage:
//!   echo "b834120000 90" | x86dasm 32
//!   x86dasm 64 --att --address 0x401000 < code.hex

use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use x86_dasm::prelude::*;

#[derive(Parser)]
#[command(name = "x86dasm")]
#[command(about = "Disassemble hex-encoded x86 machine code read from stdin", long_about = None)]
struct Cli {
    /// Processor mode in bits
    #[arg(default_value_t = 32, value_parser = clap::value_parser!(u32).range(16..=64))]
    mode: u32,

    /// Use AT&T syntax instead of Intel
    #[arg(long)]
    att: bool,

    /// Omit the address column
    #[arg(long)]
    no_address: bool,

    /// Omit the instruction bytes column
    #[arg(long)]
    no_binary: bool,

    /// Restrict vendor-specific instructions
    #[arg(long, value_enum, default_value_t = VendorArg::Any)]
    vendor: VendorArg,

    /// Address of the first byte
    #[arg(short, long, value_parser = parse_hex, default_value = "0")]
    address: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum VendorArg {
    Any,
    Amd,
    Intel,
}

impl From<VendorArg> for Vendor {
    fn from(v: VendorArg) -> Self {
        match v {
            VendorArg::Any => Vendor::Any,
            VendorArg::Amd => Vendor::Amd,
            VendorArg::Intel => Vendor::Intel,
        }
    }
}

fn parse_hex(s: &str) -> Result<u64, String> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).map_err(|e| e.to_string())
}

/// Parse hex text into bytes, ignoring all whitespace.
fn parse_hex_bytes(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        bail!("Odd number of hex digits ({})", digits.len());
    }
    digits
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).context("Input is not valid text")?;
            u8::from_str_radix(pair, 16).with_context(|| format!("Invalid hex byte '{}'", pair))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = ArchitectureMode::try_from(cli.mode)?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input).context("Failed to read stdin")?;
    let code = parse_hex_bytes(&input)?;
    log::debug!("read {} byte(s) of code", code.len());

    let options = DisassemblerOptions {
        mode,
        vendor: cli.vendor.into(),
        address: cli.address,
        keep_bytes: !cli.no_binary,
        start_offset: 0,
    };
    let mut dasm = Disassembler::new(code, options)?;

    let translator_options = TranslatorOptions::new()
        .with_address(!cli.no_address)
        .with_binary(!cli.no_binary);
    let translator = if cli.att {
        Translator::att(translator_options)
    }
    else {
        Translator::intel(translator_options)
    };

    for instruction in dasm.disassemble() {
        println!("{}", translator.translate(&instruction));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_input() {
        assert_eq!(parse_hex_bytes("b8 34 12\n00 00").unwrap(), vec![0xB8, 0x34, 0x12, 0x00, 0x00]);
        assert!(parse_hex_bytes("b83").is_err());
        assert!(parse_hex_bytes("zz").is_err());
        assert_eq!(parse_hex("0x401000"), Ok(0x401000));
    }
}
