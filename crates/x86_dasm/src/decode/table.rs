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

//! The nested opcode lookup table.
//!
//! Entries are defined in [super::optable] as encoding paths such as
//! `"0f 01 /reg=3 /mod=reg /rm=5 /vendor=amd"`. Each path is a sequence of opcode bytes followed
//! by selectors on the mandatory prefix, the modrm fields, the processor mode, the effective
//! operand or address size and the vendor. The builder folds the paths into a tree of fixed-size
//! tables so that decoding resolves every byte or selector with a single index operation.

use std::sync::OnceLock;

use crate::{
    decode::{
        flags::{EntryFlags, ENTRY_ASO, ENTRY_MODRM, ENTRY_OSO},
        optable,
    },
    mnemonic::Mnemonic,
    register::Register,
};

/// Operand width selector used by operand templates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sz {
    None,
    B,
    W,
    D,
    Q,
    T,
    Dq,
    /// Effective operand size: 16, 32 or 64.
    V,
    /// 16 with a 16-bit operand size, 32 otherwise.
    Z,
    /// 64 with a 64-bit operand size, 32 otherwise.
    Y,
    /// Far pointer in memory: 16-bit selector plus an operand-sized offset.
    P,
    /// Native machine word: 64 in 64-bit mode, 32 otherwise.
    Native,
}

impl Sz {
    fn depends_on_operand_size(&self) -> bool {
        matches!(self, Sz::V | Sz::Z | Sz::Y | Sz::P)
    }
}

/// How each operand of an entry is encoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandTemplate {
    NoOperand,
    /// General register or memory from modrm.rm
    ModRm(Sz),
    /// Memory only from modrm.rm
    ModRmMemory(Sz),
    /// General register from modrm.reg
    ModRmReg(Sz),
    /// General register from modrm.rm, mod bits ignored
    ModRmRmReg(Sz),
    Immediate(Sz),
    /// Immediate sign-extended to the operand size
    ImmediateSigned(Sz),
    Relative(Sz),
    /// Memory offset sized by the address size (moffs)
    Offset(Sz),
    FarPointer,
    SegmentReg,
    ControlReg,
    DebugReg,
    MmxReg,
    MmxModRm(Sz),
    MmxRm,
    XmmReg,
    XmmModRm(Sz),
    XmmRm,
    St0,
    StRm,
    FixedRegister(Register),
    /// General register `n` sized by the selector, not extended by REX.B
    SizedRegister(u8, Sz),
    /// General register from the low three opcode bits, extended by REX.B
    OpcodeRegister(Sz),
    Constant(u8),
}

impl OperandTemplate {
    fn uses_modrm(&self) -> bool {
        use OperandTemplate::*;
        matches!(
            self,
            ModRm(_)
                | ModRmMemory(_)
                | ModRmReg(_)
                | ModRmRmReg(_)
                | SegmentReg
                | ControlReg
                | DebugReg
                | MmxReg
                | MmxModRm(_)
                | MmxRm
                | XmmReg
                | XmmModRm(_)
                | XmmRm
                | StRm
        )
    }

    fn may_address_memory(&self) -> bool {
        use OperandTemplate::*;
        matches!(self, ModRm(_) | ModRmMemory(_) | MmxModRm(_) | XmmModRm(_) | Offset(_))
    }

    fn depends_on_operand_size(&self) -> bool {
        use OperandTemplate::*;
        match self {
            ModRm(sz)
            | ModRmMemory(sz)
            | ModRmReg(sz)
            | ModRmRmReg(sz)
            | Immediate(sz)
            | ImmediateSigned(sz)
            | Relative(sz)
            | Offset(sz)
            | SizedRegister(_, sz)
            | OpcodeRegister(sz) => sz.depends_on_operand_size(),
            FarPointer => true,
            _ => false,
        }
    }
}

/// A resolved table entry.
#[derive(Copy, Clone, Debug)]
pub struct InstTemplate {
    pub mnemonic: Mnemonic,
    pub operands: [OperandTemplate; 4],
    pub flags: EntryFlags,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Empty,
    Leaf(u16),
    Table(u16),
}

/// What a lookup table is indexed by.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableKind {
    /// Next opcode byte
    Opcode,
    /// Mandatory prefix: none, 66, F2, F3
    Sse,
    /// modrm.reg
    Reg,
    /// modrm.mod: memory or register
    Mod,
    /// modrm.rm
    Rm,
    /// Outside or inside 64-bit mode
    Mode,
    /// Effective operand size: 16, 32, 64
    OperandSize,
    /// Effective address size: 16, 32, 64
    AddressSize,
    /// AMD or Intel
    Vendor,
}

impl TableKind {
    pub fn slot_count(&self) -> usize {
        match self {
            TableKind::Opcode => 256,
            TableKind::Sse => 4,
            TableKind::Reg | TableKind::Rm => 8,
            TableKind::Mod | TableKind::Mode | TableKind::Vendor => 2,
            TableKind::OperandSize | TableKind::AddressSize => 3,
        }
    }

    /// Position of this selector within a path, after the opcode bytes.
    fn rank(&self) -> u8 {
        match self {
            TableKind::Opcode => 0,
            TableKind::Sse => 1,
            TableKind::Reg => 2,
            TableKind::Mod => 3,
            TableKind::Rm => 4,
            TableKind::Mode => 5,
            TableKind::OperandSize => 6,
            TableKind::AddressSize => 7,
            TableKind::Vendor => 8,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LookupTable {
    pub kind: TableKind,
    pub slots: Box<[Node]>,
}

/// The process-wide instruction table.
pub struct OpcodeTable {
    tables: Vec<LookupTable>,
    entries: Vec<InstTemplate>,
}

static OPCODE_TABLE: OnceLock<OpcodeTable> = OnceLock::new();

impl OpcodeTable {
    /// Returns the shared table, building it on first use.
    pub fn get() -> &'static OpcodeTable {
        OPCODE_TABLE.get_or_init(|| {
            let mut builder = TableBuilder::new();
            optable::define(&mut builder);
            let table = builder.finish();
            log::debug!(
                "instruction table built: {} lookup tables, {} entries",
                table.tables.len(),
                table.entries.len()
            );
            table
        })
    }

    /// The one-byte opcode map.
    #[inline]
    pub fn root(&self) -> &LookupTable {
        &self.tables[0]
    }

    #[inline]
    pub fn table(&self, index: u16) -> &LookupTable {
        &self.tables[index as usize]
    }

    #[inline]
    pub fn entry(&self, index: u16) -> &InstTemplate {
        &self.entries[index as usize]
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Step {
    kind: TableKind,
    index: usize,
}

/// Accumulates encoding paths into lookup tables.
pub struct TableBuilder {
    tables: Vec<LookupTable>,
    entries: Vec<InstTemplate>,
}

impl TableBuilder {
    pub fn new() -> Self {
        let mut builder = Self { tables: Vec::new(), entries: Vec::new() };
        builder.new_table(TableKind::Opcode);
        builder
    }

    pub fn finish(self) -> OpcodeTable {
        OpcodeTable { tables: self.tables, entries: self.entries }
    }

    /// Adds one entry. A token `xx+r` in the path expands to the eight opcodes `xx..xx+7`.
    pub fn insert(&mut self, path: &str, mnemonic: Mnemonic, operands: &[OperandTemplate], flags: u16) {
        let tokens: Vec<&str> = path.split_whitespace().collect();
        if let Some(pos) = tokens.iter().position(|t| t.ends_with("+r")) {
            let Some(base) = parse_hex(tokens[pos].trim_end_matches("+r"))
            else {
                log::warn!("bad opcode token in table path '{}'", path);
                return;
            };
            for i in 0..8u8 {
                let byte = format!("{:02x}", base.wrapping_add(i));
                let expanded: Vec<&str> =
                    tokens.iter().enumerate().map(|(n, t)| if n == pos { byte.as_str() } else { *t }).collect();
                self.insert(&expanded.join(" "), mnemonic, operands, flags);
            }
            return;
        }

        let mut steps = Vec::with_capacity(tokens.len());
        for token in &tokens {
            match parse_step(token) {
                Some(step) => steps.push(step),
                None => {
                    log::warn!("bad token '{}' in table path '{}'", token, path);
                    return;
                }
            }
        }
        // Opcode bytes first in written order, selectors after them in canonical order.
        steps.sort_by_key(|s| s.kind.rank());

        let mut template = InstTemplate {
            mnemonic,
            operands: [OperandTemplate::NoOperand; 4],
            flags: EntryFlags::new(flags),
        };
        for (slot, op) in template.operands.iter_mut().zip(operands) {
            *slot = *op;
        }
        let mut derived = flags;
        if operands.iter().any(|o| o.uses_modrm())
            || steps.iter().any(|s| matches!(s.kind, TableKind::Reg | TableKind::Mod | TableKind::Rm))
        {
            derived |= ENTRY_MODRM;
        }
        if operands.iter().any(|o| o.depends_on_operand_size())
            || steps.iter().any(|s| s.kind == TableKind::OperandSize)
        {
            derived |= ENTRY_OSO;
        }
        if operands.iter().any(|o| o.may_address_memory())
            || steps.iter().any(|s| s.kind == TableKind::AddressSize)
        {
            derived |= ENTRY_ASO;
        }
        template.flags = EntryFlags::new(derived);

        let leaf = self.entries.len() as u16;
        self.entries.push(template);

        // The first opcode byte indexes the root table directly.
        let Some((first, rest)) = steps.split_first()
        else {
            return;
        };
        if first.kind != TableKind::Opcode {
            log::warn!("table path '{}' does not start with an opcode byte", path);
            return;
        }
        let child = self.tables[0].slots[first.index];
        let placed = self.place(child, rest, leaf, path);
        self.tables[0].slots[first.index] = placed;
    }

    fn new_table(&mut self, kind: TableKind) -> u16 {
        let index = self.tables.len() as u16;
        self.tables.push(LookupTable { kind, slots: vec![Node::Empty; kind.slot_count()].into_boxed_slice() });
        index
    }

    /// Slots an entry lacking a selector of this table's kind applies to. Entries without a
    /// mandatory prefix only occupy the no-prefix slot; lookup falls back to it.
    fn wildcard_slots(kind: TableKind) -> std::ops::Range<usize> {
        match kind {
            TableKind::Sse => 0..1,
            other => 0..other.slot_count(),
        }
    }

    fn place(&mut self, node: Node, steps: &[Step], leaf: u16, path: &str) -> Node {
        match node {
            Node::Empty => {
                let Some((step, rest)) = steps.split_first()
                else {
                    return Node::Leaf(leaf);
                };
                let t = self.new_table(step.kind);
                let placed = self.place(Node::Empty, rest, leaf, path);
                self.tables[t as usize].slots[step.index] = placed;
                Node::Table(t)
            }
            Node::Leaf(existing) => {
                let Some((step, rest)) = steps.split_first()
                else {
                    log::warn!("duplicate table path '{}'", path);
                    return node;
                };
                // The existing entry becomes the default for the new selector.
                let t = self.new_table(step.kind);
                for i in Self::wildcard_slots(step.kind) {
                    self.tables[t as usize].slots[i] = Node::Leaf(existing);
                }
                // The selected slot only holds the copied default, so the new entry replaces it.
                let placed = if rest.is_empty() {
                    Node::Leaf(leaf)
                }
                else {
                    let child = self.tables[t as usize].slots[step.index];
                    self.place(child, rest, leaf, path)
                };
                self.tables[t as usize].slots[step.index] = placed;
                Node::Table(t)
            }
            Node::Table(t) => {
                let kind = self.tables[t as usize].kind;
                match steps.iter().position(|s| s.kind == kind) {
                    Some(pos) => {
                        let mut rest = steps.to_vec();
                        let step = rest.remove(pos);
                        let child = self.tables[t as usize].slots[step.index];
                        let placed = self.place(child, &rest, leaf, path);
                        self.tables[t as usize].slots[step.index] = placed;
                    }
                    // The path does not select on this table's kind: it applies to every slot.
                    None => self.fill(t, steps, leaf, path),
                }
                node
            }
        }
    }

    fn fill(&mut self, t: u16, steps: &[Step], leaf: u16, path: &str) {
        let kind = self.tables[t as usize].kind;
        for i in Self::wildcard_slots(kind) {
            let child = self.tables[t as usize].slots[i];
            if steps.is_empty() && matches!(child, Node::Leaf(_)) {
                continue;
            }
            let placed = self.place(child, steps, leaf, path);
            self.tables[t as usize].slots[i] = placed;
        }
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_hex(token: &str) -> Option<u8> {
    u8::from_str_radix(token, 16).ok()
}

fn parse_step(token: &str) -> Option<Step> {
    let Some(selector) = token.strip_prefix('/')
    else {
        return parse_hex(token).map(|b| Step { kind: TableKind::Opcode, index: b as usize });
    };
    let (key, value) = selector.split_once('=')?;
    let (kind, index) = match (key, value) {
        ("sse", "none") => (TableKind::Sse, 0),
        ("sse", "66") => (TableKind::Sse, 1),
        ("sse", "f2") => (TableKind::Sse, 2),
        ("sse", "f3") => (TableKind::Sse, 3),
        ("mod", "mem") => (TableKind::Mod, 0),
        ("mod", "reg") => (TableKind::Mod, 1),
        ("reg", n) => (TableKind::Reg, n.parse::<usize>().ok().filter(|n| *n < 8)?),
        ("rm", n) => (TableKind::Rm, n.parse::<usize>().ok().filter(|n| *n < 8)?),
        ("m", "!64") => (TableKind::Mode, 0),
        ("m", "64") => (TableKind::Mode, 1),
        ("o", size) => (TableKind::OperandSize, size_index(size)?),
        ("a", size) => (TableKind::AddressSize, size_index(size)?),
        ("vendor", "amd") => (TableKind::Vendor, 0),
        ("vendor", "intel") => (TableKind::Vendor, 1),
        _ => return None,
    };
    Some(Step { kind, index })
}

fn size_index(size: &str) -> Option<usize> {
    match size {
        "16" => Some(0),
        "32" => Some(1),
        "64" => Some(2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_at<'a>(table: &'a OpcodeTable, mut node: Node, indices: &[usize]) -> Option<&'a InstTemplate> {
        for &i in indices {
            match node {
                Node::Table(t) => node = table.table(t).slots[i],
                _ => return None,
            }
        }
        match node {
            Node::Leaf(e) => Some(table.entry(e)),
            _ => None,
        }
    }

    #[test]
    fn selectors_are_canonicalised() {
        let mut b = TableBuilder::new();
        b.insert("0f 01 /vendor=amd /rm=5 /mod=reg /reg=3", Mnemonic::CLGI, &[], 0);
        b.insert("0f 01 /reg=3 /mod=mem", Mnemonic::LIDT, &[OperandTemplate::ModRmMemory(Sz::None)], 0);
        let t = b.finish();
        let root = t.root().slots[0x0F];
        let clgi = leaf_at(&t, root, &[0x01, 3, 1, 5, 0]).unwrap();
        assert_eq!(clgi.mnemonic, Mnemonic::CLGI);
        assert!(clgi.flags.has_modrm());
        assert!(leaf_at(&t, root, &[0x01, 3, 1, 5, 1]).is_none());
        let lidt = leaf_at(&t, root, &[0x01, 3, 0]).unwrap();
        assert_eq!(lidt.mnemonic, Mnemonic::LIDT);
        assert!(lidt.flags.uses_address_size());
    }

    #[test]
    fn plus_r_expands_to_eight_opcodes() {
        let mut b = TableBuilder::new();
        b.insert("b8+r", Mnemonic::MOV, &[OperandTemplate::OpcodeRegister(Sz::V), OperandTemplate::Immediate(Sz::V)], 0);
        let t = b.finish();
        for op in 0xB8..=0xBF {
            let entry = leaf_at(&t, t.root().slots[op], &[]).unwrap();
            assert_eq!(entry.mnemonic, Mnemonic::MOV);
            assert!(entry.flags.uses_operand_size());
        }
        assert!(leaf_at(&t, t.root().slots[0xB7], &[]).is_none());
    }

    #[test]
    fn unprefixed_entries_fill_only_the_plain_slot() {
        let mut b = TableBuilder::new();
        b.insert("0f c7 /sse=66 /reg=6 /mod=mem", Mnemonic::VMCLEAR, &[], 0);
        b.insert("0f c7 /reg=1 /mod=mem", Mnemonic::CMPXCHG8B, &[], 0);
        let t = b.finish();
        let c7 = t.root().slots[0x0F];
        assert_eq!(leaf_at(&t, c7, &[0xC7, 0, 1, 0]).unwrap().mnemonic, Mnemonic::CMPXCHG8B);
        assert!(leaf_at(&t, c7, &[0xC7, 1, 1, 0]).is_none());
        assert_eq!(leaf_at(&t, c7, &[0xC7, 1, 6, 0]).unwrap().mnemonic, Mnemonic::VMCLEAR);
    }

    #[test]
    fn existing_leaf_becomes_default() {
        let mut b = TableBuilder::new();
        b.insert("63", Mnemonic::ARPL, &[], 0);
        b.insert("63 /m=64", Mnemonic::MOVSXD, &[], 0);
        let t = b.finish();
        let n = t.root().slots[0x63];
        assert_eq!(leaf_at(&t, n, &[0]).unwrap().mnemonic, Mnemonic::ARPL);
        assert_eq!(leaf_at(&t, n, &[1]).unwrap().mnemonic, Mnemonic::MOVSXD);

        // Two selectors deep: the default fills every level.
        let mut b = TableBuilder::new();
        b.insert("63", Mnemonic::ARPL, &[], 0);
        b.insert("63 /m=64 /vendor=amd", Mnemonic::MOVSXD, &[], 0);
        let t = b.finish();
        let n = t.root().slots[0x63];
        assert_eq!(leaf_at(&t, n, &[0]).unwrap().mnemonic, Mnemonic::ARPL);
        assert_eq!(leaf_at(&t, n, &[1, 0]).unwrap().mnemonic, Mnemonic::MOVSXD);
        assert_eq!(leaf_at(&t, n, &[1, 1]).unwrap().mnemonic, Mnemonic::ARPL);
    }

    #[test]
    fn shared_table_is_built_once() {
        let a = OpcodeTable::get() as *const OpcodeTable;
        let b = OpcodeTable::get() as *const OpcodeTable;
        assert_eq!(a, b);
        assert!(OpcodeTable::get().entry_count() > 500);
    }
}
