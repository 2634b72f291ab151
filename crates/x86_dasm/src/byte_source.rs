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

//! Byte sources the decoder reads from, and the bounded little-endian cursor over them.

use crate::error::DecodeFault;

/// Indexed, length-bounded access to the bytes being disassembled.
pub trait ByteSource {
    /// Number of readable bytes.
    fn len(&self) -> usize;

    /// Byte at `index`. Callers never pass an index at or beyond [ByteSource::len].
    fn byte_at(&self, index: usize) -> u8;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ByteSource for [u8] {
    #[inline]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self[index]
    }
}

impl<const N: usize> ByteSource for [u8; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self[index]
    }
}

impl ByteSource for Vec<u8> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self[index]
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        (**self).byte_at(index)
    }
}

/// A window onto another source starting at `offset`. Index 0 of the view is
/// `offset` in the inner source.
#[derive(Copy, Clone, Debug)]
pub struct OffsetSource<S> {
    inner: S,
    offset: usize,
}

impl<S: ByteSource> OffsetSource<S> {
    /// An offset past the end of `inner` produces an empty view.
    pub fn new(inner: S, offset: usize) -> Self {
        Self { inner, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ByteSource> ByteSource for OffsetSource<S> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len().saturating_sub(self.offset)
    }
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.inner.byte_at(self.offset + index)
    }
}

/// A view over memory the caller owns, such as a mapped image or a buffer handed over FFI.
#[derive(Copy, Clone, Debug)]
pub struct NativeMemory {
    ptr: *const u8,
    len: usize,
}

impl NativeMemory {
    /// # Safety
    /// `ptr` must be valid for reads of `len` bytes and the memory must not be modified or
    /// freed while this view, or any disassembler reading from it, is alive.
    pub unsafe fn new(ptr: *const u8, len: usize) -> Self {
        Self { ptr, len }
    }
}

impl ByteSource for NativeMemory {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        assert!(index < self.len, "native memory read out of bounds");
        // SAFETY: bounds checked above, validity guaranteed by the constructor contract.
        unsafe { *self.ptr.add(index) }
    }
}

/// Reads little-endian fields from a source, starting at a fixed position. Reading at the
/// end of the source yields [DecodeFault::Truncated] rather than touching memory beyond it.
pub struct ByteCursor<'a, S: ByteSource + ?Sized> {
    source: &'a S,
    start: usize,
    pos: usize,
}

impl<'a, S: ByteSource + ?Sized> ByteCursor<'a, S> {
    pub fn new(source: &'a S, start: usize) -> Self {
        Self { source, start, pos: start }
    }

    /// Bytes consumed since the cursor was created.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.pos - self.start
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeFault> {
        if self.pos >= self.source.len() {
            return Err(DecodeFault::Truncated);
        }
        let b = self.source.byte_at(self.pos);
        self.pos += 1;
        Ok(b)
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeFault> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeFault> {
        Ok(self.read_uint(2)? as u16)
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeFault> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeFault> {
        Ok(self.read_uint(4)? as u32)
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeFault> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeFault> {
        self.read_uint(8)
    }

    /// Reads an unsigned little-endian value `width` bytes wide (1 to 8).
    pub fn read_uint(&mut self, width: usize) -> Result<u64, DecodeFault> {
        let mut value = 0u64;
        for i in 0..width.min(8) {
            value |= (self.read_u8()? as u64) << (i * 8);
        }
        Ok(value)
    }

    /// Copies the bytes consumed so far.
    pub fn consumed_bytes(&self) -> Vec<u8> {
        (self.start..self.pos).map(|i| self.source.byte_at(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_reads_little_endian() {
        let bytes = [0x34u8, 0x12, 0xF7, 0xFF, 0xFF, 0xFF];
        let mut cursor = ByteCursor::new(&bytes[..], 0);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_i32().unwrap(), -9);
        assert_eq!(cursor.consumed(), 6);
        assert_eq!(cursor.read_u8(), Err(DecodeFault::Truncated));
        assert_eq!(cursor.consumed(), 6);
    }

    #[test]
    fn truncated_read_stops_at_length() {
        let bytes = vec![0xAAu8, 0xBB];
        let mut cursor = ByteCursor::new(&bytes, 1);
        assert_eq!(cursor.read_u32(), Err(DecodeFault::Truncated));
        assert_eq!(cursor.consumed(), 1);
        assert_eq!(cursor.consumed_bytes(), vec![0xBB]);
    }

    #[test]
    fn offset_view() {
        let bytes = [1u8, 2, 3, 4];
        let view = OffsetSource::new(&bytes[..], 1);
        assert_eq!(view.len(), 3);
        assert_eq!(view.byte_at(0), 2);
        assert!(OffsetSource::new(&bytes[..], 9).is_empty());
    }

    #[test]
    fn native_memory_view() {
        let bytes = vec![0x90u8, 0xC3];
        // SAFETY: `bytes` outlives the view and is not modified.
        let view = unsafe { NativeMemory::new(bytes.as_ptr(), bytes.len()) };
        assert_eq!(view.len(), 2);
        assert_eq!(view.byte_at(1), 0xC3);
    }
}
