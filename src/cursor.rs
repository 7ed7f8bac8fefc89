// cursor.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Sequential reader over a GIF buffer
use crate::error::{Error, Result};

/// Read position within an immutable byte buffer
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    /// Entire file contents
    buf: &'a [u8],
    /// Offset of next byte to read
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of a buffer
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    /// Get the current read offset
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> Result<u8> {
        let b = *self.buf.get(self.pos).ok_or(Error::BufferUnderrun)?;
        self.pos += 1;
        Ok(b)
    }

    /// Read a run of bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::BufferUnderrun)?;
        let bytes = self.buf.get(self.pos..end).ok_or(Error::BufferUnderrun)?;
        self.pos = end;
        Ok(bytes)
    }

    /// Read a little-endian 16-bit value
    pub fn read_le16(&mut self) -> Result<u16> {
        let lo = self.read_u8()? as u16;
        let hi = self.read_u8()? as u16;
        Ok(lo | (hi << 8))
    }

    /// Read a chain of length-prefixed sub-blocks, up to a zero-length
    /// terminator.  Each sub-block payload is passed to `f` in order.
    pub fn read_sub_blocks<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&'a [u8]),
    {
        loop {
            let sz = self.read_u8()? as usize;
            if sz == 0 {
                return Ok(());
            }
            trace!("sub-block: {} @ {}", sz, self.pos);
            f(self.read_bytes(sz)?);
        }
    }

    /// Skip a chain of sub-blocks, returning the number of payload bytes
    pub fn skip_sub_blocks(&mut self) -> Result<usize> {
        let mut len = 0;
        self.read_sub_blocks(|b| len += b.len())?;
        Ok(len)
    }
}

/// Extract a bit field from a packed byte.
///
/// * `top` Bit position of field's most significant bit, where 8 is the
///   most significant bit of the byte and 1 the least.
/// * `width` Number of bits in the field.
pub(crate) fn bit_field(byte: u8, top: u8, width: u8) -> u8 {
    debug_assert!(width >= 1 && width <= top && top <= 8);
    let mask = ((1u16 << width) - 1) as u8;
    (byte >> (top - width)) & mask
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_le16() -> Result<()> {
        let mut c = Cursor::new(&[0x0A, 0x00, 0x34, 0x12]);
        assert_eq!(c.read_le16()?, 10);
        assert_eq!(c.read_le16()?, 0x1234);
        assert_eq!(c.pos(), 4);
        Ok(())
    }

    #[test]
    fn underrun() {
        let mut c = Cursor::new(&[1, 2, 3]);
        assert_eq!(c.read_bytes(2).unwrap(), &[1, 2]);
        assert!(matches!(c.read_le16(), Err(Error::BufferUnderrun)));
        let mut c = Cursor::new(&[]);
        assert!(matches!(c.read_u8(), Err(Error::BufferUnderrun)));
        let mut c = Cursor::new(&[1]);
        assert!(matches!(c.read_bytes(usize::MAX), Err(Error::BufferUnderrun)));
    }

    #[test]
    fn packed_fields() {
        let flags = 0b1011_0110;
        assert_eq!(bit_field(flags, 8, 1), 1);
        assert_eq!(bit_field(flags, 7, 3), 0b011);
        assert_eq!(bit_field(flags, 4, 1), 0);
        assert_eq!(bit_field(flags, 3, 3), 0b110);
        assert_eq!(bit_field(flags, 8, 8), flags);
        assert_eq!(bit_field(flags, 1, 1), 0);
    }

    #[test]
    fn sub_blocks() -> Result<()> {
        let buf = [2, 0xAA, 0xBB, 1, 0xCC, 0, 0x3B];
        let mut c = Cursor::new(&buf);
        let mut data = vec![];
        c.read_sub_blocks(|b| data.extend_from_slice(b))?;
        assert_eq!(data, [0xAA, 0xBB, 0xCC]);
        assert_eq!(c.read_u8()?, 0x3B);
        let mut c = Cursor::new(&buf);
        assert_eq!(c.skip_sub_blocks()?, 3);
        Ok(())
    }

    #[test]
    fn unterminated_sub_blocks() {
        let mut c = Cursor::new(&[3, 1, 2, 3]);
        assert!(matches!(c.skip_sub_blocks(), Err(Error::BufferUnderrun)));
        let mut c = Cursor::new(&[4, 1, 2]);
        assert!(matches!(c.skip_sub_blocks(), Err(Error::BufferUnderrun)));
    }
}
