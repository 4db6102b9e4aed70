//! Binary reader for zero-copy parsing of byte slices.
//!
//! BF containers come in both byte orders (the Wii layout is big-endian, the
//! PS2 layout little-endian), so [`BinaryReader`] exposes both flavours of
//! every integer read.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// # Example
///
/// ```
/// use bfconv_common::BinaryReader;
///
/// let data = [b'B', b'F', b'0', b'1', 0x02, 0x00];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_magic::<4>().unwrap(), *b"BF01");
/// assert_eq!(reader.read_u16_be().unwrap(), 0x0200);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a fixed-size tag such as a file magic.
    #[inline]
    pub fn read_magic<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut magic = [0u8; N];
        magic.copy_from_slice(self.read_bytes(N)?);
        Ok(magic)
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2).map(LittleEndian::read_u16)
    }

    /// Read a big-endian u16.
    #[inline]
    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.read_bytes(2).map(BigEndian::read_u16)
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate. Byte
    /// order is whatever the struct's field types encode.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_both_byte_orders() {
        let data = [0x01u8, 0x00, 0x01, 0x00];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u16().unwrap(), 0x0001);
        assert_eq!(reader.read_u16_be().unwrap(), 0x0100);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = b"BF02";
        let reader = BinaryReader::new(data);

        assert_eq!(reader.peek_bytes(4).unwrap(), b"BF02");
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn test_read_magic() {
        let mut reader = BinaryReader::new(b"BF01rest");
        assert_eq!(reader.read_magic::<4>().unwrap(), *b"BF01");
        assert_eq!(reader.remaining_bytes(), b"rest");
        assert!(reader.read_magic::<8>().is_err());
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01];
        let mut reader = BinaryReader::new(&data);

        match reader.read_u16_be() {
            Err(Error::UnexpectedEof { needed, available }) => {
                assert_eq!(needed, 2);
                assert_eq!(available, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
