//! Fixed-width primitives of the save format.
//!
//! Integers are little-endian `i32`, booleans a single `0`/`1` byte. There is
//! no padding and no framing.

use std::io::{self, Read, Write};

use crate::error::{CorruptSave, DungeonError};

/// Writes primitives to a byte sink.
pub struct SaveWriter<W> {
    inner: W,
}

impl<W: Write> SaveWriter<W> {
    /// Wrap a sink.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write a little-endian `i32`.
    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.inner.write_all(&value.to_le_bytes())
    }

    /// Write a count or id that must fit in an `i32`.
    pub fn write_count(&mut self, value: usize) -> io::Result<()> {
        let value = i32::try_from(value)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "value does not fit in i32"))?;
        self.write_i32(value)
    }

    /// Write a boolean as one byte.
    pub fn write_bool(&mut self, value: bool) -> io::Result<()> {
        self.inner.write_all(&[u8::from(value)])
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Reads primitives from a byte source.
///
/// End of stream is reported as [`CorruptSave::Truncated`]; any other I/O
/// failure stays an I/O error.
pub struct SaveReader<R> {
    inner: R,
}

impl<R: Read> SaveReader<R> {
    /// Wrap a source.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DungeonError> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf).map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                DungeonError::CorruptSave(CorruptSave::Truncated)
            } else {
                DungeonError::Io(err)
            }
        })?;
        Ok(buf)
    }

    /// Read a little-endian `i32`.
    pub fn read_i32(&mut self) -> Result<i32, DungeonError> {
        Ok(i32::from_le_bytes(self.take::<4>()?))
    }

    /// Read an `i32` that must not be negative.
    pub fn read_count(&mut self, field: &'static str) -> Result<u32, DungeonError> {
        let value = self.read_i32()?;
        u32::try_from(value).map_err(|_| CorruptSave::Negative { field, value }.into())
    }

    /// Read an `i32` that must be greater than zero.
    pub fn read_positive(&mut self, field: &'static str) -> Result<i32, DungeonError> {
        match self.read_i32()? {
            value if value > 0 => Ok(value),
            value => Err(CorruptSave::Stat { field, value }.into()),
        }
    }

    /// Read a one-byte boolean.
    pub fn read_bool(&mut self) -> Result<bool, DungeonError> {
        match self.take::<1>()? {
            [0] => Ok(false),
            [1] => Ok(true),
            [other] => Err(CorruptSave::Bool(other).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_layout() {
        let mut writer = SaveWriter::new(Vec::new());
        writer.write_i32(-2).unwrap();
        writer.write_bool(true).unwrap();
        writer.write_count(258).unwrap();
        let bytes = writer.finish().unwrap();

        assert_eq!(bytes, vec![0xfe, 0xff, 0xff, 0xff, 1, 2, 1, 0, 0]);

        let mut reader = SaveReader::new(bytes.as_slice());
        assert_eq!(reader.read_i32().unwrap(), -2);
        assert!(reader.read_bool().unwrap());
        assert_eq!(reader.read_count("doors").unwrap(), 258);
    }

    #[test]
    fn test_short_read_is_truncation() {
        let mut reader = SaveReader::new(&[1u8, 2][..]);
        assert!(matches!(
            reader.read_i32(),
            Err(DungeonError::CorruptSave(CorruptSave::Truncated))
        ));
    }

    #[test]
    fn test_rejects_bad_bool_and_negative_count() {
        let mut reader = SaveReader::new(&[7u8][..]);
        assert!(matches!(
            reader.read_bool(),
            Err(DungeonError::CorruptSave(CorruptSave::Bool(7)))
        ));

        let bytes = 0i32.to_le_bytes();
        let mut reader = SaveReader::new(&bytes[..]);
        assert!(matches!(
            reader.read_positive("damage"),
            Err(DungeonError::CorruptSave(CorruptSave::Stat { field: "damage", value: 0 }))
        ));

        let bytes = (-3i32).to_le_bytes();
        let mut reader = SaveReader::new(&bytes[..]);
        assert!(matches!(
            reader.read_count("num_doors"),
            Err(DungeonError::CorruptSave(CorruptSave::Negative { field: "num_doors", value: -3 }))
        ));
    }
}
