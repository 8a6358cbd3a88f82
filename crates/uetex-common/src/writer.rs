//! Binary writer for building byte buffers.

use zerocopy::{Immutable, IntoBytes};

/// A growable output buffer.
///
/// The mirror of [`BinaryReader`](crate::BinaryReader): fixed-layout
/// structures are copied verbatim via zerocopy, raw spans are appended as-is.
///
/// # Example
///
/// ```
/// use uetex_common::BinaryWriter;
///
/// let mut writer = BinaryWriter::new();
/// writer.write_bytes(b"DDS ");
/// writer.write_struct(&124u32);
///
/// assert_eq!(writer.into_inner(), b"DDS \x7c\x00\x00\x00".to_vec());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Write a struct using zerocopy.
    #[inline]
    pub fn write_struct<T: IntoBytes + Immutable>(&mut self, value: &T) {
        self.buffer.extend_from_slice(value.as_bytes());
    }

    /// Consume the writer, returning the written bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}
