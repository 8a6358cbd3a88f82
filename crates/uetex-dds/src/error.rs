//! Error types for DDS handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::RawFormatId;

/// Errors that can occur when working with DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(uetex_common::Error),

    /// Path does not carry the `.dds` extension.
    #[error("not a DDS file: {}", .0.display())]
    NotDds(PathBuf),

    /// Invalid DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    BadMagic([u8; 4]),

    /// A structurally fixed header field holds the wrong value.
    #[error("invalid DDS {field}: expected {expected}, got {actual}")]
    BadConstant {
        field: &'static str,
        expected: u32,
        actual: u32,
    },

    /// Raw format identifier not present in the format registry.
    #[error("unsupported DDS format: {0}")]
    UnsupportedFormat(RawFormatId),

    /// Format name not present in the format registry.
    #[error("unsupported format name: {0:?}")]
    UnsupportedFormatName(String),

    /// DX10 extension describes something other than a single 2D texture.
    #[error(
        "unsupported DX10 header: resource dimension {resource_dimension}, misc flag {misc_flag}, \
         array size {array_size} (only single 2D textures are supported)"
    )]
    MalformedDx10Header {
        resource_dimension: u32,
        misc_flag: u32,
        array_size: u32,
    },

    /// Mipmap byte size is not a whole number of bytes.
    #[error("mipmap {level} ({width}x{height} at {bytes_per_pixel} bytes/pixel) is not a whole number of bytes")]
    NonIntegerMipmapSize {
        level: u32,
        width: u64,
        height: u64,
        bytes_per_pixel: f64,
    },

    /// File ended before all mipmap data was read.
    #[error("unexpected end of DDS data: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// Bytes remain after the last mipmap.
    #[error("{0} trailing bytes after the last mipmap")]
    TrailingData(usize),

    /// Mipmap list length disagrees with the header.
    #[error("mipmap count mismatch: header declares {expected}, container holds {actual}")]
    MipmapCountMismatch { expected: u32, actual: usize },

    /// Mipmap payload length disagrees with the size its dimensions require.
    #[error("mipmap {level} size mismatch: expected {expected} bytes, got {actual}")]
    MipmapSizeMismatch {
        level: usize,
        expected: usize,
        actual: usize,
    },

    /// Texture asset exposed no mipmap levels.
    #[error("texture asset has no mipmaps")]
    EmptyMipmapChain,
}

impl From<uetex_common::Error> for Error {
    fn from(err: uetex_common::Error) -> Self {
        match err {
            uetex_common::Error::UnexpectedEof { needed, available } => {
                Error::UnexpectedEof { needed, available }
            }
            uetex_common::Error::InvalidMagic { actual, .. } if actual.len() == 4 => {
                let mut magic = [0u8; 4];
                magic.copy_from_slice(&actual);
                Error::BadMagic(magic)
            }
            other => Error::Common(other),
        }
    }
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
