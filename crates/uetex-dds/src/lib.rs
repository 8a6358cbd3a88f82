//! DDS texture container handling for Unreal texture assets.
//!
//! Reads and writes DirectDraw Surface files holding a single 2D texture with
//! an optional mipmap chain, in either the legacy FourCC form or with the DX10
//! extension header:
//!
//! - [`TextureFormat`] - the supported pixel formats and their on-disk identifiers
//! - [`DdsHeader`] - the header codec
//! - [`DdsFile`] - whole-file load/save and export from a [`TextureAsset`]
//!
//! # Example
//!
//! ```no_run
//! use uetex_dds::DdsFile;
//!
//! let dds = DdsFile::load("path/to/texture.dds")?;
//! println!("{}", dds.header);
//! dds.save("copy.dds")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod asset;
mod container;
mod error;
mod format;
mod header;

pub use asset::{AssetMip, TextureAsset};
pub use container::{mipmap_layout, DdsFile, MipLevel, MipLevels, Mipmap};
pub use error::{Error, Result};
pub use format::{RawFormatId, TextureFormat};
pub use header::{DdsHeader, DdsHeaderDxt10, DdsPixelFormat, DdsSurfaceDesc, EncodeOptions, FourCC};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// File extension required by [`DdsFile::load`].
pub const DDS_EXTENSION: &str = "dds";
