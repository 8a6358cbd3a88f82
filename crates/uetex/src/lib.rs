//! uetex - Unreal texture asset to DDS conversion library.
//!
//! This crate provides a unified interface to the uetex crates.
//!
//! # Crates
//!
//! - [`uetex_common`] - Common utilities (zero-copy binary reading and writing)
//! - [`uetex_dds`] - DDS header and container codec
//!
//! # Example
//!
//! ```no_run
//! use uetex::prelude::*;
//!
//! let dds = DdsFile::load("texture.dds")?;
//! for level in mipmap_layout(&dds.header)? {
//!     println!("{}x{}: {} bytes", level.width, level.height, level.byte_size);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use uetex_common as common;
pub use uetex_dds as dds;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use uetex_common::{BinaryReader, BinaryWriter};
    pub use uetex_dds::{
        mipmap_layout, AssetMip, DdsFile, DdsHeader, EncodeOptions, MipLevel, MipLevels, Mipmap,
        RawFormatId, TextureAsset, TextureFormat,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
