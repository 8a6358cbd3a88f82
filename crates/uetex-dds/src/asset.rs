//! Contract for texture assets that can be exported as DDS.
//!
//! Unreal texture assets split their mipmap chain between the `.ubulk`
//! (streamed, larger levels) and `.uexp` (in-package, smaller levels) files.
//! The asset parser lives elsewhere; this module only describes what the DDS
//! builder needs from it.

use crate::format::TextureFormat;

/// One mipmap level as stored in a texture asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMip {
    /// Raw, still-compressed level data.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl AssetMip {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// A texture asset exposing its mipmap chain.
///
/// Both mip lists are ordered largest first.
pub trait TextureAsset {
    /// Pixel format of every level.
    fn format(&self) -> TextureFormat;

    /// Whether the asset has `.ubulk`-resident levels.
    fn has_ubulk(&self) -> bool;

    /// Levels stored in the `.ubulk` file.
    fn ubulk_mips(&self) -> &[AssetMip];

    /// Levels stored in the `.uexp` file.
    fn uexp_mips(&self) -> &[AssetMip];

    /// Dimensions of the largest level, as `(width, height)`.
    fn max_size(&self) -> (u32, u32);
}
