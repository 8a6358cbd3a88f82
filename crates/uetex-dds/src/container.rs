//! Whole-file DDS loading and saving.
//!
//! Mipmap payloads follow the header back to back with no framing. Level
//! boundaries are recovered by replaying the size rule in [`mipmap_layout`]:
//! each level's byte size is computed from its dimensions rounded up to whole
//! 4x4 blocks (at least one), and the reported dimensions halve (floor) from
//! one level to the next.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};
use uetex_common::{BinaryReader, BinaryWriter};

use crate::asset::{AssetMip, TextureAsset};
use crate::header::{DdsHeader, EncodeOptions};
use crate::{Error, Result, DDS_EXTENSION};

/// Size and reported dimensions of one mipmap level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    /// Payload size in bytes, computed from the block-aligned dimensions.
    pub byte_size: usize,
}

/// One mipmap level's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mipmap {
    /// Raw level data.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl From<&AssetMip> for Mipmap {
    fn from(mip: &AssetMip) -> Self {
        Self {
            data: mip.data.clone(),
            width: mip.width,
            height: mip.height,
        }
    }
}

/// Iterator over the levels declared by a header, computed one at a time.
///
/// Yields exactly `mipmap_count` levels regardless of how small the
/// dimensions get, so a reader should consume payloads as it goes rather
/// than collecting the whole layout up front.
#[derive(Debug, Clone)]
pub struct MipLevels {
    width: u32,
    height: u32,
    bytes_per_pixel: f64,
    level: u32,
    count: u32,
}

impl MipLevels {
    pub fn new(header: &DdsHeader) -> Self {
        Self {
            width: header.width,
            height: header.height,
            bytes_per_pixel: header.bytes_per_pixel(),
            level: 0,
            count: header.mipmap_count,
        }
    }
}

impl Iterator for MipLevels {
    type Item = Result<MipLevel>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.level >= self.count {
            return None;
        }

        let (width, height) = (self.width, self.height);
        let level = self.level;
        self.level += 1;
        self.width /= 2;
        self.height /= 2;

        Some(
            level_byte_size(level, width, height, self.bytes_per_pixel).map(|byte_size| MipLevel {
                width,
                height,
                byte_size,
            }),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.level) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MipLevels {}

/// Calculate the size and dimensions of every mipmap level declared by `header`.
pub fn mipmap_layout(header: &DdsHeader) -> Result<Vec<MipLevel>> {
    MipLevels::new(header).collect()
}

/// Byte size of a level.
///
/// Both dimensions are rounded up to whole 4x4 blocks, never fewer than one.
fn level_byte_size(level: u32, width: u32, height: u32, bytes_per_pixel: f64) -> Result<usize> {
    let width = block_align(width);
    let height = block_align(height);
    let size = (width * height) as f64 * bytes_per_pixel;

    if size.fract() != 0.0 {
        return Err(Error::NonIntegerMipmapSize {
            level,
            width,
            height,
            bytes_per_pixel,
        });
    }
    Ok(size as usize)
}

fn block_align(value: u32) -> u64 {
    u64::from(value).div_ceil(4).max(1) * 4
}

/// A DDS file: header plus the payload of every mipmap level, largest first.
#[derive(Debug, Clone, PartialEq)]
pub struct DdsFile {
    pub header: DdsHeader,
    pub mipmaps: Vec<Mipmap>,
}

impl DdsFile {
    pub fn new(header: DdsHeader, mipmaps: Vec<Mipmap>) -> Self {
        Self { header, mipmaps }
    }

    /// Load a DDS file from disk.
    ///
    /// The path must carry the `.dds` extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.extension().and_then(|e| e.to_str()) != Some(DDS_EXTENSION) {
            return Err(Error::NotDds(path.to_path_buf()));
        }

        debug!(path = %path.display(), "loading DDS");
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Parse a complete DDS file from memory.
    ///
    /// Fails if the data ends before the last mipmap or continues past it.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        let header = DdsHeader::read(&mut reader)?;

        // Levels are framed as they are read so a bogus count runs out of
        // data instead of memory.
        let mut mipmaps = Vec::with_capacity(header.mipmap_count.min(32) as usize);

        for (index, level) in MipLevels::new(&header).enumerate() {
            let level = level?;
            let offset = reader.position();
            let data = reader.read_bytes(level.byte_size)?;
            trace!(
                level = index,
                width = level.width,
                height = level.height,
                offset,
                bytes = level.byte_size,
                "read mipmap"
            );
            mipmaps.push(Mipmap {
                data: data.to_vec(),
                width: level.width,
                height: level.height,
            });
        }

        if !reader.is_empty() {
            return Err(Error::TrailingData(reader.remaining()));
        }

        Ok(Self { header, mipmaps })
    }

    /// Build a DDS file from a texture asset's mipmap chain.
    ///
    /// `.ubulk` levels come first, followed by `.uexp` levels.
    pub fn from_asset<A: TextureAsset + ?Sized>(asset: &A) -> Result<Self> {
        let mut mipmaps: Vec<Mipmap> = Vec::new();

        if asset.has_ubulk() {
            mipmaps.extend(asset.ubulk_mips().iter().map(Mipmap::from));
        }
        mipmaps.extend(asset.uexp_mips().iter().map(Mipmap::from));

        if mipmaps.is_empty() {
            return Err(Error::EmptyMipmapChain);
        }

        let (width, height) = asset.max_size();
        let header = DdsHeader::new(width, height, mipmaps.len() as u32, asset.format());
        debug!(
            width,
            height,
            mipmaps = header.mipmap_count,
            format = %header.format,
            "built DDS from texture asset"
        );

        Ok(Self { header, mipmaps })
    }

    /// Serialize with the default header options.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with(&EncodeOptions::default())
    }

    /// Serialize the header followed by every mipmap payload.
    pub fn to_bytes_with(&self, options: &EncodeOptions) -> Result<Vec<u8>> {
        if self.mipmaps.len() != self.header.mipmap_count as usize {
            return Err(Error::MipmapCountMismatch {
                expected: self.header.mipmap_count,
                actual: self.mipmaps.len(),
            });
        }

        let levels = MipLevels::new(&self.header);
        for (index, (mipmap, level)) in self.mipmaps.iter().zip(levels).enumerate() {
            let level = level?;
            if mipmap.data.len() != level.byte_size {
                return Err(Error::MipmapSizeMismatch {
                    level: index,
                    expected: level.byte_size,
                    actual: mipmap.data.len(),
                });
            }
        }

        let payload_size: usize = self.mipmaps.iter().map(|m| m.data.len()).sum();
        let mut writer = BinaryWriter::with_capacity(self.header.encoded_len() + payload_size);

        self.header.write(&mut writer, options);
        for mipmap in &self.mipmaps {
            writer.write_bytes(&mipmap.data);
        }

        Ok(writer.into_inner())
    }

    /// Save to disk with the default header options.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(path, &EncodeOptions::default())
    }

    /// Save to disk.
    pub fn save_with<P: AsRef<Path>>(&self, path: P, options: &EncodeOptions) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes_with(options)?;

        debug!(path = %path.display(), bytes = bytes.len(), "saving DDS");
        fs::write(path, bytes)?;
        Ok(())
    }
}
