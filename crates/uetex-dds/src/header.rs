//! DDS header structures and the header codec.
//!
//! The on-disk layout is described by the zerocopy structs [`DdsSurfaceDesc`],
//! [`DdsPixelFormat`] and [`DdsHeaderDxt10`]. [`DdsHeader`] is the logical view:
//! dimensions, mipmap count and a registry [`TextureFormat`]. Everything else
//! in the on-disk header is either a fixed constant or derived when writing.

use std::fmt;

use tracing::debug;
use uetex_common::{BinaryReader, BinaryWriter};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::format::{RawFormatId, TextureFormat};
use crate::{Error, Result, DDS_MAGIC};

/// DDS surface descriptor, the 124 bytes following the magic.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsSurfaceDesc {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved. Words 9 and 10 carry the writer signature.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsSurfaceDesc {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    pub const DDSD_CAPS: u32 = 0x1;
    pub const DDSD_HEIGHT: u32 = 0x2;
    pub const DDSD_WIDTH: u32 = 0x4;
    pub const DDSD_PIXELFORMAT: u32 = 0x1000;
    pub const DDSD_MIPMAPCOUNT: u32 = 0x2_0000;
    pub const DDSD_LINEARSIZE: u32 = 0x8_0000;

    pub const DDSCAPS_COMPLEX: u32 = 0x8;
    pub const DDSCAPS_TEXTURE: u32 = 0x1000;
    pub const DDSCAPS_MIPMAP: u32 = 0x40_0000;

    /// Index of the signature word inside `reserved1`.
    const SIGNATURE_WORD: usize = 9;

    /// Check if this is a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.four_cc == FourCC::DX10
    }

    /// The writer signature stamped into the reserved words.
    pub fn signature(&self) -> [u8; 4] {
        let reserved1 = self.reserved1;
        reserved1[Self::SIGNATURE_WORD].to_le_bytes()
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Expected structure size.
    pub const SIZE: u32 = 32;
    /// `four_cc` holds a valid code.
    pub const DDPF_FOURCC: u32 = 0x4;

    fn with_four_cc(four_cc: FourCC) -> Self {
        Self {
            size: Self::SIZE,
            flags: Self::DDPF_FOURCC,
            four_cc,
            rgb_bit_count: 0,
            r_bit_mask: 0,
            g_bit_mask: 0,
            b_bit_mask: 0,
            a_bit_mask: 0,
        }
    }
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");
    /// ATI1 (BC4) compression.
    pub const ATI1: Self = Self(*b"ATI1");
    /// ATI2 (BC5) compression.
    pub const ATI2: Self = Self(*b"ATI2");
    /// BC4U compression.
    pub const BC4U: Self = Self(*b"BC4U");
    /// BC5U compression.
    pub const BC5U: Self = Self(*b"BC5U");
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// DX10 extended header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDxt10 {
    /// DXGI format.
    pub dxgi_format: u32,
    /// Resource dimension.
    pub resource_dimension: u32,
    /// Misc flags.
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Misc flags 2.
    pub misc_flags2: u32,
}

impl DdsHeaderDxt10 {
    pub const R16G16B16A16_FLOAT: u32 = 10;
    pub const BC1_UNORM: u32 = 71;
    pub const BC1_UNORM_SRGB: u32 = 72;
    pub const BC3_UNORM: u32 = 77;
    pub const BC3_UNORM_SRGB: u32 = 78;
    pub const BC4_UNORM: u32 = 80;
    pub const BC5_UNORM: u32 = 83;
    pub const B8G8R8A8_UNORM_SRGB: u32 = 91;
    pub const BC6H_UF16: u32 = 95;
    pub const BC6H_SF16: u32 = 96;
    pub const BC7_UNORM: u32 = 98;
    pub const BC7_UNORM_SRGB: u32 = 99;

    /// `D3D10_RESOURCE_DIMENSION_TEXTURE2D`.
    pub const DIMENSION_TEXTURE2D: u32 = 3;

    /// Extension header for a single 2D texture.
    pub fn texture_2d(dxgi_format: u32) -> Self {
        Self {
            dxgi_format,
            resource_dimension: Self::DIMENSION_TEXTURE2D,
            misc_flag: 0,
            array_size: 1,
            misc_flags2: 0,
        }
    }

    /// Reject arrays, cubemaps and anything that is not a 2D texture.
    fn validate(&self) -> Result<()> {
        let (resource_dimension, misc_flag, array_size) =
            (self.resource_dimension, self.misc_flag, self.array_size);
        if (resource_dimension, misc_flag, array_size) != (Self::DIMENSION_TEXTURE2D, 0, 1) {
            return Err(Error::MalformedDx10Header {
                resource_dimension,
                misc_flag,
                array_size,
            });
        }
        Ok(())
    }
}

/// Options applied when encoding a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Four bytes stamped into the reserved region. Not interpreted by readers.
    pub signature: [u8; 4],
}

impl EncodeOptions {
    pub const DEFAULT_SIGNATURE: [u8; 4] = *b"FF7R";

    /// Options with a custom signature.
    pub fn with_signature(signature: [u8; 4]) -> Self {
        Self { signature }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::with_signature(Self::DEFAULT_SIGNATURE)
    }
}

/// Logical DDS header: a single 2D texture with an optional mipmap chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsHeader {
    /// Width of the top mipmap level.
    pub width: u32,
    /// Height of the top mipmap level.
    pub height: u32,
    /// Number of mipmap levels, at least 1 once decoded.
    pub mipmap_count: u32,
    /// Pixel format.
    pub format: TextureFormat,
}

impl DdsHeader {
    /// Size of the magic plus surface descriptor.
    pub const BASE_SIZE: usize = 4 + std::mem::size_of::<DdsSurfaceDesc>();
    /// Size of the DX10 extension header.
    pub const DX10_SIZE: usize = std::mem::size_of::<DdsHeaderDxt10>();

    pub fn new(width: u32, height: u32, mipmap_count: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            mipmap_count,
            format,
        }
    }

    /// Bytes per pixel of the header's format.
    pub fn bytes_per_pixel(&self) -> f64 {
        self.format.bytes_per_pixel()
    }

    /// Whether writing this header appends the DX10 extension.
    pub fn needs_dx10(&self) -> bool {
        matches!(self.format.canonical_id(), RawFormatId::Dxgi(_))
    }

    /// Number of bytes [`encode`](Self::encode) produces.
    pub fn encoded_len(&self) -> usize {
        if self.needs_dx10() {
            Self::BASE_SIZE + Self::DX10_SIZE
        } else {
            Self::BASE_SIZE
        }
    }

    /// Decode a header from the start of `data`.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::read(&mut BinaryReader::new(data))
    }

    /// Decode a header, leaving `reader` positioned at the first mipmap.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        reader.expect_magic(DDS_MAGIC)?;

        let desc: DdsSurfaceDesc = reader.read_struct()?;
        check_constant("header size", DdsSurfaceDesc::SIZE, desc.size)?;
        check_constant("pixel format size", DdsPixelFormat::SIZE, desc.pixel_format.size)?;
        check_constant(
            "pixel format flags",
            DdsPixelFormat::DDPF_FOURCC,
            desc.pixel_format.flags,
        )?;

        let raw_id = if desc.is_dx10() {
            let dx10: DdsHeaderDxt10 = reader.read_struct()?;
            dx10.validate()?;
            RawFormatId::Dxgi(dx10.dxgi_format)
        } else {
            RawFormatId::FourCC(desc.pixel_format.four_cc)
        };
        let format = TextureFormat::from_raw_id(raw_id)?;

        // A zero count means the file does not declare one: a single level.
        let mipmap_count = desc.mipmap_count;
        let header = Self::new(desc.width, desc.height, mipmap_count.max(1), format);
        debug!(
            width = header.width,
            height = header.height,
            mipmaps = header.mipmap_count,
            format = %header.format,
            "decoded DDS header"
        );
        Ok(header)
    }

    /// Encode with the default signature.
    pub fn encode(&self) -> Vec<u8> {
        self.encode_with(&EncodeOptions::default())
    }

    /// Encode with explicit options.
    pub fn encode_with(&self, options: &EncodeOptions) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(self.encoded_len());
        self.write(&mut writer, options);
        writer.into_inner()
    }

    /// Append the encoded header to `writer`.
    pub fn write(&self, writer: &mut BinaryWriter, options: &EncodeOptions) {
        let canonical = self.format.canonical_id();
        let four_cc = match canonical {
            RawFormatId::FourCC(four_cc) => four_cc,
            RawFormatId::Dxgi(_) => FourCC::DX10,
        };
        let has_mipmaps = self.mipmap_count > 1;

        let mut flags = DdsSurfaceDesc::DDSD_CAPS
            | DdsSurfaceDesc::DDSD_HEIGHT
            | DdsSurfaceDesc::DDSD_WIDTH
            | DdsSurfaceDesc::DDSD_PIXELFORMAT
            | DdsSurfaceDesc::DDSD_LINEARSIZE;
        let mut caps = DdsSurfaceDesc::DDSCAPS_TEXTURE;
        if has_mipmaps {
            flags |= DdsSurfaceDesc::DDSD_MIPMAPCOUNT;
            caps |= DdsSurfaceDesc::DDSCAPS_COMPLEX | DdsSurfaceDesc::DDSCAPS_MIPMAP;
        }

        let mut reserved1 = [0u32; 11];
        reserved1[DdsSurfaceDesc::SIGNATURE_WORD] = u32::from_le_bytes(options.signature);

        let desc = DdsSurfaceDesc {
            size: DdsSurfaceDesc::SIZE,
            flags,
            height: self.height,
            width: self.width,
            pitch_or_linear_size: self.linear_size(),
            depth: 1,
            mipmap_count: self.mipmap_count,
            reserved1,
            pixel_format: DdsPixelFormat::with_four_cc(four_cc),
            caps,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        };

        writer.write_bytes(DDS_MAGIC);
        writer.write_struct(&desc);
        if let RawFormatId::Dxgi(dxgi_format) = canonical {
            writer.write_struct(&DdsHeaderDxt10::texture_2d(dxgi_format));
        }
        debug!(
            width = self.width,
            height = self.height,
            mipmaps = self.mipmap_count,
            format = %self.format,
            signature = %String::from_utf8_lossy(&options.signature),
            "encoded DDS header"
        );
    }

    /// Byte size of the unpadded top level, as written to `pitch_or_linear_size`.
    fn linear_size(&self) -> u32 {
        (f64::from(self.width) * f64::from(self.height) * self.bytes_per_pixel()).round() as u32
    }
}

impl fmt::Display for DdsHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "height: {}", self.height)?;
        writeln!(f, "width: {}", self.width)?;
        writeln!(f, "mipmap count: {}", self.mipmap_count)?;
        writeln!(f, "format: {}", self.format)?;
        write!(f, "bytes per pixel: {}", self.bytes_per_pixel())
    }
}

fn check_constant(field: &'static str, expected: u32, actual: u32) -> Result<()> {
    if actual != expected {
        return Err(Error::BadConstant {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}
