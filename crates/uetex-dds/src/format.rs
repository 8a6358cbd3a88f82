//! Pixel format registry.
//!
//! Maps the closed set of supported [`TextureFormat`]s to the raw identifiers
//! that denote them on disk: legacy FourCC codes in the pixel format block, or
//! DXGI enumerants in the DX10 extension header.

use std::fmt;
use std::str::FromStr;

use crate::header::{DdsHeaderDxt10, FourCC};
use crate::{Error, Result};

/// A raw on-disk format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawFormatId {
    /// Legacy four-character code.
    FourCC(FourCC),
    /// DXGI format enumerant from the DX10 extension header.
    Dxgi(u32),
}

impl fmt::Display for RawFormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FourCC(four_cc) => write!(f, "FourCC {four_cc}"),
            Self::Dxgi(code) => write!(f, "DXGI format {code}"),
        }
    }
}

/// Supported texture pixel formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// DXT1 / BC1.
    Bc1,
    /// DXT5 / BC3.
    Bc3,
    /// BC4 / ATI1.
    Bc4,
    /// BC5 / ATI2.
    Bc5,
    /// BC6H, unsigned half floats.
    Bc6hUnsigned,
    /// BC6H, signed half floats.
    Bc6hSigned,
    /// BC7.
    Bc7,
    /// Uncompressed RGBA, 16-bit float channels.
    FloatRgba,
    /// Uncompressed BGRA, 8-bit sRGB channels.
    Bgra8Srgb,
}

const BC1_IDS: &[RawFormatId] = &[
    RawFormatId::FourCC(FourCC::DXT1),
    RawFormatId::Dxgi(DdsHeaderDxt10::BC1_UNORM),
    RawFormatId::Dxgi(DdsHeaderDxt10::BC1_UNORM_SRGB),
];
const BC3_IDS: &[RawFormatId] = &[
    RawFormatId::FourCC(FourCC::DXT5),
    RawFormatId::Dxgi(DdsHeaderDxt10::BC3_UNORM),
    RawFormatId::Dxgi(DdsHeaderDxt10::BC3_UNORM_SRGB),
];
const BC4_IDS: &[RawFormatId] = &[
    RawFormatId::Dxgi(DdsHeaderDxt10::BC4_UNORM),
    RawFormatId::FourCC(FourCC::ATI1),
    RawFormatId::FourCC(FourCC::BC4U),
];
const BC5_IDS: &[RawFormatId] = &[
    RawFormatId::Dxgi(DdsHeaderDxt10::BC5_UNORM),
    RawFormatId::FourCC(FourCC::ATI2),
    RawFormatId::FourCC(FourCC::BC5U),
];
const BC6H_UF16_IDS: &[RawFormatId] = &[RawFormatId::Dxgi(DdsHeaderDxt10::BC6H_UF16)];
const BC6H_SF16_IDS: &[RawFormatId] = &[RawFormatId::Dxgi(DdsHeaderDxt10::BC6H_SF16)];
const BC7_IDS: &[RawFormatId] = &[
    RawFormatId::Dxgi(DdsHeaderDxt10::BC7_UNORM),
    RawFormatId::Dxgi(DdsHeaderDxt10::BC7_UNORM_SRGB),
];
const FLOAT_RGBA_IDS: &[RawFormatId] = &[RawFormatId::Dxgi(DdsHeaderDxt10::R16G16B16A16_FLOAT)];
const BGRA8_SRGB_IDS: &[RawFormatId] = &[RawFormatId::Dxgi(DdsHeaderDxt10::B8G8R8A8_UNORM_SRGB)];

impl TextureFormat {
    /// Every supported format, in registry order.
    pub const ALL: [TextureFormat; 9] = [
        Self::Bc1,
        Self::Bc3,
        Self::Bc4,
        Self::Bc5,
        Self::Bc6hUnsigned,
        Self::Bc6hSigned,
        Self::Bc7,
        Self::FloatRgba,
        Self::Bgra8Srgb,
    ];

    /// Human-readable registry name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bc1 => "DXT1/BC1",
            Self::Bc3 => "DXT5/BC3",
            Self::Bc4 => "BC4/ATI1",
            Self::Bc5 => "BC5/ATI2",
            Self::Bc6hUnsigned => "BC6H(unsigned)",
            Self::Bc6hSigned => "BC6H(signed)",
            Self::Bc7 => "BC7",
            Self::FloatRgba => "FloatRGBA",
            Self::Bgra8Srgb => "B8G8R8A8(sRGB)",
        }
    }

    /// Raw identifiers that denote this format.
    ///
    /// The first entry is the canonical identifier used when writing.
    pub const fn raw_ids(self) -> &'static [RawFormatId] {
        match self {
            Self::Bc1 => BC1_IDS,
            Self::Bc3 => BC3_IDS,
            Self::Bc4 => BC4_IDS,
            Self::Bc5 => BC5_IDS,
            Self::Bc6hUnsigned => BC6H_UF16_IDS,
            Self::Bc6hSigned => BC6H_SF16_IDS,
            Self::Bc7 => BC7_IDS,
            Self::FloatRgba => FLOAT_RGBA_IDS,
            Self::Bgra8Srgb => BGRA8_SRGB_IDS,
        }
    }

    /// Canonical write-time identifier.
    pub const fn canonical_id(self) -> RawFormatId {
        self.raw_ids()[0]
    }

    /// Average bytes per pixel. Block formats use fractional values.
    pub const fn bytes_per_pixel(self) -> f64 {
        match self {
            Self::Bc1 | Self::Bc4 => 0.5,
            Self::Bc3 | Self::Bc5 | Self::Bc6hUnsigned | Self::Bc6hSigned | Self::Bc7 => 1.0,
            Self::FloatRgba => 8.0,
            Self::Bgra8Srgb => 4.0,
        }
    }

    /// Resolve a raw on-disk identifier to its format.
    pub fn from_raw_id(id: RawFormatId) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.raw_ids().contains(&id))
            .ok_or(Error::UnsupportedFormat(id))
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextureFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| Error::UnsupportedFormatName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_ids_are_disjoint() {
        for (i, a) in TextureFormat::ALL.iter().enumerate() {
            for b in &TextureFormat::ALL[i + 1..] {
                for id in a.raw_ids() {
                    assert!(
                        !b.raw_ids().contains(id),
                        "{id} is shared by {a} and {b}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_raw_id_resolves_to_its_format() {
        for format in TextureFormat::ALL {
            assert!(!format.raw_ids().is_empty());
            for &id in format.raw_ids() {
                assert_eq!(TextureFormat::from_raw_id(id).unwrap(), format);
            }
        }
    }

    #[test]
    fn test_lookup_by_fourcc_and_dxgi() {
        assert_eq!(
            TextureFormat::from_raw_id(RawFormatId::FourCC(FourCC(*b"ATI2"))).unwrap(),
            TextureFormat::Bc5
        );
        assert_eq!(
            TextureFormat::from_raw_id(RawFormatId::Dxgi(99)).unwrap(),
            TextureFormat::Bc7
        );
        assert_eq!(
            TextureFormat::from_raw_id(RawFormatId::Dxgi(10)).unwrap(),
            TextureFormat::FloatRgba
        );
    }

    #[test]
    fn test_unsupported_raw_ids() {
        for id in [
            RawFormatId::Dxgi(9999),
            RawFormatId::FourCC(FourCC(*b"XYZ1")),
            // DX10 is a sentinel, never a format of its own
            RawFormatId::FourCC(FourCC::DX10),
        ] {
            match TextureFormat::from_raw_id(id) {
                Err(Error::UnsupportedFormat(got)) => assert_eq!(got, id),
                other => panic!("expected UnsupportedFormat, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_canonical_ids() {
        assert_eq!(
            TextureFormat::Bc1.canonical_id(),
            RawFormatId::FourCC(FourCC::DXT1)
        );
        assert_eq!(TextureFormat::Bc4.canonical_id(), RawFormatId::Dxgi(80));
        assert_eq!(TextureFormat::Bgra8Srgb.canonical_id(), RawFormatId::Dxgi(91));
    }

    #[test]
    fn test_name_round_trip() {
        for format in TextureFormat::ALL {
            assert_eq!(format.name().parse::<TextureFormat>().unwrap(), format);
        }
        assert!(matches!(
            "BC9".parse::<TextureFormat>(),
            Err(Error::UnsupportedFormatName(_))
        ));
    }

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(TextureFormat::Bc1.bytes_per_pixel(), 0.5);
        assert_eq!(TextureFormat::Bc7.bytes_per_pixel(), 1.0);
        assert_eq!(TextureFormat::FloatRgba.bytes_per_pixel(), 8.0);
    }
}
