use crate::{ArgumentError, ConvertError};
use std::{fmt, str::FromStr};

/// Four character code identifying a pixel layout
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// Pack the four characters as little endian bytes, the form native conversion routines dispatch on
    pub const fn code(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    pub const fn from_code(code: u32) -> Self {
        Self(code.to_le_bytes())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC({self})")
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.0 {
            if c.is_ascii_graphic() || c == b' ' {
                write!(f, "{}", c as char)?;
            } else {
                write!(f, "\\x{c:02x}")?;
            }
        }

        Ok(())
    }
}

/// Error returned when parsing a tag that is not a registered [`PixelFormat`]
#[derive(Debug, thiserror::Error)]
#[error("{0} is not a registered pixel format")]
pub struct UnknownFourCC(pub FourCC);

/// Buffer size classification of a [`PixelFormat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BppFamily {
    /// `width * height`
    Bpp8,
    /// `width * height * 3 / 2`
    Bpp12,
    /// `width * height * 2`
    Bpp16,
    /// `width * height * 3`
    Bpp24,
    /// `width * height * 4`
    Bpp32,
}

impl BppFamily {
    pub fn bits_per_pixel(self) -> usize {
        match self {
            BppFamily::Bpp8 => 8,
            BppFamily::Bpp12 => 12,
            BppFamily::Bpp16 => 16,
            BppFamily::Bpp24 => 24,
            BppFamily::Bpp32 => 32,
        }
    }

    /// Total byte size of a packed image with the given dimensions, `None` on overflow
    pub fn buffer_size(self, width: usize, height: usize) -> Option<usize> {
        let pixels = width.checked_mul(height)?;

        match self {
            BppFamily::Bpp8 => Some(pixels),
            BppFamily::Bpp12 => pixels.checked_mul(3).map(|n| n / 2),
            BppFamily::Bpp16 => pixels.checked_mul(2),
            BppFamily::Bpp24 => pixels.checked_mul(3),
            BppFamily::Bpp32 => pixels.checked_mul(4),
        }
    }
}

/// Supported pixel formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PixelFormat {
    /// Packed YUV 4:2:2, Y0 U Y1 V
    YUY2,

    /// Packed YUV 4:2:2, U Y0 V Y1
    UYVY,

    /// RGB565 little endian
    RGBP,

    /// ARGB1555 little endian
    RGBO,

    /// ARGB4444 little endian
    R444,

    /// 24 bit RGB, stored B G R in memory (`24BG`)
    RGB24,

    /// 24 bit RGB, stored R G B in memory (`RAW `)
    RAW,

    /// 32 bit, stored B G R A in memory
    ARGB,

    /// 32 bit, stored A R G B in memory
    BGRA,

    /// 32 bit, stored R G B A in memory
    ABGR,

    /// 32 bit, stored A B G R in memory
    RGBA,

    /// 10 bits per channel packed into 32 bits, ABGR order
    AR30,

    /// Y plane only
    I400,

    /// Y plane and interleaved UV plane, 4:2:0 sub sampling
    NV12,

    /// Y plane and interleaved VU plane, 4:2:0 sub sampling
    NV21,

    /// Y, U and V planes, 4:2:0 sub sampling. The canonical intermediate format.
    I420,

    /// Y, V and U planes, 4:2:0 sub sampling
    YV12,

    /// Y, U and V planes, 4:2:2 sub sampling
    I422,

    /// Y, V and U planes, 4:2:2 sub sampling
    YV16,

    /// Y, U and V planes, 4:4:4 sub sampling
    I444,

    /// Y, V and U planes, 4:4:4 sub sampling
    YV24,

    /// Motion JPEG. Recognized as a tag only, it has no fixed buffer size and no conversion.
    MJPG,
}

impl PixelFormat {
    /// The format every conversion is routed through
    pub const CANONICAL: PixelFormat = PixelFormat::I420;

    pub const fn fourcc(self) -> FourCC {
        use PixelFormat::*;

        FourCC(match self {
            YUY2 => *b"YUY2",
            UYVY => *b"UYVY",
            RGBP => *b"RGBP",
            RGBO => *b"RGBO",
            R444 => *b"R444",
            RGB24 => *b"24BG",
            RAW => *b"RAW ",
            ARGB => *b"ARGB",
            BGRA => *b"BGRA",
            ABGR => *b"ABGR",
            RGBA => *b"RGBA",
            AR30 => *b"AR30",
            I400 => *b"I400",
            NV12 => *b"NV12",
            NV21 => *b"NV21",
            I420 => *b"I420",
            YV12 => *b"YV12",
            I422 => *b"I422",
            YV16 => *b"YV16",
            I444 => *b"I444",
            YV24 => *b"YV24",
            MJPG => *b"MJPG",
        })
    }

    /// Packed 32 bit code of the format's [`FourCC`]
    pub const fn code(self) -> u32 {
        self.fourcc().code()
    }

    pub fn is_canonical(self) -> bool {
        self == Self::CANONICAL
    }

    /// Size family of the format, `None` for formats without a fixed size per pixel
    pub fn bpp_family(self) -> Option<BppFamily> {
        use PixelFormat::*;

        match self {
            YUY2 | UYVY | I422 | RGBP | RGBO | R444 | YV16 => Some(BppFamily::Bpp16),
            RGB24 | RAW | YV24 => Some(BppFamily::Bpp24),
            ARGB | BGRA | ABGR | RGBA | I444 | AR30 => Some(BppFamily::Bpp32),
            I400 => Some(BppFamily::Bpp8),
            NV12 | NV21 | I420 | YV12 => Some(BppFamily::Bpp12),
            MJPG => None,
        }
    }

    /// Whether frames in this format can be converted to I420
    ///
    /// AR30 can only be produced from I420, MJPG has no fixed size.
    pub fn is_decodable(self) -> bool {
        !matches!(self, PixelFormat::AR30 | PixelFormat::MJPG)
    }

    /// Whether I420 frames can be converted to this format
    pub fn is_encodable(self) -> bool {
        self.bpp_family().is_some()
    }

    /// Calculate the required buffer size given the [`PixelFormat`] self and image dimensions (in pixel width, height).
    ///
    /// Fails with [`ConvertError::UnsupportedFormat`] if the format has no [`BppFamily`].
    pub fn buffer_size(self, width: usize, height: usize) -> Result<usize, ConvertError> {
        let family = self
            .bpp_family()
            .ok_or(ConvertError::UnsupportedFormat(self))?;

        family
            .buffer_size(width, height)
            .ok_or(ConvertError::InvalidArgument(ArgumentError::SizeOverflow {
                width,
                height,
            }))
    }

    pub fn variants() -> impl IntoIterator<Item = Self> {
        use PixelFormat::*;

        [
            YUY2, UYVY, RGBP, RGBO, R444, RGB24, RAW, ARGB, BGRA, ABGR, RGBA, AR30, I400, NV12,
            NV21, I420, YV12, I422, YV16, I444, YV24, MJPG,
        ]
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fourcc(), f)
    }
}

impl TryFrom<FourCC> for PixelFormat {
    type Error = UnknownFourCC;

    fn try_from(fourcc: FourCC) -> Result<Self, Self::Error> {
        Self::variants()
            .into_iter()
            .find(|format| format.fourcc() == fourcc)
            .ok_or(UnknownFourCC(fourcc))
    }
}

impl TryFrom<u32> for PixelFormat {
    type Error = UnknownFourCC;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::try_from(FourCC::from_code(code))
    }
}

impl FromStr for PixelFormat {
    type Err = UnknownFourCC;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tag = [0u8; 4];

        match s.as_bytes() {
            bytes if bytes.len() == 4 => tag.copy_from_slice(bytes),
            // Allow the trailing space of `RAW ` to be omitted
            bytes if bytes.len() == 3 => {
                tag[..3].copy_from_slice(bytes);
                tag[3] = b' ';
            }
            bytes => {
                let n = bytes.len().min(4);
                tag[..n].copy_from_slice(&bytes[..n]);
            }
        }

        let fourcc = FourCC(tag);

        if s.len() > 4 {
            return Err(UnknownFourCC(fourcc));
        }

        Self::try_from(fourcc)
    }
}
