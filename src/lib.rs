//! Convert raw frames between RGB and YUV pixel formats and rotate, scale, crop or mirror them.
//!
//! Every operation is routed through [I420](PixelFormat::I420): frames already in I420 are
//! transformed directly, everything else is converted to I420, transformed and converted back.
//! The per pixel work is done by a [`Transform`] implementation, by default [`LibYuv`].
//!
//! ```no_run
//! use ezk_yuv::{Options, PixelFormat, Rotation, Transcoder};
//!
//! # #[cfg(feature = "libyuv")]
//! # fn main() -> Result<(), ezk_yuv::ConvertError> {
//! let transcoder = Transcoder::libyuv();
//! let (width, height) = (640, 480);
//! let yuy2 = vec![0u8; PixelFormat::YUY2.buffer_size(width, height)?];
//!
//! let i420 = transcoder.convert_to_canonical(
//!     &yuy2,
//!     width,
//!     height,
//!     PixelFormat::YUY2,
//!     Options::new().with_rotation(Rotation::Rotate90),
//! )?;
//!
//! // Rotated by 90 degrees, so width and height are exchanged
//! let rgba = transcoder.convert_from_canonical(
//!     &i420,
//!     height,
//!     width,
//!     PixelFormat::ABGR,
//!     Options::new(),
//! )?;
//!
//! assert_eq!(rgba.len(), width * height * 4);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "libyuv"))]
//! # fn main() {}
//! ```

pub use canonical::CanonicalLayout;
pub use capture::{CaptureFrame, CapturePlane, PlanarFrame};
pub use crop::Window;
#[cfg(feature = "libyuv")]
pub use libyuv::LibYuv;
pub use pixel_format::{BppFamily, FourCC, PixelFormat, UnknownFourCC};
pub use transcoder::{ArgumentError, ConvertError, Options, Transcoder};
pub use transform::{FilterMode, InvalidRotation, Rotation, Transform, TransformError};

mod canonical;
mod capture;
mod crop;
#[cfg(feature = "libyuv")]
mod libyuv;
mod pixel_format;
mod transcoder;
mod transform;
