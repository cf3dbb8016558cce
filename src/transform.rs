use crate::{CaptureFrame, PixelFormat, Window};

/// Clockwise rotation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Rotate0 => 0,
            Rotation::Rotate90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::Rotate270 => 270,
        }
    }

    /// Returns true if the rotation exchanges width and height
    pub fn is_transposing(self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }

    /// Dimensions of an image of `width` x `height` after rotating it
    pub fn rotated_dimensions(self, width: usize, height: usize) -> (usize, usize) {
        if self.is_transposing() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// Error returned when converting an angle which is not a multiple of 90 below 360
#[derive(Debug, thiserror::Error)]
#[error("unsupported rotation of {0} degrees")]
pub struct InvalidRotation(pub u32);

impl TryFrom<u32> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: u32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Rotate0),
            90 => Ok(Rotation::Rotate90),
            180 => Ok(Rotation::Rotate180),
            270 => Ok(Rotation::Rotate270),
            _ => Err(InvalidRotation(degrees)),
        }
    }
}

/// Sampling used when scaling, trading quality for speed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Point sample, fastest
    #[default]
    None,

    /// Filter horizontally only
    Linear,

    /// Faster than box, but lower quality scaling down
    Bilinear,

    /// Highest quality
    Box,
}

impl FilterMode {
    pub fn value(self) -> u32 {
        match self {
            FilterMode::None => 0,
            FilterMode::Linear => 1,
            FilterMode::Bilinear => 2,
            FilterMode::Box => 3,
        }
    }
}

/// Everything that can go wrong inside a [`Transform`] primitive
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("{operation} failed with code {code}")]
    Failed { operation: &'static str, code: i32 },

    #[error("{buffer} buffer too small, expected it to be at least {minimum} bytes, but got {got}")]
    BufferTooSmall {
        buffer: &'static str,
        minimum: usize,
        got: usize,
    },

    #[error("invalid stride for {buffer}, expected it to be at least {minimum}, but got {got}")]
    InvalidStride {
        buffer: &'static str,
        minimum: usize,
        got: usize,
    },

    #[error("window {window:?} goes out of the {width}x{height} source bounds")]
    WindowOutOfBounds {
        window: Window,
        width: usize,
        height: usize,
    },

    #[error("value {0} does not fit the native integer type")]
    DimensionOverflow(usize),
}

/// The primitive image operations every conversion is built from.
///
/// Each method reads `src` with the given dimensions and writes into `dst`, which the caller
/// has already sized. Everything other than `format_to_canonical` and `canonical_to_format`
/// operates on buffers in the canonical I420 layout (see [`CanonicalLayout`]).
///
/// Implementations must be stateless, so a single instance may serve any number of threads.
///
/// [`CanonicalLayout`]: crate::CanonicalLayout
#[allow(clippy::too_many_arguments)]
pub trait Transform {
    /// Convert a camera frame with arbitrary plane strides into I420, rotating in the same pass.
    ///
    /// `dst` is laid out with the rotated dimensions.
    fn capture_to_canonical(
        &self,
        frame: &dyn CaptureFrame,
        dst: &mut [u8],
        rotation: Rotation,
    ) -> Result<(), TransformError>;

    fn nv21_to_canonical(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
    ) -> Result<(), TransformError>;

    fn canonical_to_nv21(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
    ) -> Result<(), TransformError>;

    /// Decode the `window` of `src` (interpreted as `format`) into I420, then rotate it.
    ///
    /// `dst` is laid out with the rotated window dimensions.
    fn format_to_canonical(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        window: Window,
        rotation: Rotation,
        format: PixelFormat,
    ) -> Result<(), TransformError>;

    /// Encode I420 `src` as `format`. A `dst_stride` of 0 means packed rows.
    fn canonical_to_format(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        dst_stride: usize,
        format: PixelFormat,
    ) -> Result<(), TransformError>;

    fn canonical_rotate(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        rotation: Rotation,
    ) -> Result<(), TransformError>;

    fn canonical_scale(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        dst_width: usize,
        dst_height: usize,
        filter: FilterMode,
    ) -> Result<(), TransformError>;

    fn canonical_crop(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        window: Window,
    ) -> Result<(), TransformError>;

    /// Flip horizontally
    fn canonical_mirror(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
    ) -> Result<(), TransformError>;
}

#[allow(clippy::too_many_arguments)]
impl<T: Transform + ?Sized> Transform for &T {
    fn capture_to_canonical(
        &self,
        frame: &dyn CaptureFrame,
        dst: &mut [u8],
        rotation: Rotation,
    ) -> Result<(), TransformError> {
        (**self).capture_to_canonical(frame, dst, rotation)
    }

    fn nv21_to_canonical(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
    ) -> Result<(), TransformError> {
        (**self).nv21_to_canonical(src, width, height, dst)
    }

    fn canonical_to_nv21(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
    ) -> Result<(), TransformError> {
        (**self).canonical_to_nv21(src, width, height, dst)
    }

    fn format_to_canonical(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        window: Window,
        rotation: Rotation,
        format: PixelFormat,
    ) -> Result<(), TransformError> {
        (**self).format_to_canonical(src, width, height, dst, window, rotation, format)
    }

    fn canonical_to_format(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        dst_stride: usize,
        format: PixelFormat,
    ) -> Result<(), TransformError> {
        (**self).canonical_to_format(src, width, height, dst, dst_stride, format)
    }

    fn canonical_rotate(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        rotation: Rotation,
    ) -> Result<(), TransformError> {
        (**self).canonical_rotate(src, width, height, dst, rotation)
    }

    fn canonical_scale(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        dst_width: usize,
        dst_height: usize,
        filter: FilterMode,
    ) -> Result<(), TransformError> {
        (**self).canonical_scale(src, width, height, dst, dst_width, dst_height, filter)
    }

    fn canonical_crop(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        window: Window,
    ) -> Result<(), TransformError> {
        (**self).canonical_crop(src, width, height, dst, window)
    }

    fn canonical_mirror(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
    ) -> Result<(), TransformError> {
        (**self).canonical_mirror(src, width, height, dst)
    }
}
