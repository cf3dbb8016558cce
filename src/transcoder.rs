use crate::{
    CanonicalLayout, CaptureFrame, FilterMode, PixelFormat, Rotation, Transform, TransformError,
    Window,
};
use tracing::trace;

/// Everything that can go wrong when calling a [`Transcoder`] operation
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("pixel format {0} is not supported by this operation")]
    UnsupportedFormat(PixelFormat),

    #[error(transparent)]
    InvalidArgument(#[from] ArgumentError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Invalid input detected before any buffer is allocated
#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    #[error("width or height must not be zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("the window {window:?} goes out of the {width}x{height} image bounds or is empty")]
    WindowOutOfBounds {
        window: Window,
        width: usize,
        height: usize,
    },

    #[error("buffer size for {width}x{height} overflows")]
    SizeOverflow { width: usize, height: usize },

    #[error("destination size must not be zero")]
    ZeroDestinationSize,
}

/// Optional parameters of the [`Transcoder`] operations
///
/// - `window`: region of the source to convert, defaults to the full frame. Read by
///   [`Transcoder::convert_to_canonical`].
/// - `rotation`: defaults to [`Rotation::Rotate0`]. Read by [`Transcoder::convert_to_canonical`].
/// - `dst_size`: byte size of the returned buffer for non canonical formats, defaults to
///   [`PixelFormat::buffer_size`] of the output dimensions. Useful when the native encoder needs
///   padding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub window: Option<Window>,
    pub rotation: Rotation,
    pub dst_size: Option<usize>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_dst_size(mut self, dst_size: usize) -> Self {
        self.dst_size = Some(dst_size);
        self
    }
}

/// Converts, rotates, scales, crops and mirrors frames by routing them through I420
///
/// Frames already in I420 are handed to a single [`Transform`] primitive. Every other format
/// is converted to I420, transformed, and converted back, with each intermediate buffer sized
/// from the format registry before anything is allocated.
#[derive(Debug, Clone, Copy)]
pub struct Transcoder<T> {
    backend: T,
}

#[cfg(feature = "libyuv")]
impl Transcoder<&'static crate::LibYuv> {
    /// Transcoder using the process wide libyuv backend
    pub fn libyuv() -> Self {
        Self::new(crate::LibYuv::shared())
    }
}

#[cfg(feature = "libyuv")]
impl Default for Transcoder<&'static crate::LibYuv> {
    fn default() -> Self {
        Self::libyuv()
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), ArgumentError> {
    if width == 0 || height == 0 {
        return Err(ArgumentError::InvalidDimensions { width, height });
    }

    Ok(())
}

fn check_decodable(format: PixelFormat) -> Result<(), ConvertError> {
    if !format.is_decodable() {
        return Err(ConvertError::UnsupportedFormat(format));
    }

    Ok(())
}

fn check_encodable(format: PixelFormat) -> Result<(), ConvertError> {
    if !format.is_encodable() {
        return Err(ConvertError::UnsupportedFormat(format));
    }

    Ok(())
}

/// Size of an I420 buffer, chroma rounded up for odd dimensions
fn canonical_size(width: usize, height: usize) -> Result<usize, ConvertError> {
    CanonicalLayout::new(width, height)
        .checked_len()
        .ok_or(ConvertError::InvalidArgument(ArgumentError::SizeOverflow {
            width,
            height,
        }))
}

fn output_size(
    format: PixelFormat,
    width: usize,
    height: usize,
    dst_size: Option<usize>,
) -> Result<usize, ConvertError> {
    match dst_size {
        Some(0) => Err(ArgumentError::ZeroDestinationSize.into()),
        Some(size) => Ok(size),
        None if format.is_canonical() => canonical_size(width, height),
        None => format.buffer_size(width, height),
    }
}

impl<T: Transform> Transcoder<T> {
    pub fn new(backend: T) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &T {
        &self.backend
    }

    pub fn into_backend(self) -> T {
        self.backend
    }

    /// Encode the I420 buffer `src` of `width` x `height` as `format`
    ///
    /// Reads `options.dst_size`.
    pub fn convert_from_canonical(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        format: PixelFormat,
        options: Options,
    ) -> Result<Vec<u8>, ConvertError> {
        check_encodable(format)?;
        check_dimensions(width, height)?;

        let dst_size = output_size(format, width, height, options.dst_size)?;
        trace!(%format, width, height, dst_size, "I420 to format");

        let mut dst = vec![0u8; dst_size];
        self.backend
            .canonical_to_format(src, width, height, &mut dst, 0, format)?;

        Ok(dst)
    }

    /// Decode `src` of `width` x `height` in `format` to I420
    ///
    /// Reads `options.window` and `options.rotation`. The result has the dimensions of the
    /// window, exchanged if the rotation is 90 or 270 degrees.
    pub fn convert_to_canonical(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        format: PixelFormat,
        options: Options,
    ) -> Result<Vec<u8>, ConvertError> {
        check_decodable(format)?;
        check_dimensions(width, height)?;

        let window = options.window.unwrap_or(Window::full(width, height));
        window.bounds_check(width, height)?;

        let dst_size = canonical_size(window.width, window.height)?;
        trace!(%format, width, height, ?window, rotation = ?options.rotation, dst_size, "format to I420");

        let mut dst = vec![0u8; dst_size];
        self.backend.format_to_canonical(
            src,
            width,
            height,
            &mut dst,
            window,
            options.rotation,
            format,
        )?;

        Ok(dst)
    }

    /// Rotate `src` clockwise
    ///
    /// The output has the rotated dimensions. An I420 output has the size of the I420 input,
    /// chroma rounded up for odd dimensions. For other formats the size is computed for the
    /// rotated dimensions unless `options.dst_size` is given.
    ///
    /// Fails with [`ConvertError::UnsupportedFormat`] for formats that cannot be converted both
    /// to and from I420, the same goes for [`scale`](Self::scale), [`crop`](Self::crop) and
    /// [`mirror`](Self::mirror).
    pub fn rotate(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        rotation: Rotation,
        format: PixelFormat,
        options: Options,
    ) -> Result<Vec<u8>, ConvertError> {
        check_decodable(format)?;
        check_encodable(format)?;
        check_dimensions(width, height)?;

        let (dst_width, dst_height) = rotation.rotated_dimensions(width, height);

        if format.is_canonical() {
            let dst_size = canonical_size(dst_width, dst_height)?;
            trace!(width, height, ?rotation, dst_size, "rotate I420 directly");

            let mut dst = vec![0u8; dst_size];
            self.backend
                .canonical_rotate(src, width, height, &mut dst, rotation)?;

            return Ok(dst);
        }

        let dst_size = output_size(format, dst_width, dst_height, options.dst_size)?;
        trace!(%format, width, height, ?rotation, dst_size, "rotate via I420");

        let canonical = self.convert_to_canonical(
            src,
            width,
            height,
            format,
            Options::new().with_rotation(rotation),
        )?;

        self.convert_from_canonical(
            &canonical,
            dst_width,
            dst_height,
            format,
            Options::new().with_dst_size(dst_size),
        )
    }

    /// Scale `src` to `dst_width` x `dst_height`
    ///
    /// Reads `options.dst_size` for formats other than I420.
    #[allow(clippy::too_many_arguments)]
    pub fn scale(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst_width: usize,
        dst_height: usize,
        filter: FilterMode,
        format: PixelFormat,
        options: Options,
    ) -> Result<Vec<u8>, ConvertError> {
        check_decodable(format)?;
        check_encodable(format)?;
        check_dimensions(width, height)?;
        check_dimensions(dst_width, dst_height)?;

        let scaled_size = canonical_size(dst_width, dst_height)?;

        if format.is_canonical() {
            trace!(width, height, dst_width, dst_height, ?filter, "scale I420 directly");

            let mut dst = vec![0u8; scaled_size];
            self.backend
                .canonical_scale(src, width, height, &mut dst, dst_width, dst_height, filter)?;

            return Ok(dst);
        }

        let dst_size = output_size(format, dst_width, dst_height, options.dst_size)?;
        trace!(%format, width, height, dst_width, dst_height, ?filter, dst_size, "scale via I420");

        let canonical = self.convert_to_canonical(src, width, height, format, Options::new())?;

        let mut scaled = vec![0u8; scaled_size];
        self.backend.canonical_scale(
            &canonical,
            width,
            height,
            &mut scaled,
            dst_width,
            dst_height,
            filter,
        )?;

        self.convert_from_canonical(
            &scaled,
            dst_width,
            dst_height,
            format,
            Options::new().with_dst_size(dst_size),
        )
    }

    /// Cut `window` out of `src`
    ///
    /// Reads `options.dst_size` for formats other than I420.
    pub fn crop(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        window: Window,
        format: PixelFormat,
        options: Options,
    ) -> Result<Vec<u8>, ConvertError> {
        check_decodable(format)?;
        check_encodable(format)?;
        check_dimensions(width, height)?;
        window.bounds_check(width, height)?;

        if format.is_canonical() {
            let dst_size = canonical_size(window.width, window.height)?;
            trace!(width, height, ?window, dst_size, "crop I420 directly");

            let mut dst = vec![0u8; dst_size];
            self.backend
                .canonical_crop(src, width, height, &mut dst, window)?;

            return Ok(dst);
        }

        let dst_size = output_size(format, window.width, window.height, options.dst_size)?;
        trace!(%format, width, height, ?window, dst_size, "crop via I420");

        let canonical = self.convert_to_canonical(
            src,
            width,
            height,
            format,
            Options::new().with_window(window),
        )?;

        self.convert_from_canonical(
            &canonical,
            window.width,
            window.height,
            format,
            Options::new().with_dst_size(dst_size),
        )
    }

    /// Flip `src` horizontally
    ///
    /// Reads `options.dst_size` for formats other than I420.
    pub fn mirror(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        format: PixelFormat,
        options: Options,
    ) -> Result<Vec<u8>, ConvertError> {
        check_decodable(format)?;
        check_encodable(format)?;
        check_dimensions(width, height)?;

        let canonical_len = canonical_size(width, height)?;

        if format.is_canonical() {
            trace!(width, height, dst_size = canonical_len, "mirror I420 directly");

            let mut dst = vec![0u8; canonical_len];
            self.backend.canonical_mirror(src, width, height, &mut dst)?;

            return Ok(dst);
        }

        let dst_size = output_size(format, width, height, options.dst_size)?;
        trace!(%format, width, height, dst_size, "mirror via I420");

        let canonical = self.convert_to_canonical(src, width, height, format, Options::new())?;

        let mut mirrored = vec![0u8; canonical_len];
        self.backend
            .canonical_mirror(&canonical, width, height, &mut mirrored)?;

        self.convert_from_canonical(
            &mirrored,
            width,
            height,
            format,
            Options::new().with_dst_size(dst_size),
        )
    }

    /// Convert an NV21 frame, the default Android camera preview format, to I420
    pub fn nv21_to_canonical(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
    ) -> Result<Vec<u8>, ConvertError> {
        check_dimensions(width, height)?;

        let mut dst = vec![0u8; canonical_size(width, height)?];
        self.backend.nv21_to_canonical(src, width, height, &mut dst)?;

        Ok(dst)
    }

    pub fn canonical_to_nv21(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
    ) -> Result<Vec<u8>, ConvertError> {
        check_dimensions(width, height)?;

        // NV21 holds the same number of bytes as I420
        let mut dst = vec![0u8; canonical_size(width, height)?];
        self.backend.canonical_to_nv21(src, width, height, &mut dst)?;

        Ok(dst)
    }

    /// Convert a camera frame to I420, rotating it in the same pass
    ///
    /// The result has the frame's dimensions, exchanged if the rotation is 90 or 270 degrees.
    pub fn capture_frame_to_canonical(
        &self,
        frame: &dyn CaptureFrame,
        rotation: Rotation,
    ) -> Result<Vec<u8>, ConvertError> {
        let (width, height) = (frame.width(), frame.height());
        check_dimensions(width, height)?;

        let (dst_width, dst_height) = rotation.rotated_dimensions(width, height);
        let dst_size = canonical_size(dst_width, dst_height)?;
        trace!(width, height, ?rotation, dst_size, "capture frame to I420");

        let mut dst = vec![0u8; dst_size];
        self.backend.capture_to_canonical(frame, &mut dst, rotation)?;

        Ok(dst)
    }
}
