//! [`Transform`] implementation backed by libyuv
//!
//! Every slice is checked against the number of bytes libyuv is going to touch before its
//! pointer is handed over, so no call can read or write outside of the given buffers.

use crate::{
    CanonicalLayout, CaptureFrame, CapturePlane, FilterMode, PixelFormat, Rotation, Transform,
    TransformError, Window,
};
use std::{ffi::c_int, sync::OnceLock};
use tracing::debug;

/// Stateless handle to libyuv's conversion routines
#[derive(Debug)]
pub struct LibYuv {
    _priv: (),
}

impl LibYuv {
    /// Process wide instance, initialized on first use and never torn down
    pub fn shared() -> &'static LibYuv {
        static SHARED: OnceLock<LibYuv> = OnceLock::new();

        SHARED.get_or_init(|| {
            debug!("initialized libyuv transform backend");

            LibYuv { _priv: () }
        })
    }
}

fn int(v: usize) -> Result<c_int, TransformError> {
    c_int::try_from(v).map_err(|_| TransformError::DimensionOverflow(v))
}

fn check_code(operation: &'static str, code: c_int) -> Result<(), TransformError> {
    if code == 0 {
        return Ok(());
    }

    debug!(operation, code, "libyuv call failed");

    Err(TransformError::Failed { operation, code })
}

fn check_len(buffer: &'static str, minimum: usize, got: usize) -> Result<(), TransformError> {
    if got < minimum {
        return Err(TransformError::BufferTooSmall {
            buffer,
            minimum,
            got,
        });
    }

    Ok(())
}

fn check_window(window: Window, width: usize, height: usize) -> Result<(), TransformError> {
    let right = window.x.checked_add(window.width);
    let bottom = window.y.checked_add(window.height);

    match (right, bottom) {
        (Some(right), Some(bottom)) if right <= width && bottom <= height => Ok(()),
        _ => Err(TransformError::WindowOutOfBounds {
            window,
            width,
            height,
        }),
    }
}

/// Bytes of a capture plane read for `cols` x `rows` samples
fn capture_plane_len(plane: &CapturePlane<'_>, cols: usize, rows: usize) -> usize {
    if cols == 0 || rows == 0 {
        return 0;
    }

    plane
        .row_stride
        .saturating_mul(rows - 1)
        .saturating_add(plane.pixel_stride.saturating_mul(cols - 1))
        .saturating_add(1)
}

/// Length of a row for formats stored in a single interleaved plane
fn packed_row_len(format: PixelFormat, width: usize) -> Option<usize> {
    use PixelFormat::*;

    match format {
        YUY2 | UYVY => Some(width.div_ceil(2).saturating_mul(4)),
        RGBP | RGBO | R444 => Some(width.saturating_mul(2)),
        RGB24 | RAW => Some(width.saturating_mul(3)),
        ARGB | BGRA | ABGR | RGBA | AR30 => Some(width.saturating_mul(4)),
        I400 | NV12 | NV21 | I420 | YV12 | I422 | YV16 | I444 | YV24 | MJPG => None,
    }
}

/// Bytes libyuv reads or writes for an image in `format`, rounding chroma dimensions up
fn native_len(format: PixelFormat, width: usize, height: usize) -> usize {
    use PixelFormat::*;

    if let Some(row) = packed_row_len(format, width) {
        return row.saturating_mul(height);
    }

    let luma = width.saturating_mul(height);
    let half_width = width.div_ceil(2);

    match format {
        I400 => luma,
        NV12 | NV21 | I420 | YV12 => CanonicalLayout::new(width, height).len(),
        I422 | YV16 => luma.saturating_add(half_width.saturating_mul(height).saturating_mul(2)),
        I444 | YV24 => luma.saturating_mul(3),
        // Compressed, libyuv validates the sample size itself
        MJPG => 0,
        _ => unreachable!("packed formats handled above"),
    }
}

#[allow(clippy::too_many_arguments)]
impl Transform for LibYuv {
    fn capture_to_canonical(
        &self,
        frame: &dyn CaptureFrame,
        dst: &mut [u8],
        rotation: Rotation,
    ) -> Result<(), TransformError> {
        let (width, height) = (frame.width(), frame.height());
        let [y, u, v] = frame.planes();

        if y.row_stride < width {
            return Err(TransformError::InvalidStride {
                buffer: "capture Y plane",
                minimum: width,
                got: y.row_stride,
            });
        }

        let (uv_width, uv_height) = (width.div_ceil(2), height.div_ceil(2));

        if u.pixel_stride != v.pixel_stride {
            return Err(TransformError::InvalidStride {
                buffer: "capture V plane",
                minimum: u.pixel_stride,
                got: v.pixel_stride,
            });
        }

        for (buffer, plane) in [("capture U plane", &u), ("capture V plane", &v)] {
            let minimum = uv_width
                .saturating_sub(1)
                .saturating_mul(plane.pixel_stride)
                .saturating_add(1);

            if plane.pixel_stride == 0 || plane.row_stride < minimum {
                return Err(TransformError::InvalidStride {
                    buffer,
                    minimum,
                    got: plane.row_stride,
                });
            }
        }

        let y_plane = CapturePlane {
            pixel_stride: 1,
            ..y
        };

        check_len(
            "capture Y plane",
            capture_plane_len(&y_plane, width, height),
            y.data.len(),
        )?;
        check_len(
            "capture U plane",
            capture_plane_len(&u, uv_width, uv_height),
            u.data.len(),
        )?;
        check_len(
            "capture V plane",
            capture_plane_len(&v, uv_width, uv_height),
            v.data.len(),
        )?;

        let (dst_width, dst_height) = rotation.rotated_dimensions(width, height);
        let layout = CanonicalLayout::new(dst_width, dst_height);
        layout.check("destination", dst.len())?;
        let [dst_y, dst_u, dst_v] = layout.split_mut(dst);

        let code = unsafe {
            yuv_sys::rs_Android420ToI420Rotate(
                y.data.as_ptr(),
                int(y.row_stride)?,
                u.data.as_ptr(),
                int(u.row_stride)?,
                v.data.as_ptr(),
                int(v.row_stride)?,
                int(u.pixel_stride)?,
                dst_y.as_mut_ptr(),
                int(layout.y_stride())?,
                dst_u.as_mut_ptr(),
                int(layout.uv_stride())?,
                dst_v.as_mut_ptr(),
                int(layout.uv_stride())?,
                int(width)?,
                int(height)?,
                rotation.degrees() as _,
            )
        };

        check_code("Android420ToI420Rotate", code)
    }

    fn nv21_to_canonical(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
    ) -> Result<(), TransformError> {
        let layout = CanonicalLayout::new(width, height);
        layout.check("source", src.len())?;
        layout.check("destination", dst.len())?;

        // NV21 has the same size as I420, the chroma samples just live in one plane
        let (src_y, src_vu) = src.split_at(layout.y_len());
        let [dst_y, dst_u, dst_v] = layout.split_mut(dst);

        let code = unsafe {
            yuv_sys::rs_NV21ToI420(
                src_y.as_ptr(),
                int(layout.y_stride())?,
                src_vu.as_ptr(),
                int(layout.uv_stride() * 2)?,
                dst_y.as_mut_ptr(),
                int(layout.y_stride())?,
                dst_u.as_mut_ptr(),
                int(layout.uv_stride())?,
                dst_v.as_mut_ptr(),
                int(layout.uv_stride())?,
                int(width)?,
                int(height)?,
            )
        };

        check_code("NV21ToI420", code)
    }

    fn canonical_to_nv21(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
    ) -> Result<(), TransformError> {
        let layout = CanonicalLayout::new(width, height);
        layout.check("source", src.len())?;
        layout.check("destination", dst.len())?;

        let [src_y, src_u, src_v] = layout.split(src);
        let (dst_y, dst_vu) = dst.split_at_mut(layout.y_len());

        let code = unsafe {
            yuv_sys::rs_I420ToNV21(
                src_y.as_ptr(),
                int(layout.y_stride())?,
                src_u.as_ptr(),
                int(layout.uv_stride())?,
                src_v.as_ptr(),
                int(layout.uv_stride())?,
                dst_y.as_mut_ptr(),
                int(layout.y_stride())?,
                dst_vu.as_mut_ptr(),
                int(layout.uv_stride() * 2)?,
                int(width)?,
                int(height)?,
            )
        };

        check_code("I420ToNV21", code)
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
        check_window(window, width, height)?;
        check_len("source", native_len(format, width, height), src.len())?;

        let (dst_width, dst_height) = rotation.rotated_dimensions(window.width, window.height);
        let layout = CanonicalLayout::new(dst_width, dst_height);
        layout.check("destination", dst.len())?;
        let [dst_y, dst_u, dst_v] = layout.split_mut(dst);

        let code = unsafe {
            yuv_sys::rs_ConvertToI420(
                src.as_ptr(),
                src.len(),
                dst_y.as_mut_ptr(),
                int(layout.y_stride())?,
                dst_u.as_mut_ptr(),
                int(layout.uv_stride())?,
                dst_v.as_mut_ptr(),
                int(layout.uv_stride())?,
                int(window.x)?,
                int(window.y)?,
                int(width)?,
                int(height)?,
                int(window.width)?,
                int(window.height)?,
                rotation.degrees() as _,
                format.code(),
            )
        };

        check_code("ConvertToI420", code)
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
        let layout = CanonicalLayout::new(width, height);
        layout.check("source", src.len())?;

        let minimum = if dst_stride == 0 {
            native_len(format, width, height)
        } else if let Some(row) = packed_row_len(format, width) {
            if dst_stride < row {
                return Err(TransformError::InvalidStride {
                    buffer: "destination",
                    minimum: row,
                    got: dst_stride,
                });
            }

            dst_stride.saturating_mul(height.saturating_sub(1)).saturating_add(row)
        } else {
            // Planar formats place their planes using the stride in place of the width
            if dst_stride < width {
                return Err(TransformError::InvalidStride {
                    buffer: "destination",
                    minimum: width,
                    got: dst_stride,
                });
            }

            native_len(format, dst_stride, height)
        };

        check_len("destination", minimum, dst.len())?;

        let [src_y, src_u, src_v] = layout.split(src);

        let code = unsafe {
            yuv_sys::rs_ConvertFromI420(
                src_y.as_ptr(),
                int(layout.y_stride())?,
                src_u.as_ptr(),
                int(layout.uv_stride())?,
                src_v.as_ptr(),
                int(layout.uv_stride())?,
                dst.as_mut_ptr(),
                int(dst_stride)?,
                int(width)?,
                int(height)?,
                format.code(),
            )
        };

        check_code("ConvertFromI420", code)
    }

    fn canonical_rotate(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        rotation: Rotation,
    ) -> Result<(), TransformError> {
        let src_layout = CanonicalLayout::new(width, height);
        src_layout.check("source", src.len())?;

        let (dst_width, dst_height) = rotation.rotated_dimensions(width, height);
        let dst_layout = CanonicalLayout::new(dst_width, dst_height);
        dst_layout.check("destination", dst.len())?;

        let [src_y, src_u, src_v] = src_layout.split(src);
        let [dst_y, dst_u, dst_v] = dst_layout.split_mut(dst);

        let code = unsafe {
            yuv_sys::rs_I420Rotate(
                src_y.as_ptr(),
                int(src_layout.y_stride())?,
                src_u.as_ptr(),
                int(src_layout.uv_stride())?,
                src_v.as_ptr(),
                int(src_layout.uv_stride())?,
                dst_y.as_mut_ptr(),
                int(dst_layout.y_stride())?,
                dst_u.as_mut_ptr(),
                int(dst_layout.uv_stride())?,
                dst_v.as_mut_ptr(),
                int(dst_layout.uv_stride())?,
                int(width)?,
                int(height)?,
                rotation.degrees() as _,
            )
        };

        check_code("I420Rotate", code)
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
        let src_layout = CanonicalLayout::new(width, height);
        src_layout.check("source", src.len())?;

        let dst_layout = CanonicalLayout::new(dst_width, dst_height);
        dst_layout.check("destination", dst.len())?;

        let [src_y, src_u, src_v] = src_layout.split(src);
        let [dst_y, dst_u, dst_v] = dst_layout.split_mut(dst);

        let code = unsafe {
            yuv_sys::rs_I420Scale(
                src_y.as_ptr(),
                int(src_layout.y_stride())?,
                src_u.as_ptr(),
                int(src_layout.uv_stride())?,
                src_v.as_ptr(),
                int(src_layout.uv_stride())?,
                int(width)?,
                int(height)?,
                dst_y.as_mut_ptr(),
                int(dst_layout.y_stride())?,
                dst_u.as_mut_ptr(),
                int(dst_layout.uv_stride())?,
                dst_v.as_mut_ptr(),
                int(dst_layout.uv_stride())?,
                int(dst_width)?,
                int(dst_height)?,
                filter.value() as _,
            )
        };

        check_code("I420Scale", code)
    }

    fn canonical_crop(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
        window: Window,
    ) -> Result<(), TransformError> {
        check_window(window, width, height)?;

        let src_layout = CanonicalLayout::new(width, height);
        src_layout.check("source", src.len())?;

        let dst_layout = CanonicalLayout::new(window.width, window.height);
        dst_layout.check("destination", dst.len())?;

        let [dst_y, dst_u, dst_v] = dst_layout.split_mut(dst);

        let code = unsafe {
            yuv_sys::rs_ConvertToI420(
                src.as_ptr(),
                src_layout.len(),
                dst_y.as_mut_ptr(),
                int(dst_layout.y_stride())?,
                dst_u.as_mut_ptr(),
                int(dst_layout.uv_stride())?,
                dst_v.as_mut_ptr(),
                int(dst_layout.uv_stride())?,
                int(window.x)?,
                int(window.y)?,
                int(width)?,
                int(height)?,
                int(window.width)?,
                int(window.height)?,
                Rotation::Rotate0.degrees() as _,
                PixelFormat::I420.code(),
            )
        };

        check_code("ConvertToI420", code)
    }

    fn canonical_mirror(
        &self,
        src: &[u8],
        width: usize,
        height: usize,
        dst: &mut [u8],
    ) -> Result<(), TransformError> {
        let layout = CanonicalLayout::new(width, height);
        layout.check("source", src.len())?;
        layout.check("destination", dst.len())?;

        let [src_y, src_u, src_v] = layout.split(src);
        let [dst_y, dst_u, dst_v] = layout.split_mut(dst);

        let code = unsafe {
            yuv_sys::rs_I420Mirror(
                src_y.as_ptr(),
                int(layout.y_stride())?,
                src_u.as_ptr(),
                int(layout.uv_stride())?,
                src_v.as_ptr(),
                int(layout.uv_stride())?,
                dst_y.as_mut_ptr(),
                int(layout.y_stride())?,
                dst_u.as_mut_ptr(),
                int(layout.uv_stride())?,
                dst_v.as_mut_ptr(),
                int(layout.uv_stride())?,
                int(width)?,
                int(height)?,
            )
        };

        check_code("I420Mirror", code)
    }
}
