//! Plane arithmetic of the canonical I420 layout
//!
//! An I420 buffer is a Y plane of `width * height` bytes followed by a U and a V plane, each
//! holding one sample per 2x2 block of luma. Chroma dimensions are rounded up, matching the
//! native routines, which write `(width + 1) / 2` samples per chroma row.

use crate::TransformError;

/// Offsets and strides of a packed I420 buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalLayout {
    pub width: usize,
    pub height: usize,
}

impl CanonicalLayout {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn y_stride(&self) -> usize {
        self.width
    }

    pub fn uv_stride(&self) -> usize {
        self.width.div_ceil(2)
    }

    pub fn uv_height(&self) -> usize {
        self.height.div_ceil(2)
    }

    /// Saturates at `usize::MAX`
    pub fn y_len(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    pub fn uv_len(&self) -> usize {
        self.uv_stride().saturating_mul(self.uv_height())
    }

    /// Number of bytes the native routines touch for this layout
    ///
    /// Equal to `width * height * 3 / 2` for even dimensions.
    pub fn len(&self) -> usize {
        self.y_len().saturating_add(self.uv_len().saturating_mul(2))
    }

    /// [`len`](Self::len), or `None` if it does not fit in `usize`
    pub fn checked_len(&self) -> Option<usize> {
        let y = self.width.checked_mul(self.height)?;
        let uv = self.uv_stride().checked_mul(self.uv_height())?;

        y.checked_add(uv.checked_mul(2)?)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ensure `buf` can hold this layout
    pub(crate) fn check(&self, buffer: &'static str, got: usize) -> Result<(), TransformError> {
        let minimum = self.len();

        if got < minimum {
            return Err(TransformError::BufferTooSmall {
                buffer,
                minimum,
                got,
            });
        }

        Ok(())
    }

    /// Split `buf` into its Y, U and V planes
    ///
    /// # Panics
    ///
    /// If `buf` is too small for the layout
    pub fn split<'a>(&self, buf: &'a [u8]) -> [&'a [u8]; 3] {
        let (y, rem) = buf.split_at(self.y_len());
        let (u, rem) = rem.split_at(self.uv_len());
        let (v, _) = rem.split_at(self.uv_len());

        [y, u, v]
    }

    /// Split `buf` into its mutable Y, U and V planes
    ///
    /// # Panics
    ///
    /// If `buf` is too small for the layout
    pub fn split_mut<'a>(&self, buf: &'a mut [u8]) -> [&'a mut [u8]; 3] {
        let (y, rem) = buf.split_at_mut(self.y_len());
        let (u, rem) = rem.split_at_mut(self.uv_len());
        let (v, _) = rem.split_at_mut(self.uv_len());

        [y, u, v]
    }
}
