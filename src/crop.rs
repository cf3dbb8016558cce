use crate::ArgumentError;

/// Rect used to mark the "cropping" window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Window {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Window covering an entire image of the given dimensions
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_full(&self, width: usize, height: usize) -> bool {
        *self == Self::full(width, height)
    }

    /// Ensure the window is non-empty and lies inside an image of the given dimensions
    pub(crate) fn bounds_check(&self, width: usize, height: usize) -> Result<(), ArgumentError> {
        let out_of_bounds = || ArgumentError::WindowOutOfBounds {
            window: *self,
            width,
            height,
        };

        if self.width == 0 || self.height == 0 {
            return Err(out_of_bounds());
        }

        let right = self.x.checked_add(self.width).ok_or_else(out_of_bounds)?;
        let bottom = self.y.checked_add(self.height).ok_or_else(out_of_bounds)?;

        if (right > width) || (bottom > height) {
            return Err(out_of_bounds());
        }

        Ok(())
    }
}
