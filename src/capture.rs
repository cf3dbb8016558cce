/// One plane of a camera frame as handed out by the capture API
#[derive(Debug, Clone, Copy)]
pub struct CapturePlane<'a> {
    pub data: &'a [u8],

    /// Distance in bytes between the start of two rows
    pub row_stride: usize,

    /// Distance in bytes between two samples of the same row.
    ///
    /// 1 for planar chroma, 2 when U and V are interleaved in the same memory (NV12/NV21 style
    /// frames exposed as three planes).
    pub pixel_stride: usize,
}

/// A YUV 4:2:0 frame from a camera, exposed as Y, U and V planes with arbitrary strides
///
/// This is the shape of e.g. an Android `Image` in `YUV_420_888` or a V4L2 multi-planar
/// buffer. Implement it on the platform type and pass it to
/// [`Transcoder::capture_frame_to_canonical`](crate::Transcoder::capture_frame_to_canonical).
pub trait CaptureFrame {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Y, U and V planes, in that order
    fn planes(&self) -> [CapturePlane<'_>; 3];
}

impl<T: CaptureFrame + ?Sized> CaptureFrame for &T {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn planes(&self) -> [CapturePlane<'_>; 3] {
        (**self).planes()
    }
}

/// Basic [`CaptureFrame`] over borrowed plane slices
#[derive(Debug, Clone, Copy)]
pub struct PlanarFrame<'a> {
    pub width: usize,
    pub height: usize,
    pub y: CapturePlane<'a>,
    pub u: CapturePlane<'a>,
    pub v: CapturePlane<'a>,
}

impl<'a> PlanarFrame<'a> {
    /// Frame with tightly packed, non-interleaved planes
    pub fn packed(y: &'a [u8], u: &'a [u8], v: &'a [u8], width: usize, height: usize) -> Self {
        let uv_stride = width.div_ceil(2);

        Self {
            width,
            height,
            y: CapturePlane {
                data: y,
                row_stride: width,
                pixel_stride: 1,
            },
            u: CapturePlane {
                data: u,
                row_stride: uv_stride,
                pixel_stride: 1,
            },
            v: CapturePlane {
                data: v,
                row_stride: uv_stride,
                pixel_stride: 1,
            },
        }
    }
}

impl CaptureFrame for PlanarFrame<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn planes(&self) -> [CapturePlane<'_>; 3] {
        [self.y, self.u, self.v]
    }
}
