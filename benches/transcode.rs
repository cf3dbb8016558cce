use criterion::{Criterion, criterion_group, criterion_main};
use ezk_yuv::{FilterMode, Options, PixelFormat, Rotation, Transcoder};
use std::hint::black_box;

const IMAGE_DIM_LO: (usize, usize) = (1280, 720);
const IMAGE_DIM_HI: (usize, usize) = (1920, 1080);

fn buffer(format: PixelFormat, (width, height): (usize, usize)) -> Vec<u8> {
    black_box(vec![0u8; format.buffer_size(width, height).unwrap()])
}

fn bench_format(c: &mut Criterion, format: PixelFormat) {
    let t = Transcoder::libyuv();
    let (width, height) = IMAGE_DIM_HI;

    let i420 = buffer(PixelFormat::I420, IMAGE_DIM_HI);
    let src = buffer(format, IMAGE_DIM_HI);

    c.bench_function(&format!("I420 to {format}"), |b| {
        b.iter(|| {
            t.convert_from_canonical(&i420, width, height, format, Options::new())
                .unwrap()
        })
    });

    c.bench_function(&format!("{format} to I420"), |b| {
        b.iter(|| {
            t.convert_to_canonical(&src, width, height, format, Options::new())
                .unwrap()
        })
    });

    c.bench_function(&format!("{format} rotate 90"), |b| {
        b.iter(|| {
            t.rotate(
                &src,
                width,
                height,
                Rotation::Rotate90,
                format,
                Options::new(),
            )
            .unwrap()
        })
    });

    c.bench_function(&format!("{format} downscale"), |b| {
        b.iter(|| {
            t.scale(
                &src,
                width,
                height,
                IMAGE_DIM_LO.0,
                IMAGE_DIM_LO.1,
                FilterMode::Bilinear,
                format,
                Options::new(),
            )
            .unwrap()
        })
    });

    c.bench_function(&format!("{format} mirror"), |b| {
        b.iter(|| t.mirror(&src, width, height, format, Options::new()).unwrap())
    });
}

fn transcode(c: &mut Criterion) {
    bench_format(c, PixelFormat::I420);
    bench_format(c, PixelFormat::NV12);
    bench_format(c, PixelFormat::YUY2);
    bench_format(c, PixelFormat::ARGB);
    bench_format(c, PixelFormat::RGB24);
}

criterion_group!(img, transcode);
criterion_main!(img);
