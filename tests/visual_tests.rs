#![cfg(feature = "libyuv")]

use ezk_yuv::{FilterMode, Options, PixelFormat, Rotation, Transcoder, Window};
use image::{Rgb, Rgba};
use std::path::PathBuf;

fn output(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name)
}

fn make_i420_image() -> (Vec<u8>, usize, usize) {
    let width = 1280;
    let height = 720;

    let mut out = Vec::with_capacity(PixelFormat::I420.buffer_size(width, height).unwrap());

    for y in 0..height {
        for x in 0..width {
            out.push((16 + (x + y) * 219 / (width + height)) as u8);
        }
    }

    // U rises from left to right, V from top to bottom
    for _ in 0..height / 2 {
        for x in 0..width / 2 {
            out.push((16 + x * 224 / (width / 2)) as u8);
        }
    }

    for y in 0..height / 2 {
        for _ in 0..width / 2 {
            out.push((16 + y * 224 / (height / 2)) as u8);
        }
    }

    (out, width, height)
}

fn save_rgba(abgr: Vec<u8>, width: usize, height: usize, name: &str) {
    // libyuv's ABGR is R G B A in memory
    let buffer =
        image::ImageBuffer::<Rgba<u8>, Vec<u8>>::from_vec(width as _, height as _, abgr).unwrap();

    buffer.save(output(name)).unwrap();
}

#[test]
fn i420_to_rgba() {
    let (i420, width, height) = make_i420_image();
    let t = Transcoder::libyuv();

    let abgr = t
        .convert_from_canonical(&i420, width, height, PixelFormat::ABGR, Options::new())
        .unwrap();

    save_rgba(abgr, width, height, "I420_TO_RGBA.png");
}

#[test]
fn i420_to_rgb() {
    let (i420, width, height) = make_i420_image();
    let t = Transcoder::libyuv();

    let raw = t
        .convert_from_canonical(&i420, width, height, PixelFormat::RAW, Options::new())
        .unwrap();

    let buffer =
        image::ImageBuffer::<Rgb<u8>, Vec<u8>>::from_vec(width as _, height as _, raw).unwrap();

    buffer.save(output("I420_TO_RGB.png")).unwrap();
}

#[test]
fn rgba_rotate_90() {
    let (i420, width, height) = make_i420_image();
    let t = Transcoder::libyuv();

    let abgr = t
        .convert_from_canonical(&i420, width, height, PixelFormat::ABGR, Options::new())
        .unwrap();

    let rotated = t
        .rotate(
            &abgr,
            width,
            height,
            Rotation::Rotate90,
            PixelFormat::ABGR,
            Options::new(),
        )
        .unwrap();

    save_rgba(rotated, height, width, "RGBA_ROTATE_90.png");
}

#[test]
fn i420_scale_then_rgba() {
    let (i420, width, height) = make_i420_image();
    let t = Transcoder::libyuv();

    let (dst_width, dst_height) = (400, 400);

    let scaled = t
        .scale(
            &i420,
            width,
            height,
            dst_width,
            dst_height,
            FilterMode::Box,
            PixelFormat::I420,
            Options::new(),
        )
        .unwrap();

    let abgr = t
        .convert_from_canonical(
            &scaled,
            dst_width,
            dst_height,
            PixelFormat::ABGR,
            Options::new(),
        )
        .unwrap();

    save_rgba(abgr, dst_width, dst_height, "I420_SCALE_RGBA.png");
}

#[test]
fn rgba_window_mirrored() {
    let (i420, width, height) = make_i420_image();
    let t = Transcoder::libyuv();

    let abgr = t
        .convert_from_canonical(&i420, width, height, PixelFormat::ABGR, Options::new())
        .unwrap();

    let window = Window::new(100, 200, 640, 360);

    let cropped = t
        .crop(
            &abgr,
            width,
            height,
            window,
            PixelFormat::ABGR,
            Options::new(),
        )
        .unwrap();

    let mirrored = t
        .mirror(
            &cropped,
            window.width,
            window.height,
            PixelFormat::ABGR,
            Options::new(),
        )
        .unwrap();

    save_rgba(mirrored, window.width, window.height, "RGBA_WINDOW_MIRROR.png");
}
