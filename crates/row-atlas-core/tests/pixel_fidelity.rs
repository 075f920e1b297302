use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use row_atlas_core::prelude::*;

fn patterned(w: u32, h: u32, seed: u8) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([seed, (x * 7) as u8, (y * 13) as u8, 255 - seed])
    })
}

#[test]
fn every_source_pixel_is_copied_to_its_slot() {
    let a = patterned(5, 9, 10);
    let b = patterned(3, 4, 20);
    let c = patterned(6, 9, 30);

    let mut builder = AtlasBuilder::new();
    builder.add_image("a", DynamicImage::ImageRgba8(a.clone())).expect("add");
    builder.add_image("b", DynamicImage::ImageRgba8(b.clone())).expect("add");
    builder.add_image("c", DynamicImage::ImageRgba8(c.clone())).expect("add");
    builder.generate().expect("generate");
    let atlas = builder.atlas().expect("atlas");

    // order: a (9), c (9, registered later), b (4)
    for (src, x0) in [(&a, 0u32), (&c, 5), (&b, 11)] {
        let (w, h) = src.dimensions();
        for y in 0..h {
            for x in 0..w {
                assert_eq!(atlas.get_pixel(x0 + x, y), src.get_pixel(x, y));
            }
        }
    }
}

#[test]
fn area_below_shorter_images_is_transparent_by_default() {
    let mut builder = AtlasBuilder::new();
    builder.add_image("tall", DynamicImage::ImageRgba8(patterned(2, 8, 1))).expect("add");
    builder.add_image("short", DynamicImage::ImageRgba8(patterned(2, 3, 2))).expect("add");
    builder.generate().expect("generate");
    let atlas = builder.atlas().expect("atlas");

    for y in 3..8 {
        for x in 2..4 {
            assert_eq!(*atlas.get_pixel(x, y), Rgba([0, 0, 0, 0]));
        }
    }
}

#[test]
fn background_color_fills_uncovered_area() {
    let cfg = AtlasConfig::builder()
        .background_color([255, 0, 255, 255])
        .build();
    let mut builder = AtlasBuilder::with_config(cfg).expect("config");
    builder.add_image("tall", DynamicImage::ImageRgba8(patterned(2, 8, 1))).expect("add");
    builder.add_image("short", DynamicImage::ImageRgba8(patterned(2, 3, 2))).expect("add");
    builder.generate().expect("generate");
    let atlas = builder.atlas().expect("atlas");

    assert_eq!(*atlas.get_pixel(3, 7), Rgba([255, 0, 255, 255]));
    assert_eq!(*atlas.get_pixel(3, 2), *patterned(2, 3, 2).get_pixel(1, 2));
}

#[test]
fn grayscale_sources_widen_to_rgba() {
    let gray = GrayImage::from_pixel(4, 4, Luma([90]));
    let mut builder = AtlasBuilder::new();
    builder.add_image("gray", DynamicImage::ImageLuma8(gray)).expect("add");
    builder.generate().expect("generate");
    let atlas = builder.atlas().expect("atlas");
    assert_eq!(atlas.dimensions(), (4, 4));
    assert_eq!(*atlas.get_pixel(3, 3), Rgba([90, 90, 90, 255]));
}

#[test]
fn source_pixels_released_after_generate() {
    let mut builder = AtlasBuilder::new();
    builder.add_image("a", DynamicImage::ImageRgba8(patterned(2, 2, 0))).expect("add");
    assert!(builder.get_by_key("a").and_then(|e| e.bitmap()).is_some());
    builder.generate().expect("generate");
    let entry = builder.get_by_key("a").expect("entry");
    assert!(entry.bitmap().is_none());
    assert_eq!((entry.width(), entry.height()), (2, 2));
    assert_eq!(builder.atlas().map(|a| a.dimensions()), Some((2, 2)));
}
