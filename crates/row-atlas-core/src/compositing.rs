use image::{ColorType, DynamicImage, GenericImageView, RgbaImage};

use crate::error::{AtlasError, Result};

/// Checks that `img` can be copied into an RGBA8 atlas without loss.
///
/// Only 8-bit-per-channel layouts are accepted; they widen to RGBA8 exactly.
/// Zero-sized images are rejected since they cannot be addressed in UV space.
pub fn check_compatible(key: &str, img: &DynamicImage) -> Result<()> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(AtlasError::IncompatibleImage {
            key: key.to_string(),
            reason: format!("zero-sized image ({}x{})", w, h),
        });
    }
    match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => Ok(()),
        other => Err(AtlasError::IncompatibleImage {
            key: key.to_string(),
            reason: format!("unsupported pixel format {:?}; expected 8-bit channels", other),
        }),
    }
}

/// Copy all of `src` into `canvas` with its top-left at (dx, dy).
///
/// Pixels that would land outside the canvas are skipped.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    for yy in 0..sh {
        let ty = dy + yy;
        if ty >= ch {
            break;
        }
        for xx in 0..sw {
            let tx = dx + xx;
            if tx >= cw {
                break;
            }
            canvas.put_pixel(tx, ty, *src.get_pixel(xx, yy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn blit_copies_and_clips() {
        let src = RgbaImage::from_pixel(4, 4, Rgba([9, 8, 7, 255]));
        let mut canvas = RgbaImage::new(6, 3);
        blit_rgba(&src, &mut canvas, 3, 0);
        assert_eq!(*canvas.get_pixel(2, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*canvas.get_pixel(3, 0), Rgba([9, 8, 7, 255]));
        assert_eq!(*canvas.get_pixel(5, 2), Rgba([9, 8, 7, 255]));
    }

    #[test]
    fn sixteen_bit_is_incompatible() {
        let img: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::new(2, 2);
        let dynimg = DynamicImage::ImageRgba16(img);
        assert!(check_compatible("hdr", &dynimg).is_err());
    }

    #[test]
    fn gray_and_rgb_are_compatible() {
        assert!(check_compatible("g", &DynamicImage::new_luma8(2, 2)).is_ok());
        assert!(check_compatible("rgb", &DynamicImage::new_rgb8(2, 2)).is_ok());
    }
}
