//! Pixel type conversion between the binary and 8-bit rasters.

use crate::error::{RappError, RappResult};
use crate::image::{check_disjoint, BinImageView, U8ImageMut, U8ImageView};
use crate::pixel::{pixel_get_bin, pixel_get_u8, pixel_set_u8};

/// Expands a binary image to 8-bit, `0` -> `0x00`, `1` -> `0xFF`.
pub fn convert_bin_to_u8(dst: &mut U8ImageMut, src: &BinImageView) -> RappResult {
    if dst.w != src.w || dst.h != src.h {
        return Err(RappError::BadSize);
    }
    let (dp, dlen) = dst.footprint();
    let (sp, slen) = src.footprint();
    check_disjoint(dp, dlen, sp, slen)?;
    crate::state::check_initialized()?;

    for y in 0..dst.h {
        let off = src.off as usize;
        let srow = src.row(y).to_vec();
        let w = dst.w;
        let drow = dst.row_mut(y);
        for x in 0..w {
            let v = pixel_get_bin(&srow, off + x);
            pixel_set_u8(drow, x, if v != 0 { 0xFF } else { 0x00 });
        }
    }
    Ok(())
}

/// Reduces an 8-bit image to binary, non-zero maps to `1`. This is the
/// inverse companion of [`convert_bin_to_u8`]; unlike [`crate::thresh`]
/// it has no configurable cut point.
pub fn convert_u8_to_bin(dst: &mut crate::image::BinImageMut, src: &U8ImageView) -> RappResult {
    if dst.w != src.w || dst.h != src.h {
        return Err(RappError::BadSize);
    }
    let (dp, dlen) = dst.footprint();
    let (sp, slen) = src.footprint();
    check_disjoint(dp, dlen, sp, slen)?;
    crate::state::check_initialized()?;

    for y in 0..dst.h {
        let w = dst.w;
        let off = dst.off as usize;
        let srow = src.row(y).to_vec();
        let drow = dst.row_mut(y);
        for x in 0..w {
            let v = pixel_get_u8(&srow, x);
            crate::pixel::pixel_set_bin(drow, off + x, (v != 0) as u8);
        }
    }
    Ok(())
}
