//! Border padding for the processing region around an image.
//!
//! Every kernel is allowed to read a full vector past the last valid
//! column or row, and morphology additionally needs an explicit border
//! of known value before erosion/dilation. These three functions per
//! pixel type are the caller-facing way to establish that border
//! before handing an image to a kernel that reads beyond `[0,w)×[0,h)`.

use crate::error::{RappError, RappResult};
use crate::image::{BinImageMut, U8ImageMut};
use crate::pixel::pixel_set_bin;

/// Fills only the alignment-driven extension of each row (the pixels
/// outside `[0,w)` but inside the row's allocated byte range) with
/// `value`. The bare minimum needed to make a trailing vector read
/// safe without touching real border semantics.
pub fn pad_align_u8(img: &mut U8ImageMut, value: u8) -> RappResult {
    crate::state::check_initialized()?;
    for y in 0..img.h {
        let dim = img.dim;
        let w = img.w;
        let row = img.row_mut(y);
        for b in row.iter_mut().take(dim).skip(w) {
            *b = value;
        }
    }
    Ok(())
}

pub fn pad_align_bin(img: &mut BinImageMut, value: u8) -> RappResult {
    crate::state::check_initialized()?;
    let w = img.w;
    let off = img.off as usize;
    for y in 0..img.h {
        let dim = img.dim;
        let row = img.row_mut(y);
        for x in w..(dim * 8 - off) {
            pixel_set_bin(row, off + x, value);
        }
    }
    Ok(())
}

/// Fills a border of `n` pixels on every side of the image with a
/// constant `value`. Negative-coordinate and past-edge writes land in
/// the processing region, not in the caller's `[0,w)×[0,h)` rectangle.
///
/// # Safety
/// `img`'s underlying buffer must actually extend `n` pixels (rounded
/// up to `ALIGN` on the row-start side) in every direction; callers
/// typically size their allocation with this padding in mind before
/// ever constructing the view.
pub unsafe fn pad_const_u8(
    base: *mut u8,
    dim: usize,
    w: usize,
    h: usize,
    n: usize,
    value: u8,
) -> RappResult {
    if n == 0 {
        return Ok(());
    }
    if n > dim {
        return Err(RappError::BadParameter);
    }
    crate::state::check_initialized()?;
    for y in 0..h {
        let row = base.add(y * dim);
        std::ptr::write_bytes(row.sub(n), value, n);
        std::ptr::write_bytes(row.add(w), value, n.min(dim - w));
    }
    for y in 1..=n {
        std::ptr::write_bytes(base.sub(y * dim).sub(n), value, dim + 2 * n);
        std::ptr::write_bytes(base.add((h - 1 + y) * dim).sub(n), value, dim + 2 * n);
    }
    Ok(())
}

/// Binary counterpart of [`pad_const_u8`]: pads `n` *bits* on the left
/// and right, `n` rows above and below, all set to `value` (0 or 1).
///
/// # Safety
/// Same contract as [`pad_const_u8`], in bits rather than bytes for
/// the horizontal direction.
pub unsafe fn pad_const_bin(
    base: *mut u8,
    dim: usize,
    off: u32,
    w: usize,
    h: usize,
    n: usize,
    value: u8,
) -> RappResult {
    crate::state::check_initialized()?;
    let total_bits = dim * 8;
    for y in 0..h as isize {
        let row = base.offset(y * dim as isize);
        let row_slice = std::slice::from_raw_parts_mut(row, dim);
        for i in 1..=n {
            if (off as usize) >= i {
                pixel_set_bin(row_slice, off as usize - i, value);
            }
            pixel_set_bin(row_slice, off as usize + w - 1 + i, value);
        }
    }
    for y in 1..=n as isize {
        for side in [-(y), h as isize - 1 + y] {
            let row = base.offset(side * dim as isize);
            let row_slice = std::slice::from_raw_parts_mut(row, dim);
            for x in 0..total_bits {
                pixel_set_bin(row_slice, x, value);
            }
        }
    }
    Ok(())
}

/// Fills a border of `n` pixels on every side with the clamped edge
/// value of the image (nearest valid row/column).
///
/// # Safety
/// Same buffer-extent contract as [`pad_const_u8`].
pub unsafe fn pad_clamp_u8(
    base: *mut u8,
    dim: usize,
    w: usize,
    h: usize,
    n: usize,
) -> RappResult {
    if n == 0 {
        return Ok(());
    }
    crate::state::check_initialized()?;
    for y in 0..h {
        let row = base.add(y * dim);
        let left = *row;
        let right = *row.add(w - 1);
        std::ptr::write_bytes(row.sub(n), left, n);
        std::ptr::write_bytes(row.add(w), right, n.min(dim - w));
    }
    for y in 1..=n {
        let top = base;
        let bottom = base.add((h - 1) * dim);
        std::ptr::copy_nonoverlapping(top.sub(n), base.sub(y * dim).sub(n), dim + 2 * n);
        std::ptr::copy_nonoverlapping(
            bottom.sub(n),
            base.add((h - 1 + y) * dim).sub(n),
            dim + 2 * n,
        );
    }
    Ok(())
}
