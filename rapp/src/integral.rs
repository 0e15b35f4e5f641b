//! Summed-area table construction: `dst[x,y] = Σ_{i<=x,j<=y} src[i,j]`.
//!
//! The destination carries one extra padding row above and one extra
//! padding column to the left (both caller-cleared to zero) so the
//! recurrence `dst[x,y] = src[x,y] + dst[x-1,y] + dst[x,y-1] -
//! dst[x-1,y-1]` never needs a boundary special case.

use crate::error::{RappError, RappResult};
use crate::image::U8ImageView;
use crate::pixel::{pixel_get_bin, pixel_get_u8};

/// Writes the summed-area table of `src` into `dst`. `dst` must be
/// `(w+1) x (h+1)` relative to `src`'s `w x h`, with row 0 and column 0
/// pre-cleared by the caller (the padding border); this function only
/// ever reads `dst[x-1,*]`/`dst[*,y-1]` through that border, never
/// writes it.
pub fn integral_sum_u8_u32(
    dst_border: &mut [u32],
    dst_dim_elems: usize,
    src: &U8ImageView,
) -> RappResult {
    integral_generic(dst_border, dst_dim_elems, src.w, src.h, |x, y| {
        pixel_get_u8(src.row(y), x) as u64
    })
}

pub fn integral_sum_u8_u16(
    dst_border: &mut [u16],
    dst_dim_elems: usize,
    src: &U8ImageView,
) -> RappResult {
    integral_generic_u16(dst_border, dst_dim_elems, src.w, src.h, |x, y| {
        pixel_get_u8(src.row(y), x) as u64
    })
}

pub fn integral_sum_bin_u32(
    dst_border: &mut [u32],
    dst_dim_elems: usize,
    src: &crate::image::BinImageView,
) -> RappResult {
    let off = src.off as usize;
    integral_generic(dst_border, dst_dim_elems, src.w, src.h, |x, y| {
        let row = src.row(y).to_vec();
        pixel_get_bin(&row, off + x) as u64
    })
}

pub fn integral_sum_bin_u16(
    dst_border: &mut [u16],
    dst_dim_elems: usize,
    src: &crate::image::BinImageView,
) -> RappResult {
    let off = src.off as usize;
    integral_generic_u16(dst_border, dst_dim_elems, src.w, src.h, |x, y| {
        let row = src.row(y).to_vec();
        pixel_get_bin(&row, off + x) as u64
    })
}

pub fn integral_sum_bin_u8(
    dst_border: &mut [u8],
    dst_dim_elems: usize,
    src: &crate::image::BinImageView,
) -> RappResult {
    let off = src.off as usize;
    integral_generic_u8(dst_border, dst_dim_elems, src.w, src.h, |x, y| {
        let row = src.row(y).to_vec();
        pixel_get_bin(&row, off + x) as u64
    })
}

/// Shared recurrence, generic over the element width via a `u64`
/// accumulator; callers choose the destination's numeric type (`u16`
/// vs `u32`) based on how large `w*h*255` can get without overflow.
fn integral_generic(
    dst_border: &mut [u32],
    dim: usize,
    w: usize,
    h: usize,
    src_at: impl Fn(usize, usize) -> u64,
) -> RappResult {
    if dim < w + 1 || dst_border.len() < dim * (h + 1) {
        return Err(RappError::BadSize);
    }
    crate::state::check_initialized()?;
    for y in 0..h {
        for x in 0..w {
            let above = dst_border[(y) * dim + (x + 1)] as u64;
            let left = dst_border[(y + 1) * dim + x] as u64;
            let diag = dst_border[y * dim + x] as u64;
            let v = src_at(x, y) + left + above - diag;
            dst_border[(y + 1) * dim + (x + 1)] = v as u32;
        }
    }
    Ok(())
}

fn integral_generic_u16(
    dst_border: &mut [u16],
    dim: usize,
    w: usize,
    h: usize,
    src_at: impl Fn(usize, usize) -> u64,
) -> RappResult {
    if dim < w + 1 || dst_border.len() < dim * (h + 1) {
        return Err(RappError::BadSize);
    }
    crate::state::check_initialized()?;
    for y in 0..h {
        for x in 0..w {
            let above = dst_border[y * dim + (x + 1)] as u64;
            let left = dst_border[(y + 1) * dim + x] as u64;
            let diag = dst_border[y * dim + x] as u64;
            let v = src_at(x, y) + left + above - diag;
            dst_border[(y + 1) * dim + (x + 1)] = v as u16;
        }
    }
    Ok(())
}

/// Same recurrence with a `u8` destination, for callers who know
/// `w*h*255` can't overflow a byte (e.g. summing over a single row or
/// a small tile).
fn integral_generic_u8(
    dst_border: &mut [u8],
    dim: usize,
    w: usize,
    h: usize,
    src_at: impl Fn(usize, usize) -> u64,
) -> RappResult {
    if dim < w + 1 || dst_border.len() < dim * (h + 1) {
        return Err(RappError::BadSize);
    }
    crate::state::check_initialized()?;
    for y in 0..h {
        for x in 0..w {
            let above = dst_border[y * dim + (x + 1)] as u64;
            let left = dst_border[(y + 1) * dim + x] as u64;
            let diag = dst_border[y * dim + x] as u64;
            let v = src_at(x, y) + left + above - diag;
            dst_border[(y + 1) * dim + (x + 1)] = v as u8;
        }
    }
    Ok(())
}

/// Rectangle sum via inclusion-exclusion on an already-built integral
/// image, `[x0,x1) x [y0,y1)` in source coordinates (`dst` indices are
/// offset by the `+1` border).
pub fn rect_sum_u32(dst_border: &[u32], dim: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> u64 {
    let a = dst_border[y1 * dim + x1] as u64;
    let b = dst_border[y0 * dim + x1] as u64;
    let c = dst_border[y1 * dim + x0] as u64;
    let d = dst_border[y0 * dim + x0] as u64;
    a - b - c + d
}
