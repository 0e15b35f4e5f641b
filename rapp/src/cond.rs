//! Conditional gather and scatter: packing the pixels selected by a
//! binary map into a dense buffer, and the inverse. This is the
//! primitive behind every "apply an operation only at the
//! neighbourhood of a set of points" pattern — run a normal kernel on
//! the packed row, then scatter the result back.

use crate::error::{RappError, RappResult};
use crate::image::{check_disjoint, BinImageMut, BinImageView, U8ImageMut, U8ImageView};
use crate::pixel::{pixel_get_bin, pixel_get_u8, pixel_set_bin, pixel_set_u8};

/// Copies `src[x,y]` into `pack[k]` (incrementing `k`) wherever
/// `map[x,y]` is set, left to right. Returns the final `k`: the
/// population of `map`, exactly (never approximate).
pub fn gather_u8(pack: &mut [u8], src: &U8ImageView, map: &BinImageView) -> RappResult<usize> {
    if src.w != map.w || src.h != map.h {
        return Err(RappError::BadSize);
    }
    let (pp, _) = (pack.as_ptr(), pack.len());
    let (sp, slen) = src.footprint();
    let (mp, mlen) = map.footprint();
    check_disjoint(pp, pack.len(), sp, slen)?;
    check_disjoint(pp, pack.len(), mp, mlen)?;
    crate::state::check_initialized()?;

    let moff = map.off as usize;
    let mut k = 0usize;
    for y in 0..src.h {
        let srow = src.row(y);
        let mrow = map.row(y).to_vec();
        for x in 0..src.w {
            if pixel_get_bin(&mrow, moff + x) != 0 {
                if k >= pack.len() {
                    return Err(RappError::BadSize);
                }
                pack[k] = pixel_get_u8(srow, x);
                k += 1;
            }
        }
    }
    Ok(k)
}

/// Inverse of [`gather_u8`]: writes `pack[k]` (incrementing `k`) into
/// `dst[x,y]` wherever `map[x,y]` is set; positions where `map` is
/// clear are left unchanged. Returns the final `k`.
pub fn scatter_u8(dst: &mut U8ImageMut, pack: &[u8], map: &BinImageView) -> RappResult<usize> {
    if dst.w != map.w || dst.h != map.h {
        return Err(RappError::BadSize);
    }
    let (dp, dlen) = dst.footprint();
    let (mp, mlen) = map.footprint();
    check_disjoint(dp, dlen, pack.as_ptr(), pack.len())?;
    check_disjoint(dp, dlen, mp, mlen)?;
    crate::state::check_initialized()?;

    let moff = map.off as usize;
    let mut k = 0usize;
    for y in 0..dst.h {
        let mrow = map.row(y).to_vec();
        for x in 0..dst.w {
            if pixel_get_bin(&mrow, moff + x) != 0 {
                if k >= pack.len() {
                    return Err(RappError::BadSize);
                }
                let v = pack[k];
                k += 1;
                pixel_set_u8(dst.row_mut(y), x, v);
            }
        }
    }
    Ok(k)
}

/// Binary gather: the bit-packed analogue of [`gather_u8`], producing
/// a linear run of bits (packed 8 per byte, starting at bit 0) rather
/// than one byte per selected pixel.
pub fn gather_bin(pack: &mut [u8], src: &BinImageView, map: &BinImageView) -> RappResult<usize> {
    if src.w != map.w || src.h != map.h {
        return Err(RappError::BadSize);
    }
    let (sp, slen) = src.footprint();
    let (mp, mlen) = map.footprint();
    check_disjoint(pack.as_ptr(), pack.len(), sp, slen)?;
    check_disjoint(pack.as_ptr(), pack.len(), mp, mlen)?;
    crate::state::check_initialized()?;

    let soff = src.off as usize;
    let moff = map.off as usize;
    let mut k = 0usize;
    for y in 0..src.h {
        let srow = src.row(y).to_vec();
        let mrow = map.row(y).to_vec();
        for x in 0..src.w {
            if pixel_get_bin(&mrow, moff + x) != 0 {
                if k / 8 >= pack.len() {
                    return Err(RappError::BadSize);
                }
                let v = pixel_get_bin(&srow, soff + x);
                crate::pixel::pixel_set_bin(pack, k, v);
                k += 1;
            }
        }
    }
    Ok(k)
}

/// Inverse of [`gather_bin`]: reads successive bits out of `pack`
/// (packed 8 per byte, starting at bit 0) into `dst[x,y]` wherever
/// `map[x,y]` is set; positions where `map` is clear are left
/// unchanged. Returns the final `k`.
pub fn scatter_bin(dst: &mut BinImageMut, pack: &[u8], map: &BinImageView) -> RappResult<usize> {
    if dst.w != map.w || dst.h != map.h {
        return Err(RappError::BadSize);
    }
    let (dp, dlen) = dst.footprint();
    let (mp, mlen) = map.footprint();
    check_disjoint(dp, dlen, pack.as_ptr(), pack.len())?;
    check_disjoint(dp, dlen, mp, mlen)?;
    crate::state::check_initialized()?;

    let doff = dst.off as usize;
    let moff = map.off as usize;
    let mut k = 0usize;
    for y in 0..dst.h {
        let mrow = map.row(y).to_vec();
        for x in 0..dst.w {
            if pixel_get_bin(&mrow, moff + x) != 0 {
                if k / 8 >= pack.len() {
                    return Err(RappError::BadSize);
                }
                let v = pixel_get_bin(pack, k);
                k += 1;
                pixel_set_bin(dst.row_mut(y), doff + x, v);
            }
        }
    }
    Ok(k)
}

/// Gathers `n` consecutive rows of `src` (centred on `y0`, one row per
/// output row of `pack`) through the same `map` row, for neighbourhood
/// operations that need several aligned rows of context around each
/// selected column. `pack` must be a `U8ImageMut` with `h == n`.
pub fn gather_rows_u8(pack: &mut U8ImageMut, src: &U8ImageView, map: &BinImageView, y0: usize, n: usize) -> RappResult {
    if y0 + n > src.h {
        return Err(RappError::BadSize);
    }
    if pack.h != n {
        return Err(RappError::BadSize);
    }
    let (pp, plen) = pack.footprint();
    let (sp, slen) = src.footprint();
    let (mp, mlen) = map.footprint();
    check_disjoint(pp, plen, sp, slen)?;
    check_disjoint(pp, plen, mp, mlen)?;
    crate::state::check_initialized()?;

    let moff = map.off as usize;
    let mrow = map.row(y0).to_vec();
    for (row_idx, sy) in (y0..y0 + n).enumerate() {
        let srow = src.row(sy);
        let mut k = 0usize;
        for x in 0..src.w {
            if pixel_get_bin(&mrow, moff + x) != 0 {
                if k >= pack.w {
                    return Err(RappError::BadSize);
                }
                let v = pixel_get_u8(srow, x);
                pixel_set_u8(pack.row_mut(row_idx), k, v);
                k += 1;
            }
        }
    }
    Ok(())
}

/// Builds the residual map `m01` used by the neighbourhood-dilation
/// map protocol: `m01[k] = m1[x]` for each `x` where `m0[x]` is set,
/// in gather order — i.e. gathering `m1` through `m0` itself, so that
/// after running an operation on the `m0`-gathered row the caller can
/// tell which of those packed columns came from padding (`m0` set but
/// `m1` clear) versus genuine data.
pub fn residual_map(m01: &mut [u8], m0: &BinImageView, m1: &BinImageView) -> RappResult<usize> {
    if m0.w != m1.w || m0.h != m1.h {
        return Err(RappError::BadSize);
    }
    let (p0, l0) = m0.footprint();
    let (p1, l1) = m1.footprint();
    check_disjoint(m01.as_ptr(), m01.len(), p0, l0)?;
    check_disjoint(m01.as_ptr(), m01.len(), p1, l1)?;
    crate::state::check_initialized()?;

    let off0 = m0.off as usize;
    let off1 = m1.off as usize;
    let mut k = 0usize;
    for y in 0..m0.h {
        let row0 = m0.row(y).to_vec();
        let row1 = m1.row(y).to_vec();
        for x in 0..m0.w {
            if pixel_get_bin(&row0, off0 + x) != 0 {
                if k / 8 >= m01.len() {
                    return Err(RappError::BadSize);
                }
                let v = pixel_get_bin(&row1, off1 + x);
                crate::pixel::pixel_set_bin(m01, k, v);
                k += 1;
            }
        }
    }
    Ok(k)
}
