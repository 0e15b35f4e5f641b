//! Pixelwise arithmetic on 8-bit rasters: the "easy" operations whose
//! definition reduces to one [`Backend`] call per vector stride.

use crate::backend::{Backend, Native};
use crate::error::RappResult;
use crate::image::{check_disjoint, U8ImageMut, U8ImageView};

fn validate_pair(dst: &U8ImageMut, src: &U8ImageView) -> RappResult {
    if dst.w != src.w || dst.h != src.h {
        return Err(crate::error::RappError::BadSize);
    }
    let (dp, dlen) = dst.footprint();
    let (sp, slen) = src.footprint();
    check_disjoint(dp, dlen, sp, slen)?;
    crate::state::check_initialized()
}

fn for_each_row(dst: &mut U8ImageMut, src: &U8ImageView, mut f: impl FnMut(&mut [u8], &[u8])) {
    for y in 0..dst.h {
        let drow = dst.row_mut(y);
        let srow = src.row(y);
        f(drow, srow);
    }
}

/// Drives one vector-wide pass across a row, applying `word_op` to
/// whole aligned words and `tail_op` (byte granular) to the remainder.
fn drive_row<B: Backend>(
    drow: &mut [u8],
    srow: &[u8],
    word_op: impl Fn(B::V, B::V) -> B::V,
    tail_op: impl Fn(u8, u8) -> u8,
) {
    let dim = drow.len().min(srow.len());
    let words = dim / B::VSIZE;
    let mut dptr = drow.as_mut_ptr();
    let mut sptr = srow.as_ptr();
    for _ in 0..words {
        unsafe {
            let d = B::load(dptr);
            let s = B::load(sptr);
            B::store(dptr, word_op(d, s));
            dptr = dptr.add(B::VSIZE);
            sptr = sptr.add(B::VSIZE);
        }
    }
    for i in (words * B::VSIZE)..dim {
        drow[i] = tail_op(drow[i], srow[i]);
    }
}

/// `dst[p] = saturating_add(dst[p], src[p])`.
pub fn pixop_add_u8(dst: &mut U8ImageMut, src: &U8ImageView) -> RappResult {
    validate_pair(dst, src)?;
    for_each_row(dst, src, |drow, srow| {
        drive_row::<Native>(
            drow,
            srow,
            Native::add_sat,
            |d, s| d.saturating_add(s),
        )
    });
    Ok(())
}

/// `dst[p] = saturating_sub(dst[p], src[p])`.
pub fn pixop_sub_u8(dst: &mut U8ImageMut, src: &U8ImageView) -> RappResult {
    validate_pair(dst, src)?;
    for_each_row(dst, src, |drow, srow| {
        drive_row::<Native>(
            drow,
            srow,
            Native::sub_sat,
            |d, s| d.saturating_sub(s),
        )
    });
    Ok(())
}

/// `dst[p] = |dst[p] - src[p]|` byte-wise.
pub fn pixop_absdiff_u8(dst: &mut U8ImageMut, src: &U8ImageView) -> RappResult {
    validate_pair(dst, src)?;
    for_each_row(dst, src, |drow, srow| {
        drive_row::<Native>(drow, srow, Native::absdiff, |d, s| d.abs_diff(s))
    });
    Ok(())
}

/// In-place absolute value around the signed-bias-128 convention:
/// `dst[p] = 128 + |dst[p] - 128|`. Used on the bias-128 seed example
/// where an all-`0x80` (signed zero) image stays all-zero under this
/// transform.
pub fn pixop_abs_u8(img: &mut U8ImageMut) -> RappResult {
    crate::state::check_initialized()?;
    for y in 0..img.h {
        let dim = img.dim;
        let row = img.row_mut(y);
        let words = dim / Native::VSIZE;
        let mut ptr = row.as_mut_ptr();
        for _ in 0..words {
            unsafe {
                let v = Native::load(ptr);
                Native::store(ptr, Native::absbias(v));
                ptr = ptr.add(Native::VSIZE);
            }
        }
        for b in row.iter_mut().skip(words * Native::VSIZE) {
            *b = 128u8.wrapping_add((*b as i16 - 128).unsigned_abs() as u8);
        }
    }
    Ok(())
}

/// Toggles the signed-bias-128 representation: `dst[p] = 255 - dst[p]`
/// is NOT this operation; flipping the bias is `dst[p] = dst[p] XOR
/// 0x80`, i.e. negate the signed value without touching magnitude
/// ordering the way `NOT` would.
pub fn pixop_flip_u8(img: &mut U8ImageMut) -> RappResult {
    crate::state::check_initialized()?;
    for y in 0..img.h {
        let dim = img.dim;
        let row = img.row_mut(y);
        let words = dim / Native::VSIZE;
        let mut ptr = row.as_mut_ptr();
        let flip = Native::splat(0x80);
        for _ in 0..words {
            unsafe {
                let v = Native::load(ptr);
                Native::store(ptr, Native::xor(v, flip));
                ptr = ptr.add(Native::VSIZE);
            }
        }
        for b in row.iter_mut().skip(words * Native::VSIZE) {
            *b ^= 0x80;
        }
    }
    Ok(())
}
