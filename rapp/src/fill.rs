//! Connected-components seed fill, using an explicit stack the caller
//! supplies rather than the call stack — consistent with the
//! no-dynamic-allocation-inside-compute rule the rest of the crate's
//! compute kernels follow.
//!
//! This extracts the foreground component of `map` that contains the
//! seed into `dst`: `dst` is cleared first, then every pixel of `map`
//! reachable from the seed through a chain of set pixels is set in
//! `dst`. The seed itself must be set in `map`, or the call fails —
//! this is a component-extraction primitive, not a paint-bucket.

use crate::error::{RappError, RappResult};
use crate::image::{check_disjoint, BinImageMut, BinImageView};
use crate::pixel::{pixel_get_bin, pixel_set_bin};

const DIRS4: [(i32, i32); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];
const DIRS8: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Minimum `(x,y)` stack capacity fill needs in the worst case: one
/// entry per pixel, since every pixel is pushed and popped at most
/// once.
pub fn worksize_fill(w: usize, h: usize) -> usize {
    w * h
}

fn fill_generic(dst: &mut BinImageMut, map: &BinImageView, x0: usize, y0: usize, stack: &mut [(usize, usize)], dirs: &[(i32, i32)]) -> RappResult<usize> {
    if dst.w != map.w || dst.h != map.h {
        return Err(RappError::BadSize);
    }
    if x0 >= map.w || y0 >= map.h {
        return Err(RappError::BadParameter);
    }
    if stack.len() < worksize_fill(dst.w, dst.h) {
        return Err(RappError::WorkBufferTooSmall);
    }
    let (dp, dlen) = dst.footprint();
    let (mp, mlen) = map.footprint();
    check_disjoint(dp, dlen, mp, mlen)?;
    crate::state::check_initialized()?;

    let doff = dst.off as usize;
    let moff = map.off as usize;

    for y in 0..dst.h {
        let row = dst.row_mut(y);
        row.fill(0);
    }

    if pixel_get_bin(map.row(y0), moff + x0) == 0 {
        return Err(RappError::BadParameter);
    }

    let mut sp = 0usize;
    stack[sp] = (x0, y0);
    sp += 1;
    pixel_set_bin(dst.row_mut(y0), doff + x0, 1);
    let mut filled = 1usize;

    while sp > 0 {
        sp -= 1;
        let (x, y) = stack[sp];
        for &(dx, dy) in dirs {
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            if nx < 0 || ny < 0 || nx as usize >= dst.w || ny as usize >= dst.h {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            let settable = pixel_get_bin(map.row(ny), moff + nx) != 0 && pixel_get_bin(dst.row(ny), doff + nx) == 0;
            if settable {
                pixel_set_bin(dst.row_mut(ny), doff + nx, 1);
                stack[sp] = (nx, ny);
                sp += 1;
                filled += 1;
            }
        }
    }
    Ok(filled)
}

/// Extracts into `dst` the 4-connected component of set pixels in
/// `map` that contains `(x0,y0)`. The seed must already be set in
/// `map`. Returns the number of pixels filled.
pub fn fill_4conn_bin(dst: &mut BinImageMut, map: &BinImageView, x0: usize, y0: usize, stack: &mut [(usize, usize)]) -> RappResult<usize> {
    fill_generic(dst, map, x0, y0, stack, &DIRS4)
}

pub fn fill_8conn_bin(dst: &mut BinImageMut, map: &BinImageView, x0: usize, y0: usize, stack: &mut [(usize, usize)]) -> RappResult<usize> {
    fill_generic(dst, map, x0, y0, stack, &DIRS8)
}
