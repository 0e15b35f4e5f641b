//! Log-doubling separable decomposition for rectangle structuring
//! elements, and the residual generic point-set dilation/erosion used
//! for the shapes that have no separable decomposition.
//!
//! Every routine here operates on *padded raw rasters*: `dim` bytes
//! per row, `rows` rows, bit 0 of row 0 is the top-left corner of the
//! padded region (not the logical image — the caller pads with the
//! [`RasterOp::Or`]/[`RasterOp::And`] identity element, zero for
//! dilation and one for erosion, before calling in). This keeps every
//! coordinate here non-negative, at the cost of pushing the
//! pad-vs-logical-origin bookkeeping up to [`super`].

use crate::backend::Native;
use crate::bitblt::{bitblt_row, RasterOp};

fn combine_byte(d: u8, s: u8, op: RasterOp) -> u8 {
    match op {
        RasterOp::Or => d | s,
        RasterOp::And => d & s,
        _ => unreachable!("rect decomposition only ever combines with Or or And"),
    }
}

/// Doubles window coverage from 1 up to `target_len` along one row,
/// `rightward` reading higher bit positions into lower ones (or the
/// reverse), by repeatedly OR/AND-ing a buffer against a
/// constant-distance bitblt of itself — the same head/body/tail
/// machinery the plain bitblit uses, just invoked as a combinator
/// instead of a copy.
fn extend_window_1d(buf: &mut [u8], tmp: &mut [u8], dim: usize, rows: usize, total_bits: usize, target_len: usize, rightward: bool, op: RasterOp) {
    let mut len = 1usize;
    while len < target_len {
        let step = len.min(target_len - len);
        tmp.copy_from_slice(buf);
        let width = total_bits.saturating_sub(step);
        for r in 0..rows {
            let row_start = r * dim;
            let buf_row = &mut buf[row_start..row_start + dim];
            let tmp_row = &tmp[row_start..row_start + dim];
            // SAFETY: both rows are `dim` bytes, comfortably within the
            // padded raster's own row capacity; `width` never exceeds
            // `total_bits - step <= dim*8 - step`, so the body loop's
            // full-word reads/writes stay inside each row's bytes.
            unsafe {
                if rightward {
                    bitblt_row::<Native>(buf_row, 0, tmp_row, step, width, op);
                } else {
                    bitblt_row::<Native>(buf_row, step, tmp_row, 0, width, op);
                }
            }
        }
        len += step;
    }
}

fn extend_window_1d_vert(buf: &mut [u8], tmp: &mut [u8], dim: usize, rows: usize, target_len: usize, downward: bool, op: RasterOp) {
    let mut len = 1usize;
    while len < target_len {
        let step = len.min(target_len - len);
        tmp.copy_from_slice(buf);
        if downward {
            for r in 0..rows.saturating_sub(step) {
                let (bs, ss) = (r * dim, (r + step) * dim);
                for i in 0..dim {
                    buf[bs + i] = combine_byte(buf[bs + i], tmp[ss + i], op);
                }
            }
        } else {
            for r in step..rows {
                let (bs, ss) = (r * dim, (r - step) * dim);
                for i in 0..dim {
                    buf[bs + i] = combine_byte(buf[bs + i], tmp[ss + i], op);
                }
            }
        }
        len += step;
    }
}

/// Windowed OR/AND of length `k`, anchored at `(k-1)/2`, along the bit
/// axis. `scratch` must hold at least `3 * dim * rows` bytes.
pub(crate) fn windowed_combine_horiz(
    dst: &mut [u8],
    src: &[u8],
    scratch: &mut [u8],
    dim: usize,
    rows: usize,
    total_bits: usize,
    k: usize,
    op: RasterOp,
) {
    if k <= 1 {
        dst.copy_from_slice(src);
        return;
    }
    let anchor = (k - 1) / 2;
    let right = k - 1 - anchor;
    let left = anchor;
    let footprint = dim * rows;
    let (a_buf, rest) = scratch.split_at_mut(footprint);
    let (b_buf, t_buf) = rest.split_at_mut(footprint);
    a_buf.copy_from_slice(src);
    b_buf.copy_from_slice(src);
    if right > 0 {
        extend_window_1d(a_buf, t_buf, dim, rows, total_bits, right + 1, true, op);
    }
    if left > 0 {
        extend_window_1d(b_buf, t_buf, dim, rows, total_bits, left + 1, false, op);
    }
    for i in 0..footprint {
        dst[i] = combine_byte(a_buf[i], b_buf[i], op);
    }
}

/// Windowed OR/AND of length `k`, anchored at `(k-1)/2`, along rows.
/// `scratch` must hold at least `3 * dim * rows` bytes.
pub(crate) fn windowed_combine_vert(
    dst: &mut [u8],
    src: &[u8],
    scratch: &mut [u8],
    dim: usize,
    rows: usize,
    k: usize,
    op: RasterOp,
) {
    if k <= 1 {
        dst.copy_from_slice(src);
        return;
    }
    let anchor = (k - 1) / 2;
    let down = k - 1 - anchor;
    let up = anchor;
    let footprint = dim * rows;
    let (a_buf, rest) = scratch.split_at_mut(footprint);
    let (b_buf, t_buf) = rest.split_at_mut(footprint);
    a_buf.copy_from_slice(src);
    b_buf.copy_from_slice(src);
    if down > 0 {
        extend_window_1d_vert(a_buf, t_buf, dim, rows, down + 1, true, op);
    }
    if up > 0 {
        extend_window_1d_vert(b_buf, t_buf, dim, rows, up + 1, false, op);
    }
    for i in 0..footprint {
        dst[i] = combine_byte(a_buf[i], b_buf[i], op);
    }
}

/// Separable rectangle dilation/erosion: a horizontal windowed combine
/// of width `se_w` followed by a vertical one of height `se_h`.
/// `scratch` must hold at least `4 * dim * rows` bytes (the horizontal
/// pass's output doubles as the vertical pass's input).
pub(crate) fn rect_combine(
    dst: &mut [u8],
    src: &[u8],
    scratch: &mut [u8],
    dim: usize,
    rows: usize,
    total_bits: usize,
    se_w: usize,
    se_h: usize,
    op: RasterOp,
) {
    let footprint = dim * rows;
    let (horiz_out, rest) = scratch.split_at_mut(footprint);
    windowed_combine_horiz(horiz_out, src, rest, dim, rows, total_bits, se_w, op);
    windowed_combine_vert(dst, horiz_out, rest, dim, rows, se_h, op);
}

/// Dilation/erosion by an explicit point list, used for shapes with no
/// separable decomposition (diamond, octagon, disc). `dst[p] =
/// combine_{s in se} src[p+s]`, each term independently read out of
/// `src` via a constant-shift bitblit and combined into `dst`.
pub(crate) fn generic_combine(
    dst: &mut [u8],
    src: &[u8],
    dim: usize,
    rows: usize,
    total_bits: usize,
    se: &[(i32, i32)],
    op: RasterOp,
) {
    dst.copy_from_slice(src);
    for &(dx, dy) in se {
        if (dx, dy) == (0, 0) {
            continue;
        }
        for r in 0..rows {
            let sr = r as i32 + dy;
            if sr < 0 || sr as usize >= rows {
                continue;
            }
            let dst_row = &mut dst[r * dim..r * dim + dim];
            let src_row = &src[sr as usize * dim..sr as usize * dim + dim];
            // SAFETY: `dim` bytes is each row's full capacity; the
            // widths below never exceed `total_bits - |dx|`.
            unsafe {
                if dx >= 0 {
                    let dxu = dx as usize;
                    let width = total_bits.saturating_sub(dxu);
                    bitblt_row::<Native>(dst_row, 0, src_row, dxu, width, op);
                } else {
                    let dxu = (-dx) as usize;
                    let width = total_bits.saturating_sub(dxu);
                    bitblt_row::<Native>(dst_row, dxu, src_row, 0, width, op);
                }
            }
        }
    }
}
