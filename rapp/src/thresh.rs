//! Thresholding: the u8-to-binary reduction every segmentation pipeline
//! starts from.

use crate::error::{RappError, RappResult};
use crate::image::{check_disjoint, row_bytes, BinImageMut, U8ImageView};
use crate::pixel::{pixel_get_u8, pixel_set_bin};

/// `dst[p] = src[p] >= threshold`.
pub fn thresh_gt_u8(dst: &mut BinImageMut, src: &U8ImageView, threshold: u8) -> RappResult {
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
            pixel_set_bin(drow, off + x, (v >= threshold) as u8);
        }
    }
    Ok(())
}

/// Two-sided band threshold: `dst[p] = lo <= src[p] <= hi`.
pub fn thresh_band_u8(
    dst: &mut BinImageMut,
    src: &U8ImageView,
    lo: u8,
    hi: u8,
) -> RappResult {
    if lo > hi {
        return Err(RappError::BadParameter);
    }
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
            pixel_set_bin(drow, off + x, (v >= lo && v <= hi) as u8);
        }
    }
    Ok(())
}

/// Minimum row-byte count a destination for a `w`-pixel-wide
/// thresholded row needs, for callers sizing their own buffers.
pub const fn thresh_dst_row_bytes(w: usize) -> usize {
    row_bytes(w, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::{align, AlignedBuffer};

    #[test]
    fn threshold_splits_at_value() {
        crate::state::initialize();
        let dim = align(8);
        let mut sbuf = AlignedBuffer::new(dim).unwrap();
        sbuf.as_mut_slice()[..8].copy_from_slice(&[0, 10, 20, 30, 40, 50, 60, 70]);
        let mut dbuf = AlignedBuffer::new(dim).unwrap();
        let src = U8ImageView::new(sbuf.as_slice(), dim, 8, 1).unwrap();
        let mut dst = BinImageMut::new(dbuf.as_mut_slice(), dim, 0, 8, 1).unwrap();
        thresh_gt_u8(&mut dst, &src, 30).unwrap();
        let row = dst.row(0);
        let got: Vec<u8> = (0..8).map(|x| crate::pixel::pixel_get_bin(row, x)).collect();
        assert_eq!(got, vec![0, 0, 0, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn band_threshold_keeps_interior() {
        crate::state::initialize();
        let dim = align(8);
        let mut sbuf = AlignedBuffer::new(dim).unwrap();
        sbuf.as_mut_slice()[..8].copy_from_slice(&[0, 10, 20, 30, 40, 50, 60, 70]);
        let mut dbuf = AlignedBuffer::new(dim).unwrap();
        let src = U8ImageView::new(sbuf.as_slice(), dim, 8, 1).unwrap();
        let mut dst = BinImageMut::new(dbuf.as_mut_slice(), dim, 0, 8, 1).unwrap();
        thresh_band_u8(&mut dst, &src, 20, 50).unwrap();
        let row = dst.row(0);
        let got: Vec<u8> = (0..8).map(|x| crate::pixel::pixel_get_bin(row, x)).collect();
        assert_eq!(got, vec![0, 0, 1, 1, 1, 1, 0, 0]);
    }
}
