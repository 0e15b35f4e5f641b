//! Right-angle rotation. No resampling is involved — every destination
//! pixel maps to exactly one source pixel — so this family needs no
//! floating-point intermediate, consistent with the no-float-pixel-data
//! design constraint the rest of the crate follows.

use crate::error::{RappError, RappResult};
use crate::image::{check_disjoint, BinImageMut, BinImageView, U8ImageMut, U8ImageView};
use crate::pixel::{pixel_get_bin, pixel_get_u8, pixel_set_bin, pixel_set_u8};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Cw90,
    Ccw90,
    Rot180,
}

pub fn rotate_u8(dst: &mut U8ImageMut, src: &U8ImageView, rot: Rotation) -> RappResult {
    let (expect_w, expect_h) = match rot {
        Rotation::Cw90 | Rotation::Ccw90 => (src.h, src.w),
        Rotation::Rot180 => (src.w, src.h),
    };
    if dst.w != expect_w || dst.h != expect_h {
        return Err(RappError::BadSize);
    }
    let (dp, dlen) = dst.footprint();
    let (sp, slen) = src.footprint();
    check_disjoint(dp, dlen, sp, slen)?;
    crate::state::check_initialized()?;

    for sy in 0..src.h {
        let srow = src.row(sy).to_vec();
        for sx in 0..src.w {
            let v = pixel_get_u8(&srow, sx);
            let (dx, dy) = map_coords(rot, sx, sy, src.w, src.h);
            pixel_set_u8(dst.row_mut(dy), dx, v);
        }
    }
    Ok(())
}

pub fn rotate_bin(dst: &mut BinImageMut, src: &BinImageView, rot: Rotation) -> RappResult {
    let (expect_w, expect_h) = match rot {
        Rotation::Cw90 | Rotation::Ccw90 => (src.h, src.w),
        Rotation::Rot180 => (src.w, src.h),
    };
    if dst.w != expect_w || dst.h != expect_h {
        return Err(RappError::BadSize);
    }
    let (dp, dlen) = dst.footprint();
    let (sp, slen) = src.footprint();
    check_disjoint(dp, dlen, sp, slen)?;
    crate::state::check_initialized()?;

    let doff = dst.off as usize;
    let soff = src.off as usize;
    for sy in 0..src.h {
        let srow = src.row(sy).to_vec();
        for sx in 0..src.w {
            let v = pixel_get_bin(&srow, soff + sx);
            let (dx, dy) = map_coords(rot, sx, sy, src.w, src.h);
            pixel_set_bin(dst.row_mut(dy), doff + dx, v);
        }
    }
    Ok(())
}

fn map_coords(rot: Rotation, sx: usize, sy: usize, w: usize, h: usize) -> (usize, usize) {
    match rot {
        // Column sx of the source becomes a row, read bottom-to-top.
        Rotation::Cw90 => (h - 1 - sy, sx),
        Rotation::Ccw90 => (sy, w - 1 - sx),
        Rotation::Rot180 => (w - 1 - sx, h - 1 - sy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::{align, AlignedBuffer};

    #[test]
    fn cw90_of_2x1_is_1x2() {
        // [A B] rotated 90 clockwise -> column [A; B] read top-to-bottom
        // with A now on top (it was the leftmost/first column).
        crate::state::initialize();
        let dim = align(2);
        let mut sbuf = AlignedBuffer::new(dim).unwrap();
        sbuf.as_mut_slice()[..2].copy_from_slice(&[1, 2]);
        let src = U8ImageView::new(sbuf.as_slice(), dim, 2, 1).unwrap();

        let ddim = align(1);
        let mut dbuf = AlignedBuffer::new(ddim * 2).unwrap();
        let mut dst = U8ImageMut::new(dbuf.as_mut_slice(), ddim, 1, 2).unwrap();
        rotate_u8(&mut dst, &src, Rotation::Cw90).unwrap();
        assert_eq!(dst.row(0)[0], 1);
        assert_eq!(dst.row(1)[0], 2);
    }

    #[test]
    fn rot180_twice_is_identity() {
        crate::state::initialize();
        let dim = align(4);
        let mut sbuf = AlignedBuffer::new(dim * 3).unwrap();
        for (i, b) in sbuf.as_mut_slice().iter_mut().enumerate() {
            *b = i as u8;
        }
        let original = sbuf.as_slice().to_vec();
        let src = U8ImageView::new(sbuf.as_slice(), dim, 4, 3).unwrap();
        let mut dbuf = AlignedBuffer::new(dim * 3).unwrap();
        let mut dst = U8ImageMut::new(dbuf.as_mut_slice(), dim, 4, 3).unwrap();
        rotate_u8(&mut dst, &src, Rotation::Rot180).unwrap();
        drop(src);
        let mut back = AlignedBuffer::new(dim * 3).unwrap();
        {
            let dst_view = dst.as_view();
            let mut back_img = U8ImageMut::new(back.as_mut_slice(), dim, 4, 3).unwrap();
            rotate_u8(&mut back_img, &dst_view, Rotation::Rot180).unwrap();
        }
        assert_eq!(back.as_slice(), &original[..]);
    }
}
